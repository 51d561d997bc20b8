//! Game definitions for the CFR solver.
//!
//! - [`kuhn`]: Kuhn Poker, a 3-card poker game with a known Nash equilibrium

pub mod kuhn;
