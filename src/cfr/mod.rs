//! CFR (Counterfactual Regret Minimization) solver module.
//!
//! This module implements chance-sampled CFR for Kuhn Poker.
//!
//! # Overview
//!
//! CFR is an iterative algorithm that converges to Nash equilibrium by:
//! 1. Computing counterfactual regret for each action at each information set
//! 2. Updating strategies to minimize regret over time
//! 3. Averaging strategies across iterations to converge to equilibrium
//!
//! Each training iteration deals one hand, walks the whole betting tree for
//! that deal, then updates every information set's strategy at once.
//!
//! # Example
//!
//! ```
//! use kuhn_cfr::cfr::{CfrTrainer, TrainConfig};
//!
//! let config = TrainConfig::default().with_seed(42).with_iterations(10_000);
//! let mut trainer = CfrTrainer::new(config).unwrap();
//!
//! let stats = trainer.train().unwrap();
//! println!("Trained {} info sets in {:.2}s", stats.info_sets, stats.elapsed_seconds);
//!
//! let report = trainer.report();
//! let jack = report.find("0 ").unwrap();
//! println!("Jack bets {:.3}", jack.strategy[1]);
//! ```
//!
//! # Theory
//!
//! **Regret**: The difference between the value of an action and the value of the current strategy.
//! ```text
//! Regret(a) = Value(a) - Value(current_strategy)
//! ```
//!
//! **Regret Matching**: Set strategy proportional to positive regrets.
//! ```text
//! Strategy(a) = max(0, Regret(a)) / sum(max(0, Regret(a')))
//! ```
//!
//! Here the clamp is written back into the cumulative regret, so negative
//! regret is discarded each iteration rather than carried forward.
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Neller, T., Lanctot, M. "An Introduction to Counterfactual Regret Minimization" (2013)

pub mod config;
pub mod error;
pub mod node;
pub mod report;
pub mod solver;
pub mod storage;

// Re-export main types for convenient access
pub use config::{ConfigError, TrainConfig, TrainStats, DEFAULT_ITERATIONS};
pub use error::{CfrError, Result};
pub use node::{InfoKey, Node};
pub use report::{InfoSetStrategy, StrategyReport};
pub use solver::{CfrTrainer, NUM_INFO_SETS};
pub use storage::Registry;
