//! # Kuhn CFR
//!
//! A Counterfactual Regret Minimization (CFR) solver that computes
//! approximate Nash equilibrium strategies for Kuhn Poker.
//!
//! ## Quick Start
//!
//! ```
//! use kuhn_cfr::cfr::{CfrTrainer, TrainConfig};
//!
//! let mut trainer = CfrTrainer::new(TrainConfig::default().with_seed(7)).unwrap();
//! trainer.train().unwrap();
//! print!("{}", trainer.report());
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: Trainer, information set registry and reporting
//! - [`games`]: Kuhn Poker cards, dealing and betting rules
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 CfrTrainer                   │
//! │  - deal (Dealer)    - recursive traversal    │
//! │  - regret matching  - exploitability         │
//! └──────────────────────────────────────────────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────┐         ┌──────────────┐
//!   │  Registry   │         │  Kuhn rules  │
//!   │ InfoKey→Node│         │ terminal/pay │
//!   └─────────────┘         └──────────────┘
//! ```

#![warn(missing_docs)]

/// CFR trainer, registry and reporting.
pub mod cfr;

/// Game implementations.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use cfr::{CfrError, CfrTrainer, Registry, StrategyReport, TrainConfig, TrainStats};
pub use games::kuhn::{Action, Card, Deck, History};
