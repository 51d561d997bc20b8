//! Configuration options for the CFR trainer.
//!
//! This module provides the training configuration and the statistics the
//! trainer reports back after a run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Iteration count used when none is given.
pub const DEFAULT_ITERATIONS: u64 = 2000;

/// Configuration for the CFR trainer.
///
/// # Example
/// ```
/// use kuhn_cfr::cfr::TrainConfig;
///
/// let config = TrainConfig::default().with_seed(7);
/// assert_eq!(config.iterations, 2000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Number of training iterations run by `train()`. Must be at least 1.
    pub iterations: u64,

    /// Random seed for reproducibility.
    ///
    /// If set, deals are drawn from a seeded generator and two runs with the
    /// same seed produce identical registries. If `None`, entropy is used.
    pub seed: Option<u64>,

    /// How often (in iterations) `train_with_callback` reports progress.
    pub progress_interval: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            progress_interval: 1000,
        }
    }
}

impl TrainConfig {
    /// Create a new TrainConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set iteration count.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set progress reporting interval.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        Ok(())
    }
}

/// Errors that can occur when validating training configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Training needs at least one iteration.
    #[error("Iteration count must be at least 1")]
    ZeroIterations,
    /// Progress interval of zero would never fire.
    #[error("Progress interval must be at least 1")]
    ZeroProgressInterval,
}

/// Statistics tracked during CFR training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of unique information sets discovered.
    pub info_sets: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,

    /// Mean root utility for player 1 over all iterations so far.
    pub expected_game_value: f64,
}

impl TrainStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}
