//! Read-only summary of a trained registry.

use std::fmt;

use serde::Serialize;

use crate::cfr::error::{CfrError, Result};
use crate::cfr::storage::Registry;
use crate::games::kuhn::{Card, History, NUM_ACTIONS};

/// Average strategy at one information set.
#[derive(Debug, Clone, Serialize)]
pub struct InfoSetStrategy {
    /// Display key, e.g. `"0 pb"`.
    pub key: String,
    /// Card held by the acting player.
    pub card: Card,
    /// Public history at the decision.
    pub history: History,
    /// Average probability of `[pass, bet]`.
    pub strategy: [f64; NUM_ACTIONS],
}

impl fmt::Display for InfoSetStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6} [{:.2}, {:.2}]",
            self.key, self.strategy[0], self.strategy[1]
        )
    }
}

/// Expected values and average strategies for both players.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    /// Expected game value for player 1.
    pub player1_value: f64,
    /// Expected game value for player 2.
    pub player2_value: f64,
    /// Player 1 information sets (even history length), in key order.
    pub player1: Vec<InfoSetStrategy>,
    /// Player 2 information sets (odd history length), in key order.
    pub player2: Vec<InfoSetStrategy>,
}

impl StrategyReport {
    /// Summarize `registry`, given player 1's expected game value.
    ///
    /// Nodes that were never reached have no average strategy and are left out.
    pub fn from_registry(registry: &Registry, expected_value: f64) -> Self {
        let mut player1 = Vec::new();
        let mut player2 = Vec::new();

        for (key, node) in registry.iter_sorted() {
            let strategy = match node.average_strategy() {
                Ok(strategy) => strategy,
                Err(e) => {
                    log::warn!("skipping info set in report: {}", e);
                    continue;
                }
            };
            let entry = InfoSetStrategy {
                key: key.to_string(),
                card: key.card,
                history: key.history,
                strategy,
            };
            if key.player() == 0 {
                player1.push(entry);
            } else {
                player2.push(entry);
            }
        }

        Self {
            player1_value: expected_value,
            player2_value: -expected_value,
            player1,
            player2,
        }
    }

    /// Look up an information set by its display key, e.g. `"1 b"`.
    pub fn find(&self, key: &str) -> Option<&InfoSetStrategy> {
        self.player1
            .iter()
            .chain(self.player2.iter())
            .find(|entry| entry.key == key)
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CfrError::Serialization(e.to_string()))
    }
}

impl fmt::Display for StrategyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "player 1 expected value: {}", self.player1_value)?;
        writeln!(f, "player 2 expected value: {}", self.player2_value)?;
        writeln!(f)?;
        writeln!(f, "player 1 strategies:")?;
        for entry in &self.player1 {
            writeln!(f, "{}", entry)?;
        }
        writeln!(f)?;
        writeln!(f, "player 2 strategies:")?;
        for entry in &self.player2 {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}
