//! Per-information-set regret matching state.

use std::fmt;

use crate::cfr::error::{CfrError, Result};
use crate::games::kuhn::{Card, History, NUM_ACTIONS};

/// Key of an information set: the acting player's card and the public history.
///
/// Ordered by card, then by history string, so `"0 "` < `"0 b"` < `"0 p"` < `"0 pb"` < `"1 "`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoKey {
    /// Card held by the player to act.
    pub card: Card,
    /// Actions taken so far.
    pub history: History,
}

impl InfoKey {
    /// Create a key from a card and history.
    pub fn new(card: Card, history: History) -> Self {
        Self { card, history }
    }

    /// Player owning this information set (0 = player 1, 1 = player 2).
    pub fn player(&self) -> usize {
        self.history.player()
    }
}

impl fmt::Display for InfoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.card, self.history)
    }
}

/// Regret and strategy accumulators for one information set.
///
/// `strategy` is fixed for the duration of an iteration's tree walk and is
/// only recomputed by [`Node::update_strategy`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: InfoKey,
    /// Cumulative counterfactual regret per action.
    pub regret_sum: [f64; NUM_ACTIONS],
    /// Cumulative reach-weighted strategy per action.
    pub strategy_sum: [f64; NUM_ACTIONS],
    /// Current iteration strategy. Always a probability distribution.
    pub strategy: [f64; NUM_ACTIONS],
    /// Reach probability accumulated during the current iteration.
    pub reach_pr: f64,
    /// Sum of `reach_pr` over all completed iterations.
    pub reach_pr_sum: f64,
}

impl Node {
    /// Create a node with zero accumulators and a uniform strategy.
    pub fn new(key: InfoKey) -> Self {
        Self {
            key,
            regret_sum: [0.0; NUM_ACTIONS],
            strategy_sum: [0.0; NUM_ACTIONS],
            strategy: uniform(),
            reach_pr: 0.0,
            reach_pr_sum: 0.0,
        }
    }

    /// The information set this node belongs to.
    pub fn key(&self) -> &InfoKey {
        &self.key
    }

    /// Fold the current strategy into the average and recompute it from regret.
    ///
    /// Negative regret is clamped to zero in `regret_sum` itself, so it does
    /// not carry into later iterations.
    pub fn update_strategy(&mut self) {
        for (sum, &p) in self.strategy_sum.iter_mut().zip(self.strategy.iter()) {
            *sum += self.reach_pr * p;
        }
        self.reach_pr_sum += self.reach_pr;
        self.strategy = self.regret_matching();
        self.reach_pr = 0.0;
    }

    /// Strategy proportional to positive regret, uniform if there is none.
    fn regret_matching(&mut self) -> [f64; NUM_ACTIONS] {
        for regret in self.regret_sum.iter_mut() {
            *regret = regret.max(0.0);
        }
        let total: f64 = self.regret_sum.iter().sum();
        if total > 0.0 {
            self.regret_sum.map(|r| r / total)
        } else {
            uniform()
        }
    }

    /// Time-averaged strategy, the Nash equilibrium approximation.
    pub fn average_strategy(&self) -> Result<[f64; NUM_ACTIONS]> {
        if self.reach_pr_sum <= 0.0 {
            return Err(CfrError::DivisionByZero {
                key: self.key.to_string(),
            });
        }
        let strategy = self.strategy_sum.map(|s| s / self.reach_pr_sum);
        // Re-normalize against floating point drift
        let total: f64 = strategy.iter().sum();
        if total > 0.0 {
            Ok(strategy.map(|p| p / total))
        } else {
            Ok(uniform())
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average_strategy() {
            Ok([pass, bet]) => write!(f, "{:<6} [{:.2}, {:.2}]", self.key.to_string(), pass, bet),
            Err(_) => write!(f, "{:<6} [unreached]", self.key.to_string()),
        }
    }
}

/// Uniform distribution over the actions.
#[inline]
pub(crate) fn uniform() -> [f64; NUM_ACTIONS] {
    [1.0 / NUM_ACTIONS as f64; NUM_ACTIONS]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn node(card: Card, history: &str) -> Node {
        Node::new(InfoKey::new(card, History::parse(history).unwrap()))
    }

    #[test]
    fn test_new_node_is_uniform() {
        let n = node(Card::JACK, "");
        assert_eq!(n.strategy, [0.5, 0.5]);
        assert_eq!(n.regret_sum, [0.0, 0.0]);
        assert_eq!(n.strategy_sum, [0.0, 0.0]);
        assert_eq!(n.reach_pr, 0.0);
        assert_eq!(n.reach_pr_sum, 0.0);
    }

    #[test]
    fn test_update_accumulates_then_matches_regret() {
        let mut n = node(Card::KING, "");
        n.reach_pr = 0.8;
        n.regret_sum = [1.0, 3.0];
        n.update_strategy();

        // Uses the strategy from before the update
        assert_abs_diff_eq!(n.strategy_sum[0], 0.4);
        assert_abs_diff_eq!(n.strategy_sum[1], 0.4);
        assert_abs_diff_eq!(n.reach_pr_sum, 0.8);
        assert_abs_diff_eq!(n.strategy[0], 0.25);
        assert_abs_diff_eq!(n.strategy[1], 0.75);
        assert_eq!(n.reach_pr, 0.0);
    }

    #[test]
    fn test_negative_regret_is_clamped_in_place() {
        let mut n = node(Card::QUEEN, "b");
        n.regret_sum = [-2.0, 0.5];
        n.update_strategy();
        assert_eq!(n.regret_sum, [0.0, 0.5]);
        assert_eq!(n.strategy, [0.0, 1.0]);

        // The discarded negative regret does not come back
        n.regret_sum[1] -= 1.0;
        n.update_strategy();
        assert_eq!(n.regret_sum, [0.0, 0.0]);
        assert_eq!(n.strategy, [0.5, 0.5]);
    }

    #[test]
    fn test_average_strategy_normalizes() {
        let mut n = node(Card::JACK, "p");
        n.strategy_sum = [1.0, 2.0];
        n.reach_pr_sum = 3.0;
        let avg = n.average_strategy().unwrap();
        assert_abs_diff_eq!(avg[0], 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(avg[1], 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(n.to_string(), "0 p    [0.33, 0.67]");
    }

    #[test]
    fn test_average_strategy_without_reach_fails() {
        let n = node(Card::KING, "pb");
        assert_eq!(
            n.average_strategy(),
            Err(CfrError::DivisionByZero {
                key: "2 pb".to_string()
            })
        );
    }

    #[test]
    fn test_key_order_and_display() {
        let parse = |c, h: &str| InfoKey::new(c, History::parse(h).unwrap());
        let mut keys = vec![
            parse(Card::QUEEN, ""),
            parse(Card::JACK, "pb"),
            parse(Card::JACK, "p"),
            parse(Card::JACK, "b"),
            parse(Card::JACK, ""),
        ];
        keys.sort();
        let shown: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(shown, vec!["0 ", "0 b", "0 p", "0 pb", "1 "]);
        assert_eq!(keys[3].player(), 0);
        assert_eq!(keys[2].player(), 1);
    }
}
