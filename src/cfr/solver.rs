//! Chance-sampled Counterfactual Regret Minimization trainer.
//!
//! Each iteration deals one hand, walks the full betting tree for that deal,
//! and then updates every node's strategy from its accumulated regret.
//! Strategies stay fixed during the walk, so the update must only run after
//! the traversal returns.

use std::time::Instant;

use crate::cfr::config::{TrainConfig, TrainStats};
use crate::cfr::error::Result;
use crate::cfr::node::{uniform, InfoKey};
use crate::cfr::report::StrategyReport;
use crate::cfr::storage::Registry;
use crate::games::kuhn::{
    is_terminal, reward, Action, Card, Dealer, Deck, History, ShuffleDealer, NUM_ACTIONS,
    NUM_CARDS,
};

/// Number of distinct information sets in Kuhn Poker (3 cards x 4 decision histories).
pub const NUM_INFO_SETS: usize = 12;

/// The CFR trainer.
///
/// Owns the information set registry, so independent trainers never share
/// state.
///
/// # Example
/// ```
/// use kuhn_cfr::cfr::{CfrTrainer, TrainConfig};
///
/// let mut trainer = CfrTrainer::new(TrainConfig::default().with_seed(1)).unwrap();
/// trainer.train().unwrap();
/// assert_eq!(trainer.iteration(), 2000);
/// println!("{}", trainer.report());
/// ```
pub struct CfrTrainer<D: Dealer = ShuffleDealer> {
    /// Configuration for the trainer.
    config: TrainConfig,

    /// Regret and strategy state per information set.
    registry: Registry,

    /// Source of deals.
    dealer: D,

    /// Completed iterations.
    iteration: u64,

    /// Sum of player 1's root utility over all iterations.
    utility_sum: f64,

    /// Statistics tracking.
    stats: TrainStats,
}

impl CfrTrainer {
    /// Create a trainer that shuffles with a generator seeded from `config.seed`.
    pub fn new(config: TrainConfig) -> Result<Self> {
        let dealer = ShuffleDealer::from_seed(config.seed);
        Self::with_dealer(config, dealer)
    }
}

impl<D: Dealer> CfrTrainer<D> {
    /// Create a trainer that draws deals from `dealer`.
    pub fn with_dealer(config: TrainConfig, dealer: D) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: Registry::with_capacity(NUM_INFO_SETS),
            dealer,
            iteration: 0,
            utility_sum: 0.0,
            stats: TrainStats::new(),
        })
    }

    /// Run a single iteration and return player 1's root utility.
    pub fn run_iteration(&mut self) -> Result<f64> {
        let deck = self.dealer.deal();
        let utility = self.cfr(&deck, History::root(), 1.0, 1.0)?;

        self.iteration += 1;
        self.utility_sum += utility;
        log::debug!(
            "iteration {} ({}): root utility {:.4}",
            self.iteration,
            deck,
            utility
        );

        self.registry.update_strategies();
        Ok(utility)
    }

    /// Train for `config.iterations` iterations.
    pub fn train(&mut self) -> Result<&TrainStats> {
        self.train_with_callback(|_| {})
    }

    /// Train for `config.iterations` iterations, calling `callback` every
    /// `config.progress_interval` iterations.
    pub fn train_with_callback<F>(&mut self, mut callback: F) -> Result<&TrainStats>
    where
        F: FnMut(&TrainStats),
    {
        let iterations = self.config.iterations;
        let interval = self.config.progress_interval;
        let base_seconds = self.stats.elapsed_seconds;
        let start_time = Instant::now();

        log::info!(
            "training {} iterations (seed: {:?})",
            iterations,
            self.config.seed
        );

        for i in 0..iterations {
            self.run_iteration()?;

            if (i + 1) % interval == 0 {
                self.refresh_stats(base_seconds, start_time);
                callback(&self.stats);
            }
        }

        self.refresh_stats(base_seconds, start_time);
        log::info!(
            "finished {} iterations in {:.3}s, {} info sets, expected value {:.4}",
            self.stats.iterations,
            self.stats.elapsed_seconds,
            self.stats.info_sets,
            self.stats.expected_game_value
        );

        Ok(&self.stats)
    }

    fn refresh_stats(&mut self, base_seconds: f64, start_time: Instant) {
        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.registry.len();
        self.stats.elapsed_seconds = base_seconds + start_time.elapsed().as_secs_f64();
        self.stats.expected_game_value = self.expected_game_value();
        self.stats.update_rate();
    }

    /// Recursive CFR traversal for one deal.
    ///
    /// Returns the expected utility of `history` for the player to act there.
    /// `pr_1` and `pr_2` are the probabilities that player 1 and player 2
    /// play to reach `history`.
    fn cfr(&mut self, deck: &Deck, history: History, pr_1: f64, pr_2: f64) -> Result<f64> {
        let player = history.player();
        let card = deck.hole_card(player);

        if is_terminal(&history) {
            return Ok(reward(&history, card, deck.hole_card(1 - player))? as f64);
        }

        let strategy = self.registry.get_or_create(card, history).strategy;

        // Counterfactual utility per action, pass then bet.
        let mut action_utils = [0.0; NUM_ACTIONS];
        for action in Action::ALL {
            let a = action.index();
            let next = history.push(action)?;
            // Zero-sum: the child's value is from the opponent's side.
            action_utils[a] = if player == 0 {
                -self.cfr(deck, next, pr_1 * strategy[a], pr_2)?
            } else {
                -self.cfr(deck, next, pr_1, pr_2 * strategy[a])?
            };
        }

        let node_util: f64 = action_utils
            .iter()
            .zip(strategy.iter())
            .map(|(&u, &s)| u * s)
            .sum();

        let (own_reach, opponent_reach) = if player == 0 {
            (pr_1, pr_2)
        } else {
            (pr_2, pr_1)
        };

        let node = self.registry.get_or_create(card, history);
        node.reach_pr += own_reach;
        for (regret_sum, &u) in node.regret_sum.iter_mut().zip(action_utils.iter()) {
            *regret_sum += opponent_reach * (u - node_util);
        }

        Ok(node_util)
    }

    /// Expected utility of `history` for the player to act there, under the
    /// current strategies and a fixed deal. Does not modify any node.
    ///
    /// Information sets not yet in the registry play uniform, as a fresh
    /// node would.
    pub fn evaluate(&self, deck: &Deck, history: History) -> Result<f64> {
        let player = history.player();
        let card = deck.hole_card(player);

        if is_terminal(&history) {
            return Ok(reward(&history, card, deck.hole_card(1 - player))? as f64);
        }

        let strategy = self
            .registry
            .get(&InfoKey::new(card, history))
            .map_or_else(uniform, |node| node.strategy);

        let mut value = 0.0;
        for action in Action::ALL {
            value -= strategy[action.index()] * self.evaluate(deck, history.push(action)?)?;
        }
        Ok(value)
    }

    /// Exploitability of the average strategy profile.
    ///
    /// Mean over both players of what a best response gains against the
    /// other player's average strategy, computed exactly over all six deals.
    /// Zero at a Nash equilibrium.
    pub fn exploitability(&self) -> Result<f64> {
        let mut total = 0.0;
        for br_player in 0..2 {
            for card in Card::ALL {
                let mut weights = [0.0; NUM_CARDS];
                for other in Card::ALL.into_iter().filter(|&c| c != card) {
                    weights[other.rank() as usize] = 1.0 / 6.0;
                }
                total += self.best_response(br_player, card, History::root(), weights)?;
            }
        }
        Ok(total / 2.0)
    }

    /// Best response value for `br_player` holding `card` at `history`.
    ///
    /// `weights[c]` is the chance probability of the opponent holding `c`
    /// times the opponent's reach probability under its average strategy.
    /// The result is unnormalized.
    fn best_response(
        &self,
        br_player: usize,
        card: Card,
        history: History,
        weights: [f64; NUM_CARDS],
    ) -> Result<f64> {
        let acting = history.player();

        if is_terminal(&history) {
            let mut value = 0.0;
            for opponent in Card::ALL {
                let w = weights[opponent.rank() as usize];
                if w == 0.0 {
                    continue;
                }
                let payoff = if acting == br_player {
                    reward(&history, card, opponent)?
                } else {
                    -reward(&history, opponent, card)?
                };
                value += w * payoff as f64;
            }
            return Ok(value);
        }

        if acting == br_player {
            let mut best = f64::NEG_INFINITY;
            for action in Action::ALL {
                let value = self.best_response(br_player, card, history.push(action)?, weights)?;
                best = best.max(value);
            }
            Ok(best)
        } else {
            let mut value = 0.0;
            for action in Action::ALL {
                let mut next_weights = weights;
                for opponent in Card::ALL {
                    let strategy = self.average_or_uniform(opponent, history);
                    next_weights[opponent.rank() as usize] *= strategy[action.index()];
                }
                value +=
                    self.best_response(br_player, card, history.push(action)?, next_weights)?;
            }
            Ok(value)
        }
    }

    fn average_or_uniform(&self, card: Card, history: History) -> [f64; NUM_ACTIONS] {
        self.registry
            .get(&InfoKey::new(card, history))
            .and_then(|node| node.average_strategy().ok())
            .unwrap_or_else(uniform)
    }

    /// Mean root utility for player 1 over all iterations run so far.
    pub fn expected_game_value(&self) -> f64 {
        if self.iteration == 0 {
            0.0
        } else {
            self.utility_sum / self.iteration as f64
        }
    }

    /// Average strategies and expected values for both players.
    pub fn report(&self) -> StrategyReport {
        StrategyReport::from_registry(&self.registry, self.expected_game_value())
    }

    /// Get the current iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Get reference to the registry for analysis.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get current statistics.
    pub fn stats(&self) -> &TrainStats {
        &self.stats
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Reset the trainer to its initial state. The dealer keeps its position.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.iteration = 0;
        self.utility_sum = 0.0;
        self.stats = TrainStats::new();
    }
}
