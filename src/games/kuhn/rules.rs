//! Betting rules for Kuhn Poker: actions, histories, terminal test and payoffs.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use super::card::Card;
use crate::cfr::error::{CfrError, Result};

/// Number of actions available at every decision point.
pub const NUM_ACTIONS: usize = 2;

/// Longest possible action history (pass, bet, call/fold).
pub const MAX_HISTORY: usize = 3;

/// Actions in Kuhn Poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pass (check if no bet, fold if facing bet)
    Pass,
    /// Bet (or call if facing bet)
    Bet,
}

impl Action {
    /// Actions in traversal order. The position is the action's index.
    pub const ALL: [Action; NUM_ACTIONS] = [Action::Pass, Action::Bet];

    /// Index into per-action arrays: pass = 0, bet = 1.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Action::Pass => 0,
            Action::Bet => 1,
        }
    }

    /// Single-character history symbol.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Action::Pass => 'p',
            Action::Bet => 'b',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pass => write!(f, "Pass"),
            Action::Bet => write!(f, "Bet"),
        }
    }
}

/// Public action history, at most three actions long.
///
/// Player 1 acts on even lengths, player 2 on odd lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct History {
    actions: [Action; MAX_HISTORY],
    len: u8,
}

impl Default for History {
    fn default() -> Self {
        Self::root()
    }
}

impl History {
    /// The empty history.
    pub const fn root() -> Self {
        Self {
            actions: [Action::Pass; MAX_HISTORY],
            len: 0,
        }
    }

    /// Parse a history such as `"pb"`.
    pub fn parse(s: &str) -> Result<Self> {
        s.chars().try_fold(Self::root(), |history, c| {
            let action = match c {
                'p' => Action::Pass,
                'b' => Action::Bet,
                _ => return Err(CfrError::InvalidHistory(s.to_string())),
            };
            history.push(action)
        })
    }

    /// Return this history extended by `action`.
    pub fn push(self, action: Action) -> Result<Self> {
        if self.len() == MAX_HISTORY {
            return Err(CfrError::InvalidHistory(format!("{}{}", self, action.symbol())));
        }
        let mut next = self;
        next.actions[self.len()] = action;
        next.len += 1;
        Ok(next)
    }

    /// Actions taken so far.
    pub fn actions(&self) -> &[Action] {
        &self.actions[..self.len()]
    }

    /// Number of actions taken.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True at the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Player to act: 0 for player 1, 1 for player 2.
    #[inline]
    pub fn player(&self) -> usize {
        self.len() % 2
    }

    /// The last two actions, if there are at least two.
    fn tail(&self) -> Option<(Action, Action)> {
        match self.actions() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Every decision and terminal history reachable from the root.
    pub fn all() -> Vec<History> {
        let mut out = vec![Self::root()];
        let mut frontier = vec![Self::root()];
        while let Some(history) = frontier.pop() {
            if is_terminal(&history) {
                continue;
            }
            for action in Action::ALL {
                if let Ok(child) = history.push(action) {
                    out.push(child);
                    frontier.push(child);
                }
            }
        }
        out
    }
}

impl Ord for History {
    /// Lexicographic on the string form, so `"b" < "p" < "pb"`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.actions()
            .iter()
            .map(|a| a.symbol())
            .cmp(other.actions().iter().map(|a| a.symbol()))
    }
}

impl PartialOrd for History {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in self.actions() {
            write!(f, "{}", action.symbol())?;
        }
        Ok(())
    }
}

impl Serialize for History {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check if the history ends the hand.
///
/// Terminal histories end in `pp` (showdown), `bb` (called bet) or `bp` (fold).
pub fn is_terminal(history: &History) -> bool {
    matches!(
        history.tail(),
        Some((Action::Pass, Action::Pass))
            | Some((Action::Bet, Action::Bet))
            | Some((Action::Bet, Action::Pass))
    )
}

/// Payoff of a terminal history for the player to act at that history.
///
/// `player_card` belongs to the player whose turn it would be, `opponent_card`
/// to the other one. Utility ranges from -2 (lost ante and bet) to +2.
pub fn reward(history: &History, player_card: Card, opponent_card: Card) -> Result<i32> {
    if !(2..=MAX_HISTORY).contains(&history.len()) {
        return Err(CfrError::InvalidHistory(history.to_string()));
    }
    let showdown = |stake: i32| {
        if player_card > opponent_card {
            stake
        } else {
            -stake
        }
    };
    match history.tail() {
        // Both checked: higher card takes the ante.
        Some((Action::Pass, Action::Pass)) => Ok(showdown(1)),
        // Opponent folded to our bet.
        Some((Action::Bet, Action::Pass)) => Ok(1),
        // Bet called: ante plus bet.
        Some((Action::Bet, Action::Bet)) => Ok(showdown(2)),
        _ => Err(CfrError::InvalidHistory(history.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::card::Deck;

    fn h(s: &str) -> History {
        History::parse(s).unwrap()
    }

    #[test]
    fn test_history_parse_and_display() {
        assert_eq!(h("").to_string(), "");
        assert_eq!(h("pb").to_string(), "pb");
        assert_eq!(h("pbb").actions(), &[Action::Pass, Action::Bet, Action::Bet]);
        assert!(History::parse("px").is_err());
        assert_eq!(
            History::parse("pbbp"),
            Err(CfrError::InvalidHistory("pbbp".to_string()))
        );
    }

    #[test]
    fn test_history_player_alternation() {
        assert_eq!(h("").player(), 0);
        assert_eq!(h("p").player(), 1);
        assert_eq!(h("b").player(), 1);
        assert_eq!(h("pb").player(), 0);
    }

    #[test]
    fn test_history_order_matches_strings() {
        let mut histories = vec![h("pb"), h("p"), h(""), h("b")];
        histories.sort();
        let names: Vec<String> = histories.iter().map(|x| x.to_string()).collect();
        assert_eq!(names, vec!["", "b", "p", "pb"]);
    }

    #[test]
    fn test_terminal_histories() {
        for s in ["pp", "bp", "bb", "pbp", "pbb"] {
            assert!(is_terminal(&h(s)), "{} should be terminal", s);
        }
        for s in ["", "p", "b", "pb"] {
            assert!(!is_terminal(&h(s)), "{} should not be terminal", s);
        }
    }

    #[test]
    fn test_showdown_after_checks() {
        // Queen beats Jack
        assert_eq!(reward(&h("pp"), Card::QUEEN, Card::JACK).unwrap(), 1);
        assert_eq!(reward(&h("pp"), Card::JACK, Card::QUEEN).unwrap(), -1);
        // King beats Queen
        assert_eq!(reward(&h("pp"), Card::KING, Card::QUEEN).unwrap(), 1);
        assert_eq!(reward(&h("pp"), Card::QUEEN, Card::KING).unwrap(), -1);
    }

    #[test]
    fn test_fold_pays_bettor() {
        for (a, b) in Deck::all_deals() {
            assert_eq!(reward(&h("bp"), a, b).unwrap(), 1);
            assert_eq!(reward(&h("pbp"), a, b).unwrap(), 1);
        }
    }

    #[test]
    fn test_called_bet() {
        assert_eq!(reward(&h("bb"), Card::JACK, Card::KING).unwrap(), -2);
        assert_eq!(reward(&h("bb"), Card::KING, Card::JACK).unwrap(), 2);
        assert_eq!(reward(&h("pbb"), Card::QUEEN, Card::KING).unwrap(), -2);
    }

    #[test]
    fn test_invalid_reward_histories() {
        for s in ["", "p", "b", "pb"] {
            assert_eq!(
                reward(&h(s), Card::KING, Card::JACK),
                Err(CfrError::InvalidHistory(s.to_string()))
            );
        }
    }

    #[test]
    fn test_terminal_and_reward_agree() {
        let histories = History::all();
        assert_eq!(histories.len(), 9);
        for history in histories {
            let defined = reward(&history, Card::KING, Card::QUEEN).is_ok();
            assert_eq!(defined, is_terminal(&history), "history {:?}", history.to_string());
        }
    }

    #[test]
    fn test_push_past_three_fails() {
        let full = h("pbb");
        assert!(full.push(Action::Pass).is_err());
        assert_eq!(h("pb").push(Action::Pass).unwrap(), h("pbp"));
    }
}
