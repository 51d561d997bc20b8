//! Information set registry for the CFR trainer.
//!
//! The registry owns every [`Node`] discovered during a training run. Nodes
//! are created on first visit and live until the registry is dropped.

use rustc_hash::FxHashMap;

use crate::cfr::node::{InfoKey, Node};
use crate::games::kuhn::{Card, History};

/// Map from information set key to its regret matching state.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    nodes: FxHashMap<InfoKey, Node>,
}

impl Registry {
    /// Create new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Get the node for `(card, history)`, inserting a fresh one if absent.
    ///
    /// Repeated calls with the same key return the same node.
    pub fn get_or_create(&mut self, card: Card, history: History) -> &mut Node {
        let key = InfoKey::new(card, history);
        self.nodes.entry(key).or_insert_with(|| {
            log::trace!("new info set {}", key);
            Node::new(key)
        })
    }

    /// Look up an existing node.
    pub fn get(&self, key: &InfoKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Get the number of information sets stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no information set has been visited yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Run the end-of-iteration strategy update on every node.
    pub fn update_strategies(&mut self) {
        for node in self.nodes.values_mut() {
            log::trace!(
                "update {}: reach={} strategy={:?} regret_sum={:?}",
                node.key(),
                node.reach_pr,
                node.strategy,
                node.regret_sum
            );
            node.update_strategy();
        }
    }

    /// All nodes ordered by key.
    pub fn iter_sorted(&self) -> Vec<(&InfoKey, &Node)> {
        let mut entries: Vec<_> = self.nodes.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Remove all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(s: &str) -> History {
        History::parse(s).unwrap()
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut registry = Registry::new();
        registry.get_or_create(Card::QUEEN, h("p")).regret_sum[1] = 4.0;

        let again = registry.get_or_create(Card::QUEEN, h("p"));
        assert_eq!(again.regret_sum, [0.0, 4.0]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_cards_are_separate_info_sets() {
        let mut registry = Registry::new();
        registry.get_or_create(Card::JACK, h("b")).reach_pr = 1.0;
        registry.get_or_create(Card::KING, h("b"));
        assert_eq!(registry.len(), 2);

        let king = registry.get(&InfoKey::new(Card::KING, h("b"))).unwrap();
        assert_eq!(king.reach_pr, 0.0);
    }

    #[test]
    fn test_iter_sorted_is_deterministic() {
        let mut registry = Registry::with_capacity(12);
        for (card, history) in [
            (Card::KING, "pb"),
            (Card::JACK, "p"),
            (Card::KING, ""),
            (Card::JACK, ""),
            (Card::QUEEN, "b"),
        ] {
            registry.get_or_create(card, h(history));
        }
        let keys: Vec<String> = registry
            .iter_sorted()
            .into_iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(keys, vec!["0 ", "0 p", "1 b", "2 ", "2 pb"]);
    }

    #[test]
    fn test_update_strategies_touches_every_node() {
        let mut registry = Registry::new();
        registry.get_or_create(Card::JACK, h("")).reach_pr = 1.0;
        registry.get_or_create(Card::KING, h("p")).reach_pr = 0.5;
        registry.update_strategies();

        for (_, node) in registry.iter_sorted() {
            assert_eq!(node.reach_pr, 0.0);
            assert!(node.reach_pr_sum > 0.0);
        }

        registry.clear();
        assert!(registry.is_empty());
    }
}
