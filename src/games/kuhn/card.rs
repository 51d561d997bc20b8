//! Cards, decks and dealing for Kuhn Poker.
//!
//! - `Card`: one of three ranks, no suits
//! - `Deck`: a permutation of the three cards
//! - `Dealer`: source of a fresh deck each training iteration

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;

use crate::cfr::error::{CfrError, Result};

/// Number of distinct ranks in the deck.
pub const NUM_CARDS: usize = 3;

/// A Kuhn Poker card. Higher rank wins at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Card(u8);

impl Card {
    /// Jack (rank 0).
    pub const JACK: Card = Card(0);
    /// Queen (rank 1).
    pub const QUEEN: Card = Card(1);
    /// King (rank 2).
    pub const KING: Card = Card(2);

    /// All cards in rank order.
    pub const ALL: [Card; NUM_CARDS] = [Card::JACK, Card::QUEEN, Card::KING];

    /// Create a card from its rank (0-2).
    pub fn new(rank: u8) -> Result<Self> {
        if (rank as usize) < NUM_CARDS {
            Ok(Self(rank))
        } else {
            Err(CfrError::InvalidCard(rank))
        }
    }

    /// Get the card's rank.
    #[inline]
    pub fn rank(&self) -> u8 {
        self.0
    }

    /// Get card name for display.
    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "Jack",
            1 => "Queen",
            _ => "King",
        }
    }
}

impl TryFrom<u8> for Card {
    type Error = CfrError;

    fn try_from(rank: u8) -> Result<Self> {
        Card::new(rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A permutation of the three cards.
///
/// Index 0 is dealt to player 1, index 1 to player 2, index 2 stays in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    cards: [Card; NUM_CARDS],
}

impl Default for Deck {
    fn default() -> Self {
        Self { cards: Card::ALL }
    }
}

impl Deck {
    /// Create a deck in rank order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from explicit ranks, e.g. `[2, 0, 1]` deals King vs Jack.
    pub fn from_ranks(ranks: [u8; NUM_CARDS]) -> Result<Self> {
        let mut cards = Card::ALL;
        for (i, &rank) in ranks.iter().enumerate() {
            if ranks[..i].contains(&rank) {
                return Err(CfrError::DuplicateCard(rank));
            }
            cards[i] = Card::new(rank)?;
        }
        Ok(Self { cards })
    }

    /// Shuffle in place with a uniform random permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Card held by `player` (0 = player 1, 1 = player 2).
    #[inline]
    pub fn hole_card(&self, player: usize) -> Card {
        debug_assert!(player < 2, "player must be 0 or 1");
        self.cards[player]
    }

    /// All three cards, including the undealt one.
    pub fn cards(&self) -> &[Card; NUM_CARDS] {
        &self.cards
    }

    /// Every ordered (player 1, player 2) deal, six in total.
    pub fn all_deals() -> impl Iterator<Item = (Card, Card)> {
        Card::ALL.into_iter().flat_map(|first| {
            Card::ALL
                .into_iter()
                .filter(move |&second| second != first)
                .map(move |second| (first, second))
        })
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P1:{} P2:{}",
            self.cards[0].name(),
            self.cards[1].name()
        )
    }
}

/// Source of a fresh deck for each training iteration.
pub trait Dealer {
    /// Produce the deck for the next iteration.
    fn deal(&mut self) -> Deck;
}

/// Deals by shuffling with a random number generator.
#[derive(Debug, Clone)]
pub struct ShuffleDealer<R: Rng = StdRng> {
    rng: R,
    deck: Deck,
}

impl ShuffleDealer<StdRng> {
    /// Create a dealer from an optional seed; `None` seeds from entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> ShuffleDealer<R> {
    /// Create a dealer around the given generator.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            deck: Deck::new(),
        }
    }
}

impl<R: Rng> Dealer for ShuffleDealer<R> {
    fn deal(&mut self) -> Deck {
        self.deck.shuffle(&mut self.rng);
        self.deck
    }
}

/// Replays a fixed sequence of decks, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedDealer {
    decks: Vec<Deck>,
    next: usize,
}

impl FixedDealer {
    /// Create a dealer over `decks`. An empty list deals the rank-ordered deck.
    pub fn new(decks: Vec<Deck>) -> Self {
        Self { decks, next: 0 }
    }
}

impl Dealer for FixedDealer {
    fn deal(&mut self) -> Deck {
        if self.decks.is_empty() {
            return Deck::new();
        }
        let deck = self.decks[self.next % self.decks.len()];
        self.next += 1;
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        assert_eq!(Card::new(0).unwrap(), Card::JACK);
        assert_eq!(Card::new(2).unwrap(), Card::KING);
        assert_eq!(Card::new(3), Err(CfrError::InvalidCard(3)));
        assert_eq!(Card::try_from(1u8).unwrap().name(), "Queen");
        assert!(Card::KING > Card::QUEEN && Card::QUEEN > Card::JACK);
    }

    #[test]
    fn test_deck_from_ranks() {
        let deck = Deck::from_ranks([2, 0, 1]).unwrap();
        assert_eq!(deck.hole_card(0), Card::KING);
        assert_eq!(deck.hole_card(1), Card::JACK);
        assert_eq!(deck.to_string(), "P1:King P2:Jack");

        assert_eq!(Deck::from_ranks([1, 1, 0]), Err(CfrError::DuplicateCard(1)));
        assert_eq!(Deck::from_ranks([0, 1, 5]), Err(CfrError::InvalidCard(5)));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut dealer = ShuffleDealer::from_seed(Some(42));
        for _ in 0..100 {
            let deck = dealer.deal();
            let mut ranks: Vec<u8> = deck.cards().iter().map(Card::rank).collect();
            ranks.sort_unstable();
            assert_eq!(ranks, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_seeded_dealer_is_reproducible() {
        let mut a = ShuffleDealer::from_seed(Some(7));
        let mut b = ShuffleDealer::from_seed(Some(7));
        for _ in 0..50 {
            assert_eq!(a.deal(), b.deal());
        }
    }

    #[test]
    fn test_shuffle_reaches_every_deal() {
        let mut dealer = ShuffleDealer::from_seed(Some(3));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let deck = dealer.deal();
            seen.insert((deck.hole_card(0), deck.hole_card(1)));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_fixed_dealer_cycles() {
        let first = Deck::from_ranks([0, 1, 2]).unwrap();
        let second = Deck::from_ranks([2, 1, 0]).unwrap();
        let mut dealer = FixedDealer::new(vec![first, second]);
        assert_eq!(dealer.deal(), first);
        assert_eq!(dealer.deal(), second);
        assert_eq!(dealer.deal(), first);

        let mut empty = FixedDealer::new(Vec::new());
        assert_eq!(empty.deal(), Deck::new());
    }

    #[test]
    fn test_all_deals() {
        let deals: Vec<_> = Deck::all_deals().collect();
        assert_eq!(deals.len(), 6);
        assert!(deals.iter().all(|(a, b)| a != b));
    }
}
