use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::game::{Card, SpiderSuitMode, Suit, ACE, KING};

/// Seeded card source. Cards are drawn from the top (the end of the list).
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Standard 52-card deck in suit-major, rank-ascending order. Without a
    /// seed the shuffle is seeded from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_cards(standard_cards(), seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// 104 cards: each suit of `suit_mode` repeated until eight full suits
    /// are present.
    pub fn spider(suit_mode: SpiderSuitMode, seed: Option<u64>) -> Self {
        let mut cards = Vec::with_capacity(104);
        for _ in 0..suit_mode.copies_per_card() {
            for &suit in suit_mode.suits() {
                cards.extend((ACE..=KING).map(|rank| Card::new(suit, rank, false)));
            }
        }
        Self::from_cards(cards, seed)
    }

    pub fn from_cards(cards: Vec<Card>, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        Self {
            cards,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fisher-Yates: from the last index down to 1, swap with a uniform
    /// index in `[0, i]`.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draws up to `count` cards, fewer when the deck runs out.
    pub fn draw_multiple(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        let mut drawn = self.cards.split_off(self.cards.len() - take);
        drawn.reverse();
        drawn
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

fn standard_cards() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in ACE..=KING {
            cards.push(Card::new(suit, rank, false));
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_deck_enumerates_suit_major_rank_ascending() {
        let deck = Deck::with_seed(1);
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.cards()[0], Card::new(Suit::Hearts, 1, false));
        assert_eq!(deck.cards()[12], Card::new(Suit::Hearts, 13, false));
        assert_eq!(deck.cards()[13], Card::new(Suit::Diamonds, 1, false));
        assert_eq!(deck.cards()[51], Card::new(Suit::Spades, 13, false));
    }

    #[test]
    fn same_seed_draws_same_sequence() {
        let mut a = Deck::with_seed(99);
        let mut b = Deck::with_seed(99);
        a.shuffle();
        b.shuffle();

        let drawn_a: Vec<Card> = std::iter::from_fn(|| a.draw()).collect();
        let drawn_b: Vec<Card> = std::iter::from_fn(|| b.draw()).collect();
        assert_eq!(drawn_a.len(), 52);
        assert_eq!(drawn_a, drawn_b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let mut a = Deck::with_seed(1);
        let mut b = Deck::with_seed(2);
        a.shuffle();
        b.shuffle();
        assert_ne!(a.cards(), b.cards());
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let mut deck = Deck::with_seed(5);
        deck.shuffle();
        let mut cards = deck.cards().to_vec();
        cards.sort_by_key(|card| (card.suit, card.rank));
        assert_eq!(cards, standard_cards());
    }

    #[test]
    fn draw_pops_from_the_top() {
        let mut deck = Deck::with_seed(3);
        assert_eq!(deck.draw(), Some(Card::new(Suit::Spades, 13, false)));
        assert_eq!(deck.draw(), Some(Card::new(Suit::Spades, 12, false)));
        assert_eq!(deck.len(), 50);
    }

    #[test]
    fn draw_multiple_stops_when_exhausted() {
        let mut deck = Deck::with_seed(3);
        let first = deck.draw_multiple(3);
        assert_eq!(
            first,
            vec![
                Card::new(Suit::Spades, 13, false),
                Card::new(Suit::Spades, 12, false),
                Card::new(Suit::Spades, 11, false),
            ]
        );

        let rest = deck.draw_multiple(100);
        assert_eq!(rest.len(), 49);
        assert!(deck.is_empty());
        assert!(deck.draw().is_none());
        assert!(deck.draw_multiple(4).is_empty());
    }

    #[test]
    fn spider_deck_scales_to_104_cards() {
        for mode in [SpiderSuitMode::One, SpiderSuitMode::Two, SpiderSuitMode::Four] {
            let deck = Deck::spider(mode, Some(0));
            assert_eq!(deck.len(), 104);
            for &suit in mode.suits() {
                let aces = deck
                    .cards()
                    .iter()
                    .filter(|card| card.suit == suit && card.rank == 1)
                    .count();
                assert_eq!(aces, mode.copies_per_card());
            }
        }
    }
}
