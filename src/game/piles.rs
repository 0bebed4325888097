use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::{Card, Suit, ACE, KING};

/// Placement rule shared by every pile a player can drop cards onto.
pub trait AcceptsCard {
    fn can_accept_card(&self, card: &Card) -> bool;
}

/// Ordered stack of cards; the top is the last element. Serializes as a
/// plain card array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Removes and returns the cards from `index` to the top. An index past
    /// the end removes nothing.
    pub fn split_off(&mut self, index: usize) -> Vec<Card> {
        if index >= self.cards.len() {
            return Vec::new();
        }
        self.cards.split_off(index)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn flip_top_card(&mut self) {
        if let Some(card) = self.cards.last_mut() {
            card.face_up = true;
        }
    }

    pub fn first_face_up_index(&self) -> Option<usize> {
        self.cards.iter().position(|card| card.face_up)
    }

    pub fn face_up_cards(&self) -> &[Card] {
        match self.first_face_up_index() {
            Some(index) => &self.cards[index..],
            None => &[],
        }
    }

    /// No face-down card sits above a face-up one.
    pub fn has_face_up_contiguity(&self) -> bool {
        let mut face_up_started = false;
        for card in &self.cards {
            if card.face_up {
                face_up_started = true;
            } else if face_up_started {
                return false;
            }
        }
        true
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

macro_rules! pile_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Pile);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn from_cards(cards: Vec<Card>) -> Self {
                Self(Pile::from_cards(cards))
            }
        }

        impl Deref for $name {
            type Target = Pile;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    };
}

pile_newtype!(KlondikeTableau);
pile_newtype!(FreecellTableau);
pile_newtype!(SpiderTableau);
pile_newtype!(Stock);
pile_newtype!(Waste);

/// Per-suit pile built upward from the Ace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FoundationRepr", rename_all = "camelCase")]
pub struct Foundation {
    cards: Vec<Card>,
    suit: Option<Suit>,
}

/// Older snapshots may omit `suit`; the Ace at the bottom decides it then.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FoundationRepr {
    cards: Vec<Card>,
    suit: Option<Suit>,
}

impl From<FoundationRepr> for Foundation {
    fn from(repr: FoundationRepr) -> Self {
        let suit = repr.suit.or_else(|| repr.cards.first().map(|card| card.suit));
        Self {
            cards: repr.cards,
            suit,
        }
    }
}

impl Foundation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn top_rank(&self) -> u8 {
        self.top().map(|card| card.rank).unwrap_or(0)
    }

    /// Suit assigned by the Ace that started this foundation.
    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == usize::from(KING)
    }

    pub(crate) fn push(&mut self, card: Card) {
        if self.cards.is_empty() {
            self.suit = Some(card.suit);
        }
        self.cards.push(card);
    }

    /// Ace-up, single-suit, and consistent with the recorded suit.
    pub fn is_well_formed(&self) -> bool {
        let Some(first) = self.cards.first() else {
            return true;
        };
        if self.suit.is_some_and(|suit| suit != first.suit) {
            return false;
        }
        self.cards
            .iter()
            .enumerate()
            .all(|(idx, card)| card.suit == first.suit && usize::from(card.rank) == idx + 1)
    }

    #[cfg(test)]
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        let suit = cards.first().map(|card| card.suit);
        Self { cards, suit }
    }
}

impl AcceptsCard for Foundation {
    fn can_accept_card(&self, card: &Card) -> bool {
        match self.top() {
            None => card.rank == ACE,
            Some(top) => Some(card.suit) == self.suit && card.rank == top.rank + 1,
        }
    }
}

/// Adjacent pairs alternate colour and descend by one.
pub fn is_descending_alternating_run(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| {
        let a = pair[0];
        let b = pair[1];
        a.rank == b.rank + 1 && a.is_opposite_color(&b)
    })
}

/// Adjacent pairs share a suit and descend by one.
pub fn is_descending_suited_run(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| {
        let a = pair[0];
        let b = pair[1];
        a.suit == b.suit && a.rank == b.rank + 1
    })
}

/// Length of the longest run satisfying `linked` that ends at the top.
fn trailing_run_length(cards: &[Card], linked: impl Fn(&Card, &Card) -> bool) -> usize {
    if cards.is_empty() {
        return 0;
    }
    let mut length = 1;
    for pair in cards.windows(2).rev() {
        if !linked(&pair[0], &pair[1]) {
            break;
        }
        length += 1;
    }
    length
}

impl AcceptsCard for KlondikeTableau {
    fn can_accept_card(&self, card: &Card) -> bool {
        match self.top() {
            None => card.rank == KING,
            Some(top) => top.face_up && card.is_opposite_color(top) && card.rank + 1 == top.rank,
        }
    }
}

impl KlondikeTableau {
    /// Klondike places no cap on run length, so callers pass `usize::MAX`
    /// unless they want to bound it themselves.
    pub fn can_pickup_sequence(&self, start: usize, max_cards: usize) -> bool {
        let Some(first) = self.get(start) else {
            return false;
        };
        if self.len() - start > max_cards || !first.face_up {
            return false;
        }
        let run = &self.cards()[start..];
        run.iter().all(|card| card.face_up) && is_descending_alternating_run(run)
    }

    pub fn valid_sequence_length(&self) -> usize {
        trailing_run_length(self.face_up_cards(), |a, b| {
            a.rank == b.rank + 1 && a.is_opposite_color(b)
        })
    }
}

impl AcceptsCard for FreecellTableau {
    fn can_accept_card(&self, card: &Card) -> bool {
        match self.top() {
            None => true,
            Some(top) => card.is_opposite_color(top) && card.rank + 1 == top.rank,
        }
    }
}

impl FreecellTableau {
    pub fn can_pickup_sequence(&self, start: usize, max_cards: usize) -> bool {
        if start >= self.len() || self.len() - start > max_cards {
            return false;
        }
        is_descending_alternating_run(&self.cards()[start..])
    }

    pub fn valid_sequence_length(&self) -> usize {
        trailing_run_length(self.cards(), |a, b| {
            a.rank == b.rank + 1 && a.is_opposite_color(b)
        })
    }
}

impl AcceptsCard for SpiderTableau {
    fn can_accept_card(&self, card: &Card) -> bool {
        match self.top() {
            None => true,
            Some(top) => top.face_up && card.rank + 1 == top.rank,
        }
    }
}

impl SpiderTableau {
    pub fn can_pickup_from(&self, index: usize) -> bool {
        let Some(card) = self.get(index) else {
            return false;
        };
        card.face_up && is_descending_suited_run(&self.cards()[index..])
    }

    /// Top 13 cards are a face-up King-to-Ace run of one suit.
    pub fn has_complete_sequence(&self) -> bool {
        let run_len = usize::from(KING);
        if self.len() < run_len {
            return false;
        }
        let run = &self.cards()[self.len() - run_len..];
        run[0].rank == KING && run.iter().all(|card| card.face_up) && is_descending_suited_run(run)
    }

    /// Removes a completed run and flips the newly exposed card. Returns
    /// nothing when the top is not a complete run.
    pub fn remove_complete_sequence(&mut self) -> Vec<Card> {
        if !self.has_complete_sequence() {
            return Vec::new();
        }
        let start = self.len() - usize::from(KING);
        let removed = self.split_off(start);
        self.flip_top_card();
        removed
    }
}

impl Stock {
    /// Pops the top card and turns it face up.
    pub fn draw_card(&mut self) -> Option<Card> {
        let mut card = self.pop()?;
        card.face_up = true;
        Some(card)
    }

    /// Refills from waste cards so the next draws repeat their original order.
    pub fn reset(&mut self, waste_cards: Vec<Card>) {
        for mut card in waste_cards.into_iter().rev() {
            card.face_up = false;
            self.push(card);
        }
    }
}

impl Waste {
    pub fn add_from_stock(&mut self, mut card: Card) {
        card.face_up = true;
        self.push(card);
    }

    pub fn take_all(&mut self) -> Vec<Card> {
        self.split_off(0)
    }
}
