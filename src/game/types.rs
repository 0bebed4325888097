use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{rank_label, SnapshotError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Klondike,
    Spider,
    Freecell,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Klondike, GameMode::Spider, GameMode::Freecell];

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "klondike" => Some(Self::Klondike),
            "spider" => Some(Self::Spider),
            "freecell" => Some(Self::Freecell),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Klondike => "klondike",
            Self::Spider => "spider",
            Self::Freecell => "freecell",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Klondike => "Klondike",
            Self::Spider => "Spider",
            Self::Freecell => "FreeCell",
        }
    }

    /// Number of cards in play for a fresh deal of this variant.
    pub fn card_total(self) -> usize {
        match self {
            Self::Klondike | Self::Freecell => 52,
            Self::Spider => 104,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Klondike stock draw size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DrawMode {
    #[default]
    One,
    Three,
}

impl DrawMode {
    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Three => 3,
        }
    }

    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(Self::One),
            3 => Some(Self::Three),
            _ => None,
        }
    }
}

impl TryFrom<u8> for DrawMode {
    type Error = SnapshotError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_count(value).ok_or(SnapshotError::InvalidDrawCount(value))
    }
}

impl From<DrawMode> for u8 {
    fn from(mode: DrawMode) -> Self {
        mode.count()
    }
}

/// Number of real suits dealt into a Spider deck. The deck always holds
/// 104 cards, so fewer suits means more copies of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SpiderSuitMode {
    One,
    Two,
    #[default]
    Four,
}

impl SpiderSuitMode {
    pub fn suit_count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }

    pub fn from_suit_count(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            _ => None,
        }
    }

    pub fn suits(self) -> &'static [Suit] {
        match self {
            Self::One => &[Suit::Spades],
            Self::Two => &[Suit::Spades, Suit::Hearts],
            Self::Four => &[Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds],
        }
    }

    /// Copies of every (suit, rank) pair in the 104-card deck.
    pub fn copies_per_card(self) -> usize {
        8 / usize::from(self.suit_count())
    }
}

impl TryFrom<u8> for SpiderSuitMode {
    type Error = SnapshotError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_suit_count(value).ok_or(SnapshotError::InvalidSuitCount(value))
    }
}

impl From<SpiderSuitMode> for u8 {
    fn from(mode: SpiderSuitMode) -> Self {
        mode.suit_count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// Deck enumeration order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    pub fn short(self) -> &'static str {
        match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        }
    }

    pub fn opposite_color_suits(self) -> [Suit; 2] {
        if self.is_red() {
            [Suit::Clubs, Suit::Spades]
        } else {
            [Suit::Hearts, Suit::Diamonds]
        }
    }
}

pub const ACE: u8 = 1;
pub const KING: u8 = 13;

/// A playing card. Identity is `(suit, rank)`; the face-up flag is state,
/// not identity, so it takes no part in equality or hashing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "CardRepr", into = "CardRepr")]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
    pub face_up: bool,
}

impl Card {
    pub fn new(suit: Suit, rank: u8, face_up: bool) -> Self {
        Self {
            suit,
            rank,
            face_up,
        }
    }

    pub fn label(&self) -> String {
        format!("{}{}", rank_label(self.rank), self.suit.short())
    }

    pub fn color_red(&self) -> bool {
        self.suit.is_red()
    }

    pub fn is_opposite_color(&self, other: &Card) -> bool {
        self.color_red() != other.color_red()
    }

    pub fn has_valid_rank(&self) -> bool {
        (ACE..=KING).contains(&self.rank)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRepr {
    suit: Suit,
    rank: u8,
    #[serde(default)]
    face_up: bool,
}

impl TryFrom<CardRepr> for Card {
    type Error = SnapshotError;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        let card = Card::new(repr.suit, repr.rank, repr.face_up);
        if !card.has_valid_rank() {
            return Err(SnapshotError::InvalidCard { rank: repr.rank });
        }
        Ok(card)
    }
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        Self {
            suit: card.suit,
            rank: card.rank,
            face_up: card.face_up,
        }
    }
}
