use std::collections::HashSet;

mod freecell;
mod history;
mod klondike;
mod piles;
mod snapshot;
mod spider;
mod types;

pub use freecell::{FreecellGame, FREECELL_CELL_COUNT, FREECELL_TABLEAU_COUNT};
pub use history::{
    FreecellMove, FreecellMoveKind, KlondikeMove, KlondikeMoveKind, MoveHistory, MoveRecord,
    SpiderMove, SpiderMoveKind,
};
pub use klondike::{KlondikeGame, KLONDIKE_TABLEAU_COUNT};
pub use piles::{
    is_descending_alternating_run, is_descending_suited_run, AcceptsCard, Foundation,
    FreecellTableau, KlondikeTableau, Pile, SpiderTableau, Stock, Waste,
};
pub use snapshot::{CardGame, SnapshotError};
pub use spider::{SpiderGame, SPIDER_SEQUENCES_TO_WIN, SPIDER_TABLEAU_COUNT};
pub use types::{Card, DrawMode, GameMode, SpiderSuitMode, Suit, ACE, KING};

pub const FOUNDATION_COUNT: usize = 4;

pub fn rank_label(rank: u8) -> &'static str {
    match rank {
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        13 => "K",
        _ => "?",
    }
}

/// Index of the first foundation that takes `card`.
fn first_accepting_foundation(foundations: &[Foundation], card: &Card) -> Option<usize> {
    foundations
        .iter()
        .position(|foundation| foundation.can_accept_card(card))
}

/// Every card has a legal rank, no identity repeats, and exactly `expected`
/// distinct cards are present.
fn is_unique_full_deck<'a>(cards: impl IntoIterator<Item = &'a Card>, expected: usize) -> bool {
    let mut seen = HashSet::with_capacity(expected);
    for card in cards {
        if !card.has_valid_rank() || !seen.insert(*card) {
            return false;
        }
    }
    seen.len() == expected
}

fn foundations_are_well_formed(foundations: &[Foundation]) -> bool {
    foundations.iter().all(Foundation::is_well_formed)
}
