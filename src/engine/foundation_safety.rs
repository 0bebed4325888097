use crate::engine::commands::EngineCommand;
use crate::engine::game_mode::VariantRuntime;
use crate::game::{
    AcceptsCard, Card, Foundation, FreecellGame, KlondikeGame, Suit, FREECELL_CELL_COUNT,
    FREECELL_TABLEAU_COUNT, KLONDIKE_TABLEAU_COUNT,
};

/// Highest rank built on any foundation assigned to `suit`.
pub fn foundation_top_rank(foundations: &[Foundation], suit: Suit) -> u8 {
    foundations
        .iter()
        .filter(|foundation| foundation.suit() == Some(suit))
        .map(Foundation::top_rank)
        .max()
        .unwrap_or(0)
}

/// Aces and twos always go up; anything higher waits until both
/// opposite-colour foundations could no longer need it as a landing spot.
pub fn is_safe_auto_foundation(foundations: &[Foundation], card: Card) -> bool {
    if card.rank <= 2 {
        return true;
    }
    card.suit
        .opposite_color_suits()
        .iter()
        .all(|&suit| foundation_top_rank(foundations, suit) >= card.rank - 1)
}

fn safe_target(foundations: &[Foundation], card: Card) -> Option<usize> {
    if !is_safe_auto_foundation(foundations, card) {
        return None;
    }
    foundations
        .iter()
        .position(|foundation| foundation.can_accept_card(&card))
}

pub fn can_auto_move_waste_to_foundation(game: &KlondikeGame) -> bool {
    let Some(card) = game.waste_top() else {
        return false;
    };
    safe_target(game.foundations(), card).is_some()
}

pub fn can_auto_move_tableau_to_foundation(game: &KlondikeGame, src: usize) -> bool {
    let Some(card) = game.tableau_top(src) else {
        return false;
    };
    card.face_up && safe_target(game.foundations(), card).is_some()
}

fn next_klondike_move(game: &KlondikeGame) -> Option<EngineCommand> {
    if let Some(card) = game.waste_top() {
        if let Some(foundation) = safe_target(game.foundations(), card) {
            return Some(EngineCommand::MoveWasteToFoundation { foundation });
        }
    }
    (0..KLONDIKE_TABLEAU_COUNT).find_map(|src| {
        let card = game.tableau_top(src).filter(|card| card.face_up)?;
        let foundation = safe_target(game.foundations(), card)?;
        Some(EngineCommand::MoveTableauToFoundation { src, foundation })
    })
}

fn next_freecell_move(game: &FreecellGame) -> Option<EngineCommand> {
    let from_tableau = (0..FREECELL_TABLEAU_COUNT).find_map(|src| {
        let card = game.tableau_top(src)?;
        let foundation = safe_target(game.foundations(), card)?;
        Some(EngineCommand::MoveTableauToFoundation { src, foundation })
    });
    from_tableau.or_else(|| {
        (0..FREECELL_CELL_COUNT).find_map(|cell| {
            let card = game.free_cell_card(cell)?;
            let foundation = safe_target(game.foundations(), card)?;
            Some(EngineCommand::MoveFreeCellToFoundation { cell, foundation })
        })
    })
}

/// Next foundation move that cannot strand a card the player still needs.
/// Spider has no foundations, so it never auto-plays.
pub fn next_safe_auto_move(runtime: &VariantRuntime) -> Option<EngineCommand> {
    match runtime {
        VariantRuntime::Klondike(game) => next_klondike_move(game),
        VariantRuntime::Freecell(game) => next_freecell_move(game),
        VariantRuntime::Spider(_) => None,
    }
}
