use crate::game::{
    FreecellMove, FreecellMoveKind, KlondikeMove, KlondikeMoveKind, SpiderMove, SpiderMoveKind,
};

/// A single player action addressed to whichever variant is active.
/// Commands that do not exist in the active variant are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineCommand {
    DrawFromStock,
    ResetStock,
    DealFromStock,
    MoveWasteToFoundation {
        foundation: usize,
    },
    MoveWasteToTableau {
        dst: usize,
    },
    MoveTableauToFoundation {
        src: usize,
        foundation: usize,
    },
    MoveTableauToTableau {
        src: usize,
        start: usize,
        dst: usize,
    },
    MoveTableauToFreeCell {
        src: usize,
        cell: usize,
    },
    MoveFreeCellToFoundation {
        cell: usize,
        foundation: usize,
    },
    MoveFreeCellToTableau {
        cell: usize,
        dst: usize,
    },
    /// Klondike: play one tableau top to the lowest accepting foundation.
    AutoMoveTableauToFoundation {
        src: usize,
    },
    AutoMoveWasteToFoundation,
    /// FreeCell: one greedy pass over tableau tops and free cells.
    AutoMoveAllToFoundation,
}

impl EngineCommand {
    /// Translates a recorded Klondike move. `pile_len` is the current length
    /// of the move's source tableau, used to turn a card count into a start
    /// index.
    pub fn from_klondike_move(mv: &KlondikeMove, pile_len: usize) -> Option<Self> {
        let command = match mv.kind {
            KlondikeMoveKind::DrawFromStock => Self::DrawFromStock,
            KlondikeMoveKind::ResetStock => Self::ResetStock,
            KlondikeMoveKind::WasteToFoundation => Self::MoveWasteToFoundation {
                foundation: mv.destination?,
            },
            KlondikeMoveKind::WasteToTableau => Self::MoveWasteToTableau {
                dst: mv.destination?,
            },
            KlondikeMoveKind::TableauToFoundation => Self::MoveTableauToFoundation {
                src: mv.source?,
                foundation: mv.destination?,
            },
            KlondikeMoveKind::TableauToTableau => Self::MoveTableauToTableau {
                src: mv.source?,
                start: pile_len.checked_sub(mv.card_count)?,
                dst: mv.destination?,
            },
        };
        Some(command)
    }

    pub fn from_freecell_move(mv: &FreecellMove, pile_len: usize) -> Option<Self> {
        let src = mv.source?;
        let dst = mv.destination?;
        let command = match mv.kind {
            FreecellMoveKind::TableauToFreeCell => Self::MoveTableauToFreeCell { src, cell: dst },
            FreecellMoveKind::TableauToFoundation => Self::MoveTableauToFoundation {
                src,
                foundation: dst,
            },
            FreecellMoveKind::TableauToTableau => Self::MoveTableauToTableau {
                src,
                start: pile_len.checked_sub(mv.card_count)?,
                dst,
            },
            FreecellMoveKind::FreeCellToFoundation => Self::MoveFreeCellToFoundation {
                cell: src,
                foundation: dst,
            },
            FreecellMoveKind::FreeCellToTableau => Self::MoveFreeCellToTableau { cell: src, dst },
        };
        Some(command)
    }

    /// `CompleteSequence` records have no command form.
    pub fn from_spider_move(mv: &SpiderMove, pile_len: usize) -> Option<Self> {
        match mv.kind {
            SpiderMoveKind::DealFromStock => Some(Self::DealFromStock),
            SpiderMoveKind::TableauToTableau => Some(Self::MoveTableauToTableau {
                src: mv.source?,
                start: pile_len.checked_sub(mv.card_count)?,
                dst: mv.destination?,
            }),
            SpiderMoveKind::CompleteSequence => None,
        }
    }
}
