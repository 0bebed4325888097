use serde::{Deserialize, Serialize};

use crate::deck::Deck;

use super::{
    first_accepting_foundation, foundations_are_well_formed, is_unique_full_deck, AcceptsCard,
    Card, CardGame, Foundation, FreecellMove, FreecellMoveKind, FreecellTableau, GameMode,
    MoveHistory, FOUNDATION_COUNT,
};

pub const FREECELL_CELL_COUNT: usize = 4;
pub const FREECELL_TABLEAU_COUNT: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FreecellGame {
    tableaus: [FreecellTableau; FREECELL_TABLEAU_COUNT],
    free_cells: [Option<Card>; FREECELL_CELL_COUNT],
    foundations: [Foundation; FOUNDATION_COUNT],
    move_history: MoveHistory<FreecellMoveKind>,
}

impl FreecellGame {
    pub fn new_game(seed: Option<u64>) -> Self {
        let mut deck = Deck::new(seed);
        deck.shuffle();

        let mut game = Self::default();
        for (col, pile) in game.tableaus.iter_mut().enumerate() {
            let depth = if col < 4 { 7 } else { 6 };
            for _ in 0..depth {
                let Some(mut card) = deck.draw() else {
                    break;
                };
                card.face_up = true;
                pile.push(card);
            }
        }
        game
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_game(Some(seed))
    }

    pub fn foundations(&self) -> &[Foundation; FOUNDATION_COUNT] {
        &self.foundations
    }

    pub fn free_cells(&self) -> &[Option<Card>; FREECELL_CELL_COUNT] {
        &self.free_cells
    }

    pub fn tableaus(&self) -> &[FreecellTableau; FREECELL_TABLEAU_COUNT] {
        &self.tableaus
    }

    pub fn move_history(&self) -> &MoveHistory<FreecellMoveKind> {
        &self.move_history
    }

    pub fn tableau_card(&self, col: usize, index: usize) -> Option<Card> {
        self.tableaus
            .get(col)
            .and_then(|pile| pile.get(index))
            .copied()
    }

    pub fn tableau_top(&self, col: usize) -> Option<Card> {
        self.tableaus.get(col).and_then(|pile| pile.top().copied())
    }

    pub fn free_cell_card(&self, cell: usize) -> Option<Card> {
        self.free_cells.get(cell).and_then(|slot| *slot)
    }

    pub fn empty_free_cell_count(&self) -> usize {
        self.free_cells.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn empty_tableau_count(&self) -> usize {
        self.tableaus.iter().filter(|pile| pile.is_empty()).count()
    }

    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(Foundation::is_complete)
    }

    /// Supermove capacity: `(1 + empty cells) * 2^empty tableaus`, not
    /// counting the pile at `exclude`.
    pub fn max_movable_cards(&self, exclude: Option<usize>) -> usize {
        let empty_tableaus = self
            .tableaus
            .iter()
            .enumerate()
            .filter(|(idx, pile)| Some(*idx) != exclude && pile.is_empty())
            .count();
        (1 + self.empty_free_cell_count()) << empty_tableaus
    }

    pub fn can_move_tableau_to_free_cell(&self, src: usize, cell: usize) -> bool {
        let (Some(source), Some(slot)) = (self.tableaus.get(src), self.free_cells.get(cell)) else {
            return false;
        };
        slot.is_none() && !source.is_empty()
    }

    pub fn move_tableau_to_free_cell(&mut self, src: usize, cell: usize) -> bool {
        if !self.can_move_tableau_to_free_cell(src, cell) {
            return false;
        }
        let Some(card) = self.tableaus[src].pop() else {
            return false;
        };
        self.free_cells[cell] = Some(card);

        self.move_history.record(
            FreecellMove::new(FreecellMoveKind::TableauToFreeCell)
                .with_source(src)
                .with_destination(cell),
        );
        true
    }

    pub fn can_move_tableau_to_foundation(&self, src: usize, foundation: usize) -> bool {
        let (Some(card), Some(target)) = (
            self.tableaus.get(src).and_then(|pile| pile.top()),
            self.foundations.get(foundation),
        ) else {
            return false;
        };
        target.can_accept_card(card)
    }

    pub fn move_tableau_to_foundation(&mut self, src: usize, foundation: usize) -> bool {
        if !self.can_move_tableau_to_foundation(src, foundation) {
            return false;
        }
        let Some(card) = self.tableaus[src].pop() else {
            return false;
        };
        self.foundations[foundation].push(card);

        self.move_history.record(
            FreecellMove::new(FreecellMoveKind::TableauToFoundation)
                .with_source(src)
                .with_destination(foundation),
        );
        true
    }

    pub fn can_move_tableau_to_tableau(&self, src: usize, start: usize, dst: usize) -> bool {
        if src == dst {
            return false;
        }
        let (Some(source), Some(target)) = (self.tableaus.get(src), self.tableaus.get(dst)) else {
            return false;
        };
        let exclude = target.is_empty().then_some(dst);
        if !source.can_pickup_sequence(start, self.max_movable_cards(exclude)) {
            return false;
        }
        source
            .get(start)
            .is_some_and(|card| target.can_accept_card(card))
    }

    pub fn move_tableau_to_tableau(&mut self, src: usize, start: usize, dst: usize) -> bool {
        if !self.can_move_tableau_to_tableau(src, start, dst) {
            return false;
        }
        let moved = self.tableaus[src].split_off(start);
        let count = moved.len();
        self.tableaus[dst].extend(moved);

        self.move_history.record(
            FreecellMove::new(FreecellMoveKind::TableauToTableau)
                .with_source(src)
                .with_destination(dst)
                .with_card_count(count),
        );
        true
    }

    pub fn can_move_free_cell_to_foundation(&self, cell: usize, foundation: usize) -> bool {
        let (Some(card), Some(target)) = (self.free_cell_card(cell), self.foundations.get(foundation))
        else {
            return false;
        };
        target.can_accept_card(&card)
    }

    pub fn move_free_cell_to_foundation(&mut self, cell: usize, foundation: usize) -> bool {
        if !self.can_move_free_cell_to_foundation(cell, foundation) {
            return false;
        }
        let Some(card) = self.free_cells[cell].take() else {
            return false;
        };
        self.foundations[foundation].push(card);

        self.move_history.record(
            FreecellMove::new(FreecellMoveKind::FreeCellToFoundation)
                .with_source(cell)
                .with_destination(foundation),
        );
        true
    }

    pub fn can_move_free_cell_to_tableau(&self, cell: usize, dst: usize) -> bool {
        let (Some(card), Some(target)) = (self.free_cell_card(cell), self.tableaus.get(dst)) else {
            return false;
        };
        target.can_accept_card(&card)
    }

    pub fn move_free_cell_to_tableau(&mut self, cell: usize, dst: usize) -> bool {
        if !self.can_move_free_cell_to_tableau(cell, dst) {
            return false;
        }
        let Some(card) = self.free_cells[cell].take() else {
            return false;
        };
        self.tableaus[dst].push(card);

        self.move_history.record(
            FreecellMove::new(FreecellMoveKind::FreeCellToTableau)
                .with_source(cell)
                .with_destination(dst),
        );
        true
    }

    /// One greedy pass over tableau tops, then free cells. Callers wanting
    /// every available card home call this until it returns false.
    pub fn auto_move_to_foundation(&mut self) -> bool {
        let mut moved = false;

        for src in 0..FREECELL_TABLEAU_COUNT {
            let Some(card) = self.tableau_top(src) else {
                continue;
            };
            if let Some(foundation) = first_accepting_foundation(&self.foundations, &card) {
                moved |= self.move_tableau_to_foundation(src, foundation);
            }
        }

        for cell in 0..FREECELL_CELL_COUNT {
            let Some(card) = self.free_cell_card(cell) else {
                continue;
            };
            if let Some(foundation) = first_accepting_foundation(&self.foundations, &card) {
                moved |= self.move_free_cell_to_foundation(cell, foundation);
            }
        }

        moved
    }

    pub fn valid_moves(&self) -> Vec<FreecellMove> {
        let mut moves = Vec::new();

        for src in 0..FREECELL_TABLEAU_COUNT {
            for cell in 0..FREECELL_CELL_COUNT {
                if self.can_move_tableau_to_free_cell(src, cell) {
                    moves.push(
                        FreecellMove::new(FreecellMoveKind::TableauToFreeCell)
                            .with_source(src)
                            .with_destination(cell),
                    );
                }
            }
            for foundation in 0..FOUNDATION_COUNT {
                if self.can_move_tableau_to_foundation(src, foundation) {
                    moves.push(
                        FreecellMove::new(FreecellMoveKind::TableauToFoundation)
                            .with_source(src)
                            .with_destination(foundation),
                    );
                }
            }
            let len = self.tableaus[src].len();
            for start in 0..len {
                for dst in 0..FREECELL_TABLEAU_COUNT {
                    if self.can_move_tableau_to_tableau(src, start, dst) {
                        moves.push(
                            FreecellMove::new(FreecellMoveKind::TableauToTableau)
                                .with_source(src)
                                .with_destination(dst)
                                .with_card_count(len - start),
                        );
                    }
                }
            }
        }

        for cell in 0..FREECELL_CELL_COUNT {
            for foundation in 0..FOUNDATION_COUNT {
                if self.can_move_free_cell_to_foundation(cell, foundation) {
                    moves.push(
                        FreecellMove::new(FreecellMoveKind::FreeCellToFoundation)
                            .with_source(cell)
                            .with_destination(foundation),
                    );
                }
            }
            for dst in 0..FREECELL_TABLEAU_COUNT {
                if self.can_move_free_cell_to_tableau(cell, dst) {
                    moves.push(
                        FreecellMove::new(FreecellMoveKind::FreeCellToTableau)
                            .with_source(cell)
                            .with_destination(dst),
                    );
                }
            }
        }

        moves
    }

    pub fn apply_move(&mut self, mv: &FreecellMove) -> bool {
        let (Some(src), Some(dst)) = (mv.source, mv.destination) else {
            return false;
        };
        match mv.kind {
            FreecellMoveKind::TableauToFreeCell => self.move_tableau_to_free_cell(src, dst),
            FreecellMoveKind::TableauToFoundation => self.move_tableau_to_foundation(src, dst),
            FreecellMoveKind::TableauToTableau => {
                let Some(start) = self
                    .tableaus
                    .get(src)
                    .and_then(|pile| pile.len().checked_sub(mv.card_count))
                else {
                    return false;
                };
                self.move_tableau_to_tableau(src, start, dst)
            }
            FreecellMoveKind::FreeCellToFoundation => self.move_free_cell_to_foundation(src, dst),
            FreecellMoveKind::FreeCellToTableau => self.move_free_cell_to_tableau(src, dst),
        }
    }

    fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.tableaus
            .iter()
            .flat_map(|pile| pile.iter())
            .chain(self.free_cells.iter().flatten())
            .chain(self.foundations.iter().flat_map(|pile| pile.cards()))
    }
}

impl CardGame for FreecellGame {
    const MODE: GameMode = GameMode::Freecell;

    fn validate_game(&self) -> bool {
        is_unique_full_deck(self.all_cards(), Self::MODE.card_total())
            && foundations_are_well_formed(&self.foundations)
            && self
                .tableaus
                .iter()
                .all(|pile| pile.iter().all(|card| card.face_up))
    }

    fn is_game_won(&self) -> bool {
        self.is_won()
    }
}

#[cfg(test)]
impl FreecellGame {
    pub(crate) fn debug_new(
        foundations: [Foundation; FOUNDATION_COUNT],
        free_cells: [Option<Card>; FREECELL_CELL_COUNT],
        tableaus: [Vec<Card>; FREECELL_TABLEAU_COUNT],
    ) -> Self {
        Self {
            tableaus: tableaus.map(FreecellTableau::from_cards),
            free_cells,
            foundations,
            move_history: MoveHistory::default(),
        }
    }
}
