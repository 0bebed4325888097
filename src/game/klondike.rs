use serde::{Deserialize, Serialize};

use crate::deck::Deck;

use super::{
    first_accepting_foundation, foundations_are_well_formed, is_descending_alternating_run,
    is_unique_full_deck, AcceptsCard, Card, CardGame, DrawMode, Foundation, GameMode,
    KlondikeMove, KlondikeMoveKind, KlondikeTableau, MoveHistory, Stock, Waste, FOUNDATION_COUNT,
};

pub const KLONDIKE_TABLEAU_COUNT: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KlondikeGame {
    draw_count: DrawMode,
    stock: Stock,
    waste: Waste,
    foundations: [Foundation; FOUNDATION_COUNT],
    tableaus: [KlondikeTableau; KLONDIKE_TABLEAU_COUNT],
    move_history: MoveHistory<KlondikeMoveKind>,
}

impl KlondikeGame {
    pub fn new_game(seed: Option<u64>, draw_mode: DrawMode) -> Self {
        let mut deck = Deck::new(seed);
        deck.shuffle();

        let mut game = Self {
            draw_count: draw_mode,
            ..Self::default()
        };

        for col in 0..KLONDIKE_TABLEAU_COUNT {
            for row in 0..=col {
                let Some(mut card) = deck.draw() else {
                    break;
                };
                card.face_up = row == col;
                game.tableaus[col].push(card);
            }
        }

        while let Some(mut card) = deck.draw() {
            card.face_up = false;
            game.stock.push(card);
        }

        game
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_game(Some(seed), DrawMode::One)
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_count
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_count = mode;
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    pub fn waste(&self) -> &Waste {
        &self.waste
    }

    pub fn foundations(&self) -> &[Foundation; FOUNDATION_COUNT] {
        &self.foundations
    }

    pub fn tableaus(&self) -> &[KlondikeTableau; KLONDIKE_TABLEAU_COUNT] {
        &self.tableaus
    }

    pub fn move_history(&self) -> &MoveHistory<KlondikeMoveKind> {
        &self.move_history
    }

    pub fn tableau_top(&self, col: usize) -> Option<Card> {
        self.tableaus.get(col).and_then(|pile| pile.top().copied())
    }

    pub fn waste_top(&self) -> Option<Card> {
        self.waste.top().copied()
    }

    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(Foundation::is_complete)
    }

    pub fn draw_from_stock(&mut self) -> bool {
        if self.stock.is_empty() {
            return false;
        }

        let mut drawn = 0;
        for _ in 0..self.draw_count.count() {
            let Some(card) = self.stock.draw_card() else {
                break;
            };
            self.waste.add_from_stock(card);
            drawn += 1;
        }

        self.move_history
            .record(KlondikeMove::new(KlondikeMoveKind::DrawFromStock).with_card_count(drawn));
        true
    }

    pub fn reset_stock(&mut self) -> bool {
        if !self.stock.is_empty() || self.waste.is_empty() {
            return false;
        }

        let waste_cards = self.waste.take_all();
        let recycled = waste_cards.len();
        self.stock.reset(waste_cards);

        self.move_history
            .record(KlondikeMove::new(KlondikeMoveKind::ResetStock).with_card_count(recycled));
        true
    }

    pub fn can_move_waste_to_foundation(&self, foundation: usize) -> bool {
        let (Some(card), Some(target)) = (self.waste.top(), self.foundations.get(foundation))
        else {
            return false;
        };
        target.can_accept_card(card)
    }

    pub fn move_waste_to_foundation(&mut self, foundation: usize) -> bool {
        if !self.can_move_waste_to_foundation(foundation) {
            return false;
        }
        let Some(card) = self.waste.pop() else {
            return false;
        };
        self.foundations[foundation].push(card);

        self.move_history.record(
            KlondikeMove::new(KlondikeMoveKind::WasteToFoundation).with_destination(foundation),
        );
        true
    }

    pub fn can_move_waste_to_tableau(&self, dst: usize) -> bool {
        let (Some(card), Some(target)) = (self.waste.top(), self.tableaus.get(dst)) else {
            return false;
        };
        target.can_accept_card(card)
    }

    pub fn move_waste_to_tableau(&mut self, dst: usize) -> bool {
        if !self.can_move_waste_to_tableau(dst) {
            return false;
        }
        let Some(card) = self.waste.pop() else {
            return false;
        };
        self.tableaus[dst].push(card);

        self.move_history
            .record(KlondikeMove::new(KlondikeMoveKind::WasteToTableau).with_destination(dst));
        true
    }

    pub fn can_move_tableau_to_foundation(&self, src: usize, foundation: usize) -> bool {
        let (Some(card), Some(target)) = (
            self.tableaus.get(src).and_then(|pile| pile.top()),
            self.foundations.get(foundation),
        ) else {
            return false;
        };
        card.face_up && target.can_accept_card(card)
    }

    pub fn move_tableau_to_foundation(&mut self, src: usize, foundation: usize) -> bool {
        if !self.can_move_tableau_to_foundation(src, foundation) {
            return false;
        }
        let Some(card) = self.tableaus[src].pop() else {
            return false;
        };
        self.foundations[foundation].push(card);
        self.tableaus[src].flip_top_card();

        self.move_history.record(
            KlondikeMove::new(KlondikeMoveKind::TableauToFoundation)
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
        if !source.can_pickup_sequence(start, usize::MAX) {
            return false;
        }
        source
            .get(start)
            .is_some_and(|card| target.can_accept_card(card))
    }

    /// Moves the face-up run starting at `start` onto `dst`.
    pub fn move_tableau_to_tableau(&mut self, src: usize, start: usize, dst: usize) -> bool {
        if !self.can_move_tableau_to_tableau(src, start, dst) {
            return false;
        }

        let moved = self.tableaus[src].split_off(start);
        let count = moved.len();
        self.tableaus[dst].extend(moved);
        self.tableaus[src].flip_top_card();

        self.move_history.record(
            KlondikeMove::new(KlondikeMoveKind::TableauToTableau)
                .with_source(src)
                .with_destination(dst)
                .with_card_count(count),
        );
        true
    }

    /// Plays the top card of `src` onto the lowest-index foundation that
    /// accepts it.
    pub fn auto_move_to_foundation(&mut self, src: usize) -> bool {
        let Some(card) = self.tableau_top(src) else {
            return false;
        };
        if !card.face_up {
            return false;
        }
        match first_accepting_foundation(&self.foundations, &card) {
            Some(foundation) => self.move_tableau_to_foundation(src, foundation),
            None => false,
        }
    }

    pub fn auto_move_waste_to_foundation(&mut self) -> bool {
        let Some(card) = self.waste_top() else {
            return false;
        };
        match first_accepting_foundation(&self.foundations, &card) {
            Some(foundation) => self.move_waste_to_foundation(foundation),
            None => false,
        }
    }

    pub fn valid_moves(&self) -> Vec<KlondikeMove> {
        let mut moves = Vec::new();

        if !self.stock.is_empty() {
            let drawn = self
                .stock
                .len()
                .min(usize::from(self.draw_count.count()));
            moves.push(KlondikeMove::new(KlondikeMoveKind::DrawFromStock).with_card_count(drawn));
        } else if !self.waste.is_empty() {
            moves.push(
                KlondikeMove::new(KlondikeMoveKind::ResetStock).with_card_count(self.waste.len()),
            );
        }

        for foundation in 0..FOUNDATION_COUNT {
            if self.can_move_waste_to_foundation(foundation) {
                moves.push(
                    KlondikeMove::new(KlondikeMoveKind::WasteToFoundation)
                        .with_destination(foundation),
                );
            }
        }

        for dst in 0..KLONDIKE_TABLEAU_COUNT {
            if self.can_move_waste_to_tableau(dst) {
                moves.push(KlondikeMove::new(KlondikeMoveKind::WasteToTableau).with_destination(dst));
            }
        }

        for src in 0..KLONDIKE_TABLEAU_COUNT {
            for foundation in 0..FOUNDATION_COUNT {
                if self.can_move_tableau_to_foundation(src, foundation) {
                    moves.push(
                        KlondikeMove::new(KlondikeMoveKind::TableauToFoundation)
                            .with_source(src)
                            .with_destination(foundation),
                    );
                }
            }
        }

        for (src, source) in self.tableaus.iter().enumerate() {
            let Some(first_face_up) = source.first_face_up_index() else {
                continue;
            };
            for start in first_face_up..source.len() {
                for dst in 0..KLONDIKE_TABLEAU_COUNT {
                    if self.can_move_tableau_to_tableau(src, start, dst) {
                        moves.push(
                            KlondikeMove::new(KlondikeMoveKind::TableauToTableau)
                                .with_source(src)
                                .with_destination(dst)
                                .with_card_count(source.len() - start),
                        );
                    }
                }
            }
        }

        moves
    }

    /// Executes a move record such as one produced by [`Self::valid_moves`].
    pub fn apply_move(&mut self, mv: &KlondikeMove) -> bool {
        match (mv.kind, mv.source, mv.destination) {
            (KlondikeMoveKind::DrawFromStock, _, _) => self.draw_from_stock(),
            (KlondikeMoveKind::ResetStock, _, _) => self.reset_stock(),
            (KlondikeMoveKind::WasteToFoundation, _, Some(dst)) => {
                self.move_waste_to_foundation(dst)
            }
            (KlondikeMoveKind::WasteToTableau, _, Some(dst)) => self.move_waste_to_tableau(dst),
            (KlondikeMoveKind::TableauToFoundation, Some(src), Some(dst)) => {
                self.move_tableau_to_foundation(src, dst)
            }
            (KlondikeMoveKind::TableauToTableau, Some(src), Some(dst)) => {
                let Some(start) = self
                    .tableaus
                    .get(src)
                    .and_then(|pile| pile.len().checked_sub(mv.card_count))
                else {
                    return false;
                };
                self.move_tableau_to_tableau(src, start, dst)
            }
            _ => false,
        }
    }

    fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.stock
            .iter()
            .chain(self.waste.iter())
            .chain(self.foundations.iter().flat_map(|pile| pile.cards()))
            .chain(self.tableaus.iter().flat_map(|pile| pile.iter()))
    }

    fn tableaus_are_well_formed(&self) -> bool {
        self.tableaus.iter().all(|pile| {
            pile.has_face_up_contiguity() && is_descending_alternating_run(pile.face_up_cards())
        })
    }
}

impl CardGame for KlondikeGame {
    const MODE: GameMode = GameMode::Klondike;

    fn validate_game(&self) -> bool {
        is_unique_full_deck(self.all_cards(), Self::MODE.card_total())
            && foundations_are_well_formed(&self.foundations)
            && self.tableaus_are_well_formed()
    }

    fn is_game_won(&self) -> bool {
        self.is_won()
    }
}

#[cfg(test)]
impl KlondikeGame {
    pub(crate) fn debug_new(
        stock: Vec<Card>,
        waste: Vec<Card>,
        foundations: [Foundation; FOUNDATION_COUNT],
        tableaus: [Vec<Card>; KLONDIKE_TABLEAU_COUNT],
    ) -> Self {
        Self {
            draw_count: DrawMode::One,
            stock: Stock::from_cards(stock),
            waste: Waste::from_cards(waste),
            foundations,
            tableaus: tableaus.map(KlondikeTableau::from_cards),
            move_history: MoveHistory::default(),
        }
    }
}
