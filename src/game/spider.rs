use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::deck::Deck;

use super::{
    AcceptsCard, Card, CardGame, GameMode, MoveHistory, SpiderMove, SpiderMoveKind,
    SpiderSuitMode, SpiderTableau, Suit, ACE, KING,
};

pub const SPIDER_TABLEAU_COUNT: usize = 10;
pub const SPIDER_SEQUENCES_TO_WIN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpiderGame {
    difficulty: SpiderSuitMode,
    tableaus: [SpiderTableau; SPIDER_TABLEAU_COUNT],
    stock: Vec<Card>,
    completed_sequences: usize,
    completed_suits: Vec<Suit>,
    move_history: MoveHistory<SpiderMoveKind>,
}

impl SpiderGame {
    pub fn new_game(difficulty: SpiderSuitMode, seed: Option<u64>) -> Self {
        let mut deck = Deck::spider(difficulty, seed);
        deck.shuffle();

        let mut game = Self {
            difficulty,
            ..Self::default()
        };

        for (col, pile) in game.tableaus.iter_mut().enumerate() {
            let depth = if col < 4 { 6 } else { 5 };
            for row in 0..depth {
                let Some(mut card) = deck.draw() else {
                    break;
                };
                card.face_up = row == depth - 1;
                pile.push(card);
            }
        }

        while let Some(mut card) = deck.draw() {
            card.face_up = false;
            game.stock.push(card);
        }

        game
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_game(SpiderSuitMode::default(), Some(seed))
    }

    pub fn difficulty(&self) -> SpiderSuitMode {
        self.difficulty
    }

    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// Full ten-card deals still available.
    pub fn stock_deals_remaining(&self) -> usize {
        self.stock.len() / SPIDER_TABLEAU_COUNT
    }

    pub fn tableaus(&self) -> &[SpiderTableau; SPIDER_TABLEAU_COUNT] {
        &self.tableaus
    }

    pub fn tableau_card(&self, col: usize, index: usize) -> Option<Card> {
        self.tableaus
            .get(col)
            .and_then(|pile| pile.get(index))
            .copied()
    }

    pub fn completed_sequences(&self) -> usize {
        self.completed_sequences
    }

    pub fn completed_suits(&self) -> &[Suit] {
        &self.completed_suits
    }

    pub fn move_history(&self) -> &MoveHistory<SpiderMoveKind> {
        &self.move_history
    }

    pub fn is_won(&self) -> bool {
        self.completed_sequences >= SPIDER_SEQUENCES_TO_WIN
    }

    pub fn can_deal_from_stock(&self) -> bool {
        self.stock.len() >= SPIDER_TABLEAU_COUNT && self.tableaus.iter().all(|pile| !pile.is_empty())
    }

    pub fn deal_from_stock(&mut self) -> bool {
        if !self.can_deal_from_stock() {
            return false;
        }

        for pile in &mut self.tableaus {
            let Some(mut card) = self.stock.pop() else {
                break;
            };
            card.face_up = true;
            pile.push(card);
        }

        self.move_history.record(
            SpiderMove::new(SpiderMoveKind::DealFromStock).with_card_count(SPIDER_TABLEAU_COUNT),
        );
        self.remove_completed_sequences();
        true
    }

    pub fn can_move_cards(&self, src: usize, start: usize, dst: usize) -> bool {
        if src == dst {
            return false;
        }
        let (Some(source), Some(target)) = (self.tableaus.get(src), self.tableaus.get(dst)) else {
            return false;
        };
        if !source.can_pickup_from(start) {
            return false;
        }
        source
            .get(start)
            .is_some_and(|card| target.can_accept_card(card))
    }

    /// Moves the same-suit run starting at `start` onto `dst`.
    pub fn move_cards(&mut self, src: usize, start: usize, dst: usize) -> bool {
        if !self.can_move_cards(src, start, dst) {
            return false;
        }

        let moved = self.tableaus[src].split_off(start);
        let count = moved.len();
        self.tableaus[dst].extend(moved);
        self.tableaus[src].flip_top_card();

        self.move_history.record(
            SpiderMove::new(SpiderMoveKind::TableauToTableau)
                .with_source(src)
                .with_destination(dst)
                .with_card_count(count),
        );
        self.remove_completed_sequences();
        true
    }

    pub fn valid_moves(&self) -> Vec<SpiderMove> {
        let mut moves = Vec::new();

        if self.can_deal_from_stock() {
            moves.push(
                SpiderMove::new(SpiderMoveKind::DealFromStock).with_card_count(SPIDER_TABLEAU_COUNT),
            );
        }

        for (src, source) in self.tableaus.iter().enumerate() {
            let Some(first_face_up) = source.first_face_up_index() else {
                continue;
            };
            for start in first_face_up..source.len() {
                for dst in 0..SPIDER_TABLEAU_COUNT {
                    if self.can_move_cards(src, start, dst) {
                        moves.push(
                            SpiderMove::new(SpiderMoveKind::TableauToTableau)
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

    /// Completed sequences are removed automatically, so their records
    /// cannot be replayed.
    pub fn apply_move(&mut self, mv: &SpiderMove) -> bool {
        match (mv.kind, mv.source, mv.destination) {
            (SpiderMoveKind::DealFromStock, _, _) => self.deal_from_stock(),
            (SpiderMoveKind::TableauToTableau, Some(src), Some(dst)) => {
                let Some(start) = self
                    .tableaus
                    .get(src)
                    .and_then(|pile| pile.len().checked_sub(mv.card_count))
                else {
                    return false;
                };
                self.move_cards(src, start, dst)
            }
            _ => false,
        }
    }

    fn remove_completed_sequences(&mut self) {
        for col in 0..SPIDER_TABLEAU_COUNT {
            while self.tableaus[col].has_complete_sequence() {
                let removed = self.tableaus[col].remove_complete_sequence();
                let Some(first) = removed.first() else {
                    break;
                };
                self.completed_sequences += 1;
                self.completed_suits.push(first.suit);
                self.move_history.record(
                    SpiderMove::new(SpiderMoveKind::CompleteSequence)
                        .with_source(col)
                        .with_card_count(removed.len()),
                );
                tracing::debug!(
                    column = col,
                    suit = ?first.suit,
                    completed = self.completed_sequences,
                    "spider sequence completed"
                );
            }
        }
    }

    fn live_cards(&self) -> impl Iterator<Item = &Card> {
        self.tableaus
            .iter()
            .flat_map(|pile| pile.iter())
            .chain(self.stock.iter())
    }

    fn card_counts_are_consistent(&self) -> bool {
        let copies = self.difficulty.copies_per_card();
        let suits = self.difficulty.suits();

        let mut counts: HashMap<(Suit, u8), usize> = HashMap::new();
        for card in self.live_cards() {
            if !card.has_valid_rank() || !suits.contains(&card.suit) {
                return false;
            }
            *counts.entry((card.suit, card.rank)).or_default() += 1;
        }

        if self.completed_suits.len() != self.completed_sequences {
            return counts.values().all(|&count| count <= copies);
        }

        for &suit in &self.completed_suits {
            if !suits.contains(&suit) {
                return false;
            }
            for rank in ACE..=KING {
                *counts.entry((suit, rank)).or_default() += 1;
            }
        }
        suits.iter().all(|&suit| {
            (ACE..=KING).all(|rank| counts.get(&(suit, rank)).copied().unwrap_or(0) == copies)
        })
    }
}

impl CardGame for SpiderGame {
    const MODE: GameMode = GameMode::Spider;

    fn validate_game(&self) -> bool {
        if self.completed_sequences > SPIDER_SEQUENCES_TO_WIN {
            return false;
        }
        let live = self.live_cards().count();
        let removed = self.completed_sequences * usize::from(KING);
        live + removed == Self::MODE.card_total()
            && self.card_counts_are_consistent()
            && self.tableaus.iter().all(|pile| pile.has_face_up_contiguity())
    }

    fn is_game_won(&self) -> bool {
        self.is_won()
    }
}

#[cfg(test)]
impl SpiderGame {
    pub(crate) fn debug_new(
        difficulty: SpiderSuitMode,
        stock: Vec<Card>,
        tableaus: [Vec<Card>; SPIDER_TABLEAU_COUNT],
        completed_suits: Vec<Suit>,
    ) -> Self {
        Self {
            difficulty,
            tableaus: tableaus.map(SpiderTableau::from_cards),
            stock,
            completed_sequences: completed_suits.len(),
            completed_suits,
            move_history: MoveHistory::default(),
        }
    }
}
