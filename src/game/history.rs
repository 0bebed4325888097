use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlondikeMoveKind {
    DrawFromStock,
    ResetStock,
    WasteToFoundation,
    WasteToTableau,
    TableauToFoundation,
    TableauToTableau,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreecellMoveKind {
    TableauToFreeCell,
    TableauToFoundation,
    TableauToTableau,
    FreeCellToFoundation,
    FreeCellToTableau,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpiderMoveKind {
    DealFromStock,
    TableauToTableau,
    CompleteSequence,
}

/// One executed (or candidate) move. Indices are pile positions within the
/// kind's source and destination collections; `None` where the kind has no
/// such pile (stock, waste).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord<K> {
    pub kind: K,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<usize>,
    #[serde(default = "default_card_count")]
    pub card_count: usize,
}

fn default_card_count() -> usize {
    1
}

impl<K> MoveRecord<K> {
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            source: None,
            destination: None,
            card_count: 1,
        }
    }

    pub fn with_source(mut self, source: usize) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_destination(mut self, destination: usize) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_card_count(mut self, card_count: usize) -> Self {
        self.card_count = card_count;
        self
    }
}

pub type KlondikeMove = MoveRecord<KlondikeMoveKind>;
pub type FreecellMove = MoveRecord<FreecellMoveKind>;
pub type SpiderMove = MoveRecord<SpiderMoveKind>;

/// Append-only log of executed moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory<K> {
    moves: Vec<MoveRecord<K>>,
}

impl<K> Default for MoveHistory<K> {
    fn default() -> Self {
        Self { moves: Vec::new() }
    }
}

impl<K> MoveHistory<K> {
    pub(crate) fn record(&mut self, record: MoveRecord<K>) {
        self.moves.push(record);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<&MoveRecord<K>> {
        self.moves.last()
    }

    pub fn as_slice(&self) -> &[MoveRecord<K>] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord<K>> {
        self.moves.iter()
    }
}
