use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::GameMode;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("card rank {rank} is outside 1..=13")]
    InvalidCard { rank: u8 },
    #[error("draw count {0} is not 1 or 3")]
    InvalidDrawCount(u8),
    #[error("spider suit count {0} is not 1, 2 or 4")]
    InvalidSuitCount(u8),
    #[error("decoded {0} game failed validation")]
    InvalidState(GameMode),
    #[error("unknown game mode {0:?}")]
    UnknownMode(String),
    #[error("session is missing field {0:?}")]
    MissingField(&'static str),
    #[error("unsupported session version {0:?}")]
    UnsupportedVersion(String),
}

/// Capabilities every solitaire engine shares: snapshotting, integrity
/// checks, and the win condition.
pub trait CardGame: Serialize + DeserializeOwned + Sized {
    const MODE: GameMode;

    fn validate_game(&self) -> bool;

    fn is_game_won(&self) -> bool;

    fn save_game(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot and rejects anything that does not describe a
    /// consistent game.
    fn try_load_game(data: &str) -> Result<Self, SnapshotError> {
        let game: Self = serde_json::from_str(data)?;
        if !game.validate_game() {
            return Err(SnapshotError::InvalidState(Self::MODE));
        }
        Ok(game)
    }

    fn load_game(data: &str) -> Option<Self> {
        Self::try_load_game(data).ok()
    }
}
