use std::collections::{HashMap, VecDeque};

use rand::Rng;

use crate::config::EngineConfig;
use crate::engine::commands::EngineCommand;
use crate::engine::foundation_safety::next_safe_auto_move;
use crate::engine::game_mode::VariantRuntime;
use crate::game::{GameMode, SnapshotError};

const SESSION_FORMAT_VERSION: &str = "1";

/// One player's game plus the undo/redo bookkeeping around it.
///
/// Undo works on whole-game snapshots: every accepted command pushes the
/// pre-command snapshot, and any auto-moves it triggers belong to the same
/// undo step.
#[derive(Debug, Clone)]
pub struct Session {
    config: EngineConfig,
    seed: u64,
    runtime: VariantRuntime,
    undo_stack: VecDeque<String>,
    redo_stack: Vec<String>,
}

impl Session {
    pub fn new(mode: GameMode, seed: Option<u64>, config: EngineConfig) -> Self {
        let seed = resolve_seed(seed);
        tracing::debug!(mode = %mode, seed, "new game dealt");
        Self {
            runtime: VariantRuntime::new(mode, Some(seed), &config),
            config,
            seed,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Replaces the current game. History from the old game is dropped.
    pub fn new_game(&mut self, mode: GameMode, seed: Option<u64>) -> u64 {
        let seed = resolve_seed(seed);
        self.runtime = VariantRuntime::new(mode, Some(seed), &self.config);
        self.seed = seed;
        self.undo_stack.clear();
        self.redo_stack.clear();
        tracing::debug!(mode = %mode, seed, "new game dealt");
        seed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_auto_move_enabled(&mut self, enabled: bool) {
        self.config.auto_move_enabled = enabled;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mode(&self) -> GameMode {
        self.runtime.mode()
    }

    pub fn runtime(&self) -> &VariantRuntime {
        &self.runtime
    }

    pub fn is_game_won(&self) -> bool {
        self.runtime.is_game_won()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Runs `command`, then drains safe foundation moves when auto-move is on.
    pub fn apply(&mut self, command: EngineCommand) -> bool {
        let snapshot = match self.runtime.save_game() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(mode = %self.mode(), error = %err, "could not snapshot game");
                return false;
            }
        };

        if !self.runtime.apply(command) {
            tracing::trace!(mode = %self.mode(), ?command, "command rejected");
            return false;
        }

        if self.config.auto_move_enabled {
            self.drain_auto_moves();
        }

        self.push_undo(snapshot);
        self.redo_stack.clear();
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        match self.swap_in(&snapshot) {
            Some(current) => {
                self.redo_stack.push(current);
                tracing::debug!(mode = %self.mode(), depth = self.undo_stack.len(), "undo");
                true
            }
            None => {
                self.undo_stack.push_back(snapshot);
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        match self.swap_in(&snapshot) {
            Some(current) => {
                self.push_undo(current);
                tracing::debug!(mode = %self.mode(), depth = self.redo_stack.len(), "redo");
                true
            }
            None => {
                self.redo_stack.push(snapshot);
                false
            }
        }
    }

    /// Persists the game without its undo history.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        Ok(format!(
            "v={}\nmode={}\nseed={}\nauto={}\ngame={}",
            SESSION_FORMAT_VERSION,
            self.mode().id(),
            self.seed,
            if self.config.auto_move_enabled { 1 } else { 0 },
            self.runtime.save_game()?,
        ))
    }

    /// Restores a session written by [`Session::encode`]. Unknown keys are
    /// ignored; `config` supplies everything the encoding does not carry.
    pub fn decode(raw: &str, mut config: EngineConfig) -> Result<Self, SnapshotError> {
        let mut fields = HashMap::<&str, &str>::new();
        for line in raw.lines() {
            if let Some((key, value)) = line.split_once('=') {
                fields.insert(key.trim(), value.trim());
            }
        }

        let version = fields
            .get("v")
            .copied()
            .ok_or(SnapshotError::MissingField("v"))?;
        if version != SESSION_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version.to_string()));
        }
        let mode_id = fields
            .get("mode")
            .copied()
            .ok_or(SnapshotError::MissingField("mode"))?;
        let mode = GameMode::from_id(mode_id)
            .ok_or_else(|| SnapshotError::UnknownMode(mode_id.to_string()))?;
        let seed = fields
            .get("seed")
            .and_then(|value| value.parse::<u64>().ok())
            .ok_or(SnapshotError::MissingField("seed"))?;
        if let Some(auto) = fields.get("auto") {
            config.auto_move_enabled = *auto == "1";
        }
        let game = fields
            .get("game")
            .copied()
            .ok_or(SnapshotError::MissingField("game"))?;
        let runtime = VariantRuntime::load(mode, game)?;

        Ok(Self {
            config,
            seed,
            runtime,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        })
    }

    fn drain_auto_moves(&mut self) {
        while let Some(command) = next_safe_auto_move(&self.runtime) {
            if !self.runtime.apply(command) {
                break;
            }
        }
    }

    fn push_undo(&mut self, snapshot: String) {
        if self.config.undo_limit == 0 {
            return;
        }
        if self.undo_stack.len() >= self.config.undo_limit {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(snapshot);
    }

    /// Loads `snapshot` and returns the snapshot of the state it replaced.
    fn swap_in(&mut self, snapshot: &str) -> Option<String> {
        let current = match self.runtime.save_game() {
            Ok(current) => current,
            Err(err) => {
                tracing::warn!(mode = %self.mode(), error = %err, "could not snapshot game");
                return None;
            }
        };
        match VariantRuntime::load(self.mode(), snapshot) {
            Ok(restored) => {
                self.runtime = restored;
                Some(current)
            }
            Err(err) => {
                tracing::warn!(mode = %self.mode(), error = %err, "could not restore snapshot");
                None
            }
        }
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::thread_rng().gen())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CardGame, FreecellGame};

    fn manual_config() -> EngineConfig {
        EngineConfig {
            auto_move_enabled: false,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn new_game_records_resolved_seed() {
        let mut session = Session::new(GameMode::Klondike, Some(12), manual_config());
        assert_eq!(session.seed(), 12);
        assert_eq!(session.mode(), GameMode::Klondike);

        let seed = session.new_game(GameMode::Spider, None);
        assert_eq!(session.seed(), seed);
        assert_eq!(session.mode(), GameMode::Spider);
        assert!(!session.can_undo());

        let replay = VariantRuntime::new(GameMode::Spider, Some(seed), session.config());
        assert_eq!(session.runtime(), &replay);
    }

    #[test]
    fn undo_and_redo_swap_snapshots() {
        let mut session = Session::new(GameMode::Klondike, Some(3), manual_config());
        let initial = session.runtime().save_game().unwrap();

        assert!(session.apply(EngineCommand::DrawFromStock));
        let after_draw = session.runtime().save_game().unwrap();
        assert_ne!(after_draw, initial);
        assert!(session.can_undo());

        assert!(session.undo());
        assert_eq!(session.runtime().save_game().unwrap(), initial);
        assert!(!session.undo());
        assert!(session.can_redo());

        assert!(session.redo());
        assert_eq!(session.runtime().save_game().unwrap(), after_draw);
        assert!(!session.redo());
    }

    #[test]
    fn rejected_command_leaves_stacks_alone() {
        let mut session = Session::new(GameMode::Klondike, Some(3), manual_config());
        assert!(session.apply(EngineCommand::DrawFromStock));
        assert!(session.undo());

        assert!(!session.apply(EngineCommand::DealFromStock));
        assert!(!session.apply(EngineCommand::MoveTableauToTableau {
            src: 0,
            start: 0,
            dst: 0
        }));
        assert_eq!(session.undo_depth(), 0);
        assert!(session.can_redo());
    }

    #[test]
    fn new_command_clears_redo() {
        let mut session = Session::new(GameMode::Klondike, Some(3), manual_config());
        assert!(session.apply(EngineCommand::DrawFromStock));
        assert!(session.undo());
        assert!(session.apply(EngineCommand::DrawFromStock));
        assert!(!session.can_redo());
    }

    #[test]
    fn undo_stack_is_capped() {
        let config = EngineConfig {
            undo_limit: 3,
            ..manual_config()
        };
        let mut session = Session::new(GameMode::Klondike, Some(8), config);
        for _ in 0..6 {
            assert!(session.apply(EngineCommand::DrawFromStock));
        }
        assert_eq!(session.undo_depth(), 3);
        while session.undo() {}
        let klondike = session.runtime().as_klondike().unwrap();
        assert_eq!(klondike.waste().len(), 3);
    }

    #[test]
    fn auto_moves_share_the_undo_step() {
        let mut session = Session::new(GameMode::Freecell, Some(0), EngineConfig::default());
        let before_any = session.runtime().clone();
        let command = session
            .runtime()
            .valid_commands()
            .into_iter()
            .find(|command| matches!(command, EngineCommand::MoveTableauToFreeCell { .. }))
            .unwrap();

        assert!(session.apply(command));
        assert_eq!(session.undo_depth(), 1);
        assert!(session.runtime().validate_game());
        assert!(session.undo());
        assert_eq!(session.runtime(), &before_any);
    }

    #[test]
    fn encode_decode_restores_game_and_auto_flag() {
        let mut session = Session::new(GameMode::Freecell, Some(44), manual_config());
        let command = session.runtime().valid_commands()[0];
        assert!(session.apply(command));

        let encoded = session.encode().unwrap();
        assert!(encoded.starts_with("v=1\nmode=freecell\nseed=44\nauto=0\ngame="));

        let restored =
            Session::decode(&format!("{encoded}\nfuture=1"), EngineConfig::default()).unwrap();
        assert_eq!(restored.seed(), 44);
        assert!(!restored.config().auto_move_enabled);
        assert_eq!(restored.runtime(), session.runtime());
        assert!(!restored.can_undo());
        let game = restored.runtime().as_freecell().map(FreecellGame::move_history);
        assert_eq!(game.map(|history| history.len()), Some(1));
    }

    #[test]
    fn decode_reports_missing_and_bad_fields() {
        let config = EngineConfig::default();
        assert!(matches!(
            Session::decode("mode=klondike\nseed=1\ngame={}", config),
            Err(SnapshotError::MissingField("v"))
        ));
        assert!(matches!(
            Session::decode("v=1\nmode=pyramid\nseed=1\ngame={}", config),
            Err(SnapshotError::UnknownMode(mode)) if mode == "pyramid"
        ));
        assert!(matches!(
            Session::decode("v=2\nmode=spider\nseed=1\ngame={}", config),
            Err(SnapshotError::UnsupportedVersion(version)) if version == "2"
        ));
        assert!(matches!(
            Session::decode("v=1\nmode=spider\nseed=x\ngame={}", config),
            Err(SnapshotError::MissingField("seed"))
        ));
        assert!(matches!(
            Session::decode("v=1\nmode=spider\nseed=1\ngame={}", config),
            Err(SnapshotError::InvalidState(GameMode::Spider))
        ));
        let valid = FreecellGame::new_with_seed(1).save_game().unwrap();
        let raw = format!("v=1\nmode=freecell\nseed=1\ngame={valid}");
        assert!(Session::decode(&raw, config).is_ok());
    }
}
