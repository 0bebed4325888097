use crate::config::EngineConfig;
use crate::engine::commands::EngineCommand;
use crate::game::{CardGame, FreecellGame, GameMode, KlondikeGame, SnapshotError, SpiderGame};

/// Runtime container for the active solitaire variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantRuntime {
    Klondike(KlondikeGame),
    Spider(SpiderGame),
    Freecell(FreecellGame),
}

impl VariantRuntime {
    /// Deals a fresh game, taking variant options from `config`.
    pub fn new(mode: GameMode, seed: Option<u64>, config: &EngineConfig) -> Self {
        match mode {
            GameMode::Klondike => {
                Self::Klondike(KlondikeGame::new_game(seed, config.klondike_draw_mode))
            }
            GameMode::Spider => Self::Spider(SpiderGame::new_game(config.spider_suit_mode, seed)),
            GameMode::Freecell => Self::Freecell(FreecellGame::new_game(seed)),
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            Self::Klondike(_) => GameMode::Klondike,
            Self::Spider(_) => GameMode::Spider,
            Self::Freecell(_) => GameMode::Freecell,
        }
    }

    pub fn is_game_won(&self) -> bool {
        match self {
            Self::Klondike(game) => game.is_game_won(),
            Self::Spider(game) => game.is_game_won(),
            Self::Freecell(game) => game.is_game_won(),
        }
    }

    pub fn validate_game(&self) -> bool {
        match self {
            Self::Klondike(game) => game.validate_game(),
            Self::Spider(game) => game.validate_game(),
            Self::Freecell(game) => game.validate_game(),
        }
    }

    pub fn move_count(&self) -> usize {
        match self {
            Self::Klondike(game) => game.move_history().len(),
            Self::Spider(game) => game.move_history().len(),
            Self::Freecell(game) => game.move_history().len(),
        }
    }

    pub fn save_game(&self) -> Result<String, SnapshotError> {
        match self {
            Self::Klondike(game) => game.save_game(),
            Self::Spider(game) => game.save_game(),
            Self::Freecell(game) => game.save_game(),
        }
    }

    pub fn load(mode: GameMode, data: &str) -> Result<Self, SnapshotError> {
        Ok(match mode {
            GameMode::Klondike => Self::Klondike(KlondikeGame::try_load_game(data)?),
            GameMode::Spider => Self::Spider(SpiderGame::try_load_game(data)?),
            GameMode::Freecell => Self::Freecell(FreecellGame::try_load_game(data)?),
        })
    }

    /// Every legal move of the active variant, as commands.
    pub fn valid_commands(&self) -> Vec<EngineCommand> {
        match self {
            Self::Klondike(game) => game
                .valid_moves()
                .iter()
                .filter_map(|mv| {
                    let pile_len = mv
                        .source
                        .and_then(|src| game.tableaus().get(src))
                        .map_or(0, |pile| pile.len());
                    EngineCommand::from_klondike_move(mv, pile_len)
                })
                .collect(),
            Self::Spider(game) => game
                .valid_moves()
                .iter()
                .filter_map(|mv| {
                    let pile_len = mv
                        .source
                        .and_then(|src| game.tableaus().get(src))
                        .map_or(0, |pile| pile.len());
                    EngineCommand::from_spider_move(mv, pile_len)
                })
                .collect(),
            Self::Freecell(game) => game
                .valid_moves()
                .iter()
                .filter_map(|mv| {
                    let pile_len = mv
                        .source
                        .and_then(|src| game.tableaus().get(src))
                        .map_or(0, |pile| pile.len());
                    EngineCommand::from_freecell_move(mv, pile_len)
                })
                .collect(),
        }
    }

    /// Executes `command` against the active game. Commands belonging to
    /// another variant return false without touching state.
    pub fn apply(&mut self, command: EngineCommand) -> bool {
        match self {
            Self::Klondike(game) => apply_klondike(game, command),
            Self::Spider(game) => apply_spider(game, command),
            Self::Freecell(game) => apply_freecell(game, command),
        }
    }

    pub fn as_klondike(&self) -> Option<&KlondikeGame> {
        match self {
            Self::Klondike(game) => Some(game),
            Self::Spider(_) | Self::Freecell(_) => None,
        }
    }

    pub fn as_spider(&self) -> Option<&SpiderGame> {
        match self {
            Self::Spider(game) => Some(game),
            Self::Klondike(_) | Self::Freecell(_) => None,
        }
    }

    pub fn as_freecell(&self) -> Option<&FreecellGame> {
        match self {
            Self::Freecell(game) => Some(game),
            Self::Klondike(_) | Self::Spider(_) => None,
        }
    }
}

fn apply_klondike(game: &mut KlondikeGame, command: EngineCommand) -> bool {
    match command {
        EngineCommand::DrawFromStock => game.draw_from_stock(),
        EngineCommand::ResetStock => game.reset_stock(),
        EngineCommand::MoveWasteToFoundation { foundation } => {
            game.move_waste_to_foundation(foundation)
        }
        EngineCommand::MoveWasteToTableau { dst } => game.move_waste_to_tableau(dst),
        EngineCommand::MoveTableauToFoundation { src, foundation } => {
            game.move_tableau_to_foundation(src, foundation)
        }
        EngineCommand::MoveTableauToTableau { src, start, dst } => {
            game.move_tableau_to_tableau(src, start, dst)
        }
        EngineCommand::AutoMoveTableauToFoundation { src } => game.auto_move_to_foundation(src),
        EngineCommand::AutoMoveWasteToFoundation => game.auto_move_waste_to_foundation(),
        EngineCommand::DealFromStock
        | EngineCommand::MoveTableauToFreeCell { .. }
        | EngineCommand::MoveFreeCellToFoundation { .. }
        | EngineCommand::MoveFreeCellToTableau { .. }
        | EngineCommand::AutoMoveAllToFoundation => false,
    }
}

fn apply_spider(game: &mut SpiderGame, command: EngineCommand) -> bool {
    match command {
        EngineCommand::DealFromStock => game.deal_from_stock(),
        EngineCommand::MoveTableauToTableau { src, start, dst } => game.move_cards(src, start, dst),
        _ => false,
    }
}

fn apply_freecell(game: &mut FreecellGame, command: EngineCommand) -> bool {
    match command {
        EngineCommand::MoveTableauToFreeCell { src, cell } => {
            game.move_tableau_to_free_cell(src, cell)
        }
        EngineCommand::MoveTableauToFoundation { src, foundation } => {
            game.move_tableau_to_foundation(src, foundation)
        }
        EngineCommand::MoveTableauToTableau { src, start, dst } => {
            game.move_tableau_to_tableau(src, start, dst)
        }
        EngineCommand::MoveFreeCellToFoundation { cell, foundation } => {
            game.move_free_cell_to_foundation(cell, foundation)
        }
        EngineCommand::MoveFreeCellToTableau { cell, dst } => {
            game.move_free_cell_to_tableau(cell, dst)
        }
        EngineCommand::AutoMoveAllToFoundation => game.auto_move_to_foundation(),
        _ => false,
    }
}

impl From<KlondikeGame> for VariantRuntime {
    fn from(game: KlondikeGame) -> Self {
        Self::Klondike(game)
    }
}

impl From<SpiderGame> for VariantRuntime {
    fn from(game: SpiderGame) -> Self {
        Self::Spider(game)
    }
}

impl From<FreecellGame> for VariantRuntime {
    fn from(game: FreecellGame) -> Self {
        Self::Freecell(game)
    }
}
