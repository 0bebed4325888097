use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{DrawMode, SpiderSuitMode};

/// Per-session engine settings. Missing keys fall back to the defaults and
/// unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub auto_move_enabled: bool,
    pub klondike_draw_mode: DrawMode,
    pub spider_suit_mode: SpiderSuitMode,
    pub undo_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_move_enabled: true,
            klondike_draw_mode: DrawMode::One,
            spider_suit_mode: SpiderSuitMode::Four,
            undo_limit: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert!(cfg.auto_move_enabled);
        assert_eq!(cfg.undo_limit, 100);
    }

    #[test]
    fn partial_file_overrides_named_keys() {
        let cfg = EngineConfig::from_toml_str(
            "auto_move_enabled = false\nklondike_draw_mode = 3\nspider_suit_mode = 2\nextra = \"ignored\"\n",
        )
        .unwrap();
        assert!(!cfg.auto_move_enabled);
        assert_eq!(cfg.klondike_draw_mode, DrawMode::Three);
        assert_eq!(cfg.spider_suit_mode, SpiderSuitMode::Two);
        assert_eq!(cfg.undo_limit, 100);
    }

    #[test]
    fn out_of_range_modes_are_rejected() {
        assert!(matches!(
            EngineConfig::from_toml_str("klondike_draw_mode = 2"),
            Err(ConfigError::Parse(_))
        ));
        assert!(EngineConfig::from_toml_str("spider_suit_mode = 3").is_err());
        assert!(EngineConfig::from_toml_str("undo_limit = \"lots\"").is_err());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = EngineConfig::load("/nonexistent/cardthropic-rules.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
