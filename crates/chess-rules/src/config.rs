//! Game configuration.
//!
//! Settings are read from TOML. Every field has a default, so an empty file
//! (or no file at all) yields standard rules.

use chess_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A value parsed but makes no sense.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Rule parameters for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Piece a pawn becomes when the mover names none.
    pub default_promotion: PieceKind,
    /// Occurrences of one position that end the game.
    pub repetition_limit: usize,
    /// Full moves without a pawn move or capture that end the game.
    pub fifty_move_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            default_promotion: PieceKind::Queen,
            repetition_limit: 3,
            fifty_move_limit: 50,
        }
    }
}

impl GameConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, and
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_promotion.is_promotion_target() {
            return Err(ConfigError::Invalid(format!(
                "default_promotion cannot be {}",
                self.default_promotion
            )));
        }
        if self.repetition_limit == 0 {
            return Err(ConfigError::Invalid(
                "repetition_limit must be at least 1".to_string(),
            ));
        }
        if self.fifty_move_limit == 0 {
            return Err(ConfigError::Invalid(
                "fifty_move_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.default_promotion, PieceKind::Queen);
        assert_eq!(config.repetition_limit, 3);
        assert_eq!(config.fifty_move_limit, 50);
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let toml_content = r#"
default_promotion = "knight"
fifty_move_limit = 75
"#;
        let config = GameConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.default_promotion, PieceKind::Knight);
        assert_eq!(config.repetition_limit, 3);
        assert_eq!(config.fifty_move_limit, 75);
    }

    #[test]
    fn king_promotion_is_invalid() {
        let result = GameConfig::from_toml_str(r#"default_promotion = "king""#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_limits_are_invalid() {
        assert!(matches!(
            GameConfig::from_toml_str("repetition_limit = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("fifty_move_limit = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = GameConfig::from_toml_str("this is not [valid toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = GameConfig::load("definitely/not/here/game.toml").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "repetition_limit = 5\n").unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.repetition_limit, 5);
    }
}
