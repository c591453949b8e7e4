//! Saving and restoring games.
//!
//! A [`GameSnapshot`] holds everything a [`Game`] needs to resume: the board
//! with its per-piece flags, the side to move, the repetition history and the
//! fifty-move counter. Snapshots are stored as JSON.

use crate::config::ConfigError;
use crate::draw::{FiftyMoveCounter, MaterialSignature, PositionHistory};
use crate::status::validate_position;
use crate::{Board, Game, GameConfig, GameStatus, PositionError};
use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when saving or restoring a game.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid board in snapshot: {0}")]
    InvalidBoard(#[from] PositionError),
    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Serializable state of a game in progress or finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
    pub history: PositionHistory,
    pub fifty: FiftyMoveCounter,
    #[serde(default)]
    pub draw_offered: bool,
    pub status: GameStatus,
    #[serde(default)]
    pub config: GameConfig,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the snapshot to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads a snapshot written by [`GameSnapshot::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that the snapshot describes a reachable-looking game.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        validate_position(&self.board, self.turn)?;

        match self.history.as_slice().last() {
            Some(last) if *last == self.board.placement() => {}
            Some(_) => {
                return Err(SnapshotError::Inconsistent(
                    "history does not end with the current board".to_string(),
                ))
            }
            None => {
                return Err(SnapshotError::Inconsistent("history is empty".to_string()))
            }
        }
        if self.fifty.signature() != MaterialSignature::of(&self.board) {
            return Err(SnapshotError::Inconsistent(
                "fifty-move counter does not match the board".to_string(),
            ));
        }
        if self.draw_offered && self.status.is_terminal() {
            return Err(SnapshotError::Inconsistent(
                "draw offer pending in a finished game".to_string(),
            ));
        }

        self.config.validate()?;
        Ok(())
    }
}

impl Game {
    /// Captures the full state of the game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            turn: self.turn,
            history: self.history.clone(),
            fifty: self.fifty.clone(),
            draw_offered: self.draw_offered,
            status: self.status,
            config: self.config,
        }
    }

    /// Rebuilds a game from a snapshot after validating it.
    ///
    /// A snapshot saved as ongoing has its status settled again, so a board
    /// that is in fact finished comes back finished.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let mut game = Game {
            board: snapshot.board,
            turn: snapshot.turn,
            history: snapshot.history,
            fifty: snapshot.fifty,
            draw_offered: snapshot.draw_offered,
            status: snapshot.status,
            config: snapshot.config,
        };
        game.refresh_status();
        debug!(turn = %game.turn, status = %game.status, "restored game");
        Ok(game)
    }

    /// Saves the game to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        self.snapshot().save(path)
    }

    /// Loads a game saved with [`Game::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Self::restore(GameSnapshot::load(path)?)
    }
}
