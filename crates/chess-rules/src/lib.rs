//! Chess rules engine on a plain 8x8 board.
//!
//! This crate provides:
//! - [`Board`] - pieces on squares, with the per-piece flags castling and
//!   en passant need
//! - [`Game`] - turn-by-turn game management with repetition and fifty-move
//!   tracking, resignation and draw offers
//! - [`RuleSet`] - trait for the rules that can be judged from one board
//! - [`Player`] and [`play_game`] - a turn driver and a random computer player
//! - [`GameSnapshot`] - JSON save and restore
//!
//! # Architecture
//!
//! Legality is decided in two steps. The [`movement`] module answers whether a
//! piece's movement pattern reaches a square; the [`safety`] module plays the
//! move on a scratch copy of the board and checks the mover's king. The board
//! is a small value type, so copying it for every trial move keeps the real board
//! untouched.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, MoveRequest};
//! use chess_rules::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game.make_move(MoveRequest::from_uci(uci).unwrap()).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Black });
//! ```

mod board;
mod config;
pub mod draw;
mod error;
mod game;
pub mod legality;
pub mod movement;
pub mod perft;
mod player;
pub mod rules;
pub mod safety;
mod snapshot;
pub mod status;

pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use draw::{is_insufficient_material, FiftyMoveCounter, PositionHistory};
pub use error::{MoveError, PositionError};
pub use game::Game;
pub use legality::{can_castle, castle, is_legal, make_move, CastlingSquares, MoveOutcome};
pub use player::{play_game, Player, PlayerAction, RandomPlayer, MAX_ATTEMPTS_PER_TURN};
pub use rules::{DrawReason, GameStatus, RuleSet, StandardChess};
pub use safety::{is_king_safe, is_square_safe, would_expose_king};
pub use snapshot::{GameSnapshot, SnapshotError};
pub use status::{
    has_any_legal_move, is_checkmate, is_stalemate, king_in_check, legal_moves, resolve_origin,
    validate_position,
};
