//! Rule set abstraction.
//!
//! The [`Game`](crate::Game) delegates every question that can be answered
//! from a single board (legality, check, mate, stalemate, dead material) to a
//! [`RuleSet`]. History-dependent draws stay with the game.

mod standard;

pub use standard::StandardChess;

use crate::Board;
use chess_core::{Color, MoveRequest, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    /// The game continues.
    Ongoing,
    /// The side to move was mated.
    Checkmate { winner: Color },
    /// The loser resigned.
    Resignation { winner: Color },
    /// Drawn, for the given reason.
    Draw { reason: DrawReason },
}

impl GameStatus {
    /// Returns true for every status except [`GameStatus::Ongoing`].
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// The winner, if the game was decided.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } | GameStatus::Resignation { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Resignation { winner } => {
                write!(f, "{} resigns, {} wins", winner.opposite(), winner)
            }
            GameStatus::Draw { reason } => write!(f, "draw by {}", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// Neither side can possibly mate.
    InsufficientMaterial,
    /// The same placement occurred three times.
    ThreefoldRepetition,
    /// Fifty moves without a pawn move or capture.
    FiftyMoveRule,
    /// Both players agreed.
    Agreement,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::Agreement => "agreement",
        };
        f.write_str(text)
    }
}

/// Single-board rules of a chess variant.
///
/// # Example
///
/// ```
/// use chess_rules::{RuleSet, StandardChess};
/// use chess_core::Color;
///
/// let board = StandardChess.initial_board();
/// let moves = StandardChess.legal_moves(&board, Color::White);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the starting board for this variant.
    fn initial_board(&self) -> Board;

    /// Returns true if the piece on `from` may legally move to `to`.
    fn is_legal(&self, board: &Board, from: Square, to: Square) -> bool;

    /// Generates all legal non-castling moves for `color`.
    fn legal_moves(&self, board: &Board, color: Color) -> Vec<MoveRequest>;

    /// Returns true if `color` has at least one legal move.
    fn has_legal_move(&self, board: &Board, color: Color) -> bool {
        !self.legal_moves(board, color).is_empty()
    }

    /// Returns true if the king of `color` is attacked.
    fn is_check(&self, board: &Board, color: Color) -> bool;

    /// Returns true if neither side has sufficient material to checkmate.
    fn is_insufficient_material(&self, board: &Board) -> bool;

    /// Returns the status decided by the board alone, with `to_move` on
    /// move, or `None` while play can continue.
    ///
    /// Repetition and the fifty-move rule need history and are judged by the
    /// [`Game`](crate::Game).
    fn board_status(&self, board: &Board, to_move: Color) -> Option<GameStatus> {
        if !self.has_legal_move(board, to_move) {
            return Some(if self.is_check(board, to_move) {
                GameStatus::Checkmate {
                    winner: to_move.opposite(),
                }
            } else {
                GameStatus::Draw {
                    reason: DrawReason::Stalemate,
                }
            });
        }
        if self.is_insufficient_material(board) {
            return Some(GameStatus::Draw {
                reason: DrawReason::InsufficientMaterial,
            });
        }
        None
    }
}
