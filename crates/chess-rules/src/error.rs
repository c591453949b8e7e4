//! Error types for game operations.

use chess_core::{CastleSide, Color, PieceKind, PlacementError, Square};
use thiserror::Error;

/// Why a move, castle or signal was refused.
///
/// Every variant is recoverable: the board and game state are left exactly
/// as they were, and the caller can simply ask its player again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The origin square is empty.
    #[error("no piece on {0}")]
    NoPiece(Square),
    /// The origin holds a piece of the side not on move.
    #[error("the piece on {0} belongs to the opponent")]
    NotYourPiece(Square),
    /// The piece cannot legally go there.
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },
    /// More than one piece of the requested kind can reach the destination.
    #[error("{count} {kind}s can move to {to}; give the origin square")]
    Ambiguous {
        kind: PieceKind,
        to: Square,
        count: usize,
    },
    /// No piece of the requested kind can reach the destination.
    #[error("no {kind} can move to {to}")]
    NoMatch { kind: PieceKind, to: Square },
    /// Pawns may only become a knight, bishop, rook or queen.
    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),
    /// Castling preconditions are not met.
    #[error("castling {0} is not available")]
    CastlingUnavailable(CastleSide),
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// A draw response arrived without a pending offer.
    #[error("no draw offer is pending")]
    NoDrawOffer,
    /// A move arrived while a draw offer still awaits an answer.
    #[error("a draw offer is awaiting a response")]
    DrawOfferPending,
    /// The opponent declined the draw offer.
    #[error("the draw offer was declined")]
    DrawDeclined,
}

/// Why a board cannot start or resume a game.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// Each side needs exactly one king.
    #[error("{color} has {count} kings")]
    KingCount { color: Color, count: usize },
    /// Pawns never stand on the first or last rank.
    #[error("pawn on {0}")]
    PawnOnBackRank(Square),
    /// The side that just moved left its own king attacked.
    #[error("{0} is in check but not on move")]
    OpponentInCheck(Color),
}
