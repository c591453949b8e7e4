//! Move legality and application.
//!
//! Legality composes the pseudo-legal movement rules with the king-safety
//! simulator. Application validates first and mutates second, so a rejected
//! request never leaves a half-applied board behind.

use crate::movement::{en_passant_victim, piece_can_reach};
use crate::safety::{is_square_safe, would_expose_king};
use crate::{Board, MoveError};
use chess_core::{CastleSide, Color, MoveRequest, Piece, PieceKind, Square};
use tracing::{debug, trace};

/// Returns true if the piece on `from` may move to `to`.
///
/// With `enforce_king_safety` unset only the movement geometry and occupancy
/// rules are checked; that mode exists for attack detection, which must not
/// recurse into king safety.
pub fn is_legal(board: &Board, from: Square, to: Square, enforce_king_safety: bool) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if !piece_can_reach(piece, from, to, board) {
        return false;
    }
    !enforce_king_safety || !would_expose_king(board, from, to)
}

/// What a successfully applied move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Square,
    pub to: Square,
    /// Kind of the piece that moved, before any promotion.
    pub moved: PieceKind,
    /// The piece removed from the board, if any.
    pub captured: Option<Piece>,
    pub en_passant: bool,
    pub double_advance: bool,
    /// The kind the pawn became, if this move promoted.
    pub promotion: Option<PieceKind>,
}

/// Validates and applies a move request.
///
/// `default_promotion` replaces a pawn reaching its last rank when the
/// request names no piece. On error the board is unchanged.
pub fn make_move(
    board: &mut Board,
    request: MoveRequest,
    default_promotion: PieceKind,
) -> Result<MoveOutcome, MoveError> {
    let MoveRequest { from, to, .. } = request;
    let piece = board.piece_at(from).ok_or(MoveError::NoPiece(from))?;

    let is_pawn = piece.kind == PieceKind::Pawn;
    let promotes = is_pawn && to.rank_index() as u8 == piece.color.promotion_rank();
    let promotion_kind = request.promotion.unwrap_or(default_promotion);
    if promotes && !promotion_kind.is_promotion_target() {
        return Err(MoveError::InvalidPromotion(promotion_kind));
    }

    if !is_legal(board, from, to, true) {
        trace!(%from, %to, "rejected illegal move");
        return Err(MoveError::IllegalMove { from, to });
    }

    let victim_sq = en_passant_victim(board, from, to);
    let captured = match victim_sq {
        Some(sq) => board.take(sq),
        None => board.take(to),
    };
    board.take(from);
    board.clear_double_advances();

    let double_advance = is_pawn && (to.rank_index() - from.rank_index()).abs() == 2;

    let mut moved = piece;
    moved.has_moved = true;
    moved.advanced_two = double_advance;
    if promotes {
        moved.kind = promotion_kind;
    }
    board.put(to, moved);

    let outcome = MoveOutcome {
        from,
        to,
        moved: piece.kind,
        captured,
        en_passant: victim_sq.is_some(),
        double_advance,
        promotion: promotes.then_some(promotion_kind),
    };
    debug!(
        %from,
        %to,
        piece = %piece,
        captured = ?outcome.captured,
        promotion = ?outcome.promotion,
        "applied move"
    );
    Ok(outcome)
}

/// Squares involved in castling: king from/to and rook from/to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

/// Returns the castling squares for a king standing on `king_from`.
///
/// The king travels two files towards the rook and the rook lands on the
/// square the king crossed.
fn castling_squares(king_from: Square, color: Color, side: CastleSide) -> Option<CastlingSquares> {
    let dir = side.direction();
    Some(CastlingSquares {
        king_from,
        king_to: king_from.offset(0, 2 * dir)?,
        rook_from: Square::from_coords(color.back_rank() as i8, side.rook_file())?,
        rook_to: king_from.offset(0, dir)?,
    })
}

/// Checks every castling precondition and returns the squares involved.
///
/// Neither the king nor the rook may have moved, the color must not have
/// castled already, the squares between them must be empty, and the king's
/// current square, the square it crosses and the square it lands on must all
/// be safe.
pub fn castling_move(board: &Board, color: Color, side: CastleSide) -> Option<CastlingSquares> {
    if board.has_castled(color) {
        return None;
    }

    let king_sq = board.king_square(color)?;
    let king = board.piece_at(king_sq)?;
    if king.has_moved || king_sq.rank_index() as u8 != color.back_rank() {
        return None;
    }

    let squares = castling_squares(king_sq, color, side)?;
    let rook = board.piece_at(squares.rook_from)?;
    if !rook.is(PieceKind::Rook, color) || rook.has_moved {
        return None;
    }

    if !board.is_path_clear(king_sq, squares.rook_from) {
        return None;
    }

    let all_safe = [king_sq, squares.rook_to, squares.king_to]
        .iter()
        .all(|&sq| is_square_safe(color, sq, board));
    all_safe.then_some(squares)
}

/// Returns true if `color` may castle towards `side` right now.
pub fn can_castle(board: &Board, color: Color, side: CastleSide) -> bool {
    castling_move(board, color, side).is_some()
}

/// Castles king and rook together, or fails leaving the board unchanged.
pub fn castle(
    board: &mut Board,
    color: Color,
    side: CastleSide,
) -> Result<CastlingSquares, MoveError> {
    let squares = castling_move(board, color, side).ok_or(MoveError::CastlingUnavailable(side))?;

    let mut king = board
        .take(squares.king_from)
        .ok_or(MoveError::NoPiece(squares.king_from))?;
    let Some(mut rook) = board.take(squares.rook_from) else {
        board.put(squares.king_from, king);
        return Err(MoveError::NoPiece(squares.rook_from));
    };
    board.clear_double_advances();

    king.has_moved = true;
    rook.has_moved = true;
    board.put(squares.king_to, king);
    board.put(squares.rook_to, rook);
    board.set_castled(color);

    debug!(%color, %side, "castled");
    Ok(squares)
}
