//! Check, checkmate and stalemate detection, plus the legal-move enumerator.
//!
//! Enumeration is brute force: every own piece against every square, each
//! candidate confirmed with a king-safety check. At 8x8 that stays cheap.

use crate::legality::{can_castle, is_legal};
use crate::safety::is_king_safe;
use crate::{Board, MoveError, PositionError};
use chess_core::{CastleSide, Color, MoveRequest, PieceKind, Square};

/// Returns true if the king of `color` is attacked.
pub fn king_in_check(color: Color, board: &Board) -> bool {
    !is_king_safe(color, board)
}

/// Every legal non-castling move for `color`, as origin/destination pairs.
///
/// Promotions appear once, without a promotion choice.
pub fn legal_moves(color: Color, board: &Board) -> Vec<MoveRequest> {
    let mut moves = Vec::new();
    for (from, _) in board.pieces_of(color) {
        for to in Square::all() {
            if is_legal(board, from, to, true) {
                moves.push(MoveRequest::new(from, to));
            }
        }
    }
    moves
}

/// Returns true as soon as one legal move (castling included) is found.
pub fn has_any_legal_move(color: Color, board: &Board) -> bool {
    let any_piece_move = board
        .pieces_of(color)
        .any(|(from, _)| Square::all().any(|to| is_legal(board, from, to, true)));
    any_piece_move
        || CastleSide::ALL
            .iter()
            .any(|&side| can_castle(board, color, side))
}

/// In check with no legal move.
pub fn is_checkmate(color: Color, board: &Board) -> bool {
    king_in_check(color, board) && !has_any_legal_move(color, board)
}

/// Not in check, yet no legal move.
pub fn is_stalemate(color: Color, board: &Board) -> bool {
    !king_in_check(color, board) && !has_any_legal_move(color, board)
}

/// Checks that `board` could occur in a game with `to_move` on move.
///
/// Each side has exactly one king, no pawn stands on the first or last rank,
/// and the side not on move is not in check.
pub fn validate_position(board: &Board, to_move: Color) -> Result<(), PositionError> {
    for color in Color::ALL {
        let count = board
            .pieces_of(color)
            .filter(|(_, p)| p.kind == PieceKind::King)
            .count();
        if count != 1 {
            return Err(PositionError::KingCount { color, count });
        }
    }
    if let Some((sq, _)) = board
        .pieces()
        .find(|(sq, p)| p.kind == PieceKind::Pawn && matches!(sq.rank_index(), 0 | 7))
    {
        return Err(PositionError::PawnOnBackRank(sq));
    }
    let waiting = to_move.opposite();
    if king_in_check(waiting, board) {
        return Err(PositionError::OpponentInCheck(waiting));
    }
    Ok(())
}

/// Finds the single piece of `kind` and `color` that can legally move to
/// `to`.
///
/// Pawns are only searched on the destination's file, which is how a bare
/// destination square names a pawn push. Fails with [`MoveError::NoMatch`]
/// when no piece qualifies and [`MoveError::Ambiguous`] when several do.
pub fn resolve_origin(
    color: Color,
    kind: PieceKind,
    to: Square,
    board: &Board,
) -> Result<Square, MoveError> {
    let origins: Vec<Square> = board
        .pieces_of(color)
        .filter(|(from, piece)| {
            piece.kind == kind && (kind != PieceKind::Pawn || from.file() == to.file())
        })
        .map(|(from, _)| from)
        .filter(|&from| is_legal(board, from, to, true))
        .collect();

    match origins.as_slice() {
        [] => Err(MoveError::NoMatch { kind, to }),
        [only] => Ok(*only),
        _ => Err(MoveError::Ambiguous {
            kind,
            to,
            count: origins.len(),
        }),
    }
}
