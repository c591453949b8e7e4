//! Pseudo-legal movement rules.
//!
//! Each piece kind has one predicate deciding whether it could travel from one
//! square to another given the current occupancy, ignoring whether the move
//! would leave its own king attacked. Castling is not a king movement here;
//! it lives in [`crate::legality`].

use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Returns true if the piece on `from` could move to `to`, king safety aside.
///
/// Empty origins never reach anything.
pub fn can_reach(board: &Board, from: Square, to: Square) -> bool {
    match board.piece_at(from) {
        Some(piece) => piece_can_reach(piece, from, to, board),
        None => false,
    }
}

/// Returns true if `piece`, standing on `from`, could move to `to`.
///
/// The destination may never hold a piece of the mover's own color.
pub fn piece_can_reach(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    if from == to || board.is_occupied_by(to, piece.color) {
        return false;
    }

    let d_rank = (to.rank_index() - from.rank_index()).abs();
    let d_file = (to.file_index() - from.file_index()).abs();

    match piece.kind {
        PieceKind::Knight => d_rank.min(d_file) == 1 && d_rank.max(d_file) == 2,
        PieceKind::Bishop => d_rank == d_file && board.is_path_clear(from, to),
        PieceKind::Rook => (d_rank == 0 || d_file == 0) && board.is_path_clear(from, to),
        PieceKind::Queen => {
            (d_rank == d_file || d_rank == 0 || d_file == 0) && board.is_path_clear(from, to)
        }
        PieceKind::King => d_rank <= 1 && d_file <= 1,
        PieceKind::Pawn => pawn_can_reach(piece.color, from, to, board),
    }
}

fn pawn_can_reach(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let dir = color.pawn_direction();
    let rank_step = to.rank_index() - from.rank_index();
    let same_file = to.file_index() == from.file_index();

    if same_file {
        if board.piece_at(to).is_some() {
            return false;
        }
        if rank_step == dir {
            return true;
        }
        return rank_step == 2 * dir
            && from.rank_index() as u8 == color.pawn_rank()
            && board.is_path_clear(from, to);
    }

    if !pawn_attacks(color, from, to) {
        return false;
    }
    board.is_occupied_by(to, color.opposite()) || en_passant_victim(board, from, to).is_some()
}

/// Returns true if a pawn of `color` on `from` threatens `to`: one square
/// diagonally forward. Occupancy is irrelevant.
#[inline]
pub fn pawn_attacks(color: Color, from: Square, to: Square) -> bool {
    to.rank_index() - from.rank_index() == color.pawn_direction()
        && (to.file_index() - from.file_index()).abs() == 1
}

/// If the pawn on `from` may capture en passant by moving to `to`, returns
/// the square of the pawn it would capture.
///
/// The destination must be empty and diagonally forward, and the square on
/// the origin's rank at the destination's file must hold an enemy pawn that
/// advanced two squares on the ply just played.
pub fn en_passant_victim(board: &Board, from: Square, to: Square) -> Option<Square> {
    let pawn = board.piece_at(from)?;
    if pawn.kind != PieceKind::Pawn
        || board.piece_at(to).is_some()
        || !pawn_attacks(pawn.color, from, to)
    {
        return None;
    }

    let victim_sq = Square::from_coords(from.rank_index(), to.file_index())?;
    let victim = board.piece_at(victim_sq)?;
    let eligible = victim.kind == PieceKind::Pawn
        && victim.color != pawn.color
        && victim.advanced_two;
    eligible.then_some(victim_sq)
}
