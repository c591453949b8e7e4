//! King-safety simulation.
//!
//! Every check here works on a scratch copy of the board. The live board is
//! only ever read, so a speculative move can never leak into game state.

use crate::movement::{en_passant_victim, pawn_attacks, piece_can_reach};
use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Returns true if no piece of the opposite color attacks `square`.
///
/// The king of `color` is lifted off the board first, so a slider checking
/// the king sees straight through the square the king is leaving. Pawns are
/// judged by their diagonal attack, not by their forward push.
pub fn is_square_safe(color: Color, square: Square, board: &Board) -> bool {
    let mut scratch = board.clone();
    if let Some(king_sq) = scratch.king_square(color) {
        scratch.take(king_sq);
    }
    !is_attacked_by(&scratch, square, color.opposite())
}

/// Returns true if the king of `color` is not attacked where it stands.
///
/// A board without that king is treated as safe.
pub fn is_king_safe(color: Color, board: &Board) -> bool {
    match board.king_square(color) {
        Some(king_sq) => is_square_safe(color, king_sq, board),
        None => true,
    }
}

/// Returns true if moving the piece on `from` to `to` would leave its own
/// king attacked.
///
/// The move is played on a copy of the board, capturing whatever stood on
/// the destination (or the pawn taken en passant), and the king's square is
/// recomputed on that copy so king moves are covered too.
pub fn would_expose_king(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };

    let mut scratch = board.clone();
    if let Some(victim) = en_passant_victim(board, from, to) {
        scratch.take(victim);
    }
    scratch.take(from);
    scratch.put(to, piece);

    !is_king_safe(piece.color, &scratch)
}

/// Returns true if any piece of `attacker` could capture on `target`.
fn is_attacked_by(board: &Board, target: Square, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, piece)| threatens(piece, from, target, board))
}

fn threatens(piece: Piece, from: Square, target: Square, board: &Board) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from, target),
        _ => piece_can_reach(piece, from, target, board),
    }
}
