//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the legality rules.
//! Castling is counted as one move per side; a promotion is counted once,
//! to the default queen.

use crate::legality::{castle, make_move};
use crate::status::legal_moves;
use crate::Board;
use chess_core::{CastleSide, Color, PieceKind};

/// Every position reachable in one ply, paired with its move in UCI form.
fn successors(board: &Board, color: Color) -> Vec<(String, Board)> {
    let mut next = Vec::new();
    for m in legal_moves(color, board) {
        let mut child = board.clone();
        if make_move(&mut child, m, PieceKind::Queen).is_ok() {
            next.push((m.to_uci(), child));
        }
    }
    for side in CastleSide::ALL {
        let mut child = board.clone();
        if let Ok(squares) = castle(&mut child, color, side) {
            next.push((format!("{}{}", squares.king_from, squares.king_to), child));
        }
    }
    next
}

/// Counts the number of leaf nodes at the given depth with `color` to move.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let children = successors(board, color);
    if depth == 1 {
        return children.len() as u64;
    }

    children
        .iter()
        .map(|(_, child)| perft(child, color.opposite(), depth - 1))
        .sum()
}

/// Perft with divide - node count below each root move, sorted by move.
pub fn perft_divide(board: &Board, color: Color, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = successors(board, color)
        .into_iter()
        .map(|(uci, child)| {
            let nodes = if depth > 1 {
                perft(&child, color.opposite(), depth - 1)
            } else {
                1
            };
            (uci, nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
