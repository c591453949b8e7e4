//! Draw detection: insufficient material, repetition and the fifty-move rule.

use crate::Board;
use chess_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Returns true if the material left cannot produce a mate.
///
/// Recognised: bare kings; kings plus a single bishop or knight; kings plus
/// two bishops standing on squares of the same color. Opposite-colored
/// bishops are deliberately not treated as a draw.
pub fn is_insufficient_material(board: &Board) -> bool {
    let pieces: Vec<_> = board.pieces().collect();
    match pieces.len() {
        2 => true,
        3 => pieces
            .iter()
            .any(|(_, p)| matches!(p.kind, PieceKind::Bishop | PieceKind::Knight)),
        4 => {
            let bishops: Vec<bool> = pieces
                .iter()
                .filter(|(_, p)| p.kind == PieceKind::Bishop)
                .map(|(sq, _)| sq.is_light())
                .collect();
            matches!(bishops.as_slice(), [a, b] if a == b)
        }
        _ => false,
    }
}

/// Pawn counts per rank plus the total piece count.
///
/// Any pawn move or capture changes this signature, which is what resets the
/// fifty-move counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSignature {
    pub pawns_per_rank: [u8; 8],
    pub pieces: usize,
}

impl MaterialSignature {
    pub fn of(board: &Board) -> Self {
        MaterialSignature {
            pawns_per_rank: board.pawns_per_rank(),
            pieces: board.piece_count(),
        }
    }
}

/// Counts plies since the last pawn move or capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiftyMoveCounter {
    plies: u32,
    last: MaterialSignature,
}

impl FiftyMoveCounter {
    /// Starts counting from the given board.
    pub fn new(board: &Board) -> Self {
        FiftyMoveCounter {
            plies: 0,
            last: MaterialSignature::of(board),
        }
    }

    /// Restores a counter from saved parts.
    pub fn from_parts(plies: u32, last: MaterialSignature) -> Self {
        FiftyMoveCounter { plies, last }
    }

    /// Records the board after a ply: resets when the material signature
    /// changed, otherwise counts one more ply.
    pub fn record(&mut self, board: &Board) {
        let now = MaterialSignature::of(board);
        if now == self.last {
            self.plies += 1;
        } else {
            self.plies = 0;
            self.last = now;
        }
    }

    /// Plies counted so far.
    #[inline]
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Full moves counted so far (half a move per ply).
    #[inline]
    pub fn moves(&self) -> f32 {
        self.plies as f32 / 2.0
    }

    /// Returns true once `limit` full moves have passed.
    #[inline]
    pub fn reached(&self, limit: u32) -> bool {
        self.plies >= limit.saturating_mul(2)
    }

    pub fn signature(&self) -> MaterialSignature {
        self.last
    }
}

/// Fingerprints of every position reached, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionHistory {
    positions: Vec<String>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the fingerprint of `board`.
    pub fn push(&mut self, board: &Board) {
        self.positions.push(board.placement());
    }

    /// How many times `fingerprint` has occurred.
    pub fn count(&self, fingerprint: &str) -> usize {
        self.positions.iter().filter(|p| *p == fingerprint).count()
    }

    /// The highest occurrence count of any fingerprint.
    pub fn max_repetitions(&self) -> usize {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for p in &self.positions {
            *counts.entry(p.as_str()).or_default() += 1;
        }
        counts.values().copied().max().unwrap_or(0)
    }

    /// Returns true if any position has occurred `limit` times.
    pub fn is_repeated(&self, limit: usize) -> bool {
        self.max_repetitions() >= limit
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legality::make_move;
    use chess_core::MoveRequest;

    fn board(placement: &str) -> Board {
        Board::from_placement(placement).unwrap()
    }

    #[test]
    fn bare_kings() {
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/4K3")));
    }

    #[test]
    fn single_minor_piece() {
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/2B1K3")));
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/1n2K3")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/R3K3")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/P7/4K3")));
    }

    #[test]
    fn same_colored_bishops() {
        // c1 and e3 are both dark squares.
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/4B3/8/2B1K3")));
        // One bishop each, both on dark squares.
        assert!(is_insufficient_material(&board("4kb2/8/8/8/8/8/8/2B1K3")));
    }

    #[test]
    fn opposite_colored_bishops_are_not_a_draw() {
        // c1 dark, f1 light.
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/2B1KB2")));
    }

    #[test]
    fn two_knights_are_not_classified() {
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/1N2KN2")));
    }

    #[test]
    fn fifty_move_counter_counts_quiet_plies() {
        let mut b = board("4k3/8/8/8/8/8/8/R3K3");
        let mut counter = FiftyMoveCounter::new(&b);
        make_move(&mut b, MoveRequest::from_uci("a1a2").unwrap(), PieceKind::Queen).unwrap();
        counter.record(&b);
        make_move(&mut b, MoveRequest::from_uci("e8d8").unwrap(), PieceKind::Queen).unwrap();
        counter.record(&b);
        assert_eq!(counter.plies(), 2);
        assert_eq!(counter.moves(), 1.0);
        assert!(counter.reached(1));
        assert!(!counter.reached(2));
    }

    #[test]
    fn fifty_move_counter_resets_on_pawn_move_and_capture() {
        let mut b = board("4k3/8/8/8/8/8/P6r/R3K3");
        let mut counter = FiftyMoveCounter::from_parts(40, MaterialSignature::of(&b));
        make_move(&mut b, MoveRequest::from_uci("a2a3").unwrap(), PieceKind::Queen).unwrap();
        counter.record(&b);
        assert_eq!(counter.plies(), 0);

        make_move(&mut b, MoveRequest::from_uci("e8e7").unwrap(), PieceKind::Queen).unwrap();
        counter.record(&b);
        assert_eq!(counter.plies(), 1);

        make_move(&mut b, MoveRequest::from_uci("a1a2").unwrap(), PieceKind::Queen).unwrap();
        counter.record(&b);
        assert_eq!(counter.plies(), 2);

        make_move(&mut b, MoveRequest::from_uci("h2a2").unwrap(), PieceKind::Queen).unwrap();
        counter.record(&b);
        assert_eq!(counter.plies(), 0);
    }

    #[test]
    fn repetition_counting() {
        let a = Board::startpos();
        let b = board("rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R");
        let mut history = PositionHistory::new();
        history.push(&a);
        history.push(&b);
        history.push(&a);
        assert_eq!(history.count(&a.placement()), 2);
        assert_eq!(history.max_repetitions(), 2);
        assert!(!history.is_repeated(3));
        history.push(&a);
        assert!(history.is_repeated(3));
        assert_eq!(history.len(), 4);
    }
}
