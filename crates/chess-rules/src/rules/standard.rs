//! Standard chess rules.

use super::RuleSet;
use crate::{draw, legality, status, Board};
use chess_core::{Color, MoveRequest, Square};

/// Standard chess rules: orthodox piece movement, castling, en passant,
/// promotion, check, checkmate, stalemate and dead-material detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_board(&self) -> Board {
        Board::startpos()
    }

    fn is_legal(&self, board: &Board, from: Square, to: Square) -> bool {
        legality::is_legal(board, from, to, true)
    }

    fn legal_moves(&self, board: &Board, color: Color) -> Vec<MoveRequest> {
        status::legal_moves(color, board)
    }

    fn has_legal_move(&self, board: &Board, color: Color) -> bool {
        status::has_any_legal_move(color, board)
    }

    fn is_check(&self, board: &Board, color: Color) -> bool {
        status::king_in_check(color, board)
    }

    fn is_insufficient_material(&self, board: &Board) -> bool {
        draw::is_insufficient_material(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{DrawReason, GameStatus};
    use chess_core::STARTING_PLACEMENT;

    #[test]
    fn initial_board() {
        let board = StandardChess.initial_board();
        assert_eq!(board.placement(), STARTING_PLACEMENT);
        assert_eq!(StandardChess.board_status(&board, Color::White), None);
    }

    #[test]
    fn mate_is_reported_for_the_side_to_move() {
        let board = Board::from_placement("R5k1/5ppp/8/8/8/8/8/6K1").unwrap();
        assert_eq!(
            StandardChess.board_status(&board, Color::Black),
            Some(GameStatus::Checkmate {
                winner: Color::White
            })
        );
        assert_eq!(StandardChess.board_status(&board, Color::White), None);
    }

    #[test]
    fn stalemate_outranks_material() {
        let board = Board::from_placement("7k/5Q2/6K1/8/8/8/8/8").unwrap();
        assert_eq!(
            StandardChess.board_status(&board, Color::Black),
            Some(GameStatus::Draw {
                reason: DrawReason::Stalemate
            })
        );
    }

    #[test]
    fn dead_material() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/2B1K3").unwrap();
        assert_eq!(
            StandardChess.board_status(&board, Color::White),
            Some(GameStatus::Draw {
                reason: DrawReason::InsufficientMaterial
            })
        );
    }

    #[test]
    fn status_display() {
        let status = GameStatus::Resignation {
            winner: Color::Black,
        };
        assert_eq!(status.to_string(), "White resigns, Black wins");
        assert_eq!(status.winner(), Some(Color::Black));
        assert!(status.is_terminal());
        assert!(!GameStatus::Ongoing.is_terminal());
    }
}
