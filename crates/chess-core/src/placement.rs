//! Placement strings: the piece-placement field of FEN.
//!
//! Ranks are listed from rank 8 down to rank 1, separated by `/`. Within a
//! rank, uppercase letters are White pieces, lowercase letters are Black
//! pieces and digits count consecutive empty squares.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing placement strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("invalid character '{found}' in rank {rank}")]
    InvalidCharacter { found: char, rank: usize },

    #[error("rank {rank} has {squares} squares, expected 8")]
    SquareCount { rank: usize, squares: u32 },
}

/// The placement of the standard starting position.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Parses a placement string into the occupied squares it describes.
pub fn parse_placement(placement: &str) -> Result<Vec<(Square, PieceKind, Color)>, PlacementError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(PlacementError::RankCount(ranks.len()));
    }

    let mut pieces = Vec::new();
    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i as i8;
        let mut squares = 0u32;
        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                squares += digit;
            } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                if let Some(sq) = Square::from_coords(rank, squares as i8) {
                    pieces.push((sq, kind, color));
                }
                squares += 1;
            } else {
                return Err(PlacementError::InvalidCharacter {
                    found: c,
                    rank: 8 - i,
                });
            }
        }
        if squares != 8 {
            return Err(PlacementError::SquareCount {
                rank: 8 - i,
                squares,
            });
        }
    }

    Ok(pieces)
}

/// Builds a placement string from a lookup of the character on each square.
///
/// Runs of empty squares collapse to a single digit.
pub fn format_placement<F>(mut char_at: F) -> String
where
    F: FnMut(Square) -> Option<char>,
{
    let mut out = String::with_capacity(64);
    for rank in (0..8).rev() {
        let mut empty_count = 0;
        for file in 0..8 {
            let Some(sq) = Square::from_coords(rank, file) else {
                continue;
            };
            match char_at(sq) {
                Some(c) => {
                    if empty_count > 0 {
                        out.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    out.push(c);
                }
                None => empty_count += 1,
            }
        }
        if empty_count > 0 {
            out.push_str(&empty_count.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_starting_placement() {
        let pieces = parse_placement(STARTING_PLACEMENT).unwrap();
        assert_eq!(pieces.len(), 32);
        assert!(pieces.contains(&(Square::E1, PieceKind::King, Color::White)));
        assert!(pieces.contains(&(Square::D8, PieceKind::Queen, Color::Black)));
    }

    #[test]
    fn roundtrip() {
        let placement = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R";
        let pieces = parse_placement(placement).unwrap();
        let formatted = format_placement(|sq| {
            pieces
                .iter()
                .find(|(s, _, _)| *s == sq)
                .map(|(_, kind, color)| kind.to_fen_char(*color))
        });
        assert_eq!(formatted, placement);
    }

    #[test]
    fn empty_board_formats_as_eights() {
        assert_eq!(format_placement(|_| None), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn wrong_rank_count() {
        assert_eq!(
            parse_placement("8/8/8/8/8/8/8"),
            Err(PlacementError::RankCount(7))
        );
    }

    #[test]
    fn invalid_character() {
        assert!(matches!(
            parse_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR"),
            Err(PlacementError::InvalidCharacter { found: 'X', rank: 2 })
        ));
        assert!(matches!(
            parse_placement("8/8/8/8/8/8/8/09"),
            Err(PlacementError::InvalidCharacter { found: '0', rank: 1 })
        ));
    }

    #[test]
    fn wrong_square_count() {
        assert_eq!(
            parse_placement("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(PlacementError::SquareCount {
                rank: 8,
                squares: 9
            })
        );
        assert!(matches!(
            parse_placement("8/8/8/8/8/8/8/7"),
            Err(PlacementError::SquareCount { rank: 1, squares: 7 })
        ));
    }

    #[test]
    fn error_display() {
        let err = PlacementError::RankCount(3);
        assert!(err.to_string().contains('3'));
        let err = PlacementError::InvalidCharacter { found: 'x', rank: 4 };
        assert!(err.to_string().contains('x'));
    }
}
