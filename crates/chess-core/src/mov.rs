//! Move requests.

use crate::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rook the king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    /// Towards the h-file (O-O).
    Kingside,
    /// Towards the a-file (O-O-O).
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File step the king takes towards its rook.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    /// File index of the rook this side castles with.
    #[inline]
    pub const fn rook_file(self) -> i8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::Kingside => write!(f, "O-O"),
            CastleSide::Queenside => write!(f, "O-O-O"),
        }
    }
}

/// A request to move whatever stands on `from` to `to`.
///
/// The request carries no knowledge of the position; the rules engine decides
/// whether it is legal. `promotion` is the replacement chosen for a pawn that
/// reaches its last rank. When absent the game's configured default is used.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    /// Creates a request without a promotion choice.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    /// Attaches a promotion choice.
    #[inline]
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        MoveRequest {
            promotion: Some(kind),
            ..self
        }
    }

    /// Returns the coordinate notation for this request (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = match self.promotion {
            Some(PieceKind::Knight) => "n",
            Some(PieceKind::Bishop) => "b",
            Some(PieceKind::Rook) => "r",
            Some(PieceKind::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses a request from coordinate notation such as "e2e4" or "e7e8q".
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let request = MoveRequest::new(from, to);
        match s.chars().nth(4) {
            None => Some(request),
            Some(c) => match PieceKind::from_fen_char(c)? {
                (kind, _) if kind.is_promotion_target() => Some(request.with_promotion(kind)),
                _ => None,
            },
        }
    }
}

impl fmt::Debug for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveRequest({})", self.to_uci())
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn request_uci() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(MoveRequest::new(e2, e4).to_uci(), "e2e4");

        let e7 = Square::new(File::E, Rank::R7);
        let promo = MoveRequest::new(e7, Square::E8).with_promotion(PieceKind::Knight);
        assert_eq!(promo.to_uci(), "e7e8n");
    }

    #[test]
    fn request_from_uci() {
        let m = MoveRequest::from_uci("e2e4").unwrap();
        assert_eq!(m.from.to_algebraic(), "e2");
        assert_eq!(m.to.to_algebraic(), "e4");
        assert_eq!(m.promotion, None);

        let promo = MoveRequest::from_uci("e7e8Q").unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn request_from_uci_rejects_garbage() {
        assert!(MoveRequest::from_uci("invalid").is_none());
        assert!(MoveRequest::from_uci("e2e9").is_none());
        assert!(MoveRequest::from_uci("e2").is_none());
        assert!(MoveRequest::from_uci("e2e4qq").is_none());
        // Kings and pawns are not promotion targets.
        assert!(MoveRequest::from_uci("e7e8k").is_none());
        assert!(MoveRequest::from_uci("e7e8p").is_none());
    }

    #[test]
    fn castle_side_geometry() {
        assert_eq!(CastleSide::Kingside.direction(), 1);
        assert_eq!(CastleSide::Queenside.direction(), -1);
        assert_eq!(CastleSide::Kingside.rook_file(), 7);
        assert_eq!(CastleSide::Queenside.rook_file(), 0);
        assert_eq!(CastleSide::Queenside.to_string(), "O-O-O");
    }

    #[test]
    fn debug_display() {
        let m = MoveRequest::from_uci("g1f3").unwrap();
        assert_eq!(format!("{:?}", m), "MoveRequest(g1f3)");
        assert_eq!(format!("{}", m), "g1f3");
    }
}
