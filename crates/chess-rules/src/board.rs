//! Board state: an 8x8 grid of optional pieces plus castling bookkeeping.

use chess_core::{
    format_placement, parse_placement, Color, Piece, PieceKind, PlacementError, Square,
    STARTING_PLACEMENT,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The authoritative board.
///
/// `Board` is a plain value: cloning it copies 64 cells and two flags, which
/// is what the king-safety simulator relies on to try moves without ever
/// touching the live board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells indexed by `[rank][file]`, rank 0 being White's back rank.
    grid: [[Option<Piece>; 8]; 8],
    /// Whether each color has completed castling, indexed by `Color::index`.
    castled: [bool; 2],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
            castled: [false; 2],
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_placement(STARTING_PLACEMENT).expect("starting placement is valid")
    }

    /// Creates a board from a placement string.
    ///
    /// A piece standing on a square it could have started the game on is
    /// treated as unmoved, every other piece as moved. That keeps castling
    /// and double pawn pushes available in hand-built positions.
    pub fn from_placement(placement: &str) -> Result<Self, PlacementError> {
        let mut board = Board::empty();
        for (sq, kind, color) in parse_placement(placement)? {
            let mut piece = Piece::new(kind, color);
            piece.has_moved = !is_home_square(kind, color, sq);
            board.put(sq, piece);
        }
        Ok(board)
    }

    /// Returns the placement string of this board (uppercase = White).
    ///
    /// This doubles as the position fingerprint used for repetition
    /// counting: it records where pieces stand and nothing else.
    pub fn placement(&self) -> String {
        format_placement(|sq| self.piece_at(sq).map(Piece::to_fen_char))
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.rank_index() as usize][sq.file_index() as usize]
    }

    #[cfg(test)]
    pub(crate) fn piece_at_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        self.grid[sq.rank_index() as usize][sq.file_index() as usize].as_mut()
    }

    /// Places a piece, returning whatever stood there before.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.grid[sq.rank_index() as usize][sq.file_index() as usize].replace(piece)
    }

    /// Removes and returns the piece on the given square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.grid[sq.rank_index() as usize][sq.file_index() as usize].take()
    }

    /// Returns true if the square holds a piece of the given color.
    #[inline]
    pub fn is_occupied_by(&self, sq: Square, color: Color) -> bool {
        self.piece_at(sq).is_some_and(|p| p.color == color)
    }

    /// Iterates over every occupied square, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares holding pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Total number of pieces on the board, kings included.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Locates the king of the given color.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }

    /// Returns true if `color` has already castled this game.
    #[inline]
    pub fn has_castled(&self, color: Color) -> bool {
        self.castled[color.index()]
    }

    #[inline]
    pub(crate) fn set_castled(&mut self, color: Color) {
        self.castled[color.index()] = true;
    }

    /// Returns true if every square strictly between `from` and `to` is
    /// empty.
    ///
    /// The squares must share a rank, a file or a diagonal; for any other
    /// pair there is no line to walk and the result is `false`.
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        let d_rank = to.rank_index() - from.rank_index();
        let d_file = to.file_index() - from.file_index();
        let aligned = d_rank == 0 || d_file == 0 || d_rank.abs() == d_file.abs();
        if !aligned {
            return false;
        }

        let (step_rank, step_file) = (d_rank.signum(), d_file.signum());
        let mut current = from;
        loop {
            current = match current.offset(step_rank, step_file) {
                Some(sq) => sq,
                None => return false,
            };
            if current == to {
                return true;
            }
            if self.piece_at(current).is_some() {
                return false;
            }
        }
    }

    /// Clears the "just advanced two squares" flag on every pawn.
    pub(crate) fn clear_double_advances(&mut self) {
        for row in self.grid.iter_mut() {
            for piece in row.iter_mut().flatten() {
                piece.advanced_two = false;
            }
        }
    }

    /// Number of pawns (both colors) on each rank, rank 1 first.
    pub fn pawns_per_rank(&self) -> [u8; 8] {
        let mut counts = [0u8; 8];
        for (sq, piece) in self.pieces() {
            if piece.kind == PieceKind::Pawn {
                counts[sq.rank_index() as usize] += 1;
            }
        }
        counts
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Returns true if a piece of this kind and color could stand on `sq` at the
/// start of a standard game.
fn is_home_square(kind: PieceKind, color: Color, sq: Square) -> bool {
    let rank = sq.rank_index() as u8;
    let file = sq.file_index();
    match kind {
        PieceKind::Pawn => rank == color.pawn_rank(),
        PieceKind::Rook => rank == color.back_rank() && (file == 0 || file == 7),
        PieceKind::Knight => rank == color.back_rank() && (file == 1 || file == 6),
        PieceKind::Bishop => rank == color.back_rank() && (file == 2 || file == 5),
        PieceKind::Queen => rank == color.back_rank() && file == 3,
        PieceKind::King => rank == color.back_rank() && file == 4,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = Square::from_coords(rank, file)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
