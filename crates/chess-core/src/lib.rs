//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the rules engine and
//! its collaborators:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`MoveRequest`] and [`CastleSide`] for what a player asks to do
//! - Placement string parsing and formatting

mod color;
mod mov;
mod piece;
mod placement;
mod square;

pub use color::Color;
pub use mov::{CastleSide, MoveRequest};
pub use piece::{Piece, PieceKind};
pub use placement::{format_placement, parse_placement, PlacementError, STARTING_PLACEMENT};
pub use square::{File, Rank, Square};
