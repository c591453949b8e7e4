//! Game turn state machine.
//!
//! The [`Game`] owns the board for the whole game. It accepts one validated
//! action per ply, keeps the history the draw rules need and settles the
//! game's status after every change. Once the status is terminal no further
//! move is accepted.

use crate::draw::{FiftyMoveCounter, PositionHistory};
use crate::legality::{self, CastlingSquares, MoveOutcome};
use crate::rules::{DrawReason, GameStatus, RuleSet, StandardChess};
use crate::status::{resolve_origin, validate_position};
use crate::{Board, GameConfig, MoveError, PositionError};
use chess_core::{CastleSide, Color, MoveRequest, PieceKind, Square};
use tracing::{debug, info};

/// A complete chess game.
///
/// Unlike [`Board`], which is a single arrangement of pieces, `Game` knows
/// whose turn it is and tracks the fingerprints and counters needed for
/// repetition and fifty-move draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) turn: Color,
    pub(crate) history: PositionHistory,
    pub(crate) fifty: FiftyMoveCounter,
    pub(crate) draw_offered: bool,
    pub(crate) status: GameStatus,
    pub(crate) config: GameConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard starting position.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Creates a new game from the standard starting position with custom
    /// rule parameters.
    pub fn with_config(config: GameConfig) -> Self {
        Self::start(StandardChess.initial_board(), Color::White, config)
    }

    /// Creates a game from an arbitrary board with `turn` to move.
    ///
    /// The board must pass [`validate_position`]. The status is evaluated
    /// immediately, so a board that is already mate, stalemate or dead
    /// material yields a finished game.
    pub fn from_board(
        board: Board,
        turn: Color,
        config: GameConfig,
    ) -> Result<Self, PositionError> {
        validate_position(&board, turn)?;
        Ok(Self::start(board, turn, config))
    }

    /// Creates a game from a placement string with `turn` to move.
    pub fn from_placement(placement: &str, turn: Color) -> Result<Self, PositionError> {
        let board = Board::from_placement(placement)?;
        Self::from_board(board, turn, GameConfig::default())
    }

    fn start(board: Board, turn: Color, config: GameConfig) -> Self {
        let mut history = PositionHistory::new();
        history.push(&board);
        let fifty = FiftyMoveCounter::new(&board);
        let mut game = Game {
            board,
            turn,
            history,
            fifty,
            draw_offered: false,
            status: GameStatus::Ongoing,
            config,
        };
        game.refresh_status();
        game
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fingerprints of every position reached, the initial one included.
    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Plies since the last pawn move or capture.
    pub fn fifty_move_plies(&self) -> u32 {
        self.fifty.plies()
    }

    /// Returns true while a draw offer awaits an answer.
    pub fn draw_offered(&self) -> bool {
        self.draw_offered
    }

    /// Returns the placement string of the current board.
    pub fn placement(&self) -> String {
        self.board.placement()
    }

    /// All legal non-castling moves for the side to move.
    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        StandardChess.legal_moves(&self.board, self.turn)
    }

    /// All legal non-castling moves for `color`, whoever is on move.
    pub fn legal_moves_for(&self, color: Color) -> Vec<MoveRequest> {
        StandardChess.legal_moves(&self.board, color)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        StandardChess.is_check(&self.board, self.turn)
    }

    /// Returns true if the side to move may castle towards `side`.
    pub fn can_castle(&self, side: CastleSide) -> bool {
        legality::can_castle(&self.board, self.turn, side)
    }

    /// Plays a move for the side to move.
    ///
    /// On any error nothing changes and the same side is still to move.
    pub fn make_move(&mut self, request: MoveRequest) -> Result<MoveOutcome, MoveError> {
        self.ensure_can_play()?;
        let piece = self
            .board
            .piece_at(request.from)
            .ok_or(MoveError::NoPiece(request.from))?;
        if piece.color != self.turn {
            return Err(MoveError::NotYourPiece(request.from));
        }

        let outcome = legality::make_move(&mut self.board, request, self.config.default_promotion)?;
        self.finish_ply();
        Ok(outcome)
    }

    /// Plays the only move that brings a piece of `kind` to `to`.
    ///
    /// Fails with [`MoveError::Ambiguous`] or [`MoveError::NoMatch`] when the
    /// destination does not identify exactly one piece.
    pub fn make_piece_move(&mut self, kind: PieceKind, to: Square) -> Result<MoveOutcome, MoveError> {
        self.ensure_can_play()?;
        let from = resolve_origin(self.turn, kind, to, &self.board)?;
        self.make_move(MoveRequest::new(from, to))
    }

    /// Castles for the side to move.
    pub fn attempt_castle(&mut self, side: CastleSide) -> Result<CastlingSquares, MoveError> {
        self.ensure_can_play()?;
        let squares = legality::castle(&mut self.board, self.turn, side)?;
        self.finish_ply();
        Ok(squares)
    }

    /// The side to move resigns.
    pub fn record_resignation(&mut self) -> Result<GameStatus, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        self.draw_offered = false;
        self.status = GameStatus::Resignation {
            winner: self.turn.opposite(),
        };
        info!(loser = %self.turn, "resignation");
        Ok(self.status)
    }

    /// The side to move offers a draw. Play pauses until the opponent
    /// answers through [`Game::record_draw_offer_response`].
    pub fn offer_draw(&mut self) -> Result<(), MoveError> {
        self.ensure_can_play()?;
        self.draw_offered = true;
        debug!(by = %self.turn, "draw offered");
        Ok(())
    }

    /// Records the opponent's answer to a pending draw offer.
    ///
    /// Accepting ends the game. Declining withdraws the offer and the
    /// offering side is still to move.
    pub fn record_draw_offer_response(&mut self, accepted: bool) -> Result<GameStatus, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if !self.draw_offered {
            return Err(MoveError::NoDrawOffer);
        }
        self.draw_offered = false;
        if accepted {
            self.status = GameStatus::Draw {
                reason: DrawReason::Agreement,
            };
            info!("draw agreed");
        } else {
            debug!("draw declined");
        }
        Ok(self.status)
    }

    fn ensure_can_play(&self) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if self.draw_offered {
            return Err(MoveError::DrawOfferPending);
        }
        Ok(())
    }

    /// Bookkeeping after a ply has been applied to the board.
    fn finish_ply(&mut self) {
        self.history.push(&self.board);
        self.fifty.record(&self.board);
        self.turn = self.turn.opposite();
        self.refresh_status();
    }

    /// Settles the status from the current board and history.
    pub(crate) fn refresh_status(&mut self) {
        if self.is_game_over() {
            return;
        }

        let status = if let Some(status) = StandardChess.board_status(&self.board, self.turn) {
            status
        } else if self.history.is_repeated(self.config.repetition_limit) {
            GameStatus::Draw {
                reason: DrawReason::ThreefoldRepetition,
            }
        } else if self.fifty.reached(self.config.fifty_move_limit) {
            GameStatus::Draw {
                reason: DrawReason::FiftyMoveRule,
            }
        } else {
            GameStatus::Ongoing
        };

        if status.is_terminal() {
            info!(%status, plies = self.history.len() - 1, "game over");
        }
        self.status = status;
    }
}
