//! Players and the turn driver.
//!
//! A [`Player`] decides what to do when it is on move and how to answer a
//! draw offer. [`play_game`] alternates two players over a [`Game`] until the
//! game ends or a ply limit runs out.

use crate::{Game, GameStatus, MoveError};
use chess_core::{CastleSide, Color, MoveRequest};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

/// Attempts a player gets to produce an acceptable action for one turn.
pub const MAX_ATTEMPTS_PER_TURN: usize = 8;

/// What a player does on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move(MoveRequest),
    Castle(CastleSide),
    Resign,
    OfferDraw,
}

/// Something that can play one side of a game.
pub trait Player {
    /// Picks an action for the side to move in `game`.
    fn choose_action(&mut self, game: &Game) -> PlayerAction;

    /// Answers the opponent's draw offer. Returns true to accept.
    fn respond_to_draw(&mut self, game: &Game) -> bool;
}

/// Computer opponent that plays random legal moves.
///
/// Castling is preferred whenever it is available, kingside first. Pawns
/// promote to the game's default piece and draw offers are always accepted.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    /// Creates a player seeded from the operating system.
    pub fn new() -> Self {
        RandomPlayer {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a player whose choices are reproducible.
    pub fn seeded(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn choose_action(&mut self, game: &Game) -> PlayerAction {
        if let Some(side) = CastleSide::ALL
            .into_iter()
            .find(|&side| game.can_castle(side))
        {
            return PlayerAction::Castle(side);
        }
        match game.legal_moves().choose(&mut self.rng) {
            Some(&m) => PlayerAction::Move(m),
            // Only reachable on a finished game.
            None => PlayerAction::Resign,
        }
    }

    fn respond_to_draw(&mut self, _game: &Game) -> bool {
        true
    }
}

/// Plays `game` to the end, or until `max_plies` more plies have been made.
///
/// Each turn the side to move gets [`MAX_ATTEMPTS_PER_TURN`] tries: rejected
/// moves and declined draw offers each use one. Running out of tries returns
/// the last rejection, [`MoveError::DrawDeclined`] if that was a declined
/// offer.
pub fn play_game(
    game: &mut Game,
    white: &mut dyn Player,
    black: &mut dyn Player,
    max_plies: usize,
) -> Result<GameStatus, MoveError> {
    let mut plies = 0;
    while !game.is_game_over() && plies < max_plies {
        let before = game.history().len();
        match game.turn() {
            Color::White => play_turn(game, white, black)?,
            Color::Black => play_turn(game, black, white)?,
        }
        if game.history().len() > before {
            plies += 1;
        }
    }
    Ok(game.status())
}

/// Runs one turn: ends after a ply, a resignation or an accepted draw.
fn play_turn(
    game: &mut Game,
    player: &mut dyn Player,
    opponent: &mut dyn Player,
) -> Result<(), MoveError> {
    let mover = game.turn();
    let mut last_error = MoveError::GameOver;
    for attempt in 1..=MAX_ATTEMPTS_PER_TURN {
        let result = match player.choose_action(game) {
            PlayerAction::Move(m) => game.make_move(m).map(|_| true),
            PlayerAction::Castle(side) => game.attempt_castle(side).map(|_| true),
            PlayerAction::Resign => game.record_resignation().map(|_| true),
            PlayerAction::OfferDraw => game.offer_draw().and_then(|()| {
                let accepted = opponent.respond_to_draw(game);
                game.record_draw_offer_response(accepted)
                    .map(|status| status.is_terminal())
            }),
        };
        match result {
            Ok(true) => return Ok(()),
            Ok(false) => {
                debug!(color = %mover, attempt, "draw offer declined");
                last_error = MoveError::DrawDeclined;
            }
            Err(e) => {
                warn!(color = %mover, attempt, error = %e, "action rejected");
                last_error = e;
            }
        }
    }
    Err(last_error)
}
