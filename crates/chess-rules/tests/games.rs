//! Whole-game scenarios driven through the public API.

use chess_core::{CastleSide, Color, MoveRequest, PieceKind, Square};
use chess_rules::{
    Board, DrawReason, Game, GameConfig, GameSnapshot, GameStatus, MoveError, PositionError,
    RuleSet, StandardChess,
};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn uci(s: &str) -> MoveRequest {
    MoveRequest::from_uci(s).unwrap()
}

fn play(game: &mut Game, moves: &[&str]) {
    for m in moves {
        game.make_move(uci(m))
            .unwrap_or_else(|e| panic!("{} rejected: {}", m, e));
    }
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
    assert_eq!(game.status().winner(), Some(Color::White));
    assert_eq!(game.make_move(uci("e8f7")), Err(MoveError::GameOver));
}

#[test]
fn moves_that_ignore_check_are_rejected() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "d7d5", "f1b5"]);
    assert!(game.is_check());
    assert!(matches!(
        game.make_move(uci("g8f6")),
        Err(MoveError::IllegalMove { .. })
    ));
    play(&mut game, &["c7c6", "b5c6"]);
    assert!(game.is_check());
    assert_eq!(game.status(), GameStatus::Ongoing);
    play(&mut game, &["b7c6"]);
    assert!(!game.is_check());
}

#[test]
fn en_passant_clears_the_passed_square() {
    let mut game = Game::new();
    play(&mut game, &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4"]);
    let outcome = game.make_move(uci("d4e3")).unwrap();
    assert!(outcome.en_passant);
    assert_eq!(
        outcome.captured.map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, Color::White))
    );
    assert!(game.board().piece_at(sq("e4")).is_none());
    assert!(game
        .board()
        .piece_at(sq("e3"))
        .is_some_and(|p| p.is(PieceKind::Pawn, Color::Black)));
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = Game::new();
    play(&mut game, &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4", "h7h6", "h2h3"]);
    assert!(game.make_move(uci("d4e3")).is_err());
}

#[test]
fn castling_is_refused_after_the_king_moved() {
    let mut game = Game::from_placement("4k3/8/8/8/8/8/8/4K2R", Color::White).unwrap();
    play(&mut game, &["e1f1", "e8d8", "f1e1", "d8e8"]);
    assert_eq!(
        game.attempt_castle(CastleSide::Kingside),
        Err(MoveError::CastlingUnavailable(CastleSide::Kingside))
    );
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn castling_is_refused_through_an_attacked_square() {
    let game = Game::from_placement("5rk1/8/8/8/8/8/8/4K2R", Color::White).unwrap();
    assert!(!game.can_castle(CastleSide::Kingside));
    let game = Game::from_placement("3rk3/8/8/8/8/8/8/R3K3", Color::White).unwrap();
    assert!(!game.can_castle(CastleSide::Queenside));
}

#[test]
fn rook_passing_an_attacked_square_may_still_castle() {
    // Only the king's squares must be safe; b1 is attacked but the king never
    // touches it.
    let mut game = Game::from_placement("1r2k3/8/8/8/8/8/8/R3K3", Color::White).unwrap();
    assert!(game.can_castle(CastleSide::Queenside));
    let squares = game.attempt_castle(CastleSide::Queenside).unwrap();
    assert_eq!(squares.king_to, sq("c1"));
    assert_eq!(squares.rook_to, sq("d1"));
}

#[test]
fn castling_is_refused_with_a_piece_in_between() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);
    assert!(!game.can_castle(CastleSide::Kingside));
    play(&mut game, &["f1c4", "g8f6"]);
    let squares = game.attempt_castle(CastleSide::Kingside).unwrap();
    assert_eq!(squares.king_to, Square::G1);
    assert_eq!(squares.rook_to, sq("f1"));
}

#[test]
fn underpromotion_by_request() {
    let mut game = Game::from_placement("8/4P1k1/8/8/8/8/8/4K3", Color::White).unwrap();
    let outcome = game
        .make_move(uci("e7e8").with_promotion(PieceKind::Knight))
        .unwrap();
    assert_eq!(outcome.promotion, Some(PieceKind::Knight));
    assert!(game
        .board()
        .piece_at(Square::E8)
        .is_some_and(|p| p.is(PieceKind::Knight, Color::White)));
}

#[test]
fn configured_default_promotion() {
    let config = GameConfig::from_toml_str("default_promotion = \"rook\"").unwrap();
    let board = Board::from_placement("8/4P1k1/8/8/8/8/8/4K3").unwrap();
    let mut game = Game::from_board(board, Color::White, config).unwrap();
    play(&mut game, &["e7e8"]);
    assert!(game
        .board()
        .piece_at(Square::E8)
        .is_some_and(|p| p.is(PieceKind::Rook, Color::White)));
}

#[test]
fn king_shuffle_repetition() {
    let mut game = Game::from_placement("4k3/4p3/8/8/8/8/4P3/4K3", Color::White).unwrap();
    let cycle = ["e1d1", "e8d8", "d1e1", "d8e8"];
    play(&mut game, &cycle);
    play(&mut game, &cycle[..3]);
    assert_eq!(game.status(), GameStatus::Ongoing);
    play(&mut game, &cycle[3..]);
    assert_eq!(
        game.status(),
        GameStatus::Draw {
            reason: DrawReason::ThreefoldRepetition
        }
    );
}

#[test]
fn lower_repetition_limit_from_config() {
    let config = GameConfig {
        repetition_limit: 2,
        ..GameConfig::default()
    };
    let mut game = Game::with_config(config);
    play(&mut game, &["g1f3", "g8f6", "f3g1"]);
    assert_eq!(game.status(), GameStatus::Ongoing);
    play(&mut game, &["f6g8"]);
    assert_eq!(
        game.status(),
        GameStatus::Draw {
            reason: DrawReason::ThreefoldRepetition
        }
    );
}

#[test]
fn draw_classification_of_material() {
    let rules = StandardChess;
    let board = |p: &str| Board::from_placement(p).unwrap();
    assert!(rules.is_insufficient_material(&board("4k3/8/8/8/8/8/8/4K3")));
    assert!(rules.is_insufficient_material(&board("4k3/8/8/8/8/8/8/2B1K3")));
    assert!(!rules.is_insufficient_material(&board("4k3/8/8/8/8/8/8/2B1KB2")));
}

#[test]
fn resume_a_saved_game_and_finish_it() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5"]);
    let json = game.snapshot().to_json().unwrap();

    let mut resumed = Game::restore(GameSnapshot::from_json(&json).unwrap()).unwrap();
    assert_eq!(resumed.turn(), Color::White);
    play(&mut resumed, &["g2g4", "d8h4"]);
    assert_eq!(
        resumed.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
}

#[test]
fn piece_letter_input_round() {
    let mut game = Game::new();
    game.make_piece_move(PieceKind::Knight, sq("f3")).unwrap();
    game.make_piece_move(PieceKind::Pawn, sq("e5")).unwrap();
    let outcome = game.make_piece_move(PieceKind::Knight, sq("e5")).unwrap();
    assert_eq!(outcome.from, sq("f3"));
    assert!(outcome
        .captured
        .is_some_and(|p| p.is(PieceKind::Pawn, Color::Black)));
    assert_eq!(
        game.make_piece_move(PieceKind::Rook, sq("a4")),
        Err(MoveError::NoMatch {
            kind: PieceKind::Rook,
            to: sq("a4")
        })
    );
}

#[test]
fn setups_that_cannot_occur_in_a_game_are_refused() {
    assert!(matches!(
        Game::from_placement("8/8/8/8/8/8/8/8", Color::White),
        Err(PositionError::KingCount { .. })
    ));
    assert!(matches!(
        Game::from_placement("4k3/8/8/8/8/8/8/K3K3", Color::White),
        Err(PositionError::KingCount { count: 2, .. })
    ));
    assert!(matches!(
        Game::from_placement("4k3/8/8/8/8/8/8/4R1K1", Color::White),
        Err(PositionError::OpponentInCheck(Color::Black))
    ));
}
