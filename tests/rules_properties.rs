use hotseat_chess::chess_errors::ChessError;
use hotseat_chess::game_state::chess_rules::DrawRules;
use hotseat_chess::game_state::chess_types::*;
use hotseat_chess::utils::san::parse_move;

fn square(text: &str) -> Square {
    text.parse().expect("valid square")
}

fn play(state: &GameState, moves: &[&str]) -> GameState {
    moves.iter().fold(state.clone(), |state, text| {
        let mv = parse_move(text, &state)
            .unwrap_or_else(|err| panic!("{text} should parse: {err}"));
        state
            .apply(mv)
            .unwrap_or_else(|err| panic!("{text} should apply: {err}"))
    })
}

#[test]
fn opening_position_has_twenty_moves() {
    let game = GameState::new_game();
    let moves = game.all_legal_moves().expect("moves");
    assert_eq!(moves.len(), 20);
    assert_eq!(moves.iter().filter(|mv| mv.flag == MoveFlag::DoublePawnPush).count(), 8);
    assert_eq!(game.outcome(), Outcome::Ongoing);
}

#[test]
fn apply_then_undo_restores_the_state() {
    let game = GameState::new_game();
    let after = play(&game, &["e4", "c5", "Nf3", "d6", "d4", "cxd4"]);

    let mut rewound = after.clone();
    for _ in 0..6 {
        rewound = rewound.undo().expect("undo");
    }
    assert_eq!(rewound, game);
    assert_eq!(rewound.undo(), Err(ChessError::NothingToUndo));
}

#[test]
fn apply_leaves_the_input_untouched() {
    let game = GameState::new_game();
    let snapshot = game.clone();
    let next = play(&game, &["Nc3"]);
    assert_ne!(next, game);
    assert_eq!(game, snapshot);
}

#[test]
fn blocked_queen_cannot_jump_to_h5() {
    let game = play(&GameState::new_game(), &["d4", "e5"]);
    let qh5 = Move::new(Square::D1, square("h5"), MoveFlag::Normal);
    assert_eq!(game.apply(qh5), Err(ChessError::IllegalMove(qh5)));

    // Once e2 is vacated the diagonal is open.
    let open = play(&GameState::new_game(), &["e4", "e5"]);
    assert!(open.apply(qh5).is_ok());
}

#[test]
fn fools_mate() {
    let game = play(&GameState::new_game(), &["f3", "e5", "g4", "Qh4#"]);
    assert_eq!(
        game.outcome(),
        Outcome::Checkmate {
            winner: Color::Black
        }
    );
    assert!(game.all_legal_moves().expect("moves").is_empty());
    assert!(matches!(
        game.apply(Move::new(square("e2"), square("e3"), MoveFlag::Normal)),
        Err(ChessError::GameOver(_))
    ));
}

#[test]
fn capturing_into_bare_kings_is_a_draw() {
    let game = GameState::from_fen("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1").expect("fen");
    assert_eq!(game.outcome(), Outcome::Check);
    let drawn = play(&game, &["Kxd2"]);
    assert_eq!(drawn.outcome(), Outcome::DrawByInsufficientMaterial);
    assert!(drawn.outcome().is_draw());
}

#[test]
fn en_passant_only_on_the_next_turn() {
    let game = GameState::from_fen("4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1").expect("fen");
    let capture = Move::new(square("e4"), square("d3"), MoveFlag::EnPassantCapture);

    let after_push = play(&game, &["d4"]);
    assert_eq!(after_push.en_passant_square(), Some(square("d3")));
    assert!(after_push.legal_moves(square("e4")).expect("moves").contains(&capture));

    let taken = after_push.apply(capture).expect("en passant");
    assert_eq!(taken.piece_at(square("d4")), None);
    assert_eq!(
        taken.piece_at(square("d3")),
        Some(Piece::new(Color::Black, PieceKind::Pawn))
    );

    let later = play(&after_push, &["Kd7", "Kd2"]);
    assert_eq!(later.en_passant_square(), None);
    assert!(!later.legal_moves(square("e4")).expect("moves").contains(&capture));
}

#[test]
fn castling_rights_never_come_back() {
    let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen");
    let returned = play(&game, &["Kf1", "Kf8", "Ke1", "Ke8"]);

    assert_eq!(returned.castling_rights(), CastlingRights::NONE);
    assert!(!returned
        .legal_moves(Square::E1)
        .expect("moves")
        .iter()
        .any(|mv| mv.is_castle()));
}

#[test]
fn castling_moves_king_and_rook() {
    let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("fen");
    let castled = play(&game, &["O-O-O"]);
    assert_eq!(
        castled.piece_at(Square::C8),
        Some(Piece::new(Color::Black, PieceKind::King))
    );
    assert_eq!(
        castled.piece_at(Square::D8),
        Some(Piece::new(Color::Black, PieceKind::Rook))
    );
    assert_eq!(castled.piece_at(Square::A8), None);
    assert!(!castled.castling_rights().black_kingside);
    assert!(castled.castling_rights().white_kingside);
}

#[test]
fn promotion_places_the_chosen_piece() {
    let game = GameState::from_fen("8/4P1k1/7p/8/8/8/8/4K3 w - - 0 1").expect("fen");
    let promoted = play(&game, &["e8=N+"]);
    assert_eq!(
        promoted.piece_at(square("e8")),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
    assert_eq!(promoted.outcome(), Outcome::Check);
}

#[test]
fn threefold_repetition_under_standard_rules() {
    let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6", "Ng1", "Ng8"];
    let game = play(&GameState::new_game(), &shuffle);
    assert_eq!(game.outcome(), Outcome::DrawByRepetition);

    let relaxed = GameState::new_game()
        .with_draw_rules(DrawRules::automatic_only())
        .expect("rules");
    assert_eq!(play(&relaxed, &shuffle).outcome(), Outcome::Ongoing);
}

#[test]
fn checkmate_beats_the_fifty_move_rule() {
    let game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 99 80").expect("fen");
    let mated = play(&game, &["Ra8"]);
    assert_eq!(mated.halfmove_clock(), 100);
    assert_eq!(
        mated.outcome(),
        Outcome::Checkmate {
            winner: Color::White
        }
    );
}
