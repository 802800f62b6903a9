// SPDX-License-Identifier: MIT OR Apache-2.0

use goban_core::{
    apply_move, find_group, pass_turn, resign, Board, BoardSize, Color, Coord, Game, GameConfig,
    GameError, GameEvent, Move, Notification, NotificationKind, Phase, PlacementRules,
};

fn new_game() -> Game {
    Game::new(GameConfig::even(BoardSize::Nine))
}

/// Play stones for whoever is to move; `None` passes
fn play(game: &Game, moves: &[Option<(u8, u8)>]) -> Game {
    moves.iter().fold(game.clone(), |game, mv| {
        let color = game.state().whose_move();
        let number = game.move_number();
        let transition = match mv {
            Some((x, y)) => apply_move(&game, Coord::new(*x, *y), color, number),
            None => pass_turn(&game, color, number),
        };
        transition
            .unwrap_or_else(|e| panic!("{:?} by {} failed: {}", mv, color, e))
            .game
    })
}

fn stones(moves: &[(u8, u8)]) -> Vec<Option<(u8, u8)>> {
    moves.iter().copied().map(Some).collect()
}

#[test]
fn simple_sequence_without_captures() {
    let game = play(&new_game(), &stones(&[(2, 2), (2, 3), (3, 3)]));
    let state = game.state();
    let board = state.board();

    assert_eq!(board.count_stones(Color::Black), 2);
    assert_eq!(board.count_stones(Color::White), 1);
    assert_eq!(state.white_stones_captured(), 0);
    assert_eq!(state.black_stones_captured(), 0);
    assert_eq!(state.whose_move(), Color::White);
    assert_eq!(game.move_number(), 3);
    assert_eq!(game.history().len(), 3);
    assert_eq!(state.last_move(), Some(Coord::new(3, 3)));
    assert_eq!(state.last_move_message(), "It's your turn to move.");

    let fingerprint = board.fingerprint();
    assert_eq!(fingerprint.len(), 81);
    assert_eq!(fingerprint.chars().filter(|&c| c != '.').count(), 3);
}

#[test]
fn surrounded_stone_is_captured() {
    let game = play(
        &new_game(),
        &stones(&[(4, 3), (4, 4), (3, 4), (0, 0), (5, 4), (0, 1)]),
    );

    let transition = apply_move(&game, Coord::new(4, 5), Color::Black, 6).unwrap();
    let state = transition.state();
    assert_eq!(state.board().get(Coord::new(4, 4)), Color::None);
    assert_eq!(state.white_stones_captured(), 1);
    assert_eq!(state.black_stones_captured(), 0);
    assert_eq!(
        state.last_move_message(),
        "It's your turn to move; one of your stones was captured."
    );
    assert!(transition.events.contains(&GameEvent::StonesCaptured {
        count: 1,
        positions: vec![Coord::new(4, 4)],
        player: Color::White,
    }));
}

#[test]
fn suicide_is_rejected() {
    let game = play(
        &new_game(),
        &stones(&[(4, 3), (0, 0), (3, 4), (0, 1), (5, 4), (0, 2), (4, 5)]),
    );
    let before = game.clone();

    assert_eq!(
        apply_move(&game, Coord::new(4, 4), Color::White, 7),
        Err(GameError::Suicide)
    );
    assert_eq!(game, before);
    assert_eq!(game.state().board().get(Coord::new(4, 4)), Color::None);
}

#[test]
fn capture_that_gains_a_liberty_is_legal() {
    //  W . W
    //  B W .
    // Black at (1,0) has no liberty until the corner stone is taken
    let game = play(
        &new_game(),
        &stones(&[(0, 1), (0, 0), (8, 8), (1, 1), (8, 7), (2, 0)]),
    );

    let transition = apply_move(&game, Coord::new(1, 0), Color::Black, 6).unwrap();
    let board = transition.state().board();
    assert_eq!(board.get(Coord::new(0, 0)), Color::None);
    assert_eq!(board.get(Coord::new(1, 0)), Color::Black);
    assert_eq!(transition.state().white_stones_captured(), 1);
    assert_eq!(find_group(board, Coord::new(1, 0)).liberties, 1);
}

#[test]
fn ko_recapture_needs_a_move_elsewhere() {
    //  . B W .
    //  B W . W
    //  . B W .
    let game = play(
        &new_game(),
        &stones(&[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2), (8, 8), (1, 1)]),
    );

    // Black takes the ko
    let game = apply_move(&game, Coord::new(2, 1), Color::Black, 8).unwrap().game;
    assert_eq!(game.state().white_stones_captured(), 1);

    // Immediate retake repeats the earlier position
    assert_eq!(
        apply_move(&game, Coord::new(1, 1), Color::White, 9),
        Err(GameError::KoViolation)
    );

    // After an exchange elsewhere the retake is fine
    let game = play(&game, &stones(&[(7, 7), (6, 6)]));
    let transition = apply_move(&game, Coord::new(1, 1), Color::White, 11).unwrap();
    assert_eq!(transition.state().black_stones_captured(), 1);
    assert_eq!(transition.state().board().get(Coord::new(2, 1)), Color::None);
}

#[test]
fn rejected_moves_have_distinct_reasons() {
    let game = play(&new_game(), &stones(&[(4, 4)]));

    assert_eq!(
        apply_move(&game, Coord::new(9, 0), Color::White, 1),
        Err(GameError::OutOfBounds)
    );
    assert_eq!(
        apply_move(&game, Coord::new(4, 4), Color::White, 1),
        Err(GameError::Occupied)
    );
    assert_eq!(
        apply_move(&game, Coord::new(3, 3), Color::Black, 1),
        Err(GameError::NotYourTurn)
    );
    assert_eq!(
        apply_move(&game, Coord::new(3, 3), Color::White, 0),
        Err(GameError::StaleMoveNumber)
    );
    assert_eq!(
        apply_move(&game, Coord::new(3, 3), Color::None, 1),
        Err(GameError::InvalidColor)
    );
    assert_eq!(
        pass_turn(&game, Color::Black, 1),
        Err(GameError::NotYourTurn)
    );
}

#[test]
fn single_pass_keeps_playing() {
    let game = play(&new_game(), &[None]);
    assert_eq!(game.phase(), Phase::InProgress);
    assert!(game.state().last_move_was_pass());
    assert_eq!(game.state().whose_move(), Color::White);
    assert!(game.state().last_move_message().starts_with("Your opponent passed."));

    // A stone in between resets the pass
    let game = play(&game, &[Some((4, 4)), None]);
    assert_eq!(game.phase(), Phase::InProgress);
}

#[test]
fn two_passes_start_scoring() {
    let game = play(&new_game(), &[Some((4, 4)), None]);
    let transition = pass_turn(&game, Color::Black, 2).unwrap();

    assert_eq!(transition.game.phase(), Phase::Scoring);
    assert_eq!(transition.state().scoring_number(), Some(0));
    assert!(transition
        .events
        .contains(&GameEvent::ScoringStarted { scoring_number: 0 }));

    // Black's lone stone owns the whole board
    assert_eq!(transition.state().black_territory(), Some(80.0));
    assert_eq!(transition.state().white_territory(), Some(6.5));

    let game = transition.game;
    assert_eq!(
        apply_move(&game, Coord::new(0, 0), Color::White, 3),
        Err(GameError::ScoringInProgress)
    );
    assert_eq!(
        pass_turn(&game, Color::White, 3),
        Err(GameError::ScoringInProgress)
    );
}

#[test]
fn resign_ends_the_game() {
    let game = play(&new_game(), &stones(&[(4, 4)]));
    let transition = resign(&game, Color::White, 1).unwrap();

    assert_eq!(transition.game.phase(), Phase::Finished);
    assert!(transition.state().is_winner(Color::Black));
    assert_eq!(transition.game.history().len(), 2);
    assert_eq!(
        transition.events[0],
        GameEvent::MoveMade {
            mv: Move::Resign,
            by: Color::White,
            move_number: 2
        }
    );

    let notification = Notification::for_transition(&transition, Color::White).unwrap();
    assert_eq!(notification.kind, NotificationKind::GameOver);
    assert_eq!(notification.recipient, Color::Black);

    let game = transition.game;
    assert_eq!(
        apply_move(&game, Coord::new(0, 0), Color::Black, 2),
        Err(GameError::GameFinished)
    );
    assert_eq!(resign(&game, Color::Black, 2), Err(GameError::GameFinished));
}

#[test]
fn move_notifies_opponent() {
    let game = new_game();
    let transition = apply_move(&game, Coord::new(2, 2), Color::Black, 0).unwrap();
    let notification = Notification::for_transition(&transition, Color::Black).unwrap();

    assert_eq!(notification.recipient, Color::White);
    assert_eq!(notification.kind, NotificationKind::YourTurn);
    assert_eq!(notification.move_number, 1);
    assert_eq!(
        notification.subject("alice"),
        "[GO - Move #1] It's your turn against alice"
    );
    assert_eq!(
        notification.body("alice"),
        "It's your turn to make a move against alice."
    );
}

#[test]
fn handicap_game_starts_with_white() {
    let config = GameConfig::from_indices(2, 8, 2, PlacementRules::CenterSkip).unwrap();
    let game = Game::new(config);

    assert_eq!(game.state().board().count_stones(Color::Black), 2);
    assert_eq!(game.player_to_move(), Some(Color::White));
    assert_eq!(
        apply_move(&game, Coord::new(4, 4), Color::Black, 0),
        Err(GameError::NotYourTurn)
    );
}

#[test]
fn fingerprint_depends_only_on_position() {
    let a = play(&new_game(), &stones(&[(2, 2), (6, 6), (3, 3)]));
    let b = play(&new_game(), &stones(&[(3, 3), (6, 6), (2, 2)]));

    assert_eq!(
        a.state().board().fingerprint(),
        b.state().board().fingerprint()
    );

    let config = GameConfig::even(BoardSize::Nine);
    let decoded = Board::from_fingerprint(&config, &a.state().board().fingerprint()).unwrap();
    assert_eq!(&decoded, a.state().board());
}

#[test]
fn group_is_the_same_from_any_stone() {
    let game = play(
        &new_game(),
        &stones(&[(2, 2), (0, 0), (2, 3), (0, 1), (3, 3), (8, 8), (3, 4)]),
    );
    let board = game.state().board();

    let from_top = find_group(board, Coord::new(2, 2));
    let from_bottom = find_group(board, Coord::new(3, 4));
    assert_eq!(from_top, from_bottom);
    assert_eq!(from_top.stones.len(), 4);
    assert_eq!(from_top.liberties, 8);
}
