// SPDX-License-Identifier: MIT OR Apache-2.0

use goban_core::wire::ScoringResponse;
use goban_core::{
    apply_move, count_territory, finish_scoring, mark_dead, mark_territory, pass_turn, BoardSize,
    Color, Coord, Game, GameConfig, GameError, GameEvent, Notification, NotificationKind, Phase,
};

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

/// Black walls off column 3, White column 5, and White has two stones
/// inside Black's side at (1,4) and (1,5). Both players have passed.
fn walled_game() -> Game {
    let moves = [
        Some((3, 0)),
        Some((1, 4)),
        Some((3, 1)),
        Some((1, 5)),
        Some((3, 2)),
        Some((5, 0)),
        Some((3, 3)),
        Some((5, 1)),
        Some((3, 4)),
        Some((5, 2)),
        Some((3, 5)),
        Some((5, 3)),
        Some((3, 6)),
        Some((5, 4)),
        Some((3, 7)),
        Some((5, 5)),
        Some((3, 8)),
        Some((5, 6)),
        None,
        Some((5, 7)),
        None,
        Some((5, 8)),
        None,
        None,
    ];
    play(&Game::new(GameConfig::even(BoardSize::Nine)), &moves)
}

#[test]
fn scoring_starts_with_disputed_stones_alive() {
    let game = walled_game();
    let state = game.state();

    assert_eq!(game.phase(), Phase::Scoring);
    assert_eq!(state.scoring_number(), Some(0));
    // The white stones make Black's side neutral
    assert_eq!(state.board().owner(Coord::new(0, 0)), Color::None);
    assert_eq!(state.board().owner(Coord::new(8, 8)), Color::White);
    assert_eq!(state.black_territory(), Some(0.0));
    assert_eq!(state.white_territory(), Some(27.0 + 6.5));
}

#[test]
fn marking_and_agreeing_finishes_the_game() {
    let game = walled_game();

    // Marking one stone takes its whole group with it
    let marked = mark_dead(&game, Coord::new(1, 4), Color::Black, Color::Black).unwrap();
    match &marked.events[0] {
        GameEvent::StonesMarked {
            stones,
            scoring_number,
            opponent_was_done,
            ..
        } => {
            let mut stones = stones.clone();
            stones.sort();
            assert_eq!(stones, vec![Coord::new(1, 4), Coord::new(1, 5)]);
            assert_eq!(*scoring_number, 1);
            assert!(!opponent_was_done);
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert!(Notification::for_transition(&marked, Color::Black).is_none());

    let game = marked.game;
    let state = game.state();
    assert!(state.board().is_dead(Coord::new(1, 5), Color::White));
    assert_eq!(state.board().owner(Coord::new(0, 0)), Color::Black);
    // 25 empty cells plus two dead stones counted twice
    assert_eq!(state.black_territory(), Some(29.0));
    assert_eq!(state.white_territory(), Some(33.5));
    assert_eq!(game.history().len(), 24);

    // Agreement must match the live scoring number
    assert_eq!(
        finish_scoring(&game, Color::Black, 0),
        Err(GameError::ScoringChanged)
    );
    let done = finish_scoring(&game, Color::Black, 1).unwrap();
    assert!(done.state().is_done_scoring(Color::Black));
    assert_eq!(done.game.phase(), Phase::Scoring);
    let notification = Notification::for_transition(&done, Color::Black).unwrap();
    assert_eq!(notification.kind, NotificationKind::OpponentDoneScoring);
    assert_eq!(
        finish_scoring(&done.game, Color::Black, 1),
        Err(GameError::AlreadyDone)
    );

    let finished = finish_scoring(&done.game, Color::White, 1).unwrap();
    assert_eq!(finished.game.phase(), Phase::Finished);
    assert!(finished.state().is_winner(Color::White));
    assert!(finished.events.contains(&GameEvent::GameFinished {
        winner: Color::White,
        black_score: Some(29.0),
        white_score: Some(33.5),
    }));

    let view = ScoringResponse::for_player(&finished.game, Color::Black, "OK");
    assert!(view.you_are_done_scoring);
    assert!(view.opponent_done_scoring);
    assert!(view.opponent_wins);
    assert!(!view.you_win);
    assert!(view.game_is_finished);

    assert_eq!(
        mark_dead(&finished.game, Coord::new(1, 4), Color::None, Color::White),
        Err(GameError::GameFinished)
    );
}

#[test]
fn changing_the_board_withdraws_agreement() {
    let game = walled_game();
    let game = mark_dead(&game, Coord::new(1, 4), Color::Black, Color::Black)
        .unwrap()
        .game;
    let game = finish_scoring(&game, Color::Black, 1).unwrap().game;

    // White brings the stones back to life
    let revived = mark_dead(&game, Coord::new(1, 5), Color::None, Color::White).unwrap();
    let notification = Notification::for_transition(&revived, Color::White).unwrap();
    assert_eq!(notification.kind, NotificationKind::NoLongerDone);
    assert_eq!(notification.recipient, Color::Black);
    assert_eq!(notification.scoring_number, Some(2));

    let state = revived.state();
    assert!(!state.is_done_scoring(Color::Black));
    assert!(state.board().is_alive(Coord::new(1, 4), Color::White));
    assert_eq!(state.black_territory(), Some(0.0));

    // Black may agree again at the new number
    assert!(finish_scoring(&revived.game, Color::Black, 2).is_ok());
}

#[test]
fn invalid_marks_are_rejected() {
    let game = walled_game();

    assert_eq!(
        mark_dead(&game, Coord::new(0, 0), Color::Black, Color::Black),
        Err(GameError::EmptyMark)
    );
    assert_eq!(
        mark_dead(&game, Coord::new(1, 4), Color::White, Color::Black),
        Err(GameError::OwnStoneTerritory(Color::White))
    );
    assert_eq!(
        mark_dead(&game, Coord::new(1, 4), Color::None, Color::Black),
        Err(GameError::AlreadyMarked)
    );
    assert_eq!(
        mark_dead(&game, Coord::new(9, 9), Color::Black, Color::Black),
        Err(GameError::OutOfBounds)
    );
    assert_eq!(
        mark_dead(&game, Coord::new(1, 4), Color::Black, Color::None),
        Err(GameError::InvalidColor)
    );
    assert_eq!(
        GameError::OwnStoneTerritory(Color::White).to_string(),
        "Unexpected error: white stone cannot be white territory."
    );
}

#[test]
fn scoring_operations_need_scoring_phase() {
    let game = Game::new(GameConfig::even(BoardSize::Nine));
    let game = play(&game, &[Some((4, 4))]);

    assert_eq!(
        mark_dead(&game, Coord::new(4, 4), Color::White, Color::White),
        Err(GameError::NotScoring)
    );
    assert_eq!(
        finish_scoring(&game, Color::White, 0),
        Err(GameError::NotScoring)
    );
}

#[test]
fn live_stones_are_never_enemy_territory() {
    let game = walled_game();
    let game = mark_dead(&game, Coord::new(1, 4), Color::Black, Color::Black)
        .unwrap()
        .game;

    let mut board = game.state().board().clone();
    mark_territory(&mut board);
    assert_eq!(&board, game.state().board());

    for coord in board.coords() {
        if board.is_alive(coord, goban_core::ColorQuery::Both) {
            assert_eq!(board.owner(coord), Color::None, "{:?}", coord);
        }
    }
    assert_eq!(count_territory(&board, Color::White, 0), 27);
}
