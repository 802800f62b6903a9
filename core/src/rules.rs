// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game rules: placing stones, passing and resigning.
//!
//! Each operation validates against the current [`Game`] and either returns
//! the next game in a [`Transition`] or a [`GameError`]. Captures are
//! resolved before the suicide check, so a move that captures its way to a
//! liberty is legal. Ko is enforced by comparing the resulting board with the
//! position before the opponent's last move.

use crate::board::Board;
use crate::events::GameEvent;
use crate::game::{Game, Phase, Transition};
use crate::group::find_group;
use crate::scoring;
use crate::{Color, Coord, GameError, Move};

/// Message for the player who moves after both players passed
pub const SCORING_MESSAGE: &str =
    "Mark the dead stones. Click done when finished. When you and your opponent agree, the game will end.";

/// Message after a single pass
pub const PASSED_MESSAGE: &str =
    "Your opponent passed. You can make a move, or you can pass again to end the game.";

/// Message once the game has ended
pub const GAME_OVER_MESSAGE: &str = "The game is over!";

/// Place a stone of `color` at `at`.
///
/// `move_number` is the move number the player last saw; a different value
/// means their board is stale and the move is rejected.
pub fn apply_move(
    game: &Game,
    at: Coord,
    color: Color,
    move_number: u32,
) -> Result<Transition, GameError> {
    check_turn(game, color, move_number)?;

    let board = game.state().board();
    if !board.contains(at) {
        return Err(GameError::OutOfBounds);
    }
    if board.get(at) != Color::None {
        return Err(GameError::Occupied);
    }

    // Create the potentially new state
    let mut next = game.state().clone();
    next.board.set(at, color);

    let (ataris, captures) = compute_atari_and_captures(&next.board, at);
    for &coord in &captures {
        next.board.set(coord, Color::None);
    }
    let opponent = color.opposite();
    next.add_captured(opponent, captures.len() as u32);

    // Captures are already off the board, so they count as liberties here
    if find_group(&next.board, at).is_captured() {
        tracing::debug!(?at, %color, "Rejected suicide");
        return Err(GameError::Suicide);
    }

    if let Some(two_back) = game.history().last() {
        if two_back.board().fingerprint() == next.board.fingerprint() {
            tracing::debug!(?at, %color, "Ko violation detected");
            return Err(GameError::KoViolation);
        }
    }

    next.move_number += 1;
    next.whose_move = opponent;
    next.last_move_was_pass = false;
    next.last_move = Some(at);
    next.last_move_message = move_message(ataris, captures.len());

    let mut events = vec![GameEvent::MoveMade {
        mv: Move::Place(at),
        by: color,
        move_number: next.move_number,
    }];
    if !captures.is_empty() {
        tracing::debug!(?at, %color, captured = captures.len(), "Stones captured");
        events.push(GameEvent::StonesCaptured {
            count: captures.len() as u32,
            positions: captures,
            player: opponent,
        });
    }
    if ataris > 0 {
        events.push(GameEvent::Atari {
            count: ataris,
            player: opponent,
        });
    }

    Ok(Transition {
        game: game.advance(next, Phase::InProgress),
        events,
    })
}

/// Pass the turn. A pass right after the opponent's pass starts scoring and
/// marks territory once.
pub fn pass_turn(game: &Game, color: Color, move_number: u32) -> Result<Transition, GameError> {
    check_turn(game, color, move_number)?;

    let mut next = game.state().clone();
    next.move_number += 1;
    next.whose_move = color.opposite();
    next.last_move_was_pass = true;

    let mut events = vec![GameEvent::MoveMade {
        mv: Move::Pass,
        by: color,
        move_number: next.move_number,
    }];

    let phase = if game.state().last_move_was_pass() {
        next.scoring_mut();
        scoring::mark_territory(&mut next.board);
        scoring::tally(&mut next);
        next.last_move_message = SCORING_MESSAGE.to_string();

        let scoring_number = next.scoring_number().unwrap_or_default();
        tracing::info!(game = %game.id(), scoring_number, "Both players passed; scoring started");
        events.push(GameEvent::ScoringStarted { scoring_number });
        Phase::Scoring
    } else {
        next.last_move_message = PASSED_MESSAGE.to_string();
        Phase::InProgress
    };

    Ok(Transition {
        game: game.advance(next, phase),
        events,
    })
}

/// Resign; the opponent wins. Accepted while playing and while scoring.
pub fn resign(game: &Game, color: Color, move_number: u32) -> Result<Transition, GameError> {
    if !color.is_player() {
        return Err(GameError::InvalidColor);
    }
    if game.is_finished() {
        return Err(GameError::GameFinished);
    }
    let state = game.state();
    if state.whose_move() != color {
        return Err(GameError::NotYourTurn);
    }
    if move_number != game.move_number() {
        return Err(GameError::StaleMoveNumber);
    }

    let winner = color.opposite();
    let mut next = state.clone();
    next.move_number += 1;
    next.whose_move = winner;
    next.last_move_was_pass = true;
    next.winner = winner;
    next.last_move_message = GAME_OVER_MESSAGE.to_string();

    tracing::info!(game = %game.id(), loser = %color, "Player resigned");
    let events = vec![
        GameEvent::MoveMade {
            mv: Move::Resign,
            by: color,
            move_number: next.move_number,
        },
        GameEvent::GameFinished {
            winner,
            black_score: None,
            white_score: None,
        },
    ];

    Ok(Transition {
        game: game.advance(next, Phase::Finished),
        events,
    })
}

/// Shared checks for moves and passes
fn check_turn(game: &Game, color: Color, move_number: u32) -> Result<(), GameError> {
    if !color.is_player() {
        return Err(GameError::InvalidColor);
    }
    match game.phase() {
        Phase::Finished => return Err(GameError::GameFinished),
        Phase::Scoring => return Err(GameError::ScoringInProgress),
        Phase::InProgress => {}
    }
    if game.state().whose_move() != color {
        return Err(GameError::NotYourTurn);
    }
    if move_number != game.move_number() {
        return Err(GameError::StaleMoveNumber);
    }
    Ok(())
}

/// Ataris and captures caused by the stone at `at`.
///
/// Each of the four neighbours holding an opponent stone is examined; a
/// group with one liberty counts as an atari once per neighbour it occupies.
/// The returned captures contain every removed stone exactly once.
pub fn compute_atari_and_captures(board: &Board, at: Coord) -> (u32, Vec<Coord>) {
    let other = board.get(at).opposite();
    if !other.is_player() {
        return (0, Vec::new());
    }

    let mut ataris = 0;
    let mut captures: Vec<Coord> = Vec::new();
    for neighbor in board.neighbors(at) {
        if board.get(neighbor) != other {
            continue;
        }
        let group = find_group(board, neighbor);
        if group.in_atari() {
            ataris += 1;
        }
        if group.is_captured() {
            for stone in group.stones {
                if !captures.contains(&stone) {
                    captures.push(stone);
                }
            }
        }
    }

    (ataris, captures)
}

/// Message for the player who moves next
fn move_message(ataris: u32, captured: usize) -> String {
    let mut message = String::from("It's your turn to move");
    match ataris {
        0 => {}
        1 => message.push_str("; you were just placed in atari"),
        _ => message.push_str("; you were just placed in double atari"),
    }

    if captured > 0 {
        message.push_str(if ataris == 0 { ";" } else { " and" });
        if captured == 1 {
            message.push_str(" one of your stones was captured");
        } else {
            message.push_str(&format!(" {} of your stones were captured", captured));
        }
    }

    message.push('.');
    message
}
