// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-game scoring: territory marking, dead stones and agreement.
//!
//! Once both players pass, empty regions bordered by live stones of a single
//! color become that color's territory. Players then toggle groups between
//! dead and alive with [`mark_dead`]; every change bumps the scoring number,
//! and the game ends once both players have called [`finish_scoring`] at the
//! same scoring number.

use crate::board::Board;
use crate::events::GameEvent;
use crate::game::{Game, Phase, Transition};
use crate::rules::GAME_OVER_MESSAGE;
use crate::state::GameState;
use crate::{Color, ColorQuery, Coord, GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// Not yet assigned to a region
    Open,
    /// A live stone
    Stone(Color),
    /// Part of a region with the given owner (`Color::None` when contested)
    Region(Color),
}

/// Assign an owner to every empty region and every dead stone.
///
/// Marking is repeated until the owners stop changing, so calling it again
/// on the result changes nothing. If every stone on the board would be dead,
/// all of them are brought back to life first.
pub fn mark_territory(board: &mut Board) {
    loop {
        let before = board.fingerprint();
        mark_territory_pass(board);
        if board.fingerprint() == before {
            break;
        }
    }
}

fn mark_territory_pass(board: &mut Board) {
    let width = board.width() as usize;
    let index = |c: Coord| c.y as usize * width + c.x as usize;
    let coords: Vec<Coord> = board.coords().collect();

    // Live stones are the region boundaries
    let mut status = vec![Status::Open; coords.len()];
    let mut found_live_stones = false;
    let mut found_dead_stones = false;
    for &coord in &coords {
        if board.is_alive(coord, ColorQuery::Both) {
            status[index(coord)] = Status::Stone(board.get(coord));
            found_live_stones = true;
        } else if board.is_dead(coord, ColorQuery::Both) {
            found_dead_stones = true;
        }
    }

    if found_dead_stones && !found_live_stones {
        tracing::debug!("Every stone was marked dead; resurrecting all of them");
        board.clear_owners();
        for &coord in &coords {
            let stone = board.get(coord);
            status[index(coord)] = if stone.is_player() {
                Status::Stone(stone)
            } else {
                Status::Open
            };
        }
    }

    // Find the territories
    for &coord in &coords {
        if status[index(coord)] == Status::Open {
            let (region, owner) = search_for_owner(board, coord);
            for cell in region {
                status[index(cell)] = Status::Region(owner);
            }
        }
    }

    // A live color never owns its own stones
    for &coord in &coords {
        if let Status::Region(owner) = status[index(coord)] {
            if owner.is_player() && board.get(coord) == owner {
                board.set_owner(coord, Color::None);
            } else {
                board.set_owner(coord, owner);
            }
        }
    }
}

/// Region of non-live cells around `start` and the single live color
/// bordering it (`Color::None` when both or neither border it)
fn search_for_owner(board: &Board, start: Coord) -> (Vec<Coord>, Color) {
    let width = board.width() as usize;
    let index = |c: Coord| c.y as usize * width + c.x as usize;

    let mut visited = vec![false; width * board.height() as usize];
    let mut found_black = false;
    let mut found_white = false;
    let mut region = Vec::new();
    let mut stack = vec![start];
    visited[index(start)] = true;

    while let Some(coord) = stack.pop() {
        if board.is_alive(coord, Color::Black) {
            found_black = true;
        } else if board.is_alive(coord, Color::White) {
            found_white = true;
        } else {
            region.push(coord);
            for neighbor in board.neighbors(coord) {
                if !visited[index(neighbor)] {
                    visited[index(neighbor)] = true;
                    stack.push(neighbor);
                }
            }
        }
    }

    let owner = match (found_black, found_white) {
        (true, false) => Color::Black,
        (false, true) => Color::White,
        _ => Color::None,
    };
    (region, owner)
}

/// Stones that change together when the stone at `start` is marked.
///
/// Walks every cell that is not a live stone of the other color, so a whole
/// group (and any stones of the same color it encloses with it) flips at
/// once.
pub fn compute_changed_stones(board: &Board, start: Coord) -> Vec<Coord> {
    let color = board.get(start);
    let other = color.opposite();
    let width = board.width() as usize;
    let index = |c: Coord| c.y as usize * width + c.x as usize;

    let mut visited = vec![false; width * board.height() as usize];
    let mut stones = Vec::new();
    let mut stack = vec![start];
    visited[index(start)] = true;

    while let Some(coord) = stack.pop() {
        if board.is_alive(coord, other) {
            continue;
        }
        if board.get(coord) == color {
            stones.push(coord);
        }
        for neighbor in board.neighbors(coord) {
            if !visited[index(neighbor)] {
                visited[index(neighbor)] = true;
                stack.push(neighbor);
            }
        }
    }

    stones
}

/// Points for `color`: `captures`, one per owned cell, and one more for each
/// dead opponent stone on an owned cell
pub fn count_territory(board: &Board, color: Color, captures: u32) -> u32 {
    let opposite = color.opposite();
    board
        .coords()
        .filter(|&coord| board.owner(coord) == color)
        .map(|coord| if board.get(coord) == opposite { 2 } else { 1 })
        .sum::<u32>()
        + captures
}

/// Recount both totals into the state; White's includes komi
pub(crate) fn tally(state: &mut GameState) {
    let black = count_territory(&state.board, Color::Black, state.white_stones_captured) as f32;
    let white = count_territory(&state.board, Color::White, state.black_stones_captured) as f32
        + state.board.komi().value();
    let scoring = state.scoring_mut();
    scoring.black_territory = black;
    scoring.white_territory = white;
}

/// Mark the group at `at` as owned by `owner` (dead), or by nobody
/// (`Color::None`, alive), on behalf of `player`.
pub fn mark_dead(
    game: &Game,
    at: Coord,
    owner: Color,
    player: Color,
) -> Result<Transition, GameError> {
    check_scoring(game, player)?;

    let state = game.state();
    let board = state.board();
    if !board.contains(at) {
        return Err(GameError::OutOfBounds);
    }
    let stone = board.get(at);
    if stone == Color::None {
        return Err(GameError::EmptyMark);
    }
    if owner == stone {
        return Err(GameError::OwnStoneTerritory(stone));
    }
    if owner == board.owner(at) {
        return Err(GameError::AlreadyMarked);
    }

    let mut next = state.clone();
    next.scoring_mut().scoring_number += 1;

    let stones = compute_changed_stones(&next.board, at);
    if !stones.contains(&at) {
        return Err(GameError::MarkHadNoEffect);
    }
    for &coord in &stones {
        next.board.set_owner(coord, owner);
    }

    mark_territory(&mut next.board);
    tally(&mut next);

    let scoring_number = next.scoring_number().unwrap_or_default();
    tracing::debug!(game = %game.id(), ?at, %owner, changed = stones.len(), scoring_number, "Marked stones");
    let events = vec![GameEvent::StonesMarked {
        by: player,
        owner,
        stones,
        scoring_number,
        opponent_was_done: state.is_done_scoring(player.opposite()),
    }];

    Ok(Transition {
        game: game.replace(next, Phase::Scoring),
        events,
    })
}

/// Record that `player` agrees with the score at `scoring_number`.
///
/// Once both players agree at the same scoring number the game is finished;
/// the higher total wins and a tie goes to White.
pub fn finish_scoring(
    game: &Game,
    player: Color,
    scoring_number: u32,
) -> Result<Transition, GameError> {
    check_scoring(game, player)?;

    let state = game.state();
    if state.scoring_number() != Some(scoring_number) {
        return Err(GameError::ScoringChanged);
    }

    let mut next = state.clone();
    let scoring = next.scoring_mut();
    match player {
        Color::Black => scoring.black_done_number = Some(scoring_number),
        _ => scoring.white_done_number = Some(scoring_number),
    }

    let mut events = vec![GameEvent::DoneScoring {
        by: player,
        scoring_number,
    }];

    let phase = if next.is_done_scoring(Color::None) {
        let black = next.black_territory().unwrap_or_default();
        let white = next.white_territory().unwrap_or_default();
        next.winner = if white >= black {
            Color::White
        } else {
            Color::Black
        };
        next.last_move_message = GAME_OVER_MESSAGE.to_string();

        tracing::info!(game = %game.id(), black, white, winner = %next.winner, "Game scored");
        events.push(GameEvent::GameFinished {
            winner: next.winner,
            black_score: Some(black),
            white_score: Some(white),
        });
        Phase::Finished
    } else {
        Phase::Scoring
    };

    Ok(Transition {
        game: game.replace(next, phase),
        events,
    })
}

/// Shared checks for scoring operations
fn check_scoring(game: &Game, player: Color) -> Result<(), GameError> {
    if !player.is_player() {
        return Err(GameError::InvalidColor);
    }
    match game.phase() {
        Phase::Finished => return Err(GameError::GameFinished),
        Phase::InProgress => return Err(GameError::NotScoring),
        Phase::Scoring => {}
    }
    if game.state().is_done_scoring(player) {
        return Err(GameError::AlreadyDone);
    }
    Ok(())
}
