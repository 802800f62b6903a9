// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON payloads answered to clients after each operation.
//!
//! Field names follow the web client's expectations, so they are snake_case
//! and carry the board as its fingerprint string.

use crate::game::Game;
use crate::{Color, GameError};
use serde::{Deserialize, Serialize};

/// Flash text for accepted operations
pub const OK: &str = "OK";

/// Answer to an accepted stone placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Always `true`
    pub success: bool,
    /// Status text shown to the player
    pub flash: String,
    /// Move number after the operation
    pub current_move_number: u32,
    /// White stones taken by Black so far
    pub white_stones_captured: u32,
    /// Black stones taken by White so far
    pub black_stones_captured: u32,
    /// Board fingerprint
    pub board_state_string: String,
    /// Column of the stone just placed
    pub last_move_x: Option<u8>,
    /// Row of the stone just placed
    pub last_move_y: Option<u8>,
}

impl MoveResponse {
    /// Response for the live state of `game`
    pub fn from_game(game: &Game) -> Self {
        let state = game.state();
        let last_move = state.last_move();
        Self {
            success: true,
            flash: OK.to_string(),
            current_move_number: game.move_number(),
            white_stones_captured: state.white_stones_captured(),
            black_stones_captured: state.black_stones_captured(),
            board_state_string: state.board().fingerprint(),
            last_move_x: last_move.map(|c| c.x),
            last_move_y: last_move.map(|c| c.y),
        }
    }
}

/// Answer to an accepted pass; carries the initial scoring when the pass
/// ended play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassResponse {
    /// Always `true`
    pub success: bool,
    /// Status text shown to the player
    pub flash: String,
    /// Move number after the operation
    pub current_move_number: u32,
    /// Board fingerprint
    pub board_state_string: String,
    /// White's total including komi, once scoring started
    pub white_territory: Option<f32>,
    /// Black's total, once scoring started
    pub black_territory: Option<f32>,
    /// Scoring number to echo back with the next mark or done
    pub scoring_number: Option<u32>,
    /// Dead stones are being marked
    pub game_is_scoring: bool,
    /// The game is over
    pub game_is_finished: bool,
}

impl PassResponse {
    /// Response for the live state of `game`
    pub fn from_game(game: &Game) -> Self {
        let state = game.state();
        Self {
            success: true,
            flash: OK.to_string(),
            current_move_number: game.move_number(),
            board_state_string: state.board().fingerprint(),
            white_territory: state.white_territory(),
            black_territory: state.black_territory(),
            scoring_number: state.scoring_number(),
            game_is_scoring: game.is_scoring(),
            game_is_finished: game.is_finished(),
        }
    }
}

/// Answer to a resignation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResignResponse {
    /// Always `true`
    pub success: bool,
    /// Status text shown to the player
    pub flash: String,
    /// Move number after the operation
    pub current_move_number: u32,
    /// Dead stones are being marked
    pub game_is_scoring: bool,
    /// The game is over
    pub game_is_finished: bool,
}

impl ResignResponse {
    /// Response for the live state of `game`
    pub fn from_game(game: &Game) -> Self {
        Self {
            success: true,
            flash: OK.to_string(),
            current_move_number: game.move_number(),
            game_is_scoring: game.is_scoring(),
            game_is_finished: game.is_finished(),
        }
    }
}

/// Scoring view for one player, sent after marking stones or calling done
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    /// Always `true`
    pub success: bool,
    /// Status text shown to the player
    pub flash: String,
    /// Board fingerprint
    pub board_state_string: String,
    /// The viewer agreed to the current score
    pub you_are_done_scoring: bool,
    /// The opponent agreed to the current score
    pub opponent_done_scoring: bool,
    /// White's total including komi, once scoring started
    pub white_territory: Option<f32>,
    /// Black's total, once scoring started
    pub black_territory: Option<f32>,
    /// Scoring number to echo back with the next mark or done
    pub scoring_number: Option<u32>,
    /// The viewer won
    pub you_win: bool,
    /// The opponent won
    pub opponent_wins: bool,
    /// The game is over
    pub game_is_finished: bool,
}

impl ScoringResponse {
    /// Scoring view as seen by `player`
    pub fn for_player(game: &Game, player: Color, flash: impl Into<String>) -> Self {
        let state = game.state();
        let opponent = player.opposite();
        Self {
            success: true,
            flash: flash.into(),
            board_state_string: state.board().fingerprint(),
            you_are_done_scoring: state.is_done_scoring(player),
            opponent_done_scoring: state.is_done_scoring(opponent),
            white_territory: state.white_territory(),
            black_territory: state.black_territory(),
            scoring_number: state.scoring_number(),
            you_win: state.is_winner(player),
            opponent_wins: state.is_winner(opponent),
            game_is_finished: game.is_finished(),
        }
    }
}

/// Answer to a rejected operation; `flash` is the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Always `false`
    pub success: bool,
    /// Why the operation was rejected
    pub flash: String,
}

impl Failure {
    /// Failure carrying `flash` as the reason
    pub fn new(flash: impl Into<String>) -> Self {
        Self {
            success: false,
            flash: flash.into(),
        }
    }
}

impl From<&GameError> for Failure {
    fn from(err: &GameError) -> Self {
        Self::new(err.to_string())
    }
}
