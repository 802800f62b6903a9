// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game state snapshots and the append-only history of them

use crate::board::Board;
use crate::{Color, Coord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Message shown before anyone has moved
pub const FIRST_MOVE_MESSAGE: &str = "It's your turn to move; this is the first move of the game.";

/// Scoring progress; only exists once both players have passed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringData {
    /// Bumped on every dead/alive change so stale views can be detected
    pub scoring_number: u32,
    /// Scoring number Black agreed to, if any
    pub black_done_number: Option<u32>,
    /// Scoring number White agreed to, if any
    pub white_done_number: Option<u32>,
    /// Black's total: territory, dead white stones and prisoners
    pub black_territory: f32,
    /// White's total: territory, dead black stones, prisoners and komi
    pub white_territory: f32,
}

impl ScoringData {
    fn new() -> Self {
        Self {
            scoring_number: 0,
            black_done_number: None,
            white_done_number: None,
            black_territory: 0.0,
            white_territory: 0.0,
        }
    }

    /// Whether `color` agreed to the current scoring number.
    ///
    /// A dead/alive change bumps the scoring number, which withdraws any
    /// earlier agreement without touching the done numbers.
    pub fn is_done(&self, color: Color) -> bool {
        let done = match color {
            Color::Black => self.black_done_number,
            Color::White => self.white_done_number,
            Color::None => return self.is_done(Color::Black) && self.is_done(Color::White),
        };
        done == Some(self.scoring_number)
    }
}

/// Everything about a game at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    /// White stones removed from the board by Black
    pub(crate) white_stones_captured: u32,
    /// Black stones removed from the board by White
    pub(crate) black_stones_captured: u32,
    pub(crate) whose_move: Color,
    pub(crate) last_move_message: String,
    pub(crate) move_number: u32,
    pub(crate) last_move: Option<Coord>,
    pub(crate) last_move_was_pass: bool,
    pub(crate) scoring: Option<ScoringData>,
    pub(crate) winner: Color,
}

impl GameState {
    /// Initial state for a freshly created board.
    ///
    /// Black moves first in an even game; with handicap stones on the board
    /// White moves first.
    pub fn new(board: Board) -> Self {
        let whose_move = if board.handicap().stones() == 0 {
            Color::Black
        } else {
            Color::White
        };
        Self {
            board,
            white_stones_captured: 0,
            black_stones_captured: 0,
            whose_move,
            last_move_message: FIRST_MOVE_MESSAGE.to_string(),
            move_number: 0,
            last_move: None,
            last_move_was_pass: false,
            scoring: None,
            winner: Color::None,
        }
    }

    /// The board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move
    pub fn whose_move(&self) -> Color {
        self.whose_move
    }

    /// White stones captured by Black
    pub fn white_stones_captured(&self) -> u32 {
        self.white_stones_captured
    }

    /// Black stones captured by White
    pub fn black_stones_captured(&self) -> u32 {
        self.black_stones_captured
    }

    /// Stones of `color` that were captured by the opponent
    pub fn stones_captured(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_stones_captured,
            Color::White => self.white_stones_captured,
            Color::None => 0,
        }
    }

    pub(crate) fn add_captured(&mut self, color: Color, count: u32) {
        match color {
            Color::Black => self.black_stones_captured += count,
            Color::White => self.white_stones_captured += count,
            Color::None => {}
        }
    }

    /// Message describing the last move to the player who moves next
    pub fn last_move_message(&self) -> &str {
        &self.last_move_message
    }

    /// Number of moves (including passes) made so far
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Where the last stone was placed
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Whether the last move was a pass
    pub fn last_move_was_pass(&self) -> bool {
        self.last_move_was_pass
    }

    /// Scoring progress, once scoring has started
    pub fn scoring(&self) -> Option<&ScoringData> {
        self.scoring.as_ref()
    }

    pub(crate) fn scoring_mut(&mut self) -> &mut ScoringData {
        self.scoring.get_or_insert_with(ScoringData::new)
    }

    /// Whether scoring has started
    pub fn has_scoring_data(&self) -> bool {
        self.scoring.is_some()
    }

    /// Current scoring number, once scoring has started
    pub fn scoring_number(&self) -> Option<u32> {
        self.scoring.as_ref().map(|s| s.scoring_number)
    }

    /// Whether `color` agreed to the current score; `Color::None` asks
    /// whether both players did
    pub fn is_done_scoring(&self, color: Color) -> bool {
        self.scoring.as_ref().is_some_and(|s| s.is_done(color))
    }

    /// Black's total, once scoring has started
    pub fn black_territory(&self) -> Option<f32> {
        self.scoring.as_ref().map(|s| s.black_territory)
    }

    /// White's total including komi, once scoring has started
    pub fn white_territory(&self) -> Option<f32> {
        self.scoring.as_ref().map(|s| s.white_territory)
    }

    /// Winner, or `Color::None` while the game is running
    pub fn winner(&self) -> Color {
        self.winner
    }

    /// Whether `color` won
    pub fn is_winner(&self, color: Color) -> bool {
        color.is_player() && self.winner == color
    }
}

/// Ordered, append-only sequence of earlier states.
///
/// Entries are shared so that producing a new game value does not copy every
/// earlier board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History(Vec<Arc<GameState>>);

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, state: GameState) {
        self.0.push(Arc::new(state));
    }

    /// Most recent earlier state
    pub fn last(&self) -> Option<&GameState> {
        self.0.last().map(Arc::as_ref)
    }

    /// State at position `index`; index 0 is the initial position
    pub fn get(&self, index: usize) -> Option<&GameState> {
        self.0.get(index).map(Arc::as_ref)
    }

    /// Number of earlier states
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True before the first move
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Earlier states, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &GameState> {
        self.0.iter().map(Arc::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardSize, GameConfig, PlacementRules};

    #[test]
    fn test_initial_turn_depends_on_handicap() {
        let even = GameState::new(Board::empty(BoardSize::Nine));
        assert_eq!(even.whose_move(), Color::Black);
        assert_eq!(even.last_move_message(), FIRST_MOVE_MESSAGE);
        assert!(!even.has_scoring_data());
        assert_eq!(even.black_territory(), None);

        let config = GameConfig::from_indices(0, 8, 0, PlacementRules::CenterSkip).unwrap();
        let handicap = GameState::new(Board::new(&config));
        assert_eq!(handicap.whose_move(), Color::White);
    }

    #[test]
    fn test_done_follows_scoring_number() {
        let mut scoring = ScoringData::new();
        scoring.black_done_number = Some(0);
        assert!(scoring.is_done(Color::Black));
        assert!(!scoring.is_done(Color::None));

        scoring.white_done_number = Some(0);
        assert!(scoring.is_done(Color::None));

        scoring.scoring_number += 1;
        assert!(!scoring.is_done(Color::Black));
        assert!(!scoring.is_done(Color::White));
    }
}
