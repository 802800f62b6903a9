// SPDX-License-Identifier: MIT OR Apache-2.0

//! The game record: current state, history and phase

use crate::board::Board;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::state::{GameState, History};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(Uuid);

impl GameId {
    /// Fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying uuid
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl From<Uuid> for GameId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Where a game is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players are placing stones
    #[default]
    InProgress,
    /// Both players passed; dead stones are being marked
    Scoring,
    /// Terminal
    Finished,
}

/// A game: setup, the live state and every earlier state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    config: GameConfig,
    state: GameState,
    history: History,
    phase: Phase,
    /// Bumped by every accepted operation
    #[serde(default)]
    revision: u64,
}

impl Game {
    /// Create a game in its initial (handicap) position
    pub fn new(config: GameConfig) -> Self {
        Self::with_id(GameId::new(), config)
    }

    /// Create a game with a caller supplied id
    pub fn with_id(id: GameId, config: GameConfig) -> Self {
        let board = Board::new(&config);
        tracing::debug!(game = %id, size = board.width(), handicap = config.handicap.stones(), "Created game");
        Self {
            id,
            config,
            state: GameState::new(board),
            history: History::new(),
            phase: Phase::InProgress,
            revision: 0,
        }
    }

    /// Game id
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Setup the game was created with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Live state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Earlier states, oldest first
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Live move number; callers echo it back to prove their view is fresh
    pub fn move_number(&self) -> u32 {
        self.state.move_number()
    }

    /// Count of accepted operations, including marks and agreements that
    /// leave the move and scoring numbers alone
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Stones are still being placed
    pub fn in_progress(&self) -> bool {
        self.phase == Phase::InProgress
    }

    /// Dead stones are being marked
    pub fn is_scoring(&self) -> bool {
        self.phase == Phase::Scoring
    }

    /// The game is over
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Player expected to move, if moves are being made at all
    pub fn player_to_move(&self) -> Option<Color> {
        self.in_progress().then_some(self.state.whose_move())
    }

    /// Install `next` as the live state, keeping the current one in history
    pub(crate) fn advance(&self, next: GameState, phase: Phase) -> Game {
        let mut history = self.history.clone();
        history.push(self.state.clone());
        Game {
            id: self.id,
            config: self.config,
            state: next,
            history,
            phase,
            revision: self.revision + 1,
        }
    }

    /// Replace the live state without recording a move
    pub(crate) fn replace(&self, next: GameState, phase: Phase) -> Game {
        Game {
            id: self.id,
            config: self.config,
            state: next,
            history: self.history.clone(),
            phase,
            revision: self.revision + 1,
        }
    }
}

/// Result of an accepted operation: the new game and what happened
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The game after the operation
    pub game: Game,
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
}

impl Transition {
    /// Live state of the new game
    pub fn state(&self) -> &GameState {
        self.game.state()
    }
}
