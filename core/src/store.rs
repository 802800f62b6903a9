// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game persistence seam with optimistic concurrency.
//!
//! Engine operations are pure, so a caller loads a game, runs an operation
//! and swaps the result back in. The swap only succeeds if the stored game
//! still has the revision the caller started from.

use crate::game::{Game, GameId, Transition};
use crate::GameError;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

/// Store level failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("No game with that ID could be found.")]
    NotFound(GameId),

    #[error("A game with ID {0} already exists")]
    AlreadyExists(GameId),

    #[error("Something has changed; refresh stale game board.")]
    Conflict {
        id: GameId,
        revision: u64,
        move_number: u32,
        scoring_number: Option<u32>,
    },

    #[error(transparent)]
    Rejected(#[from] GameError),
}

/// Where games live between operations
pub trait GameStore {
    /// Store a new game
    fn create(&self, game: Game) -> Result<(), StoreError>;

    /// Current value of a game
    fn load(&self, id: GameId) -> Result<Game, StoreError>;

    /// Replace a game, provided nothing was stored since `expected_revision`
    fn swap(&self, id: GameId, expected_revision: u64, game: Game) -> Result<(), StoreError>;

    /// Load a game, run `op` on it and store the result
    fn apply<F>(&self, id: GameId, op: F) -> Result<Transition, StoreError>
    where
        Self: Sized,
        F: FnOnce(&Game) -> Result<Transition, GameError>,
    {
        let game = self.load(id)?;
        let transition = op(&game)?;
        self.swap(id, game.revision(), transition.game.clone())?;
        Ok(transition)
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<GameId, Game>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored games
    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }
}

impl GameStore for MemoryStore {
    fn create(&self, game: Game) -> Result<(), StoreError> {
        let mut games = self.games.write();
        let id = game.id();
        if games.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        games.insert(id, game);
        tracing::debug!(game = %id, "Stored new game");
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Game, StoreError> {
        self.games
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn swap(&self, id: GameId, expected_revision: u64, game: Game) -> Result<(), StoreError> {
        let mut games = self.games.write();
        let current = games.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        let revision = current.revision();
        if revision != expected_revision {
            let move_number = current.move_number();
            let scoring_number = current.state().scoring_number();
            tracing::debug!(
                game = %id,
                revision,
                move_number,
                ?scoring_number,
                "Rejected stale update"
            );
            return Err(StoreError::Conflict {
                id,
                revision,
                move_number,
                scoring_number,
            });
        }

        *current = game;
        Ok(())
    }
}
