// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban Core - Go rules engine
//!
//! This crate provides the core game functionality including:
//! - Go board representation with handicap placement and owner marks
//! - Group and liberty analysis, captures, suicide and Ko enforcement
//! - End-game scoring: dead stone marking and territory counting
//! - Move record (SGF) export, wire payloads and collaborator seams
//!
//! Every engine operation takes the current [`Game`] by reference and returns
//! a brand new one inside a [`Transition`]; a rejected operation returns a
//! [`GameError`] and leaves the caller's value untouched.

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod events;
pub mod game;
pub mod group;
pub mod rules;
pub mod scoring;
pub mod sgf;
pub mod state;
pub mod store;
pub mod wire;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use thiserror::Error;

/// Stone color stored in a board cell.
///
/// Serialized as the integers `0`, `1` and `2` so stored games stay compact.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize_repr, Deserialize_repr,
)]
#[repr(u8)]
pub enum Color {
    /// Empty cell, or "nobody" when used as an owner or winner
    #[default]
    None = 0,
    /// Black player (moves first in an even game)
    Black = 1,
    /// White player
    White = 2,
}

impl Color {
    /// Returns the opposite color; `None` stays `None`
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            Color::None => Color::None,
        }
    }

    /// True for Black and White
    pub fn is_player(&self) -> bool {
        *self != Color::None
    }

    /// Lowercase name, as used in user facing messages
    pub fn name(&self) -> &'static str {
        match self {
            Color::None => "none",
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color filter for board queries. `Both` matches any stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorQuery {
    /// Match exactly this cell content
    Is(Color),
    /// Match a stone of either color
    Both,
}

impl From<Color> for ColorQuery {
    fn from(color: Color) -> Self {
        ColorQuery::Is(color)
    }
}

/// Board coordinate; `x` is the column and `y` the row, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: u8,
    /// Y coordinate (row)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Represents a move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Place a stone at the specified coordinate
    Place(Coord),
    /// Pass the turn
    Pass,
    /// Resign the game
    Resign,
}

/// Reasons an operation is rejected.
///
/// The `Display` text is the reason shown to the player. No variant is ever
/// produced after the game has been changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The color is not Black or White
    #[error("Unexpected error: invalid player color.")]
    InvalidColor,

    /// The board size index is not in the menu
    #[error("Invalid board size selection: {0}.")]
    InvalidBoardSize(usize),

    /// The handicap index is not in the menu or does not fit the board
    #[error("Invalid handicap selection: {0}.")]
    InvalidHandicap(usize),

    /// The komi index is not in the menu
    #[error("Invalid komi selection: {0}.")]
    InvalidKomi(usize),

    /// The coordinate is outside the board
    #[error("Move coordinates are out-of-bounds.")]
    OutOfBounds,

    /// The position is already occupied
    #[error("You can't move here; there is already a stone!")]
    Occupied,

    /// Somebody else is to move
    #[error("Sorry, but it is not your turn.")]
    NotYourTurn,

    /// The caller's move number is not the live one
    #[error("Wrong move number; refresh stale game board.")]
    StaleMoveNumber,

    /// The game is over
    #[error("No more moves can be made; the game is finished.")]
    GameFinished,

    /// Stones can't be played once both players passed
    #[error("The game is being scored; no more moves can be made.")]
    ScoringInProgress,

    /// The move would result in self-capture (suicide)
    #[error("You can't move there; your stone would immediately be captured!")]
    Suicide,

    /// The move recreates the position from before the opponent's last move
    #[error("Sorry, but this move would violate the rule of Ko. Move somewhere else and try playing here later!")]
    KoViolation,

    /// Scoring operations before both players passed
    #[error("Scoring is not allowed yet; the game is still in progress.")]
    NotScoring,

    /// The player already agreed to the current score
    #[error("Sorry, but you have already finished scoring.")]
    AlreadyDone,

    /// Dead/alive marks only apply to stones
    #[error("You can't mark an empty coordinate as dead or alive!")]
    EmptyMark,

    /// A stone can't be territory of its own color
    #[error("Unexpected error: {0} stone cannot be {0} territory.")]
    OwnStoneTerritory(Color),

    /// The stone already has the requested owner
    #[error("Unexpected error: stone already marked as suggested.")]
    AlreadyMarked,

    /// The changed group did not contain the marked stone
    #[error("Unexpected error: marking stone had no effect.")]
    MarkHadNoEffect,

    /// The board changed since the player last looked at it
    #[error("Something has changed; review before clicking done.")]
    ScoringChanged,

    /// A board fingerprint could not be decoded
    #[error("Invalid board state string: {0}")]
    InvalidFingerprint(String),

    /// A coordinate label like `D4` could not be parsed
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

pub use board::Board;
pub use config::{BoardSize, GameConfig, Handicap, Komi, PlacementRules};
pub use events::{GameEvent, Notification, NotificationKind, Notifier};
pub use game::{Game, GameId, Phase, Transition};
pub use group::{find_group, Group};
pub use rules::{apply_move, pass_turn, resign};
pub use scoring::{count_territory, finish_scoring, mark_dead, mark_territory};
pub use state::{GameState, History, ScoringData};
pub use store::{GameStore, MemoryStore, StoreError};
