// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::config::{BoardSize, GameConfig, Handicap, Komi, PlacementRules};
use crate::{Color, ColorQuery, Coord, GameError};
use serde::{Deserialize, Serialize};

/// Column letters; "I" is skipped because it is easily confused with "J"
pub const COLUMN_NAMES: [&str; 19] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T",
];

/// Represents the Go board with stones, and owner marks once scoring starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Size of the board
    size: BoardSize,
    /// Stones, row-major
    positions: Vec<Color>,
    /// Owner of every cell; only created once scoring marks something
    owners: Option<Vec<Color>>,
    /// Handicap the board was set up with
    handicap: Handicap,
    /// Komi chosen at game creation
    komi: Komi,
    /// Handicap placement version the board was set up with
    rules: PlacementRules,
}

/// A missing owner grid equals a grid with no owners, so boards compare
/// equal exactly when their setup and fingerprint match
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.handicap == other.handicap
            && self.komi == other.komi
            && self.rules == other.rules
            && self.positions == other.positions
            && (0..self.positions.len()).all(|idx| self.owner_at(idx) == other.owner_at(idx))
    }
}

impl Eq for Board {}

impl Board {
    /// Create a board for the given setup, with handicap stones in place
    pub fn new(config: &GameConfig) -> Self {
        let cells = config.size.width() as usize * config.size.height() as usize;
        let mut board = Self {
            size: config.size,
            positions: vec![Color::None; cells],
            owners: None,
            handicap: config.handicap,
            komi: config.komi,
            rules: config.rules,
        };
        for coord in config.handicap_positions() {
            board.set(coord, Color::Black);
        }
        board
    }

    /// Create an empty board for an even game with default komi
    pub fn empty(size: BoardSize) -> Self {
        Self::new(&GameConfig::even(size))
    }

    /// Rebuild a board from its [`fingerprint`](Self::fingerprint).
    ///
    /// The setup (handicap, komi, rules) comes from `config`; the stones and
    /// owner marks come from `state`.
    pub fn from_fingerprint(config: &GameConfig, state: &str) -> Result<Self, GameError> {
        let cells = config.size.width() as usize * config.size.height() as usize;
        let chars: Vec<char> = state.chars().collect();
        if chars.len() != cells {
            return Err(GameError::InvalidFingerprint(format!(
                "expected {} cells, found {}",
                cells,
                chars.len()
            )));
        }

        let mut positions = Vec::with_capacity(cells);
        let mut owners = Vec::with_capacity(cells);
        for c in chars {
            let (stone, owner) = match c {
                '.' => (Color::None, Color::None),
                'b' => (Color::Black, Color::None),
                'w' => (Color::White, Color::None),
                'B' => (Color::None, Color::Black),
                'W' => (Color::None, Color::White),
                'c' => (Color::Black, Color::White),
                'x' => (Color::White, Color::Black),
                other => {
                    return Err(GameError::InvalidFingerprint(format!(
                        "unknown cell '{}'",
                        other
                    )))
                }
            };
            positions.push(stone);
            owners.push(owner);
        }

        let has_owners = owners.iter().any(|owner| owner.is_player());
        Ok(Self {
            size: config.size,
            positions,
            owners: has_owners.then_some(owners),
            handicap: config.handicap,
            komi: config.komi,
            rules: config.rules,
        })
    }

    /// Get the stone at the specified coordinate.
    ///
    /// The coordinate must be on the board.
    pub fn get(&self, coord: Coord) -> Color {
        self.positions[self.coord_to_index(coord)]
    }

    /// Set the stone at the specified coordinate (`Color::None` clears it)
    pub fn set(&mut self, coord: Coord, color: Color) {
        let idx = self.coord_to_index(coord);
        self.positions[idx] = color;
    }

    /// Owner of a cell; nothing is owned until scoring starts
    pub fn owner(&self, coord: Coord) -> Color {
        match &self.owners {
            Some(owners) => owners[self.coord_to_index(coord)],
            None => Color::None,
        }
    }

    fn owner_at(&self, idx: usize) -> Color {
        self.owners.as_ref().map_or(Color::None, |owners| owners[idx])
    }

    /// Set the owner of a cell, creating the owner grid on first use
    pub fn set_owner(&mut self, coord: Coord, color: Color) {
        let idx = self.coord_to_index(coord);
        let cells = self.positions.len();
        self.owners.get_or_insert_with(|| vec![Color::None; cells])[idx] = color;
    }

    /// Whether the owner grid exists
    pub fn has_owners(&self) -> bool {
        self.owners.is_some()
    }

    /// Forget every owner mark
    pub fn clear_owners(&mut self) {
        if let Some(owners) = self.owners.as_mut() {
            owners.fill(Color::None);
        }
    }

    /// Convert a coordinate to a vector index
    fn coord_to_index(&self, coord: Coord) -> usize {
        debug_assert!(self.contains(coord), "{:?} is off the board", coord);
        (coord.y as usize) * (self.width() as usize) + (coord.x as usize)
    }

    /// Check signed coordinates against the board edges
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() as i32 && y >= 0 && y < self.height() as i32
    }

    /// Check a coordinate against the board edges
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width() && coord.y < self.height()
    }

    /// Orthogonal neighbours on the board, in the order left, up, right, down
    pub fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        let mut result = Vec::with_capacity(4);
        let x = coord.x;
        let y = coord.y;

        // Left
        if x > 0 {
            result.push(Coord::new(x - 1, y));
        }

        // Up
        if y > 0 {
            result.push(Coord::new(x, y - 1));
        }

        // Right
        if x + 1 < self.width() {
            result.push(Coord::new(x + 1, y));
        }

        // Down
        if y + 1 < self.height() {
            result.push(Coord::new(x, y + 1));
        }

        result
    }

    /// Every coordinate, row-major
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width();
        let height = self.height();
        (0..height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// Whether the cell holds a stone matching the query
    pub fn is_stone_of(&self, coord: Coord, query: impl Into<ColorQuery>) -> bool {
        match query.into() {
            ColorQuery::Both => self.get(coord).is_player(),
            ColorQuery::Is(color) => self.get(coord) == color,
        }
    }

    /// A stone matching the query that nobody owns
    pub fn is_alive(&self, coord: Coord, query: impl Into<ColorQuery>) -> bool {
        self.owner(coord) == Color::None && self.is_stone_of(coord, query)
    }

    /// A stone matching the query that has been marked as owned
    pub fn is_dead(&self, coord: Coord, query: impl Into<ColorQuery>) -> bool {
        self.owner(coord) != Color::None && self.is_stone_of(coord, query)
    }

    /// Count stones of the specified color on the board
    pub fn count_stones(&self, color: Color) -> usize {
        self.positions.iter().filter(|&&stone| stone == color).count()
    }

    /// Compact description of stones and owners, one character per cell in
    /// row-major order.
    ///
    /// `.` empty, `b`/`w` stones, `B`/`W` territory, `c` dead black stone,
    /// `x` dead white stone. Two boards with the same fingerprint are the same
    /// position for Ko purposes.
    pub fn fingerprint(&self) -> String {
        self.coords()
            .map(|coord| match (self.get(coord), self.owner(coord)) {
                (Color::Black, Color::White) => 'c',
                (Color::Black, _) => 'b',
                (Color::White, Color::Black) => 'x',
                (Color::White, _) => 'w',
                (Color::None, Color::Black) => 'B',
                (Color::None, Color::White) => 'W',
                (Color::None, Color::None) => '.',
            })
            .collect()
    }

    /// Get the size of the board
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of columns
    pub fn width(&self) -> u8 {
        self.size.width()
    }

    /// Number of rows
    pub fn height(&self) -> u8 {
        self.size.height()
    }

    /// Column labels, left to right
    pub fn column_names(&self) -> &'static [&'static str] {
        &COLUMN_NAMES[..self.width() as usize]
    }

    /// Row labels, top to bottom
    pub fn row_names(&self) -> Vec<String> {
        (1..=self.height()).rev().map(|row| row.to_string()).collect()
    }

    /// Handicap the board was created with
    pub fn handicap(&self) -> Handicap {
        self.handicap
    }

    /// Coordinates of the handicap stones
    pub fn handicap_positions(&self) -> Vec<Coord> {
        self.config().handicap_positions()
    }

    /// Komi chosen at game creation
    pub fn komi(&self) -> Komi {
        self.komi
    }

    /// Handicap placement version
    pub fn rules(&self) -> PlacementRules {
        self.rules
    }

    /// The setup this board was created from
    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.size,
            handicap: self.handicap,
            komi: self.komi,
            rules: self.rules,
        }
    }
}
