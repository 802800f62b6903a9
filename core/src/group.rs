// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connected groups and their liberties

use crate::board::Board;
use crate::{Color, Coord};
use std::collections::VecDeque;

/// A connected group of same-colored stones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Color of every stone in the group
    pub color: Color,
    /// Stones sorted by `(x, y)`, so equal groups compare equal
    pub stones: Vec<Coord>,
    /// Distinct empty cells touching the group
    pub liberties: usize,
}

impl Group {
    /// No liberties left
    pub fn is_captured(&self) -> bool {
        self.liberties == 0
    }

    /// Exactly one liberty left
    pub fn in_atari(&self) -> bool {
        self.liberties == 1
    }

    /// Whether the group contains the coordinate
    pub fn contains(&self, coord: Coord) -> bool {
        self.stones.binary_search(&coord).is_ok()
    }
}

/// Find all stones connected to the stone at `start` and count their liberties.
///
/// `start` must hold a stone; callers check the cell first.
pub fn find_group(board: &Board, start: Coord) -> Group {
    let color = board.get(start);
    debug_assert!(color.is_player(), "no stone at {:?}", start);

    let width = board.width() as usize;
    let index = |c: Coord| c.y as usize * width + c.x as usize;
    let cells = width * board.height() as usize;

    // Flood fill on the color
    let mut reached = vec![false; cells];
    let mut stones = Vec::new();
    let mut queue = VecDeque::from([start]);
    reached[index(start)] = true;

    while let Some(current) = queue.pop_front() {
        stones.push(current);
        for neighbor in board.neighbors(current) {
            if board.get(neighbor) == color && !reached[index(neighbor)] {
                reached[index(neighbor)] = true;
                queue.push_back(neighbor);
            }
        }
    }

    stones.sort();

    // Each empty neighbour counts once, however many stones touch it
    let mut already_counted = vec![false; cells];
    let mut liberties = 0;
    for &stone in &stones {
        for neighbor in board.neighbors(stone) {
            if board.get(neighbor) == Color::None && !already_counted[index(neighbor)] {
                already_counted[index(neighbor)] = true;
                liberties += 1;
            }
        }
    }

    Group {
        color,
        stones,
        liberties,
    }
}
