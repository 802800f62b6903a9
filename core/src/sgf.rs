// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move record export (SGF) and human readable coordinates

use crate::board::COLUMN_NAMES;
use crate::config::BoardSize;
use crate::game::Game;
use crate::state::GameState;
use crate::{Color, Coord, GameError};
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt::Write;

impl Coord {
    /// Display label such as `D4`: column letter (no `I`), then the row
    /// counted from the bottom edge
    pub fn label(&self, height: u8) -> String {
        let column = COLUMN_NAMES.get(self.x as usize).copied().unwrap_or("?");
        format!("{}{}", column, height.saturating_sub(self.y))
    }

    /// Parse a display label (case-insensitive) for a board of `size`
    pub fn parse_label(text: &str, size: BoardSize) -> Result<Coord, GameError> {
        let invalid = || GameError::InvalidCoordinate(text.to_string());
        let text = text.trim();
        let mut chars = text.chars();
        let column = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();

        let x = COLUMN_NAMES[..size.width() as usize]
            .iter()
            .position(|name| name.starts_with(column))
            .ok_or_else(invalid)?;
        let row: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 || row > size.height() {
            return Err(invalid());
        }

        Ok(Coord::new(x as u8, size.height() - row))
    }
}

/// Standard SGF point: column then row as lowercase letters from `a`
pub fn sgf_point(coord: Coord) -> String {
    let x = (b'a' + coord.x) as char;
    let y = (b'a' + coord.y) as char;
    format!("{}{}", x, y)
}

/// Escape a text property value
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ']' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// SGF generator for a finished or running game
pub struct SgfWriter<'a> {
    game: &'a Game,
    black_name: Option<String>,
    white_name: Option<String>,
    date: Option<NaiveDate>,
    comments: BTreeMap<u32, Vec<String>>,
}

impl<'a> SgfWriter<'a> {
    /// Writer for `game` with no optional properties
    pub fn new(game: &'a Game) -> Self {
        Self {
            game,
            black_name: None,
            white_name: None,
            date: None,
            comments: BTreeMap::new(),
        }
    }

    /// Black's display name (`PB`)
    pub fn black_name(mut self, name: impl Into<String>) -> Self {
        self.black_name = Some(name.into());
        self
    }

    /// White's display name (`PW`)
    pub fn white_name(mut self, name: impl Into<String>) -> Self {
        self.white_name = Some(name.into());
        self
    }

    /// Date the game was played (`DT`)
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Attach a comment to the node with this move number.
    ///
    /// Comments before the first move are attached to move 1.
    pub fn comment(mut self, move_number: u32, text: impl Into<String>) -> Self {
        self.comments
            .entry(move_number.max(1))
            .or_default()
            .push(text.into());
        self
    }

    /// Render the record
    pub fn write(&self) -> Result<String> {
        let mut sgf = String::new();
        self.write_root(&mut sgf)?;

        let mut states: Vec<&GameState> = self.game.history().iter().collect();
        states.push(self.game.state());

        let mut last_number = states.first().map(|s| s.move_number()).unwrap_or(0);
        for pair in states.windows(2) {
            let (previous, state) = (pair[0], pair[1]);
            // Resignation is recorded in RE only
            if state.winner().is_player() && !state.is_done_scoring(Color::None) {
                break;
            }

            sgf.push(';');
            if state.move_number() != last_number + 1 {
                write!(sgf, "MN[{}]", state.move_number())?;
            }
            last_number = state.move_number();

            let mover = match previous.whose_move() {
                Color::White => 'W',
                _ => 'B',
            };
            match state.last_move() {
                Some(at) if !state.last_move_was_pass() => {
                    write!(sgf, "{}[{}]", mover, sgf_point(at))?
                }
                _ => write!(sgf, "{}[]", mover)?,
            }

            if let Some(comments) = self.comments.get(&last_number) {
                write!(sgf, "C[{}]", escape(&comments.join("\n")))?;
            }
        }

        sgf.push(')');
        tracing::debug!(game = %self.game.id(), bytes = sgf.len(), "Wrote SGF");
        Ok(sgf)
    }

    fn write_root(&self, sgf: &mut String) -> Result<()> {
        let board = self.game.state().board();
        write!(
            sgf,
            "(;FF[4]GM[1]CA[UTF-8]SZ[{}]KM[{}]HA[{}]",
            board.width(),
            board.komi().value(),
            board.handicap().stones()
        )?;

        let stones = board.handicap_positions();
        if !stones.is_empty() {
            sgf.push_str("AB");
            for stone in stones {
                write!(sgf, "[{}]", sgf_point(stone))?;
            }
            sgf.push_str("PL[W]");
        }

        if let Some(name) = &self.black_name {
            write!(sgf, "PB[{}]", escape(name))?;
        }
        if let Some(name) = &self.white_name {
            write!(sgf, "PW[{}]", escape(name))?;
        }
        if let Some(date) = self.date {
            write!(sgf, "DT[{}]", date.format("%Y-%m-%d"))?;
        }
        if let Some(result) = self.result() {
            write!(sgf, "RE[{}]", result)?;
        }
        Ok(())
    }

    /// `B+R`, `W+3.5` and so on; `None` while the game is running
    fn result(&self) -> Option<String> {
        let state = self.game.state();
        let winner = match state.winner() {
            Color::Black => 'B',
            Color::White => 'W',
            Color::None => return None,
        };

        if !state.is_done_scoring(Color::None) {
            return Some(format!("{}+R", winner));
        }
        let black = state.black_territory().unwrap_or_default();
        let white = state.white_territory().unwrap_or_default();
        Some(format!("{}+{}", winner, (white - black).abs()))
    }
}
