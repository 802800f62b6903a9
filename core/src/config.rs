// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game setup menus: board sizes, handicaps, komi and handicap placement.
//!
//! Every option is chosen by index from a fixed menu, the same way the game
//! creation form offers them. [`GameConfig::from_indices`] validates a
//! selection before any board is built.

use crate::{Coord, GameError};
use serde::{Deserialize, Serialize};

/// Supported board sizes, selected by index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    /// 19 x 19 (index 0)
    #[default]
    Nineteen,
    /// 13 x 13 (index 1)
    Thirteen,
    /// 9 x 9 (index 2)
    Nine,
}

const NINETEEN_HANDICAP: [(u8, u8); 9] = [
    (15, 3),
    (3, 15),
    (15, 15),
    (3, 3),
    (9, 9),
    (3, 9),
    (15, 9),
    (9, 3),
    (9, 15),
];

const THIRTEEN_HANDICAP: [(u8, u8); 9] = [
    (9, 3),
    (3, 9),
    (9, 9),
    (3, 3),
    (6, 6),
    (3, 6),
    (9, 6),
    (6, 3),
    (6, 9),
];

const NINE_HANDICAP: [(u8, u8); 5] = [(6, 2), (2, 6), (6, 6), (2, 2), (4, 4)];

impl BoardSize {
    /// All sizes in menu order
    pub const ALL: [BoardSize; 3] = [BoardSize::Nineteen, BoardSize::Thirteen, BoardSize::Nine];

    /// Look a size up by its menu index
    pub fn from_index(index: usize) -> Result<Self, GameError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GameError::InvalidBoardSize(index))
    }

    /// Menu index of this size
    pub fn index(&self) -> usize {
        match self {
            BoardSize::Nineteen => 0,
            BoardSize::Thirteen => 1,
            BoardSize::Nine => 2,
        }
    }

    /// Number of columns
    pub fn width(&self) -> u8 {
        match self {
            BoardSize::Nineteen => 19,
            BoardSize::Thirteen => 13,
            BoardSize::Nine => 9,
        }
    }

    /// Number of rows; all supported boards are square
    pub fn height(&self) -> u8 {
        self.width()
    }

    /// Find the size with the given edge length
    pub fn from_edge(edge: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.width() == edge)
    }

    /// Human readable name, e.g. `19 x 19`
    pub fn name(&self) -> &'static str {
        match self {
            BoardSize::Nineteen => "19 x 19",
            BoardSize::Thirteen => "13 x 13",
            BoardSize::Nine => "9 x 9",
        }
    }

    /// Row/column ordinals of the star points
    pub fn star_ordinals(&self) -> [u8; 3] {
        match self {
            BoardSize::Nineteen => [3, 9, 15],
            BoardSize::Thirteen => [3, 6, 9],
            BoardSize::Nine => [2, 4, 6],
        }
    }

    fn handicap_table(&self) -> &'static [(u8, u8)] {
        match self {
            BoardSize::Nineteen => &NINETEEN_HANDICAP,
            BoardSize::Thirteen => &THIRTEEN_HANDICAP,
            BoardSize::Nine => &NINE_HANDICAP,
        }
    }
}

/// Handicap stone placement rules.
///
/// Games created before the centre-skip change must keep replaying with the
/// old placement, so the version travels with every board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementRules {
    /// Original placement: stones are taken from the table in order
    Legacy,
    /// Six and eight stone handicaps leave the centre point empty
    #[default]
    CenterSkip,
}

/// Number of handicap stones, selected by index from `[0, 9, 8, 7, 6, 5, 4, 3, 2]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handicap(u8);

impl Handicap {
    /// Stone counts in menu order
    pub const MENU: [u8; 9] = [0, 9, 8, 7, 6, 5, 4, 3, 2];

    /// No handicap
    pub const NONE: Handicap = Handicap(0);

    /// Look a handicap up by its menu index
    pub fn from_index(index: usize) -> Result<Self, GameError> {
        Self::MENU
            .get(index)
            .map(|&stones| Handicap(stones))
            .ok_or(GameError::InvalidHandicap(index))
    }

    /// Menu index of this handicap
    pub fn index(&self) -> usize {
        Self::MENU
            .iter()
            .position(|&stones| stones == self.0)
            .unwrap_or(0)
    }

    /// Number of stones
    pub fn stones(&self) -> u8 {
        self.0
    }

    /// Describes the handicap from Black's point of view
    pub fn description(&self) -> &'static str {
        match self.0 {
            9 => "has a nine stone handicap",
            8 => "has an eight stone handicap",
            7 => "has a seven stone handicap",
            6 => "has a six stone handicap",
            5 => "has a five stone handicap",
            4 => "has a four stone handicap",
            3 => "has a three stone handicap",
            2 => "has a two stone handicap",
            _ => "plays first",
        }
    }

    /// Coordinates of the handicap stones, or `None` when the board's table
    /// has too few points for this many stones.
    pub fn positions(&self, size: BoardSize, rules: PlacementRules) -> Option<Vec<Coord>> {
        let table = size.handicap_table();
        let count = self.0 as usize;
        (0..count)
            .map(|stone| {
                let skip_centre = rules == PlacementRules::CenterSkip
                    && stone >= 4
                    && (count == 6 || count == 8);
                let entry = if skip_centre { stone + 1 } else { stone };
                table.get(entry).map(|&(x, y)| Coord::new(x, y))
            })
            .collect()
    }
}

/// Points given to White, selected by index from `[6.5, 5.5, 0.5, -4.5, -5.5]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Komi(u8);

impl Komi {
    /// Komi values in menu order; negative values are reverse komi
    pub const MENU: [f32; 5] = [6.5, 5.5, 0.5, -4.5, -5.5];

    /// Menu index of the (nearly) no-komi option
    pub const NONE: Komi = Komi(2);

    /// Look a komi up by its menu index
    pub fn from_index(index: usize) -> Result<Self, GameError> {
        if index < Self::MENU.len() {
            Ok(Komi(index as u8))
        } else {
            Err(GameError::InvalidKomi(index))
        }
    }

    /// Menu index
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Points awarded to White
    pub fn value(&self) -> f32 {
        Self::MENU.get(self.index()).copied().unwrap_or(0.5)
    }

    /// Describes the komi from White's point of view
    pub fn description(&self) -> &'static str {
        match self.0 {
            0 => "has six komi",
            1 => "has five komi",
            2 => "has no komi",
            3 => "has five reverse komi",
            _ => "has six reverse komi",
        }
    }
}

/// Validated game setup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size
    pub size: BoardSize,
    /// Handicap stones for Black
    pub handicap: Handicap,
    /// Komi for White
    pub komi: Komi,
    /// Handicap placement version
    pub rules: PlacementRules,
}

impl GameConfig {
    /// Build a configuration from menu indices.
    ///
    /// Fails when an index is outside its menu, or when the handicap has more
    /// stones than the chosen board has handicap points.
    pub fn from_indices(
        size_index: usize,
        handicap_index: usize,
        komi_index: usize,
        rules: PlacementRules,
    ) -> Result<Self, GameError> {
        let size = BoardSize::from_index(size_index)?;
        let handicap = Handicap::from_index(handicap_index)?;
        let komi = Komi::from_index(komi_index)?;
        if handicap.positions(size, rules).is_none() {
            return Err(GameError::InvalidHandicap(handicap_index));
        }
        Ok(Self {
            size,
            handicap,
            komi,
            rules,
        })
    }

    /// Even game on the given size with default komi
    pub fn even(size: BoardSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Coordinates of the handicap stones for this setup
    pub fn handicap_positions(&self) -> Vec<Coord> {
        self.handicap
            .positions(self.size, self.rules)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lookups() {
        assert_eq!(BoardSize::from_index(2).unwrap().width(), 9);
        assert_eq!(BoardSize::from_index(3), Err(GameError::InvalidBoardSize(3)));
        assert_eq!(Handicap::from_index(1).unwrap().stones(), 9);
        assert_eq!(Handicap::from_index(8).unwrap().index(), 8);
        assert!(Handicap::from_index(9).is_err());
        assert_eq!(Komi::from_index(3).unwrap().value(), -4.5);
        assert!(Komi::from_index(5).is_err());
        assert_eq!(Komi::default().value(), 6.5);
    }

    #[test]
    fn test_center_skip_placement() {
        let six = Handicap::from_index(4).unwrap();
        assert_eq!(six.stones(), 6);

        let legacy = six.positions(BoardSize::Nineteen, PlacementRules::Legacy).unwrap();
        assert!(legacy.contains(&Coord::new(9, 9)));
        assert!(!legacy.contains(&Coord::new(15, 9)));

        let current = six
            .positions(BoardSize::Nineteen, PlacementRules::CenterSkip)
            .unwrap();
        assert!(!current.contains(&Coord::new(9, 9)));
        assert!(current.contains(&Coord::new(3, 9)));
        assert!(current.contains(&Coord::new(15, 9)));
        assert_eq!(current.len(), 6);
    }

    #[test]
    fn test_odd_handicaps_keep_centre() {
        let five = Handicap::from_index(5).unwrap();
        let stones = five
            .positions(BoardSize::Thirteen, PlacementRules::CenterSkip)
            .unwrap();
        assert_eq!(stones.len(), 5);
        assert!(stones.contains(&Coord::new(6, 6)));
    }

    #[test]
    fn test_small_board_rejects_large_handicap() {
        assert!(GameConfig::from_indices(2, 5, 0, PlacementRules::CenterSkip).is_ok());
        assert_eq!(
            GameConfig::from_indices(2, 4, 0, PlacementRules::CenterSkip),
            Err(GameError::InvalidHandicap(4))
        );
        assert_eq!(
            GameConfig::from_indices(2, 1, 0, PlacementRules::Legacy),
            Err(GameError::InvalidHandicap(1))
        );
    }
}
