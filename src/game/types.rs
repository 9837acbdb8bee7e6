use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board. Row grows downward, col grows rightward.
///
/// Coordinates are signed so that stepping off an edge yields a location that
/// simply fails the grid's bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring location one step away in `direction`.
    pub fn adjacent(self, direction: Direction) -> Location {
        let (d_row, d_col) = direction.delta();
        Location::new(self.row + d_row, self.col + d_col)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Compass heading in 45 degree steps, North = 0 degrees, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// The four headings used by movement and blasts, in N, E, S, W order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 45,
            Direction::East => 90,
            Direction::SouthEast => 135,
            Direction::South => 180,
            Direction::SouthWest => 225,
            Direction::West => 270,
            Direction::NorthWest => 315,
        }
    }

    /// Build a heading from any degree value: normalised into `[0, 360)` and
    /// rounded to the nearest 45 degree step.
    pub fn from_degrees(degrees: i32) -> Direction {
        let normalised = degrees.rem_euclid(360);
        let step = ((normalised + 22) / 45) % 8;
        Self::ALL[step as usize]
    }

    /// `(d_row, d_col)` for one step in this heading.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::North
    }
}

/// Handle into the world's entity arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Gray,
    Brown,
    Yellow,
    Orange,
    Black,
    Green,
    Purple,
    Red,
    Blue,
}

/// Power-up carried by a Bonus (and hidden inside a Brick until revealed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    ExpandRadius,
    AddBombs,
    SuperBomb,
}

impl BonusKind {
    /// Unlock order: a level offers the first `min(3, level - 1)` kinds.
    pub const ALL: [BonusKind; 3] = [
        BonusKind::ExpandRadius,
        BonusKind::AddBombs,
        BonusKind::SuperBomb,
    ];
}

/// Position of a fire cell along its blast ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireStage {
    /// Outermost cell reached in its direction.
    Leading,
    Middle,
}
