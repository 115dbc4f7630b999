//! # Game Module
//!
//! Core game state management, map representation, and entity systems.
//!
//! This module contains the fundamental building blocks of Ticktale:
//! - The character-grid map and its legend
//! - Player and monster entities
//! - The immutable world snapshot
//! - The frame advancer driven by the background ticker

pub mod entities;
pub mod frame;
pub mod map;
pub mod state;

pub use entities::*;
pub use frame::*;
pub use map::*;
pub use state::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Represents a (column, row) coordinate on the map grid.
///
/// # Examples
///
/// ```
/// use ticktale::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing eastwards
    pub x: i32,
    /// Row, growing southwards
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }

    /// Returns the 4 cardinal adjacent positions, in `Direction::cardinal()` order.
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| self.step(direction))
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Facing and movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta isn't a single cardinal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the 4 cardinal directions, clockwise from north.
    pub fn cardinal() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// The direction after a quarter turn counter-clockwise.
    pub fn left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// The direction after a quarter turn clockwise.
    pub fn right(self) -> Direction {
        self.left().opposite()
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Lower-case name used in player-facing text.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a word does not name a direction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a direction")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    /// Accepts full names and single letters, case-insensitively.
    ///
    /// ```
    /// use ticktale::Direction;
    ///
    /// assert_eq!("North".parse::<Direction>(), Ok(Direction::North));
    /// assert_eq!("w".parse::<Direction>(), Ok(Direction::West));
    /// assert!("up".parse::<Direction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

/// Unique identifier for monsters.
pub type EntityId = Uuid;
