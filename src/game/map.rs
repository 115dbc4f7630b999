//! # Map Model
//!
//! The character grid the game is played on.
//!
//! A map is parsed once from raw text rows and never changes afterwards. Every
//! character of the text maps to a [`MapCell`] through a fixed legend:
//!
//! | glyph | cell         | passable |
//! |-------|--------------|----------|
//! | `.`   | floor        | yes      |
//! | ` `   | floor        | yes      |
//! | `#`   | wall         | no       |
//! | `~`   | water        | no       |
//! | `+`   | door         | yes      |
//! | `S`   | spawn point  | yes      |

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// Classification of a single grid character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapCell {
    /// Open ground
    Floor,
    /// Solid obstacle
    Wall,
    /// Impassable water
    Water,
    /// Doorway, passable
    Door,
    /// Passable cell where monsters may appear
    SpawnPoint,
}

impl MapCell {
    /// Looks up a glyph in the legend.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::MapCell;
    ///
    /// assert_eq!(MapCell::from_glyph('#'), Some(MapCell::Wall));
    /// assert_eq!(MapCell::from_glyph('?'), None);
    /// ```
    pub fn from_glyph(glyph: char) -> Option<MapCell> {
        match glyph {
            '.' | ' ' => Some(MapCell::Floor),
            '#' => Some(MapCell::Wall),
            '~' => Some(MapCell::Water),
            '+' => Some(MapCell::Door),
            'S' => Some(MapCell::SpawnPoint),
            _ => None,
        }
    }

    /// Canonical glyph for this cell, used by the minimap.
    pub fn glyph(self) -> char {
        match self {
            MapCell::Floor => '.',
            MapCell::Wall => '#',
            MapCell::Water => '~',
            MapCell::Door => '+',
            MapCell::SpawnPoint => 'S',
        }
    }

    /// Whether an entity can stand on this cell.
    pub fn is_passable(self) -> bool {
        match self {
            MapCell::Floor | MapCell::Door | MapCell::SpawnPoint => true,
            MapCell::Wall | MapCell::Water => false,
        }
    }

    /// Short phrase used in descriptions ("a wall", "open floor").
    pub fn describe(self) -> &'static str {
        match self {
            MapCell::Floor => "open floor",
            MapCell::Wall => "a wall",
            MapCell::Water => "deep water",
            MapCell::Door => "a doorway",
            MapCell::SpawnPoint => "a dark burrow",
        }
    }
}

/// Reasons a map text is rejected at load time.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No rows at all
    #[error("map has no rows")]
    Empty,

    /// A row with zero cells
    #[error("row {row} is empty")]
    EmptyRow { row: usize },

    /// Row length differs from the first row
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Character outside the legend
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        row: usize,
        column: usize,
        glyph: char,
    },
}

/// Immutable grid of map cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    width: usize,
    height: usize,
    cells: Vec<MapCell>,
}

/// Parses raw text rows into a map.
///
/// Trailing carriage returns are stripped from each row first. All rows must have
/// the same length and contain only legend glyphs.
///
/// # Examples
///
/// ```
/// use ticktale::{parse_map, MapCell, Position};
///
/// let map = parse_map(&["..#", "...", "#.."]).unwrap();
/// assert_eq!(map.width(), 3);
/// assert_eq!(map.cell_at(Position::new(2, 0)), Some(MapCell::Wall));
/// ```
pub fn parse_map<S: AsRef<str>>(lines: &[S]) -> Result<GameMap, MapError> {
    if lines.is_empty() {
        return Err(MapError::Empty);
    }

    let mut width = None;
    let mut cells = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim_end_matches('\r');
        let mut found = 0;
        for (column, glyph) in line.chars().enumerate() {
            let cell = MapCell::from_glyph(glyph)
                .ok_or(MapError::UnknownGlyph { row, column, glyph })?;
            cells.push(cell);
            found += 1;
        }

        if found == 0 {
            return Err(MapError::EmptyRow { row });
        }
        match width {
            None => width = Some(found),
            Some(expected) if expected != found => {
                return Err(MapError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
    }

    Ok(GameMap {
        width: width.unwrap_or(0),
        height: lines.len(),
        cells,
    })
}

/// Bounds-checked passability query; out-of-range positions are never passable.
pub fn is_passable(map: &GameMap, position: Position) -> bool {
    map.cell_at(position)
        .map(MapCell::is_passable)
        .unwrap_or(false)
}

impl GameMap {
    /// Parses a whole map file body. Both `\n` and `\r\n` endings are accepted and a
    /// single trailing newline does not produce an extra row.
    pub fn from_text(text: &str) -> Result<GameMap, MapError> {
        let lines: Vec<&str> = text.lines().collect();
        parse_map(&lines)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Checks whether a position lies on the grid.
    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.width
            && (position.y as usize) < self.height
    }

    /// Gets the cell at a position, or None when out of bounds.
    pub fn cell_at(&self, position: Position) -> Option<MapCell> {
        if !self.in_bounds(position) {
            return None;
        }
        self.cells
            .get(position.y as usize * self.width + position.x as usize)
            .copied()
    }

    pub fn is_passable(&self, position: Position) -> bool {
        is_passable(self, position)
    }

    /// All designated spawn cells, in row-major order.
    pub fn spawn_points(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.cell_at(pos) == Some(MapCell::SpawnPoint))
            .collect()
    }

    /// All passable cells, in row-major order.
    pub fn passable_positions(&self) -> Vec<Position> {
        self.positions().filter(|&pos| self.is_passable(pos)).collect()
    }

    /// Every position on the grid, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_map() {
        let map = parse_map(&["..#", "...", "#.."]).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 3);
        assert_eq!(map.cell_at(Position::new(0, 0)), Some(MapCell::Floor));
        assert_eq!(map.cell_at(Position::new(0, 2)), Some(MapCell::Wall));
        assert_eq!(map.cell_at(Position::new(3, 0)), None);
    }

    #[test]
    fn test_parse_strips_carriage_returns() {
        let map = parse_map(&[".#\r", "..\r"]).unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.cell_at(Position::new(1, 0)), Some(MapCell::Wall));
    }

    #[test]
    fn test_from_text_ignores_trailing_newline() {
        let map = GameMap::from_text("S.\r\n.~\r\n").unwrap();
        assert_eq!(map.height(), 2);
        assert_eq!(map.spawn_points(), vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse_map(&["...", ".."]).unwrap_err();
        assert_eq!(
            err,
            MapError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_unknown_glyph_rejected() {
        let err = parse_map(&["..", ".X"]).unwrap_err();
        assert_eq!(
            err,
            MapError::UnknownGlyph {
                row: 1,
                column: 1,
                glyph: 'X'
            }
        );
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let no_rows: [&str; 0] = [];
        assert_eq!(parse_map(&no_rows).unwrap_err(), MapError::Empty);
        assert_eq!(parse_map(&["", ".."]).unwrap_err(), MapError::EmptyRow { row: 0 });
        assert_eq!(GameMap::from_text("").unwrap_err(), MapError::Empty);
    }

    #[test]
    fn test_is_passable_bounds_checked() {
        let map = parse_map(&[".#", "+~"]).unwrap();
        assert!(is_passable(&map, Position::new(0, 0)));
        assert!(!is_passable(&map, Position::new(1, 0)));
        assert!(is_passable(&map, Position::new(0, 1)));
        assert!(!is_passable(&map, Position::new(1, 1)));
        assert!(!is_passable(&map, Position::new(-1, 0)));
        assert!(!is_passable(&map, Position::new(0, 2)));
        assert!(!is_passable(&map, Position::new(i32::MAX, i32::MIN)));
    }

    #[test]
    fn test_passable_positions_row_major() {
        let map = parse_map(&[".#", "S."]).unwrap();
        assert_eq!(
            map.passable_positions(),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_glyph_legend_round_trip() {
        for glyph in ['.', '#', '~', '+', 'S'] {
            let cell = MapCell::from_glyph(glyph).unwrap();
            assert_eq!(cell.glyph(), glyph);
        }
        assert_eq!(MapCell::from_glyph(' '), Some(MapCell::Floor));
    }
}
