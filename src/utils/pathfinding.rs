//! # Pathfinding Algorithms
//!
//! Single-step movement decisions for monsters on the cardinal grid.

use crate::game::{GameMap, Position};
use pathfinding::prelude::bfs;
use std::collections::HashSet;

/// First step along a shortest path from `from` to `goal`.
///
/// The path may only cross passable cells not listed in `blocked`; the goal
/// itself is always enterable. Returns None when no path exists or `from` is
/// already the goal. Ties between equally short paths are broken by the
/// clockwise neighbour order starting north, so the result is deterministic.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use ticktale::{next_step_towards, GameMap, Position};
///
/// let map = GameMap::from_text(".#.\n...").unwrap();
/// let step = next_step_towards(&map, Position::new(0, 0), Position::new(2, 0), &HashSet::new());
/// assert_eq!(step, Some(Position::new(0, 1)));
/// ```
pub fn next_step_towards(
    map: &GameMap,
    from: Position,
    goal: Position,
    blocked: &HashSet<Position>,
) -> Option<Position> {
    let path = bfs(
        &from,
        |&pos: &Position| {
            pos.cardinal_adjacent_positions()
                .into_iter()
                .filter(|&next| next == goal || (map.is_passable(next) && !blocked.contains(&next)))
                .collect::<Vec<_>>()
        },
        |&pos| pos == goal,
    )?;

    path.get(1).copied()
}

/// Neighbour that moves furthest away from `threat`.
///
/// Only passable, unblocked cells that strictly increase the Manhattan distance
/// qualify; among those, the one most directly opposite the threat wins. None
/// means staying put is best.
pub fn step_away_from(
    map: &GameMap,
    from: Position,
    threat: Position,
    blocked: &HashSet<Position>,
) -> Option<Position> {
    let current = from.manhattan_distance(threat);
    let mut best: Option<((u32, i32), Position)> = None;

    for next in from.cardinal_adjacent_positions() {
        if next == threat || !map.is_passable(next) || blocked.contains(&next) {
            continue;
        }
        let distance = next.manhattan_distance(threat);
        if distance <= current {
            continue;
        }
        let offset = next - threat;
        let key = (distance, offset.x * offset.x + offset.y * offset.y);
        if best.map_or(true, |(best_key, _)| key > best_key) {
            best = Some((key, next));
        }
    }

    best.map(|(_, pos)| pos)
}
