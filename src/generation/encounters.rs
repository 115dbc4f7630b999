//! # Encounter Placement
//!
//! Decides where and whether a new monster appears on a frame.

use crate::game::{spawn_monster, Monster, Position, WorldState};
use crate::generation::GameConfig;
use crate::utils::roll;
use rand::Rng;

/// Closest a monster may appear to the player on maps without spawn points.
pub const MIN_SPAWN_DISTANCE: u32 = 2;

/// Free cells a monster could appear on.
///
/// Designated spawn points (`S`) are used when the map has any. Otherwise every
/// passable cell at least [`MIN_SPAWN_DISTANCE`] away from the player qualifies.
/// Cells holding the player or a monster are never candidates.
pub fn spawn_candidates(state: &WorldState) -> Vec<Position> {
    let designated = state.map.spawn_points();
    let pool = if designated.is_empty() {
        let player = state.player.position;
        state
            .map
            .passable_positions()
            .into_iter()
            .filter(|pos| pos.manhattan_distance(player) >= MIN_SPAWN_DISTANCE)
            .collect()
    } else {
        designated
    };

    pool.into_iter()
        .filter(|&pos| !state.is_occupied(pos))
        .collect()
}

/// Rolls for a new monster on this frame.
///
/// Returns None when the population cap is reached, the spawn roll fails, or no
/// free candidate cell exists.
pub fn try_spawn<R: Rng + ?Sized>(
    state: &WorldState,
    config: &GameConfig,
    rng: &mut R,
) -> Option<Monster> {
    if state.living_monsters().count() >= config.max_monsters {
        return None;
    }
    if !roll(rng, config.spawn_chance) {
        return None;
    }

    let candidates = spawn_candidates(state);
    if candidates.is_empty() {
        return None;
    }
    let position = candidates[rng.gen_range(0..candidates.len())];

    Some(spawn_monster(
        &state.name_pools,
        config.naming_policy,
        position,
        rng,
        state.statistics.monsters_spawned,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameMap};
    use crate::generation::NamePools;
    use rand::{rngs::StdRng, SeedableRng};

    fn state_on(map_text: &str, player: Position) -> WorldState {
        WorldState::new(
            GameMap::from_text(map_text).unwrap(),
            player,
            Direction::South,
            NamePools::from_text("Grim", "Rat"),
            7,
        )
        .unwrap()
    }

    #[test]
    fn test_candidates_prefer_spawn_points() {
        let state = state_on("S..\n...\n..S", Position::new(1, 1));
        assert_eq!(
            spawn_candidates(&state),
            vec![Position::new(0, 0), Position::new(2, 2)]
        );
    }

    #[test]
    fn test_candidates_keep_distance_without_spawn_points() {
        let state = state_on("...\n...\n...", Position::new(0, 0));
        let candidates = spawn_candidates(&state);
        assert!(!candidates.is_empty());
        for pos in candidates {
            assert!(pos.manhattan_distance(Position::new(0, 0)) >= MIN_SPAWN_DISTANCE);
        }
    }

    #[test]
    fn test_occupied_spawn_point_is_skipped() {
        let state = state_on("S.S", Position::new(0, 0));
        assert_eq!(spawn_candidates(&state), vec![Position::new(2, 0)]);
    }

    #[test]
    fn test_population_cap_respected() {
        let state = state_on("S..\n...\n..S", Position::new(1, 1));
        let config = GameConfig {
            max_monsters: 0,
            ..GameConfig::for_testing()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(try_spawn(&state, &config, &mut rng).is_none());
    }

    #[test]
    fn test_certain_spawn_lands_on_candidate() {
        let state = state_on("S..\n...\n..S", Position::new(1, 1));
        let mut rng = StdRng::seed_from_u64(3);
        let monster = try_spawn(&state, &GameConfig::for_testing(), &mut rng).unwrap();
        assert!(spawn_candidates(&state).contains(&monster.position()));
        assert_eq!(monster.name, "Grim Rat");
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let state = state_on("S..\n...\n..S", Position::new(1, 1));
        let config = GameConfig {
            spawn_chance: 0.0,
            ..GameConfig::for_testing()
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert!(try_spawn(&state, &config, &mut rng).is_none());
        }
    }
}
