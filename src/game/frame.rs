//! # Frame Advancer
//!
//! One background tick of world time: monsters age, wander off, move, and new
//! ones appear.
//!
//! A frame is a pure function of the snapshot, the configuration and a random
//! source. [`advance_frame`] derives that source from the snapshot's seed and
//! frame number, so the same snapshot always advances to the same successor.
//!
//! Contact rule: only aggressive monsters seek the player. When an aggressive
//! monster's next step is the player's cell it attacks instead of moving, and the
//! configured [`CombatPolicy`] decides the result. Monsters never move onto the
//! player's cell.

use crate::game::{Behavior, Direction, Monster, Position, WorldState};
use crate::generation::{try_spawn, CombatPolicy, GameConfig};
use crate::utils::{frame_rng, next_step_towards, roll, step_away_from};
use crate::{TicktaleError, TicktaleResult};
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Something noteworthy that happened during a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FrameEvent {
    /// A new monster appeared
    MonsterSpawned {
        name: String,
        behavior: Behavior,
        position: Position,
    },
    /// A monster took a step
    MonsterMoved {
        name: String,
        from: Position,
        to: Position,
    },
    /// A monster reached the end of its lifespan and left
    MonsterDespawned { name: String },
    /// An aggressive monster reached the player under the harmless policy
    PlayerThreatened { name: String },
    /// An aggressive monster reached the player under the lethal policy
    PlayerSlain { name: String },
}

/// Result of advancing one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOutcome {
    /// The successor snapshot
    pub state: WorldState,
    /// What happened, in order
    pub events: Vec<FrameEvent>,
}

impl FrameOutcome {
    fn unchanged(state: &WorldState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }
}

/// Advances the world by one frame.
///
/// Paused or ended sessions come back unchanged. An invariant violation in the
/// input snapshot is logged and also yields the unchanged snapshot, so a bad
/// frame is skipped rather than ending the session.
///
/// # Examples
///
/// ```
/// use ticktale::{run_frame, Direction, GameConfig, GameMap, NamePools, Position, WorldState};
///
/// let map = GameMap::from_text("S....").unwrap();
/// let state = WorldState::new(map, Position::new(4, 0), Direction::West, NamePools::default(), 9).unwrap();
/// let paused = ticktale::WorldState { paused: true, ..state.clone() };
///
/// assert_eq!(run_frame(&paused, &GameConfig::for_testing()), paused);
/// let next = run_frame(&state, &GameConfig::for_testing());
/// assert_eq!(next.frame_number, 1);
/// assert_eq!(next.monsters.len(), 1);
/// ```
pub fn run_frame(state: &WorldState, config: &GameConfig) -> WorldState {
    match advance_frame(state, config) {
        Ok(outcome) => outcome.state,
        Err(err) => {
            warn!("Skipping frame {}: {}", state.frame_number, err);
            state.clone()
        }
    }
}

/// Advances one frame using the snapshot's own seeded random source.
pub fn advance_frame(state: &WorldState, config: &GameConfig) -> TicktaleResult<FrameOutcome> {
    let mut rng = frame_rng(state.rng_seed, state.frame_number);
    advance_frame_with_rng(state, config, &mut rng)
}

/// Advances one frame drawing every random decision from `rng`.
///
/// Phases run in a fixed order: despawn, movement and contact, aging, spawn.
pub fn advance_frame_with_rng<R: Rng + ?Sized>(
    state: &WorldState,
    config: &GameConfig,
    rng: &mut R,
) -> TicktaleResult<FrameOutcome> {
    if state.paused || !state.running {
        return Ok(FrameOutcome::unchanged(state));
    }
    state.validate()?;

    let mut next = state.clone();
    let mut events = Vec::new();

    despawn_expired(&mut next, config, &mut events);
    move_monsters(&mut next, config, rng, &mut events)?;

    for monster in &mut next.monsters {
        monster.age = monster.age.saturating_add(1);
    }

    if next.running {
        if let Some(monster) = try_spawn(&next, config, rng) {
            info!("{} appears at {}", monster.name, monster.position());
            events.push(FrameEvent::MonsterSpawned {
                name: monster.name.clone(),
                behavior: monster.behavior,
                position: monster.position(),
            });
            next.monsters.push(monster);
            next.statistics.monsters_spawned += 1;
        }
    }

    next.frame_number += 1;
    next.statistics.frames_elapsed += 1;
    debug!(
        "Frame {} advanced: {} monsters, {} events",
        next.frame_number,
        next.monsters.len(),
        events.len()
    );

    Ok(FrameOutcome {
        state: next,
        events,
    })
}

/// Removes dead monsters and those that outlived the configured lifespan.
fn despawn_expired(state: &mut WorldState, config: &GameConfig, events: &mut Vec<FrameEvent>) {
    let lifespan = config.monster_lifespan;
    let (leaving, staying): (Vec<Monster>, Vec<Monster>) =
        std::mem::take(&mut state.monsters)
            .into_iter()
            .partition(|monster| {
                !monster.is_alive() || lifespan.map_or(false, |limit| monster.age >= limit)
            });

    for monster in leaving.into_iter().filter(Monster::is_alive) {
        debug!("{} wanders off", monster.name);
        events.push(FrameEvent::MonsterDespawned { name: monster.name });
        state.statistics.monsters_despawned += 1;
    }
    state.monsters = staying;
}

fn move_monsters<R: Rng + ?Sized>(
    state: &mut WorldState,
    config: &GameConfig,
    rng: &mut R,
    events: &mut Vec<FrameEvent>,
) -> TicktaleResult<()> {
    for index in 0..state.monsters.len() {
        if !state.running {
            break;
        }
        if !state.monsters[index].is_alive() || !roll(rng, config.move_chance) {
            continue;
        }

        let (from, behavior) = {
            let monster = &state.monsters[index];
            (monster.position(), monster.behavior)
        };
        let player = state.player.position;
        let blocked: HashSet<Position> = state
            .living_monsters()
            .map(Monster::position)
            .filter(|&pos| pos != from)
            .collect();

        let target = match behavior {
            Behavior::Aggressive => next_step_towards(&state.map, from, player, &blocked),
            Behavior::Idle => random_step(state, from, &blocked, rng),
            Behavior::Fleeing => step_away_from(&state.map, from, player, &blocked),
        };
        let Some(target) = target else {
            continue;
        };

        if target == player {
            resolve_contact(state, index, config.combat_policy, events);
            continue;
        }

        let direction = Direction::from_delta(target - from).ok_or_else(|| {
            TicktaleError::InvalidState(format!("monster step {} -> {} is not adjacent", from, target))
        })?;
        let monster = &mut state.monsters[index];
        let turned = monster.entity.turn(direction);
        match turned.step_forward(&state.map, blocked.iter().map(|&pos| (pos, "another monster"))) {
            Ok(moved) => {
                monster.entity = moved;
                events.push(FrameEvent::MonsterMoved {
                    name: monster.name.clone(),
                    from,
                    to: target,
                });
            }
            Err(reason) => debug!("{} stays put: {}", monster.name, reason),
        }
    }
    Ok(())
}

/// A uniformly random free neighbour, never the player's cell.
fn random_step<R: Rng + ?Sized>(
    state: &WorldState,
    from: Position,
    blocked: &HashSet<Position>,
    rng: &mut R,
) -> Option<Position> {
    let options: Vec<Position> = from
        .cardinal_adjacent_positions()
        .into_iter()
        .filter(|&pos| {
            pos != state.player.position && state.map.is_passable(pos) && !blocked.contains(&pos)
        })
        .collect();

    if options.is_empty() {
        None
    } else {
        Some(options[rng.gen_range(0..options.len())])
    }
}

fn resolve_contact(
    state: &mut WorldState,
    index: usize,
    policy: CombatPolicy,
    events: &mut Vec<FrameEvent>,
) {
    let name = state.monsters[index].name.clone();
    match policy {
        CombatPolicy::Lethal => {
            info!("{} killed the player on frame {}", name, state.frame_number);
            state.player.alive = false;
            state.running = false;
            events.push(FrameEvent::PlayerSlain { name });
        }
        CombatPolicy::Harmless => {
            debug!("{} threatens the player", name);
            events.push(FrameEvent::PlayerThreatened { name });
        }
    }
}
