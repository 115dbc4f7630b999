//! # World State Module
//!
//! The immutable world snapshot shared by the command interpreter and the frame
//! advancer.
//!
//! A [`WorldState`] is built once per session and afterwards only replaced, never
//! edited: every accepted command and every unpaused frame returns a fresh value.
//! The map and name pools never change during a session and are shared between
//! snapshots behind an `Arc`, so cloning a snapshot only copies the entities.
//!
//! ## Aliasing contract
//!
//! Two actors race to replace the current snapshot: the input loop and the
//! background ticker. Whoever holds the shared cell must run the whole
//! read-compute-publish cycle under one lock, otherwise a tick computed from a
//! stale snapshot can overwrite a command's effect (or the other way round).
//! Once a published snapshot has `running == false`, neither actor may publish
//! another one.

use crate::game::{Direction, Entity, GameMap, Monster, Position};
use crate::generation::NamePools;
use crate::{TicktaleError, TicktaleResult};
use serde::Serialize;
use std::sync::Arc;

/// Complete state of one game session at one point in logical time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldState {
    /// Terrain grid, fixed for the session
    pub map: Arc<GameMap>,
    /// The player character
    pub player: Entity,
    /// Monsters in spawn order
    pub monsters: Vec<Monster>,
    /// False once the session has ended; terminal
    pub running: bool,
    /// While true the frame advancer leaves the world untouched
    pub paused: bool,
    /// Pools monster names are drawn from
    pub name_pools: Arc<NamePools>,
    /// Seed of the per-frame random sources
    pub rng_seed: u64,
    /// Number of frames advanced so far
    pub frame_number: u64,
    /// Session statistics
    pub statistics: GameStatistics,
}

/// Counters describing how the session has gone so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStatistics {
    /// Accepted forward moves
    pub steps_taken: u64,
    /// Accepted turns
    pub turns_made: u64,
    /// Frames advanced while unpaused
    pub frames_elapsed: u64,
    /// Monsters that have appeared
    pub monsters_spawned: u64,
    /// Monsters that wandered off
    pub monsters_despawned: u64,
}

impl WorldState {
    /// Creates the initial snapshot of a session.
    ///
    /// Fails with `InvalidState` if the start position is off the map or not
    /// passable.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::{Direction, GameMap, NamePools, Position, WorldState};
    ///
    /// let map = GameMap::from_text("..#\n...\n#..").unwrap();
    /// let state = WorldState::new(map, Position::new(0, 0), Direction::South, NamePools::default(), 1).unwrap();
    /// assert!(state.running);
    /// assert!(!state.paused);
    /// assert!(state.monsters.is_empty());
    /// ```
    pub fn new(
        map: GameMap,
        start: Position,
        facing: Direction,
        name_pools: NamePools,
        rng_seed: u64,
    ) -> TicktaleResult<Self> {
        if !map.in_bounds(start) {
            return Err(TicktaleError::InvalidState(format!(
                "start position {} is outside the {}x{} map",
                start,
                map.width(),
                map.height()
            )));
        }
        if !map.is_passable(start) {
            return Err(TicktaleError::InvalidState(format!(
                "start position {} is not passable",
                start
            )));
        }

        Ok(Self {
            map: Arc::new(map),
            player: Entity::new(start, facing),
            monsters: Vec::new(),
            running: true,
            paused: false,
            name_pools: Arc::new(name_pools),
            rng_seed,
            frame_number: 0,
            statistics: GameStatistics::default(),
        })
    }

    /// Checks if the session has ended.
    pub fn is_game_ended(&self) -> bool {
        !self.running
    }

    /// Monsters that are still alive, in spawn order.
    pub fn living_monsters(&self) -> impl Iterator<Item = &Monster> + '_ {
        self.monsters.iter().filter(|monster| monster.is_alive())
    }

    /// Gets the living monster standing at a position.
    pub fn monster_at(&self, position: Position) -> Option<&Monster> {
        self.living_monsters()
            .find(|monster| monster.position() == position)
    }

    /// Whether the player or a living monster stands at a position.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.player.position == position || self.monster_at(position).is_some()
    }

    /// Entities that can block the player's path, with their display names.
    pub fn player_obstacles(&self) -> impl Iterator<Item = (Position, &str)> + '_ {
        self.living_monsters()
            .map(|monster| (monster.position(), monster.name.as_str()))
    }

    /// Checks the invariants every published snapshot must satisfy.
    pub fn validate(&self) -> TicktaleResult<()> {
        if self.player.alive && !self.map.is_passable(self.player.position) {
            return Err(TicktaleError::InvalidState(format!(
                "player stands on impassable position {}",
                self.player.position
            )));
        }
        for monster in self.living_monsters() {
            if !self.map.is_passable(monster.position()) {
                return Err(TicktaleError::InvalidState(format!(
                    "{} stands on impassable position {}",
                    monster.name,
                    monster.position()
                )));
            }
        }
        Ok(())
    }
}
