//! # Generation Module
//!
//! Monster population: spawn placement, name generation and the tunable
//! parameters that drive them.
//!
//! Every random decision made here draws from a caller-supplied generator, so a
//! seeded session always produces the same monsters in the same places.

pub mod encounters;
pub mod names;

pub use encounters::*;
pub use names::*;

use crate::{config, TicktaleError, TicktaleResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when a hostile monster reaches the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatPolicy {
    /// Contact kills the player and ends the session
    #[default]
    Lethal,
    /// Contact only produces a threatening message
    Harmless,
}

/// Engine parameters for the frame advancer and the session shell.
///
/// Every field has a default, so a JSON config file only needs the keys it wants
/// to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds between background frames
    pub tick_interval_ms: u64,
    /// Probability of a spawn attempt succeeding on a frame (0.0 to 1.0)
    pub spawn_chance: f64,
    /// Maximum number of monsters alive at once
    pub max_monsters: usize,
    /// Probability that a monster moves on a given frame (0.0 to 1.0)
    pub move_chance: f64,
    /// Frames a monster lives before wandering off, None for forever
    pub monster_lifespan: Option<u32>,
    /// How monster names are picked from the pools
    pub naming_policy: NamingPolicy,
    /// Outcome of a monster reaching the player
    pub combat_policy: CombatPolicy,
    /// How far `look` reports monsters, in Manhattan distance
    pub sight_radius: u32,
}

impl GameConfig {
    /// Creates the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::GameConfig;
    ///
    /// let config = GameConfig::new();
    /// assert!(config.validate().is_ok());
    /// assert!(config.spawn_chance > 0.0 && config.spawn_chance <= 1.0);
    /// ```
    pub fn new() -> Self {
        Self {
            tick_interval_ms: config::DEFAULT_TICK_INTERVAL_MS,
            spawn_chance: 0.25,
            max_monsters: config::DEFAULT_MAX_MONSTERS,
            move_chance: 0.5,
            monster_lifespan: Some(config::DEFAULT_MONSTER_LIFESPAN),
            naming_policy: NamingPolicy::Random,
            combat_policy: CombatPolicy::Lethal,
            sight_radius: config::DEFAULT_SIGHT_RADIUS,
        }
    }

    /// Creates a configuration for tests: every frame spawns and every monster
    /// moves, and nobody ever dies.
    pub fn for_testing() -> Self {
        Self {
            tick_interval_ms: 10,
            spawn_chance: 1.0,
            max_monsters: 4,
            move_chance: 1.0,
            monster_lifespan: None,
            naming_policy: NamingPolicy::RoundRobin,
            combat_policy: CombatPolicy::Harmless,
            sight_radius: config::DEFAULT_SIGHT_RADIUS,
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// ```
    /// use ticktale::{CombatPolicy, GameConfig};
    ///
    /// let config = GameConfig::from_json_str(r#"{ "combat_policy": "harmless" }"#).unwrap();
    /// assert_eq!(config.combat_policy, CombatPolicy::Harmless);
    /// assert_eq!(config.max_monsters, GameConfig::default().max_monsters);
    /// ```
    pub fn from_json_str(json: &str) -> TicktaleResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> TicktaleResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that probabilities are in range and the ticker can run.
    pub fn validate(&self) -> TicktaleResult<()> {
        for (name, value) in [
            ("spawn_chance", self.spawn_chance),
            ("move_chance", self.move_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TicktaleError::InvalidConfig(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if self.tick_interval_ms == 0 {
            return Err(TicktaleError::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
