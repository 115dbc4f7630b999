//! # Entities
//!
//! The player and the monsters that share the map with them.
//!
//! Entities are plain values. Turning or stepping never mutates an entity in place;
//! it returns the replacement value, which the caller folds into the next world
//! snapshot.

use crate::game::{Direction, EntityId, GameMap, MapCell, Position};
use crate::generation::{NamePools, NamingPolicy};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Position, facing and liveness shared by the player and every monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub position: Position,
    pub facing: Direction,
    pub alive: bool,
}

/// Why a step forward was refused.
///
/// This is an expected gameplay outcome, shown to the player as a message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejected {
    /// Destination is off the edge of the map
    #[error("You cannot go any further that way.")]
    OutOfBounds,

    /// Destination cell is impassable terrain
    #[error("You are blocked by {}.", .0.describe())]
    Blocked(MapCell),

    /// Another entity stands on the destination
    #[error("The way is blocked by {by}.")]
    Occupied { by: String },
}

impl Entity {
    /// Creates a living entity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::{Direction, Entity, Position};
    ///
    /// let player = Entity::new(Position::new(0, 0), Direction::South);
    /// assert!(player.alive);
    /// assert_eq!(player.turn(Direction::East).facing, Direction::East);
    /// ```
    pub fn new(position: Position, facing: Direction) -> Self {
        Self {
            position,
            facing,
            alive: true,
        }
    }

    /// Returns this entity facing `direction`; nothing else changes.
    pub fn turn(self, direction: Direction) -> Entity {
        Entity {
            facing: direction,
            ..self
        }
    }

    /// The cell directly ahead of this entity.
    pub fn ahead(&self) -> Position {
        self.position.step(self.facing)
    }

    /// Moves one cell in the facing direction.
    ///
    /// `occupants` lists the other entities that may stand in the way, paired with
    /// the name used in the rejection message.
    pub fn step_forward<'a, I>(&self, map: &GameMap, occupants: I) -> Result<Entity, MoveRejected>
    where
        I: IntoIterator<Item = (Position, &'a str)>,
    {
        let destination = self.ahead();

        let cell = map.cell_at(destination).ok_or(MoveRejected::OutOfBounds)?;
        if !cell.is_passable() {
            return Err(MoveRejected::Blocked(cell));
        }

        if let Some((_, name)) = occupants
            .into_iter()
            .find(|(position, _)| *position == destination)
        {
            return Err(MoveRejected::Occupied {
                by: name.to_string(),
            });
        }

        Ok(Entity {
            position: destination,
            ..*self
        })
    }
}

/// How a monster moves on each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    /// Wanders randomly
    Idle,
    /// Chases the player along the shortest path
    Aggressive,
    /// Keeps away from the player
    Fleeing,
}

impl Behavior {
    /// All behaviors, in the order used when one is drawn at random.
    pub fn all() -> [Behavior; 3] {
        [Behavior::Idle, Behavior::Aggressive, Behavior::Fleeing]
    }

    pub fn adjective(self) -> &'static str {
        match self {
            Behavior::Idle => "wandering",
            Behavior::Aggressive => "hostile",
            Behavior::Fleeing => "skittish",
        }
    }
}

/// A monster roaming the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    /// Identifier drawn from the frame's random source
    pub id: EntityId,
    /// Display name, prefix and base name joined by a space
    pub name: String,
    pub behavior: Behavior,
    /// Number of frames this monster has lived through
    pub age: u32,
    pub entity: Entity,
}

impl Monster {
    pub fn position(&self) -> Position {
        self.entity.position
    }

    pub fn is_alive(&self) -> bool {
        self.entity.alive
    }
}

/// Creates a monster at `position` with a generated display name.
///
/// The name is chosen from `pools` according to `policy`: `Random` draws from
/// `rng`, `RoundRobin` walks every prefix/name pair in order using `spawn_index`.
/// The behavior and id are always drawn from `rng`, and the monster starts facing
/// a random direction.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use ticktale::{spawn_monster, NamePools, NamingPolicy, Position};
///
/// let pools = NamePools::new(vec!["Grim".to_string()], vec!["Goblin".to_string()]);
/// let mut rng = StdRng::seed_from_u64(7);
/// let monster = spawn_monster(&pools, NamingPolicy::Random, Position::new(1, 1), &mut rng, 0);
/// assert_eq!(monster.name, "Grim Goblin");
/// assert_eq!(monster.age, 0);
/// ```
pub fn spawn_monster<R: Rng + ?Sized>(
    pools: &NamePools,
    policy: NamingPolicy,
    position: Position,
    rng: &mut R,
    spawn_index: u64,
) -> Monster {
    let name = pools.pick_name(policy, rng, spawn_index);
    let behaviors = Behavior::all();
    let behavior = behaviors[rng.gen_range(0..behaviors.len())];
    let directions = Direction::cardinal();
    let facing = directions[rng.gen_range(0..directions.len())];
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();

    Monster {
        id,
        name,
        behavior,
        age: 0,
        entity: Entity::new(position, facing),
    }
}
