//! # Ticktale
//!
//! A single-player text adventure on a character grid, played one typed line at a
//! time while a background ticker keeps the monsters moving.
//!
//! ## Architecture Overview
//!
//! The engine is a set of pure functions over an immutable world snapshot:
//!
//! - **Map Model**: the terrain grid parsed from text and its passability rules
//! - **Entity Model**: the player and the named monsters sharing the map
//! - **World State**: the snapshot both actors read and replace
//! - **Command Interpreter**: raw line in, display text and next snapshot out
//! - **Frame Advancer**: one background tick of monster spawning and movement
//!
//! The [`shell`] module is the only place that performs I/O. It owns the shared
//! snapshot cell and runs the input loop and the ticker against it.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod shell;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use shell::*;
pub use utils::*;

/// Core error type for the Ticktale engine.
#[derive(thiserror::Error, Debug)]
pub enum TicktaleError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Map text could not be parsed
    #[error("Malformed map: {0}")]
    MalformedMap(#[from] MapError),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Ticktale codebase.
pub type TicktaleResult<T> = Result<T, TicktaleError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default milliseconds between background frames
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

    /// Default cap on living monsters
    pub const DEFAULT_MAX_MONSTERS: usize = 5;

    /// Default frames a monster lives before wandering off
    pub const DEFAULT_MONSTER_LIFESPAN: u32 = 120;

    /// Default Manhattan radius reported by `look`
    pub const DEFAULT_SIGHT_RADIUS: u32 = 6;

    /// Default seed when none is given on the command line
    pub const DEFAULT_SEED: u64 = 12345;
}
