//! # Utilities Module
//!
//! Random-source helpers and grid pathfinding used by the frame advancer.

pub mod pathfinding;
pub mod rng;

pub use pathfinding::*;
pub use rng::*;
