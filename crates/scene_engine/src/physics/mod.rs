//! Physics module for collision detection
//!
//! Only broad-phase overlap detection on world-space rectangles is
//! provided; collision response is game logic.

pub mod collision_system;

pub use collision_system::{find_overlapping_pairs, CollisionPair};
