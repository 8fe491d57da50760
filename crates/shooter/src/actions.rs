//! Command actions understood by the game's node kinds
//!
//! Actions are plain data; each node kind decides in its `on_command` hook
//! what an action means for it and ignores the rest.

use crate::entities::{ParticleKind, ProjectileKind};
use scene_engine::command::{Command, CommandQueue};
use scene_engine::foundation::math::Vec2;

/// Everything a command can ask a node to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add to the ship's velocity for this frame (pixels per second)
    Accelerate(Vec2),

    /// Request a shot; honoured once the fire cooldown allows it
    Fire,

    /// Steer towards a world position
    GuideTowards(Vec2),

    /// Create a projectile at a world position (handled by the object layer)
    SpawnProjectile {
        /// Which projectile
        kind: ProjectileKind,
        /// World position
        position: Vec2,
        /// Velocity in pixels per second
        velocity: Vec2,
    },

    /// Emit particles at a world position (handled by particle systems)
    EmitParticles {
        /// Which particle system should emit
        kind: ParticleKind,
        /// World position
        position: Vec2,
        /// Number of particles
        count: u32,
    },
}

/// Command carrying a game [`Action`]
pub type GameCommand = Command<Action>;

/// Queue of game commands
pub type GameCommandQueue = CommandQueue<Action>;
