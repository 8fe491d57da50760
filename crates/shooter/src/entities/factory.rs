//! Entity construction
//!
//! Builds detached node subtrees for every entity kind, with the textures and
//! tuning values they need. Shared (through `Rc`) between the world and the
//! object layer, which spawns projectiles on request.

use crate::actions::Action;
use crate::config::GameConfig;
use crate::entities::{
    EmitterNode, ParticleKind, ParticleNode, Pickup, PickupKind, Projectile, ProjectileKind, Ship, ShipKind,
};
use crate::resources::{TextureHolder, TextureId};
use scene_engine::assets::{AssetError, Texture};
use scene_engine::foundation::math::Vec2;
use scene_engine::scene::OwnedNode;

/// Builds entity subtrees
#[derive(Debug, Clone)]
pub struct EntityFactory {
    entities: Texture,
    particle: Texture,
    invulnerability_time: f32,
    trail_interval: f32,
    trail_lifetime: f32,
    explosion_lifetime: f32,
}

impl EntityFactory {
    /// Create a factory; fails if a texture it draws with was never loaded
    pub fn new(textures: &TextureHolder, config: &GameConfig) -> Result<Self, AssetError> {
        Ok(Self {
            entities: textures.get(TextureId::Entities)?.clone(),
            particle: textures.get(TextureId::Particle)?.clone(),
            invulnerability_time: config.player.invulnerability_time,
            trail_interval: config.player.trail_interval,
            trail_lifetime: config.particles.trail_lifetime,
            explosion_lifetime: config.particles.explosion_lifetime,
        })
    }

    /// The player's ship with its exhaust emitter
    pub fn player(&self, lives: u32) -> OwnedNode<Action> {
        let ship = Ship::new(ShipKind::Eagle, self.entities.clone()).with_lives(lives, self.invulnerability_time);
        let exhaust = Vec2::new(0.0, ShipKind::Eagle.data().size.y * 0.5);

        OwnedNode::new(ship)
            .with_child(OwnedNode::new(EmitterNode::new(ParticleKind::Trail, self.trail_interval)).with_position(exhaust))
    }

    /// An enemy in the spawning state
    pub fn enemy(&self, kind: ShipKind) -> OwnedNode<Action> {
        debug_assert!(!kind.is_player(), "the player is built with EntityFactory::player");
        OwnedNode::new(Ship::new(kind, self.entities.clone()).spawning())
    }

    /// A projectile moving with `velocity`
    pub fn projectile(&self, kind: ProjectileKind, velocity: Vec2) -> OwnedNode<Action> {
        OwnedNode::new(Projectile::new(kind, self.entities.clone(), velocity))
    }

    /// A pickup
    pub fn pickup(&self, kind: PickupKind) -> OwnedNode<Action> {
        OwnedNode::new(Pickup::new(kind, self.entities.clone()))
    }

    /// An empty particle system
    pub fn particle_system(&self, kind: ParticleKind) -> OwnedNode<Action> {
        let lifetime = match kind {
            ParticleKind::Explosion => self.explosion_lifetime,
            ParticleKind::Trail => self.trail_lifetime,
        };
        OwnedNode::new(ParticleNode::new(kind, self.particle.clone(), lifetime))
    }
}
