//! Scene node kinds of the game
//!
//! Every kind implements `SceneNode<Action>`; the world and the command
//! queue are the only ways they interact.

mod emitter;
mod factory;
mod layer;
mod particle;
mod particle_node;
mod pickup;
mod projectile;
mod ship;
mod text;

pub use emitter::EmitterNode;
pub use factory::EntityFactory;
pub use layer::LayerNode;
pub use particle::{Particle, ParticleKind};
pub use particle_node::ParticleNode;
pub use pickup::{Pickup, PickupKind};
pub use projectile::{Projectile, ProjectileKind};
pub use ship::{Ship, ShipData, ShipKind};
pub use text::TextNode;
