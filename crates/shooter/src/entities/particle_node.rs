//! Particle system node
//!
//! One node per [`ParticleKind`] lives in the object layer at the origin.
//! Anything that wants particles enqueues an `EmitParticles` command for the
//! particle-system category; the node whose kind matches creates them.

use crate::actions::Action;
use crate::entities::{Particle, ParticleKind};
use scene_engine::assets::Texture;
use scene_engine::foundation::math::{Mat3, Vec2};
use scene_engine::render::{DrawCommand, ParticleSprite, RenderTarget, Visual};
use scene_engine::scene::{Category, CommandContext, SceneNode, UpdateContext};
use std::f32::consts::TAU;

const BURST_RADIUS: f32 = 18.0;

/// Particle system of one kind
#[derive(Debug, Clone)]
pub struct ParticleNode {
    kind: ParticleKind,
    texture: Texture,
    lifetime: f32,
    particles: Vec<Particle>,
}

impl ParticleNode {
    /// Create an empty system whose particles live for `lifetime` seconds
    pub fn new(kind: ParticleKind, texture: Texture, lifetime: f32) -> Self {
        debug_assert!(lifetime > 0.0, "particle systems need a positive lifetime");
        Self {
            kind,
            texture,
            lifetime,
            particles: Vec::new(),
        }
    }

    /// Kind of particles this system owns
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Live particles, oldest first
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Add particles at a position in this node's space
    pub fn emit(&mut self, position: Vec2, count: u32) {
        let color = self.kind.color();
        match self.kind {
            ParticleKind::Trail => {
                for _ in 0..count {
                    self.particles.push(Particle::new(position, color, self.lifetime));
                }
            }
            ParticleKind::Explosion => {
                // Rings of increasing radius around the blast center
                for index in 0..count {
                    let angle = index as f32 / count as f32 * TAU;
                    let radius = BURST_RADIUS * ((index % 3) + 1) as f32 / 3.0;
                    let offset = Vec2::new(angle.cos(), angle.sin()) * radius;
                    self.particles.push(Particle::new(position + offset, color, self.lifetime));
                }
            }
        }
    }
}

impl SceneNode<Action> for ParticleNode {
    fn category(&self) -> Category {
        Category::PARTICLE_SYSTEM
    }

    fn update_current(&mut self, ctx: &mut UpdateContext<'_, Action>) {
        for particle in &mut self.particles {
            particle.update(ctx.dt);
        }
        self.particles.retain(|particle| !particle.is_expired());
    }

    fn draw_current(&self, transform: &Mat3, target: &mut dyn RenderTarget) {
        if self.particles.is_empty() {
            return;
        }

        let particles = self
            .particles
            .iter()
            .map(|particle| ParticleSprite {
                position: particle.position(),
                color: particle.color().faded(particle.lifetime() / self.lifetime),
            })
            .collect();
        target.submit(DrawCommand::new(
            *transform,
            Visual::Particles {
                texture: self.texture.clone(),
                particles,
            },
        ));
    }

    fn on_command(&mut self, action: &Action, ctx: &mut CommandContext<'_, Action>) {
        if let Action::EmitParticles { kind, position, count } = action {
            if *kind == self.kind {
                let local = ctx.to_local(*position);
                self.emit(local, *count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_engine::command::{Command, CommandQueue};
    use scene_engine::render::RecordingTarget;
    use scene_engine::scene::{OwnedNode, SceneGraph};

    fn texture() -> Texture {
        Texture::new("textures/particle.png", Vec2::new(8.0, 8.0))
    }

    fn emit(kind: ParticleKind, count: u32) -> Command<Action> {
        Command::new(
            Category::PARTICLE_SYSTEM,
            Action::EmitParticles { kind, position: Vec2::new(50.0, 50.0), count },
        )
    }

    #[test]
    fn test_only_matching_kind_emits() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let trail = graph.attach_child(root, OwnedNode::new(ParticleNode::new(ParticleKind::Trail, texture(), 0.5))).unwrap();
        let explosion = graph
            .attach_child(root, OwnedNode::new(ParticleNode::new(ParticleKind::Explosion, texture(), 1.0)))
            .unwrap();

        graph.apply_command(&emit(ParticleKind::Explosion, 12), 0.0);

        assert!(graph.get::<ParticleNode>(trail).unwrap().particles().is_empty());
        assert_eq!(graph.get::<ParticleNode>(explosion).unwrap().particles().len(), 12);
    }

    #[test]
    fn test_expired_particles_are_dropped() {
        let mut graph = SceneGraph::new();
        let id = graph
            .attach_child(graph.root(), OwnedNode::new(ParticleNode::new(ParticleKind::Trail, texture(), 0.5)))
            .unwrap();
        let mut queue = CommandQueue::new();

        graph.apply_command(&emit(ParticleKind::Trail, 3), 0.0);
        graph.update(0.3, &mut queue);
        graph.apply_command(&emit(ParticleKind::Trail, 1), 0.0);
        graph.update(0.3, &mut queue);

        let node = graph.get::<ParticleNode>(id).unwrap();
        assert_eq!(node.particles().len(), 1);
        assert_eq!(node.particles()[0].position(), Vec2::new(50.0, 50.0));

        let mut target = RecordingTarget::new();
        graph.draw(&mut target);
        assert_eq!(target.len(), 1);

        graph.update(0.3, &mut queue);
        let mut target = RecordingTarget::new();
        graph.draw(&mut target);
        assert!(target.is_empty());
    }
}
