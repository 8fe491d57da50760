//! Particle emitter node
//!
//! Attached as a child of whatever should leave a trail. It never owns
//! particles itself; it asks the matching particle system for them.

use crate::actions::Action;
use crate::entities::ParticleKind;
use scene_engine::command::Command;
use scene_engine::scene::{Category, SceneNode, UpdateContext};

/// Periodic emitter
#[derive(Debug, Clone)]
pub struct EmitterNode {
    kind: ParticleKind,
    interval: f32,
    accumulated: f32,
}

impl EmitterNode {
    /// Emit one particle of `kind` every `interval` seconds
    pub fn new(kind: ParticleKind, interval: f32) -> Self {
        debug_assert!(interval > 0.0, "emitter interval must be positive");
        Self { kind, interval, accumulated: 0.0 }
    }

    /// Kind of particles requested
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }
}

impl SceneNode<Action> for EmitterNode {
    fn update_current(&mut self, ctx: &mut UpdateContext<'_, Action>) {
        self.accumulated += ctx.dt;

        let mut count = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            count += 1;
        }

        if count > 0 {
            let position = ctx.world_position();
            ctx.push(Command::new(
                Category::PARTICLE_SYSTEM,
                Action::EmitParticles { kind: self.kind, position, count },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_engine::command::CommandQueue;
    use scene_engine::foundation::math::Vec2;
    use scene_engine::scene::{EmptyNode, OwnedNode, SceneGraph};

    #[test]
    fn test_emits_at_world_position() {
        let mut graph: SceneGraph<Action> = SceneGraph::new();
        graph
            .attach_child(
                graph.root(),
                OwnedNode::new(EmptyNode::new(Category::SCENE))
                    .with_position(Vec2::new(200.0, 300.0))
                    .with_child(OwnedNode::new(EmitterNode::new(ParticleKind::Trail, 0.1)).with_position(Vec2::new(0.0, 32.0))),
            )
            .unwrap();
        let mut queue = CommandQueue::new();

        graph.update(0.05, &mut queue);
        assert!(queue.is_empty());

        graph.update(0.26, &mut queue);
        let command = queue.pop().unwrap();
        assert_eq!(command.category, Category::PARTICLE_SYSTEM);
        assert_eq!(
            command.action,
            Action::EmitParticles { kind: ParticleKind::Trail, position: Vec2::new(200.0, 332.0), count: 3 }
        );
    }
}
