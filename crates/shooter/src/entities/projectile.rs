//! Projectiles

use crate::actions::Action;
use scene_engine::assets::Texture;
use scene_engine::foundation::math::{Mat3, Rect, Vec2};
use scene_engine::render::{DrawCommand, RenderTarget, Visual};
use scene_engine::scene::{Category, SceneNode, UpdateContext};
use serde::{Deserialize, Serialize};

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Fired by the player, hurts enemies
    AlliedBullet,
    /// Fired by enemies, hurts the player
    EnemyBullet,
}

impl ProjectileKind {
    /// Damage dealt on hit
    pub fn damage(self) -> i32 {
        match self {
            Self::AlliedBullet => 1,
            Self::EnemyBullet => 1,
        }
    }

    /// Speed in pixels per second
    pub fn speed(self) -> f32 {
        match self {
            Self::AlliedBullet => 450.0,
            Self::EnemyBullet => 220.0,
        }
    }

    /// Sprite and collision size
    pub fn size(self) -> Vec2 {
        match self {
            Self::AlliedBullet => Vec2::new(6.0, 16.0),
            Self::EnemyBullet => Vec2::new(8.0, 8.0),
        }
    }

    /// Node category
    pub fn category(self) -> Category {
        match self {
            Self::AlliedBullet => Category::ALLIED_PROJECTILE,
            Self::EnemyBullet => Category::ENEMY_PROJECTILE,
        }
    }
}

/// Projectile node, moving in a straight line until it hits or leaves play
#[derive(Debug, Clone)]
pub struct Projectile {
    kind: ProjectileKind,
    texture: Texture,
    velocity: Vec2,
    destroyed: bool,
}

impl Projectile {
    /// Create a projectile
    pub fn new(kind: ProjectileKind, texture: Texture, velocity: Vec2) -> Self {
        Self { kind, texture, velocity, destroyed: false }
    }

    /// Projectile type
    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    /// Damage dealt on hit
    pub fn damage(&self) -> i32 {
        self.kind.damage()
    }

    /// Velocity in pixels per second
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Remove on the next cleanup
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

impl SceneNode<Action> for Projectile {
    fn category(&self) -> Category {
        self.kind.category()
    }

    fn update_current(&mut self, ctx: &mut UpdateContext<'_, Action>) {
        ctx.transform.translate(self.velocity * ctx.dt);
    }

    fn draw_current(&self, transform: &Mat3, target: &mut dyn RenderTarget) {
        target.submit(DrawCommand::new(
            *transform,
            Visual::Sprite {
                texture: self.texture.clone(),
                rect: Rect::from_center_size(Vec2::zeros(), self.kind.size()),
            },
        ));
    }

    fn local_bounds(&self) -> Option<Rect> {
        Some(Rect::from_center_size(Vec2::zeros(), self.kind.size()))
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::command::CommandQueue;
    use scene_engine::scene::{OwnedNode, SceneGraph};

    #[test]
    fn test_moves_in_straight_line() {
        let texture = Texture::new("textures/entities.png", Vec2::new(256.0, 256.0));
        let mut graph = SceneGraph::new();
        let id = graph
            .attach_child(
                graph.root(),
                OwnedNode::new(Projectile::new(ProjectileKind::AlliedBullet, texture, Vec2::new(0.0, -100.0)))
                    .with_position(Vec2::new(10.0, 500.0)),
            )
            .unwrap();

        let mut queue = CommandQueue::new();
        for _ in 0..4 {
            graph.update(0.25, &mut queue);
        }

        assert_relative_eq!(graph.absolute_position(id).unwrap(), Vec2::new(10.0, 400.0));
        assert_eq!(graph.category(id), Some(Category::ALLIED_PROJECTILE));
    }
}
