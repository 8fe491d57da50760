//! Ships
//!
//! The player and the enemies share one node kind. Behaviour differences come
//! from the [`ShipKind`] data table: enemies steer along guidance commands and
//! fire on their own cooldown, the player moves and fires on input commands.

use crate::actions::Action;
use crate::entities::ProjectileKind;
use scene_engine::assets::Texture;
use scene_engine::command::Command;
use scene_engine::foundation::math::{Mat3, Rect, Vec2};
use scene_engine::render::{DrawCommand, RenderTarget, Visual};
use scene_engine::scene::{Category, CommandContext, SceneNode, UpdateContext};
use serde::{Deserialize, Serialize};

const MAX_SPREAD: u32 = 3;
const MAX_FIRE_RATE: u32 = 3;
const SPREAD_OFFSET: f32 = 10.0;   // Horizontal gap between parallel shots
const SPREAD_ANGLE: f32 = 0.2;     // Radians between angled shots

/// Ship types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    /// The player's ship
    Eagle,
    /// Fast enemy that rams the player
    Raptor,
    /// Slow enemy that shoots
    Avenger,
}

/// Static per-kind data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipData {
    /// Damage an enemy takes before being destroyed
    pub hitpoints: i32,
    /// Movement speed in pixels per second
    pub speed: f32,
    /// Sprite and collision size
    pub size: Vec2,
    /// Seconds between shots, `None` for ships that never shoot
    pub fire_interval: Option<f32>,
    /// Score for destroying it
    pub points: u32,
}

impl ShipKind {
    /// Per-kind data
    pub fn data(self) -> ShipData {
        match self {
            Self::Eagle => ShipData {
                hitpoints: 1,
                speed: 220.0,
                size: Vec2::new(48.0, 64.0),
                fire_interval: Some(0.4),
                points: 0,
            },
            Self::Raptor => ShipData {
                hitpoints: 2,
                speed: 90.0,
                size: Vec2::new(48.0, 48.0),
                fire_interval: None,
                points: 100,
            },
            Self::Avenger => ShipData {
                hitpoints: 4,
                speed: 50.0,
                size: Vec2::new(56.0, 56.0),
                fire_interval: Some(2.5),
                points: 250,
            },
        }
    }

    /// Whether this kind is the player's ship
    pub fn is_player(self) -> bool {
        self == Self::Eagle
    }
}

/// Ship node
#[derive(Debug, Clone)]
pub struct Ship {
    kind: ShipKind,
    texture: Texture,
    hitpoints: i32,
    lives: u32,
    velocity: Vec2,
    heading: Vec2,
    spawning: bool,
    invulnerability_time: f32,
    invulnerable_for: f32,
    fire_cooldown: f32,
    fire_requested: bool,
    spread: u32,
    fire_rate: u32,
}

impl Ship {
    /// Create a ship of `kind` drawn from `texture`
    pub fn new(kind: ShipKind, texture: Texture) -> Self {
        let data = kind.data();
        Self {
            kind,
            texture,
            hitpoints: data.hitpoints,
            lives: 1,
            velocity: Vec2::zeros(),
            heading: Vec2::new(0.0, 1.0),
            spawning: false,
            invulnerability_time: 0.0,
            invulnerable_for: 0.0,
            fire_cooldown: data.fire_interval.unwrap_or(0.0),
            fire_requested: false,
            spread: 1,
            fire_rate: 1,
        }
    }

    /// Give the ship lives and a post-hit invulnerability window
    #[must_use]
    pub fn with_lives(mut self, lives: u32, invulnerability_time: f32) -> Self {
        self.lives = lives;
        self.invulnerability_time = invulnerability_time;
        self
    }

    /// Start in the spawning state (outside the play area, not culled)
    #[must_use]
    pub fn spawning(mut self) -> Self {
        self.spawning = true;
        self
    }

    /// Ship type
    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Whether this is the player's ship
    pub fn is_player(&self) -> bool {
        self.kind.is_player()
    }

    /// Remaining hitpoints
    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    /// Remaining lives
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Current velocity in pixels per second
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Direction the ship is steering in
    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    /// Score for destroying this ship
    pub fn points(&self) -> u32 {
        self.kind.data().points
    }

    /// Whether the ship is still entering the play area
    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Leave the spawning state
    pub fn finish_spawning(&mut self) {
        self.spawning = false;
    }

    /// Whether hits are currently ignored
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }

    /// Number of parallel shots per volley
    pub fn spread(&self) -> u32 {
        self.spread
    }

    /// Fire rate upgrade level
    pub fn fire_rate(&self) -> u32 {
        self.fire_rate
    }

    /// Apply damage; returns whether the ship is now destroyed
    pub fn damage(&mut self, amount: i32) -> bool {
        self.hitpoints -= amount;
        self.is_destroyed()
    }

    /// Destroy the ship outright
    pub fn destroy(&mut self) {
        self.hitpoints = 0;
        self.lives = 0;
    }

    /// Take a hit that costs a life; returns whether a life was lost
    pub fn lose_life(&mut self) -> bool {
        if self.is_invulnerable() || self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.invulnerable_for = self.invulnerability_time;
        true
    }

    /// Collect an extra life
    pub fn add_life(&mut self) {
        self.lives += 1;
    }

    /// Add one shot to each volley, up to the maximum
    pub fn upgrade_spread(&mut self) {
        self.spread = (self.spread + 1).min(MAX_SPREAD);
    }

    /// Shorten the fire interval, up to the maximum upgrade
    pub fn upgrade_fire_rate(&mut self) {
        self.fire_rate = (self.fire_rate + 1).min(MAX_FIRE_RATE);
    }

    fn fire_interval(&self) -> Option<f32> {
        self.kind.data().fire_interval.map(|interval| interval / self.fire_rate as f32)
    }

    fn wants_to_fire(&self) -> bool {
        if self.is_player() {
            self.fire_requested
        } else {
            !self.spawning
        }
    }

    fn fire(&self, ctx: &mut UpdateContext<'_, Action>) {
        let (kind, direction) = if self.is_player() {
            (ProjectileKind::AlliedBullet, Vec2::new(0.0, -1.0))
        } else {
            (ProjectileKind::EnemyBullet, self.heading)
        };
        let speed = kind.speed();
        let muzzle = ctx.world_position() + direction * (self.kind.data().size.y * 0.5);

        for shot in 0..self.spread {
            // Centered index: -1, 0, 1 for three shots; -0.5, 0.5 for two
            let offset = shot as f32 - (self.spread - 1) as f32 * 0.5;
            let (position, velocity) = if self.spread == 2 {
                let side = Vec2::new(-direction.y, direction.x);
                (muzzle + side * offset * SPREAD_OFFSET, direction * speed)
            } else {
                let (sin, cos) = (offset * SPREAD_ANGLE).sin_cos();
                let rotated = Vec2::new(cos * direction.x - sin * direction.y, sin * direction.x + cos * direction.y);
                (muzzle, rotated * speed)
            };
            ctx.push(Command::new(
                Category::OBJECT_LAYER,
                Action::SpawnProjectile { kind, position, velocity },
            ));
        }
    }
}

impl SceneNode<Action> for Ship {
    fn category(&self) -> Category {
        if self.is_player() {
            Category::PLAYER_SHIP
        } else {
            Category::ENEMY_SHIP
        }
    }

    fn update_current(&mut self, ctx: &mut UpdateContext<'_, Action>) {
        if self.is_destroyed() {
            return;
        }

        self.invulnerable_for = (self.invulnerable_for - ctx.dt).max(0.0);
        ctx.transform.translate(self.velocity * ctx.dt);

        if let Some(interval) = self.fire_interval() {
            self.fire_cooldown = (self.fire_cooldown - ctx.dt).max(0.0);
            if self.fire_cooldown <= 0.0 && self.wants_to_fire() {
                self.fire(ctx);
                self.fire_cooldown = interval;
            }
        }
        self.fire_requested = false;
    }

    fn draw_current(&self, transform: &Mat3, target: &mut dyn RenderTarget) {
        if self.is_destroyed() {
            return;
        }
        target.submit(DrawCommand::new(
            *transform,
            Visual::Sprite {
                texture: self.texture.clone(),
                rect: Rect::from_center_size(Vec2::zeros(), self.kind.data().size),
            },
        ));
    }

    fn on_command(&mut self, action: &Action, ctx: &mut CommandContext<'_, Action>) {
        match action {
            Action::Accelerate(delta) => self.velocity += delta,
            Action::Fire => self.fire_requested = true,
            Action::GuideTowards(target) => {
                let to_target = target - ctx.world_position();
                if to_target.norm() > f32::EPSILON {
                    self.heading = to_target.normalize();
                    self.velocity = self.heading * self.kind.data().speed;
                }
            }
            Action::SpawnProjectile { .. } | Action::EmitParticles { .. } => {}
        }
    }

    fn local_bounds(&self) -> Option<Rect> {
        Some(Rect::from_center_size(Vec2::zeros(), self.kind.data().size))
    }

    fn is_destroyed(&self) -> bool {
        if self.is_player() {
            self.lives == 0
        } else {
            self.hitpoints <= 0
        }
    }

    fn is_marked_for_removal(&self) -> bool {
        // The player's node outlives its destruction so the world can keep
        // reporting on it
        !self.is_player() && self.is_destroyed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::command::CommandQueue;
    use scene_engine::scene::{OwnedNode, SceneGraph};

    fn texture() -> Texture {
        Texture::new("textures/entities.png", Vec2::new(256.0, 256.0))
    }

    fn spawned_projectiles(queue: &mut CommandQueue<Action>) -> Vec<(ProjectileKind, Vec2)> {
        let mut shots = Vec::new();
        while let Ok(command) = queue.pop() {
            if let Action::SpawnProjectile { kind, velocity, .. } = command.action {
                assert_eq!(command.category, Category::OBJECT_LAYER);
                shots.push((kind, velocity));
            }
        }
        shots
    }

    #[test]
    fn test_player_moves_by_accumulated_velocity() {
        let mut graph = SceneGraph::new();
        let id = graph
            .attach_child(graph.root(), OwnedNode::new(Ship::new(ShipKind::Eagle, texture())).with_position(Vec2::new(100.0, 100.0)))
            .unwrap();

        graph.apply_command(&Command::new(Category::PLAYER_SHIP, Action::Accelerate(Vec2::new(60.0, 0.0))), 0.5);
        graph.apply_command(&Command::new(Category::PLAYER_SHIP, Action::Accelerate(Vec2::new(0.0, -20.0))), 0.5);
        graph.update(0.5, &mut CommandQueue::new());

        assert_relative_eq!(graph.absolute_position(id).unwrap(), Vec2::new(130.0, 90.0));
    }

    #[test]
    fn test_player_fires_only_on_request() {
        let mut graph = SceneGraph::new();
        graph.attach_child(graph.root(), OwnedNode::new(Ship::new(ShipKind::Eagle, texture()))).unwrap();
        let mut queue = CommandQueue::new();

        // Wait out the initial cooldown without firing
        for _ in 0..60 {
            graph.update(1.0 / 60.0, &mut queue);
        }
        assert!(queue.is_empty());

        graph.apply_command(&Command::new(Category::PLAYER_SHIP, Action::Fire), 1.0 / 60.0);
        graph.update(1.0 / 60.0, &mut queue);

        let shots = spawned_projectiles(&mut queue);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].0, ProjectileKind::AlliedBullet);
        assert!(shots[0].1.y < 0.0);
    }

    #[test]
    fn test_spread_upgrade_adds_shots() {
        let mut ship = Ship::new(ShipKind::Eagle, texture());
        ship.upgrade_spread();
        ship.upgrade_spread();
        ship.upgrade_spread();
        assert_eq!(ship.spread(), MAX_SPREAD);

        let mut graph = SceneGraph::new();
        graph.attach_child(graph.root(), OwnedNode::new(ship)).unwrap();
        let mut queue = CommandQueue::new();
        graph.update(1.0, &mut queue);
        graph.apply_command(&Command::new(Category::PLAYER_SHIP, Action::Fire), 0.0);
        graph.update(0.0, &mut queue);

        assert_eq!(spawned_projectiles(&mut queue).len(), 3);
    }

    #[test]
    fn test_guidance_steers_enemy() {
        let mut graph = SceneGraph::new();
        let id = graph
            .attach_child(graph.root(), OwnedNode::new(Ship::new(ShipKind::Raptor, texture())).with_position(Vec2::new(0.0, 0.0)))
            .unwrap();

        graph.apply_command(&Command::new(Category::ENEMY_SHIP, Action::GuideTowards(Vec2::new(0.0, 100.0))), 0.0);
        graph.update(1.0, &mut CommandQueue::new());

        let speed = ShipKind::Raptor.data().speed;
        assert_relative_eq!(graph.absolute_position(id).unwrap(), Vec2::new(0.0, speed));
    }

    #[test]
    fn test_spawning_enemy_holds_fire() {
        let mut graph = SceneGraph::new();
        let id = graph
            .attach_child(graph.root(), OwnedNode::new(Ship::new(ShipKind::Avenger, texture()).spawning()))
            .unwrap();
        let mut queue = CommandQueue::new();

        graph.update(10.0, &mut queue);
        assert!(queue.is_empty());

        graph.get_mut::<Ship>(id).unwrap().finish_spawning();
        graph.update(0.1, &mut queue);
        let shots = spawned_projectiles(&mut queue);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].0, ProjectileKind::EnemyBullet);
    }

    #[test]
    fn test_lives_and_invulnerability() {
        let mut ship = Ship::new(ShipKind::Eagle, texture()).with_lives(2, 1.0);

        assert!(ship.lose_life());
        assert!(ship.is_invulnerable());
        assert!(!ship.lose_life());
        assert_eq!(ship.lives(), 1);

        let mut graph = SceneGraph::new();
        let id = graph.attach_child(graph.root(), OwnedNode::new(ship)).unwrap();
        graph.update(1.5, &mut CommandQueue::new());

        let ship = graph.get_mut::<Ship>(id).unwrap();
        assert!(!ship.is_invulnerable());
        assert!(ship.lose_life());
        assert!(ship.is_destroyed());
        assert!(!ship.is_marked_for_removal());
    }

    #[test]
    fn test_enemy_destroyed_by_damage() {
        let mut ship = Ship::new(ShipKind::Raptor, texture());
        assert!(!ship.damage(1));
        assert!(ship.damage(1));
        assert!(ship.is_marked_for_removal());
        assert_eq!(ship.category(), Category::ENEMY_SHIP);
    }
}
