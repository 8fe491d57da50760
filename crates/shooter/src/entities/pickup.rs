//! Pickups dropped by destroyed enemies

use crate::actions::Action;
use crate::entities::Ship;
use rand::Rng;
use scene_engine::assets::Texture;
use scene_engine::foundation::math::{Mat3, Rect, Vec2};
use scene_engine::render::{DrawCommand, RenderTarget, Visual};
use scene_engine::scene::{Category, SceneNode, UpdateContext};

const PICKUP_SIZE: f32 = 24.0;
const DRIFT_SPEED: f32 = 40.0;     // Pixels per second, downwards

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    /// One more life
    ExtraLife,
    /// One more shot per volley
    FireSpread,
    /// Shorter fire interval
    FireRate,
}

impl PickupKind {
    /// Every pickup type
    pub const ALL: [Self; 3] = [Self::ExtraLife, Self::FireSpread, Self::FireRate];

    /// A uniformly chosen pickup type
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Apply the effect to the collecting ship
    pub fn apply(self, ship: &mut Ship) {
        match self {
            Self::ExtraLife => ship.add_life(),
            Self::FireSpread => ship.upgrade_spread(),
            Self::FireRate => ship.upgrade_fire_rate(),
        }
    }
}

/// Pickup node
#[derive(Debug, Clone)]
pub struct Pickup {
    kind: PickupKind,
    texture: Texture,
    collected: bool,
}

impl Pickup {
    /// Create a pickup
    pub fn new(kind: PickupKind, texture: Texture) -> Self {
        Self { kind, texture, collected: false }
    }

    /// Pickup type
    pub fn kind(&self) -> PickupKind {
        self.kind
    }

    /// Take the pickup; yields its type only the first time
    pub fn collect(&mut self) -> Option<PickupKind> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.kind)
    }
}

impl SceneNode<Action> for Pickup {
    fn category(&self) -> Category {
        Category::PICKUP
    }

    fn update_current(&mut self, ctx: &mut UpdateContext<'_, Action>) {
        ctx.transform.translate(Vec2::new(0.0, DRIFT_SPEED * ctx.dt));
    }

    fn draw_current(&self, transform: &Mat3, target: &mut dyn RenderTarget) {
        target.submit(DrawCommand::new(
            *transform,
            Visual::Sprite {
                texture: self.texture.clone(),
                rect: Rect::from_center_size(Vec2::zeros(), Vec2::new(PICKUP_SIZE, PICKUP_SIZE)),
            },
        ));
    }

    fn local_bounds(&self) -> Option<Rect> {
        Some(Rect::from_center_size(Vec2::zeros(), Vec2::new(PICKUP_SIZE, PICKUP_SIZE)))
    }

    fn is_destroyed(&self) -> bool {
        self.collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ShipKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn texture() -> Texture {
        Texture::new("textures/entities.png", Vec2::new(256.0, 256.0))
    }

    #[test]
    fn test_collect_applies_once() {
        let mut ship = Ship::new(ShipKind::Eagle, texture()).with_lives(3, 1.0);
        let mut pickup = Pickup::new(PickupKind::ExtraLife, texture());

        for _ in 0..2 {
            if let Some(kind) = pickup.collect() {
                kind.apply(&mut ship);
            }
        }

        assert_eq!(ship.lives(), 4);
        assert!(pickup.is_destroyed());
    }

    #[test]
    fn test_upgrades() {
        let mut ship = Ship::new(ShipKind::Eagle, texture());
        PickupKind::FireSpread.apply(&mut ship);
        PickupKind::FireRate.apply(&mut ship);
        assert_eq!(ship.spread(), 2);
        assert_eq!(ship.fire_rate(), 2);
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let first: Vec<_> = (0..16).map(|_| PickupKind::random(&mut a)).collect();
        let second: Vec<_> = (0..16).map(|_| PickupKind::random(&mut b)).collect();
        assert_eq!(first, second);
    }
}
