//! Particles
//!
//! A particle is a colored point with a countdown. Particle systems own
//! their particles and drop them once the countdown reaches zero.

use scene_engine::foundation::math::Vec2;
use scene_engine::render::Color;
use serde::{Deserialize, Serialize};

/// Which particle system a particle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Burst left behind by a destroyed ship
    Explosion,
    /// Exhaust trail behind the player
    Trail,
}

impl ParticleKind {
    /// Every particle kind, one particle system each
    pub const ALL: [Self; 2] = [Self::Explosion, Self::Trail];

    /// Tint of particles of this kind
    pub fn color(self) -> Color {
        match self {
            Self::Explosion => Color::rgb(255, 140, 30),
            Self::Trail => Color::rgb(120, 180, 255),
        }
    }
}

/// A short-lived visual point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    position: Vec2,
    color: Color,
    lifetime: f32,
}

impl Particle {
    /// Create a particle that lives for `lifetime` seconds
    pub fn new(position: Vec2, color: Color, lifetime: f32) -> Self {
        debug_assert!(lifetime >= 0.0, "negative particle lifetime");
        Self { position, color, lifetime }
    }

    /// Count down the remaining lifetime, stopping at zero
    pub fn update(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "negative frame time");
        self.lifetime = (self.lifetime - dt).max(0.0);
    }

    /// Position in the owning system's space
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Tint
    pub fn color(&self) -> Color {
        self.color
    }

    /// Remaining lifetime in seconds
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Whether the particle can be dropped
    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lifetime_counts_down_to_exact_zero() {
        let mut particle = Particle::new(Vec2::zeros(), Color::WHITE, 1.0);
        let mut previous = particle.lifetime();

        for _ in 0..70 {
            particle.update(1.0 / 60.0);
            assert!(particle.lifetime() <= previous);
            previous = particle.lifetime();
        }

        assert!(particle.is_expired());
        assert_eq!(particle.lifetime(), 0.0);
    }

    #[test]
    fn test_uneven_steps_never_go_negative() {
        let mut particle = Particle::new(Vec2::new(3.0, 4.0), Color::WHITE, 0.5);

        particle.update(0.3);
        assert_relative_eq!(particle.lifetime(), 0.2, epsilon = 1e-6);
        assert!(!particle.is_expired());

        particle.update(0.7);
        assert_eq!(particle.lifetime(), 0.0);
        assert!(particle.is_expired());

        particle.update(0.1);
        assert_eq!(particle.lifetime(), 0.0);
        assert_eq!(particle.position(), Vec2::new(3.0, 4.0));
    }
}
