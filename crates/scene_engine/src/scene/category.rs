//! Node categories for command routing and collision filtering
//!
//! Every scene node reports a [`Category`]. Commands carry a category mask
//! and reach exactly the nodes whose category intersects it; the world uses
//! the same tags to decide which pairs of entities can collide.

use bitflags::bitflags;

bitflags! {
    /// Category bitmask of a scene node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Category: u32 {
        /// Plain grouping node
        const SCENE = 1 << 0;
        /// Layer holding pickups, projectiles and particle systems
        const OBJECT_LAYER = 1 << 1;
        /// Layer holding ships
        const SHIP_LAYER = 1 << 2;
        /// Layer holding UI text
        const TEXT_LAYER = 1 << 3;
        /// The player's ship
        const PLAYER_SHIP = 1 << 4;
        /// Enemy ships
        const ENEMY_SHIP = 1 << 5;
        /// Projectiles fired by the player
        const ALLIED_PROJECTILE = 1 << 6;
        /// Projectiles fired by enemies
        const ENEMY_PROJECTILE = 1 << 7;
        /// Collectible powerups
        const PICKUP = 1 << 8;
        /// Particle systems
        const PARTICLE_SYSTEM = 1 << 9;
        /// Text nodes
        const TEXT = 1 << 10;

        /// Any ship
        const SHIP = Self::PLAYER_SHIP.bits() | Self::ENEMY_SHIP.bits();
        /// Any projectile
        const PROJECTILE = Self::ALLIED_PROJECTILE.bits() | Self::ENEMY_PROJECTILE.bits();
        /// Any layer node
        const LAYER = Self::OBJECT_LAYER.bits() | Self::SHIP_LAYER.bits() | Self::TEXT_LAYER.bits();
    }
}

impl Category {
    /// Whether a node of this category should receive a command aimed at `target`
    pub fn matches(self, target: Self) -> bool {
        self.intersects(target)
    }

    /// Whether `bits` only uses known categories
    pub fn is_known(bits: u32) -> bool {
        Self::from_bits(bits).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_categories() {
        assert!(Category::PLAYER_SHIP.matches(Category::SHIP));
        assert!(Category::ENEMY_PROJECTILE.matches(Category::PROJECTILE));
        assert!(!Category::PICKUP.matches(Category::SHIP));
    }

    #[test]
    fn test_empty_category_matches_nothing() {
        assert!(!Category::empty().matches(Category::all()));
        assert!(!Category::SHIP.matches(Category::empty()));
    }

    #[test]
    fn test_unknown_bits_rejected() {
        assert!(Category::is_known(Category::PICKUP.bits()));
        assert!(!Category::is_known(1 << 31));
    }
}
