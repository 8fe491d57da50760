//! Game configuration
//!
//! Everything tunable about a session lives here and can be loaded from a
//! TOML or RON file through [`Config`]. Missing fields fall back to the
//! defaults below.

use crate::entities::ShipKind;
use crate::progression::Level;
use scene_engine::config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,

    /// Seed for spawn placement and pickup drops
    pub seed: u64,

    /// Probability that a destroyed enemy drops a pickup
    pub pickup_drop_chance: f32,

    /// Playfield settings
    pub world: WorldConfig,

    /// Player settings
    pub player: PlayerConfig,

    /// Particle settings
    pub particles: ParticleConfig,

    /// One entry per level, in order
    pub levels: Vec<LevelConfig>,
}

/// Playfield dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Visible width in pixels
    pub width: f32,
    /// Visible height in pixels
    pub height: f32,
    /// How far outside the view entities may travel before being culled
    pub cull_margin: f32,
}

/// Player ship settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Lives at start
    pub lives: u32,
    /// Seconds of invulnerability after losing a life
    pub invulnerability_time: f32,
    /// Seconds between trail particles
    pub trail_interval: f32,
}

/// Particle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Lifetime of trail particles in seconds
    pub trail_lifetime: f32,
    /// Lifetime of explosion particles in seconds
    pub explosion_lifetime: f32,
    /// Particles per explosion
    pub explosion_count: u32,
}

/// Spawn parameters of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Seconds that must pass between two spawns
    pub spawn_interval: f32,
    /// Maximum number of enemies alive (spawning ones included)
    pub max_alive: u32,
    /// Rounds in order
    pub rounds: Vec<RoundConfig>,
}

/// One round of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Enemies that must be cleared to finish the round
    pub quota: u32,
    /// Enemy kinds spawned in rotation
    pub enemies: Vec<ShipKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: 0x5eed,
            pickup_drop_chance: 0.25,
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            particles: ParticleConfig::default(),
            levels: default_levels(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            cull_margin: 150.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            invulnerability_time: 2.0,
            trail_interval: 0.05,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            trail_lifetime: 0.6,
            explosion_lifetime: 1.0,
            explosion_count: 24,
        }
    }
}

fn default_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig {
            spawn_interval: 2.0,
            max_alive: 3,
            rounds: vec![
                RoundConfig { quota: 4, enemies: vec![ShipKind::Raptor] },
                RoundConfig { quota: 6, enemies: vec![ShipKind::Raptor, ShipKind::Raptor, ShipKind::Avenger] },
            ],
        },
        LevelConfig {
            spawn_interval: 1.5,
            max_alive: 5,
            rounds: vec![
                RoundConfig { quota: 8, enemies: vec![ShipKind::Raptor, ShipKind::Avenger] },
                RoundConfig { quota: 10, enemies: vec![ShipKind::Avenger] },
            ],
        },
        LevelConfig {
            spawn_interval: 1.0,
            max_alive: 7,
            rounds: vec![
                RoundConfig { quota: 12, enemies: vec![ShipKind::Avenger, ShipKind::Raptor] },
                RoundConfig { quota: 15, enemies: vec![ShipKind::Avenger] },
            ],
        },
    ]
}

impl GameConfig {
    /// Reject settings the world cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return Err(ConfigError::Invalid("world size must be positive".to_string()));
        }
        if self.world.cull_margin < 0.0 {
            return Err(ConfigError::Invalid("cull margin must not be negative".to_string()));
        }
        if self.player.lives == 0 {
            return Err(ConfigError::Invalid("player needs at least one life".to_string()));
        }
        if self.player.trail_interval <= 0.0 {
            return Err(ConfigError::Invalid("trail interval must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.pickup_drop_chance) {
            return Err(ConfigError::Invalid("pickup drop chance must be within 0..=1".to_string()));
        }
        validate_levels(&self.levels)?;

        // Enemies enter from above, so each one has to fit across the bounding rect
        let widest = self
            .levels
            .iter()
            .flat_map(|level| &level.rounds)
            .flat_map(|round| &round.enemies)
            .map(|kind| kind.data().size.x)
            .fold(0.0_f32, f32::max);
        let spawn_width = self.world.width + 2.0 * self.world.cull_margin;
        if spawn_width < widest {
            return Err(ConfigError::Invalid(format!(
                "world too narrow to spawn enemies: {spawn_width} < {widest}"
            )));
        }
        Ok(())
    }
}

/// Check that a level table can drive the progression
pub fn validate_levels(levels: &[LevelConfig]) -> Result<(), ConfigError> {
    if levels.len() != Level::COUNT {
        return Err(ConfigError::Invalid(format!(
            "expected {} levels, found {}",
            Level::COUNT,
            levels.len()
        )));
    }

    for (index, level) in levels.iter().enumerate() {
        let number = index + 1;
        if level.spawn_interval <= 0.0 {
            return Err(ConfigError::Invalid(format!("level {number}: spawn interval must be positive")));
        }
        if level.max_alive == 0 {
            return Err(ConfigError::Invalid(format!("level {number}: max alive must be positive")));
        }
        if level.rounds.is_empty() {
            return Err(ConfigError::Invalid(format!("level {number}: no rounds")));
        }
        for (round_index, round) in level.rounds.iter().enumerate() {
            let round_number = round_index + 1;
            if round.quota == 0 {
                return Err(ConfigError::Invalid(format!("level {number} round {round_number}: zero quota")));
            }
            if round.enemies.is_empty() {
                return Err(ConfigError::Invalid(format!("level {number} round {round_number}: no enemies")));
            }
            if round.enemies.iter().any(|kind| kind.is_player()) {
                return Err(ConfigError::Invalid(format!(
                    "level {number} round {round_number}: player ship listed as enemy"
                )));
            }
        }
    }
    Ok(())
}

impl Config for GameConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_wrong_level_count() {
        let mut config = GameConfig::default();
        config.levels.pop();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_quota() {
        let mut config = GameConfig::default();
        config.levels[1].rounds[0].quota = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_world_narrower_than_enemies() {
        let mut config = GameConfig::default();
        config.world.width = 20.0;
        config.world.cull_margin = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // The cull margin widens the spawn area
        config.world.cull_margin = 20.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_player_as_enemy() {
        let mut config = GameConfig::default();
        config.levels[0].rounds[0].enemies.push(ShipKind::Eagle);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trip_through_toml_file() {
        let path = std::env::temp_dir().join("shooter_config_test.toml");
        let mut config = GameConfig::default();
        config.seed = 42;
        config.world.cull_margin = 80.0;

        config.save_to_file(&path).unwrap();
        let loaded = GameConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let path = std::env::temp_dir().join("shooter_partial_config_test.ron");
        std::fs::write(&path, "(seed: 7, pickup_drop_chance: 0.5)").unwrap();

        let loaded = GameConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.levels, GameConfig::default().levels);
        assert_eq!(loaded.player.lives, 3);
    }
}
