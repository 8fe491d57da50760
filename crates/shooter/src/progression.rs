//! Level and round progression
//!
//! A level is a list of rounds. A round spawns a fixed quota of enemies and
//! ends once that many have been cleared (destroyed or escaped). After the
//! last round of the last level the round counter keeps going and the final
//! round's configuration repeats.

use crate::config::{validate_levels, LevelConfig, RoundConfig};
use crate::entities::ShipKind;
use scene_engine::config::ConfigError;

/// Levels of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// First level
    Level1,
    /// Second level
    Level2,
    /// Final level
    Level3,
}

impl Level {
    /// Number of levels
    pub const COUNT: usize = 3;

    /// Zero-based index into the level table
    pub fn index(self) -> usize {
        match self {
            Self::Level1 => 0,
            Self::Level2 => 1,
            Self::Level3 => 2,
        }
    }

    /// One-based level number for display
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// The level after this one, `None` for the final level
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Level1 => Some(Self::Level2),
            Self::Level2 => Some(Self::Level3),
            Self::Level3 => None,
        }
    }
}

/// What a clear did to the progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Still in the same round
    None,
    /// Moved to the next round of the same level
    Round,
    /// Moved to the first round of the next level
    Level,
}

/// Level, round and spawn bookkeeping of a session
#[derive(Debug, Clone)]
pub struct LevelProgress {
    levels: Vec<LevelConfig>,
    level: Level,
    round: usize,
    time_since_spawn: f32,
    alive_enemies: u32,
    spawned_in_round: u32,
    cleared_in_round: u32,
}

impl LevelProgress {
    /// Start at level 1, round 1
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        validate_levels(&levels)?;
        Ok(Self {
            levels,
            level: Level::Level1,
            round: 0,
            time_since_spawn: 0.0,
            alive_enemies: 0,
            spawned_in_round: 0,
            cleared_in_round: 0,
        })
    }

    /// Current level
    pub fn level(&self) -> Level {
        self.level
    }

    /// One-based round number within the current level
    pub fn round(&self) -> usize {
        self.round + 1
    }

    /// Seconds since the last spawn
    pub fn time_since_spawn(&self) -> f32 {
        self.time_since_spawn
    }

    /// Enemies alive, spawning ones included
    pub fn alive_enemies(&self) -> u32 {
        self.alive_enemies
    }

    /// Enemies spawned in the current round
    pub fn spawned_in_round(&self) -> u32 {
        self.spawned_in_round
    }

    /// Enemies cleared in the current round
    pub fn cleared_in_round(&self) -> u32 {
        self.cleared_in_round
    }

    /// Configuration of the current level
    pub fn level_config(&self) -> &LevelConfig {
        &self.levels[self.level.index()]
    }

    /// Configuration of the current round (the last one repeats)
    pub fn round_config(&self) -> &RoundConfig {
        let rounds = &self.level_config().rounds;
        &rounds[self.round.min(rounds.len() - 1)]
    }

    /// Advance the spawn timer
    pub fn advance_time(&mut self, dt: f32) {
        self.time_since_spawn += dt;
    }

    /// Whether the next enemy of the round is due
    pub fn should_spawn(&self) -> bool {
        let level = self.level_config();
        self.time_since_spawn > level.spawn_interval
            && self.alive_enemies < level.max_alive
            && self.spawned_in_round < self.round_config().quota
    }

    /// Kind of the next enemy to spawn (the round's mix in rotation)
    pub fn next_enemy(&self) -> ShipKind {
        let enemies = &self.round_config().enemies;
        enemies[self.spawned_in_round as usize % enemies.len()]
    }

    /// Bookkeeping for a spawned enemy: timer reset, one more alive
    pub fn record_spawn(&mut self) {
        self.time_since_spawn = 0.0;
        self.alive_enemies += 1;
        self.spawned_in_round += 1;
    }

    /// Bookkeeping for an enemy leaving play, advancing when the quota is met
    pub fn record_clear(&mut self) -> Advance {
        debug_assert!(self.alive_enemies > 0, "cleared an enemy that was never spawned");
        self.alive_enemies = self.alive_enemies.saturating_sub(1);
        self.cleared_in_round += 1;

        if self.cleared_in_round < self.round_config().quota {
            return Advance::None;
        }

        self.spawned_in_round = 0;
        self.cleared_in_round = 0;
        self.round += 1;

        let round_count = self.level_config().rounds.len();
        match self.level.next() {
            Some(next) if self.round >= round_count => {
                self.level = next;
                self.round = 0;
                log::info!("Level {} started", self.level.number());
                Advance::Level
            }
            _ => {
                log::info!("Level {} round {} started", self.level.number(), self.round());
                Advance::Round
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn progress() -> LevelProgress {
        LevelProgress::new(GameConfig::default().levels).unwrap()
    }

    fn spawn_and_clear(progress: &mut LevelProgress, count: u32) -> Vec<Advance> {
        (0..count)
            .map(|_| {
                progress.record_spawn();
                progress.record_clear()
            })
            .collect()
    }

    #[test]
    fn test_round_advances_on_quota() {
        let mut progress = progress();
        let quota = progress.round_config().quota;

        for _ in 0..quota - 1 {
            progress.record_spawn();
        }
        for _ in 0..quota - 1 {
            assert_eq!(progress.record_clear(), Advance::None);
            assert_eq!(progress.round(), 1);
        }

        progress.record_spawn();
        assert_eq!(progress.record_clear(), Advance::Round);
        assert_eq!(progress.round(), 2);
        assert_eq!(progress.cleared_in_round(), 0);
        assert_eq!(progress.alive_enemies(), 0);
    }

    #[test]
    fn test_level_advances_after_last_round() {
        let mut progress = progress();
        let rounds = progress.level_config().rounds.clone();
        let mut advances = Vec::new();
        for round in &rounds {
            advances.extend(spawn_and_clear(&mut progress, round.quota));
        }

        assert_eq!(advances.last(), Some(&Advance::Level));
        assert_eq!(progress.level(), Level::Level2);
        assert_eq!(progress.round(), 1);
    }

    #[test]
    fn test_final_round_repeats() {
        let mut progress = progress();
        for level in GameConfig::default().levels {
            for round in &level.rounds {
                spawn_and_clear(&mut progress, round.quota);
            }
        }

        assert_eq!(progress.level(), Level::Level3);
        let last = GameConfig::default().levels[2].rounds.len();
        assert_eq!(progress.round(), last + 1);
        assert_eq!(progress.round_config(), GameConfig::default().levels[2].rounds.last().unwrap());
    }

    #[test]
    fn test_spawn_gate() {
        let mut progress = progress();
        let interval = progress.level_config().spawn_interval;

        progress.advance_time(interval);
        assert!(!progress.should_spawn());

        progress.advance_time(0.01);
        assert!(progress.should_spawn());

        progress.record_spawn();
        assert_eq!(progress.time_since_spawn(), 0.0);
        assert_eq!(progress.alive_enemies(), 1);
        assert!(!progress.should_spawn());
    }

    #[test]
    fn test_spawn_cap_and_quota() {
        let mut progress = progress();
        let cap = progress.level_config().max_alive;
        for _ in 0..cap {
            progress.record_spawn();
        }
        progress.advance_time(100.0);
        assert!(!progress.should_spawn());

        // Clearing frees a slot, but the quota still limits the round
        progress.record_clear();
        assert!(progress.should_spawn());
        let quota = progress.round_config().quota;
        while progress.spawned_in_round() < quota {
            progress.record_spawn();
            progress.record_clear();
        }
        progress.advance_time(100.0);
        assert!(!progress.should_spawn());
    }

    #[test]
    fn test_enemy_mix_rotates() {
        let mut progress = progress();
        let quota = progress.round_config().quota;
        spawn_and_clear(&mut progress, quota);

        let mix = progress.round_config().enemies.clone();
        for expected in mix.iter().chain(mix.iter()) {
            assert_eq!(progress.next_enemy(), *expected);
            progress.record_spawn();
        }
    }

    #[test]
    fn test_invalid_table_rejected() {
        assert!(LevelProgress::new(Vec::new()).is_err());
    }
}
