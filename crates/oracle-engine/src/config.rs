//! Configuration for a game engine.

use crate::channel::ChannelPool;

/// Tunable parameters of the draw game.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible draws. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Hours east of UTC used for day and week boundaries.
    pub utc_offset_hours: i32,
    /// Reward units granted for winning a cycle.
    pub win_reward: i64,
    /// Extra reward units granted when a streak completes.
    pub streak_bonus: i64,
    /// Consecutive cycle wins needed to complete a streak (at least 1).
    pub streak_threshold: u32,
    /// Channels the daily recommendation picks from.
    pub channels: ChannelPool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            utc_offset_hours: 9,
            win_reward: 5,
            streak_bonus: 10,
            streak_threshold: 3,
            channels: ChannelPool::default(),
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the UTC offset in hours. Validated when the engine is built.
    pub fn with_utc_offset(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Set the reward for winning a cycle.
    pub fn with_win_reward(mut self, reward: i64) -> Self {
        self.win_reward = reward;
        self
    }

    /// Set the streak completion bonus.
    pub fn with_streak_bonus(mut self, bonus: i64) -> Self {
        self.streak_bonus = bonus;
        self
    }

    /// Set the streak length (clamped to at least 1).
    pub fn with_streak_threshold(mut self, wins: u32) -> Self {
        self.streak_threshold = wins.max(1);
        self
    }

    /// Set the recommended-channel pool.
    pub fn with_channels(mut self, channels: ChannelPool) -> Self {
        self.channels = channels;
        self
    }
}
