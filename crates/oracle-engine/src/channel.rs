//! Recommended-channel roll.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Channels a recommendation may land on: `1..=max` minus `excluded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPool {
    /// Highest channel number.
    pub max: u32,
    /// Channels never recommended.
    pub excluded: Vec<u32>,
}

impl Default for ChannelPool {
    fn default() -> Self {
        Self {
            max: 38,
            excluded: vec![11],
        }
    }
}

impl ChannelPool {
    /// Create a pool of `1..=max` with no exclusions.
    pub fn new(max: u32) -> Self {
        Self {
            max,
            excluded: Vec::new(),
        }
    }

    /// Exclude a channel.
    pub fn excluding(mut self, channel: u32) -> Self {
        self.excluded.push(channel);
        self
    }

    /// Channels that can be recommended, ascending.
    pub fn candidates(&self) -> Vec<u32> {
        (1..=self.max)
            .filter(|c| !self.excluded.contains(c))
            .collect()
    }

    /// Pick a channel uniformly, or `None` if every channel is excluded.
    pub fn pick(&self, rng: &mut StdRng) -> Option<u32> {
        let candidates = self.candidates();
        if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.random_range(0..candidates.len())])
        }
    }
}
