//! The shared time and oxygen budget of a session.

use serde::{Deserialize, Serialize};

use station_core::config::SessionConfig;
use station_core::constants::OXYGEN_MAX;

/// Time and oxygen left. Always clamped: oxygen in `[0, 100]`, time `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub time_remaining: f64,
    pub oxygen: f64,
}

impl Resources {
    /// Full budget at session start.
    pub fn new(config: &SessionConfig) -> Self {
        let mut resources = Self {
            time_remaining: config.session_length_secs,
            oxygen: config.starting_oxygen,
        };
        resources.clamp();
        resources
    }

    pub fn clamp(&mut self) {
        self.oxygen = self.oxygen.clamp(0.0, OXYGEN_MAX);
        self.time_remaining = self.time_remaining.max(0.0);
    }

    /// Add (or with a negative amount, remove) oxygen, clamped.
    pub fn add_oxygen(&mut self, amount: f64) {
        self.oxygen += amount;
        self.clamp();
    }

    /// Seconds played so far.
    pub fn played_secs(&self, config: &SessionConfig) -> f64 {
        (config.session_length_secs - self.time_remaining).max(0.0)
    }

    pub fn oxygen_depleted(&self) -> bool {
        self.oxygen <= 0.0
    }

    pub fn time_up(&self) -> bool {
        self.time_remaining <= 0.0
    }
}
