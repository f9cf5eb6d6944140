//! Session tuning, loadable from JSON.
//!
//! Every field defaults to the matching constant in [`crate::constants`],
//! so a config file only needs to list what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors from loading or validating a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One step of the failure-frequency curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Played seconds at which this tier takes over.
    pub starts_at_secs: f64,
    /// Seconds between automatic failures while this tier is active.
    pub spawn_interval_secs: f64,
}

/// Tunable parameters of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub session_length_secs: f64,
    pub starting_oxygen: f64,
    pub oxygen_base_decay_per_sec: f64,
    pub oxygen_decay_per_broken_per_sec: f64,
    pub oxygen_recovery_per_sec: f64,
    pub repair_oxygen_bonus: f64,
    pub first_break_delay_secs: f64,
    pub difficulty_tiers: Vec<DifficultyTier>,
    pub alignment_tolerance_deg: f64,
    pub max_interact_distance: f32,
    pub agent_count: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_length_secs: SESSION_LENGTH_SECS,
            starting_oxygen: STARTING_OXYGEN,
            oxygen_base_decay_per_sec: OXYGEN_BASE_DECAY_PER_SEC,
            oxygen_decay_per_broken_per_sec: OXYGEN_DECAY_PER_BROKEN_PER_SEC,
            oxygen_recovery_per_sec: OXYGEN_RECOVERY_PER_SEC,
            repair_oxygen_bonus: REPAIR_OXYGEN_BONUS,
            first_break_delay_secs: FIRST_BREAK_DELAY_SECS,
            difficulty_tiers: DIFFICULTY_TIERS
                .iter()
                .map(|&(starts_at_secs, spawn_interval_secs)| DifficultyTier {
                    starts_at_secs,
                    spawn_interval_secs,
                })
                .collect(),
            alignment_tolerance_deg: ALIGNMENT_TOLERANCE_DEG,
            max_interact_distance: MAX_INTERACT_DISTANCE,
            agent_count: AGENT_COUNT,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check that the values describe a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.session_length_secs > 0.0 && self.session_length_secs.is_finite()) {
            return invalid("session_length_secs must be positive and finite");
        }
        if !(self.starting_oxygen > 0.0 && self.starting_oxygen <= OXYGEN_MAX) {
            return invalid("starting_oxygen must be in (0, 100]");
        }
        let rates = [
            self.oxygen_base_decay_per_sec,
            self.oxygen_decay_per_broken_per_sec,
            self.oxygen_recovery_per_sec,
            self.repair_oxygen_bonus,
            self.first_break_delay_secs,
        ];
        if rates.iter().any(|r| !(*r >= 0.0) || !r.is_finite()) {
            return invalid("rates, bonus and first break delay must be non-negative");
        }
        if !(self.alignment_tolerance_deg > 0.0 && self.alignment_tolerance_deg <= 90.0) {
            return invalid("alignment_tolerance_deg must be in (0, 90]");
        }
        if !(self.max_interact_distance > 0.0 && self.max_interact_distance.is_finite()) {
            return invalid("max_interact_distance must be positive and finite");
        }
        if self.agent_count == 0 {
            return invalid("agent_count must be at least 1");
        }

        let Some(first) = self.difficulty_tiers.first() else {
            return invalid("difficulty_tiers must not be empty");
        };
        if first.starts_at_secs != 0.0 {
            return invalid("the first difficulty tier must start at 0");
        }
        if self
            .difficulty_tiers
            .iter()
            .any(|t| !(t.spawn_interval_secs > 0.0))
        {
            return invalid("spawn intervals must be positive");
        }
        if self
            .difficulty_tiers
            .windows(2)
            .any(|w| w[1].starts_at_secs <= w[0].starts_at_secs)
        {
            return invalid("difficulty tiers must start at strictly increasing times");
        }

        Ok(())
    }

    /// Failure interval for a given amount of played time.
    /// The last tier whose start is not after `played_secs` wins.
    pub fn spawn_interval(&self, played_secs: f64) -> f64 {
        self.difficulty_tiers
            .iter()
            .take_while(|t| t.starts_at_secs <= played_secs)
            .last()
            .or(self.difficulty_tiers.first())
            .map(|t| t.spawn_interval_secs)
            .unwrap_or(DIFFICULTY_TIERS[0].1)
    }

    /// Alignment tolerance in radians.
    pub fn alignment_tolerance_rad(&self) -> f32 {
        (self.alignment_tolerance_deg as f32).to_radians()
    }
}
