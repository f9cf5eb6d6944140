//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    /// Survived until the clock ran out.
    Win,
    /// Oxygen depleted.
    Loss,
}

impl SessionState {
    /// Whether the session has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Win | SessionState::Loss)
    }
}

/// Health of a single pipe segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentState {
    #[default]
    Healthy,
    Broken,
}

/// Corridor wall a pipe run is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    /// Negative x.
    Left,
    /// Positive x.
    Right,
}

impl WallSide {
    /// Sign of the wall's x coordinate.
    pub fn sign(self) -> f32 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }
}

/// Phase of a controller select action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractPhase {
    /// Trigger pressed.
    Start,
    /// Trigger released.
    End,
}

/// Junction height at a corridor station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    High,
    Low,
}
