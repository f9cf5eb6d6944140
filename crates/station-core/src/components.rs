//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in the simulation crate, not here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::WallSide;
use crate::types::Pose;

/// Where a pipe segment sits. Fixed at layout time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// World position of the segment centre (also the socket centre).
    pub center: Vec3,
    pub side: WallSide,
    /// Vertical connector (true) or horizontal run along the corridor.
    pub vertical: bool,
    /// Nominal length in meters.
    pub length: f32,
}

/// Replacement-part token attached to a segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartToken {
    /// Lying on the floor and free to pick up.
    pub available: bool,
    /// Resting pose on the floor.
    pub pose: Pose,
}

/// Cosmetic steam leak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LeakEffect {
    pub intensity: f32,
    /// Seconds the leak has been running.
    pub elapsed_secs: f32,
}
