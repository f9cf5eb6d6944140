//! Fundamental geometric and simulation types.

use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Stable identifier of a pipe segment, assigned in layout order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub u32);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World position and orientation (meters, y up, z along the corridor).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `position` with identity orientation.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// A local-frame axis expressed in world space.
    pub fn world_axis(&self, local: Vec3) -> Vec3 {
        self.orientation * local
    }
}

/// What an input ray landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "segment")]
pub enum PickTarget {
    /// A replacement part lying on the floor.
    Part(SegmentId),
    /// The repair socket of a broken segment.
    Socket(SegmentId),
}

impl PickTarget {
    /// Segment the target belongs to.
    pub fn segment(&self) -> SegmentId {
        match *self {
            PickTarget::Part(id) | PickTarget::Socket(id) => id,
        }
    }
}

/// A ray-cast result delivered by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub target: PickTarget,
    /// Distance from the controller to the hit point (meters).
    pub distance: f32,
}

impl RayHit {
    pub fn new(target: PickTarget, distance: f32) -> Self {
        Self { target, distance }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Frames stepped since the engine was created.
    pub frame: u64,
    /// Elapsed time in seconds across all frames (including menus).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.elapsed_secs += dt;
    }
}
