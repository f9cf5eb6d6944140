//! Session snapshot: the complete visible state handed to the render
//! collaborator after each frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::Placement;
use crate::enums::{SegmentState, SessionState};
use crate::events::SessionEvent;
use crate::types::{Pose, SegmentId, SimTime};

/// Complete session state broadcast after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub state: SessionState,
    pub paused: bool,
    pub time_remaining: f64,
    pub oxygen: f64,
    pub broken_count: u32,
    pub segments: Vec<SegmentView>,
    /// Parts currently lying on the floor.
    pub parts: Vec<PickableView>,
    /// Repair sockets of broken segments.
    pub sockets: Vec<SocketView>,
    pub agents: Vec<AgentView>,
    pub rig_position: Vec3,
    pub hud: HudView,
    /// Menu panel to show, if any.
    pub menu: Option<MenuView>,
    pub events: Vec<SessionEvent>,
}

/// One pipe segment on the display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentView {
    pub id: SegmentId,
    pub placement: Placement,
    pub state: SegmentState,
    /// Steam opacity (0 when healthy).
    pub leak_intensity: f32,
}

/// A pickable replacement part for hit-testing and rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickableView {
    pub segment: SegmentId,
    pub pose: Pose,
}

/// The repair trigger volume of a broken segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SocketView {
    pub segment: SegmentId,
    pub center: Vec3,
    /// Half extents in world axes.
    pub half_extents: Vec3,
}

/// One controller's carrying state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentView {
    pub index: usize,
    /// Segment whose part is being carried.
    pub holding: Option<SegmentId>,
    /// Whether the hand shows a held part.
    pub show_held_part: bool,
    pub pose: Pose,
}

/// Status screen values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    /// Remaining time as `M:SS`.
    pub clock: String,
    /// Oxygen rounded to a whole percent.
    pub oxygen_percent: u32,
    /// Oxygen bar fill (0.0 - 1.0).
    pub oxygen_fraction: f32,
    pub time_critical: bool,
    pub oxygen_critical: bool,
}

/// Menu panel contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "screen")]
pub enum MenuView {
    /// Title and controls, waiting for start.
    Start,
    /// Session lost.
    GameOver { reason: String },
    /// Session survived.
    Success { oxygen_left: u32 },
}
