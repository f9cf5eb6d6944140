//! Events emitted by the simulation for audio, haptics and UI feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::SessionState;
use crate::types::SegmentId;

/// Shown when oxygen runs out.
pub const LOSS_REASON: &str = "OXYGEN DEPLETED";

/// Shown when the clock runs out with oxygen left.
pub const WIN_REASON: &str = "TIME UP — SURVIVED";

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    SessionStarted,
    /// A segment failed and started leaking.
    SegmentBroken { segment: SegmentId },
    PartPickedUp { agent: usize, segment: SegmentId },
    /// A held part was dropped and respawned on the floor.
    PartDropped { agent: usize, segment: SegmentId },
    /// `segment` was repaired with the part taken from `part_from`.
    SegmentRepaired {
        agent: usize,
        segment: SegmentId,
        part_from: SegmentId,
    },
    /// Oxygen crossed the warning threshold going down.
    OxygenLow { oxygen: f64 },
    Teleported { position: Vec3 },
    SessionEnded { state: SessionState, reason: String },
}
