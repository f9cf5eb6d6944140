//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next frame boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::InteractPhase;
use crate::types::{Pose, RayHit};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Controllers ---
    /// Trigger pressed or released on controller `agent`, with whatever
    /// its ray currently hits.
    Interact {
        agent: usize,
        hit: Option<RayHit>,
        phase: InteractPhase,
    },
    /// Latest tracked pose of controller `agent`.
    UpdatePose { agent: usize, pose: Pose },
    /// Move the player rig to a confirmed floor position.
    Teleport { position: Vec3 },

    // --- Session control ---
    /// Leave the menu and start playing.
    Start,
    /// Play again after a win or loss.
    Restart,
    /// Go back to the menu after a win or loss.
    ReturnToMenu,
    /// Freeze the session (headset removed).
    Pause,
    /// Continue a paused session.
    Resume,
}
