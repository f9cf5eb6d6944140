//! Pickup, carry and repair protocol.
//!
//! Each controller is an [`Agent`] that can carry at most one part. The
//! resolver reacts to trigger press/release with whatever the controller's
//! ray hits. The caller gates on session state; nothing in here knows
//! whether the session is running.

use rand::Rng;
use serde::{Deserialize, Serialize};

use station_core::constants::HELD_PART_LOCAL_AXIS;
use station_core::enums::InteractPhase;
use station_core::types::{PickTarget, Pose, RayHit, SegmentId};

use crate::alignment::{is_aligned, required_axis};
use crate::network::Network;

/// Carrying state of one controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    held: Option<SegmentId>,
    show_held_part: bool,
    pose: Pose,
}

impl Agent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_part(&self) -> bool {
        self.held.is_some()
    }

    /// Segment the carried part was taken from.
    pub fn held(&self) -> Option<SegmentId> {
        self.held
    }

    /// Whether the hand should render a held part.
    pub fn show_held_part(&self) -> bool {
        self.show_held_part
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// World direction of the carried part's long axis.
    pub fn held_axis(&self) -> glam::Vec3 {
        self.pose.world_axis(HELD_PART_LOCAL_AXIS)
    }

    fn take(&mut self, id: SegmentId) {
        self.held = Some(id);
        self.show_held_part = true;
    }

    fn clear(&mut self) -> Option<SegmentId> {
        self.show_held_part = false;
        self.held.take()
    }
}

/// What an interaction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionOutcome {
    /// Nothing applicable (no target, wrong phase, nothing held, ...).
    Ignored,
    PickedUp(SegmentId),
    /// The part was already taken.
    PickupRefused(SegmentId),
    Repaired {
        segment: SegmentId,
        part_from: SegmentId,
    },
    /// The held part went back to the floor next to its segment.
    Dropped(SegmentId),
}

/// Limits applied when resolving an interaction.
#[derive(Debug, Clone, Copy)]
pub struct InteractionRules {
    pub tolerance_rad: f32,
    /// Hits farther away than this count as no hit.
    pub max_distance: f32,
}

/// Resolve one trigger press or release for `agent`.
pub fn interact(
    agent: &mut Agent,
    hit: Option<RayHit>,
    phase: InteractPhase,
    network: &mut Network,
    rng: &mut impl Rng,
    rules: &InteractionRules,
) -> InteractionOutcome {
    let target = hit
        .filter(|h| h.distance <= rules.max_distance)
        .map(|h| h.target);

    match phase {
        InteractPhase::Start => match target {
            Some(PickTarget::Part(id)) if !agent.has_part() => {
                if network.try_pickup(id) {
                    agent.take(id);
                    log::debug!("picked up part of segment {id}");
                    InteractionOutcome::PickedUp(id)
                } else {
                    InteractionOutcome::PickupRefused(id)
                }
            }
            _ => InteractionOutcome::Ignored,
        },
        InteractPhase::End => {
            let Some(origin) = agent.held() else {
                return InteractionOutcome::Ignored;
            };

            if let Some(PickTarget::Socket(id)) = target {
                if socket_accepts(network, id, agent, rules.tolerance_rad) && network.repair(id) {
                    agent.clear();
                    // The origin gets a fresh part if it is still broken.
                    network.respawn_part(origin, rng);
                    log::debug!("repaired segment {id} with part of {origin}");
                    return InteractionOutcome::Repaired {
                        segment: id,
                        part_from: origin,
                    };
                }
            }

            drop_part(agent, network, rng).map_or(InteractionOutcome::Ignored, |id| {
                InteractionOutcome::Dropped(id)
            })
        }
    }
}

/// Let go of the carried part without repairing anything. The part goes
/// back to the floor next to the segment it came from.
pub fn drop_part(agent: &mut Agent, network: &mut Network, rng: &mut impl Rng) -> Option<SegmentId> {
    let origin = agent.clear()?;
    // Fails harmlessly when the origin was repaired meanwhile.
    network.respawn_part(origin, rng);
    log::debug!("dropped part of segment {origin}");
    Some(origin)
}

/// Drop every carried part, e.g. when the session ends. Returns
/// `(agent index, origin segment)` for each part let go.
pub fn release_all(
    agents: &mut [Agent],
    network: &mut Network,
    rng: &mut impl Rng,
) -> Vec<(usize, SegmentId)> {
    agents
        .iter_mut()
        .enumerate()
        .filter_map(|(index, agent)| Some((index, drop_part(agent, network, rng)?)))
        .collect()
}

/// Broken segment, and the part is held along its axis.
fn socket_accepts(network: &Network, id: SegmentId, agent: &Agent, tolerance_rad: f32) -> bool {
    let (Some(segment), Some(placement)) = (network.segment(id), network.placement(id)) else {
        return false;
    };
    segment.is_broken() && is_aligned(agent.held_axis(), required_axis(&placement), tolerance_rad)
}
