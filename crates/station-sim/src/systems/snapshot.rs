//! Snapshot system: reads the session and builds a complete
//! SessionSnapshot for the render collaborator.
//!
//! This system is read-only.

use glam::Vec3;

use station_core::components::Placement;
use station_core::constants::SOCKET_HALF_EXTENTS;
use station_core::enums::SessionState;
use station_core::events::SessionEvent;
use station_core::hud::{build_hud, oxygen_percent};
use station_core::state::*;
use station_core::types::SimTime;

use crate::interaction::Agent;
use crate::network::Network;
use crate::resources::Resources;

/// Session-level values that go into a snapshot.
pub struct SessionView<'a> {
    pub time: SimTime,
    pub state: SessionState,
    pub paused: bool,
    pub resources: &'a Resources,
    pub rig_position: Vec3,
    /// Reason the last session ended, if it has.
    pub end_reason: Option<&'a str>,
}

/// Build a complete SessionSnapshot from the current session state.
pub fn build_snapshot(
    session: &SessionView<'_>,
    network: &Network,
    agents: &[Agent],
    events: Vec<SessionEvent>,
) -> SessionSnapshot {
    let segments = network.segments();

    let parts = segments
        .iter()
        .filter(|(_, _, segment)| segment.part_available())
        .map(|(id, _, segment)| PickableView {
            segment: *id,
            pose: segment.part().pose,
        })
        .collect();

    let sockets = segments
        .iter()
        .filter(|(_, _, segment)| segment.is_broken())
        .map(|(id, placement, _)| SocketView {
            segment: *id,
            center: placement.center,
            half_extents: socket_half_extents(placement),
        })
        .collect();

    let broken_count = segments.iter().filter(|(_, _, s)| s.is_broken()).count() as u32;

    let segment_views = segments
        .iter()
        .map(|(id, placement, segment)| SegmentView {
            id: *id,
            placement: *placement,
            state: segment.state(),
            leak_intensity: segment.leak_intensity(),
        })
        .collect();

    let agent_views = agents
        .iter()
        .enumerate()
        .map(|(index, agent)| AgentView {
            index,
            holding: agent.held(),
            show_held_part: agent.show_held_part(),
            pose: agent.pose(),
        })
        .collect();

    SessionSnapshot {
        time: session.time,
        state: session.state,
        paused: session.paused,
        time_remaining: session.resources.time_remaining,
        oxygen: session.resources.oxygen,
        broken_count,
        segments: segment_views,
        parts,
        sockets,
        agents: agent_views,
        rig_position: session.rig_position,
        hud: build_hud(session.resources.time_remaining, session.resources.oxygen),
        menu: build_menu(session),
        events,
    }
}

/// Socket box in world axes. The long side follows the pipe.
fn socket_half_extents(placement: &Placement) -> Vec3 {
    let local = SOCKET_HALF_EXTENTS;
    if placement.vertical {
        Vec3::new(local.x, local.z, local.y)
    } else {
        local
    }
}

fn build_menu(session: &SessionView<'_>) -> Option<MenuView> {
    match session.state {
        SessionState::Menu => Some(MenuView::Start),
        SessionState::Playing => None,
        SessionState::Loss => Some(MenuView::GameOver {
            reason: session.end_reason.unwrap_or_default().to_string(),
        }),
        SessionState::Win => Some(MenuView::Success {
            oxygen_left: oxygen_percent(session.resources.oxygen),
        }),
    }
}
