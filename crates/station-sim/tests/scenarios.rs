//! End-to-end session scenarios driven only through the public
//! controller API: commands in, snapshots out.

use glam::{Quat, Vec3};

use station_sim::core::commands::PlayerCommand;
use station_sim::core::config::SessionConfig;
use station_sim::core::constants::HELD_PART_LOCAL_AXIS;
use station_sim::core::enums::{InteractPhase, SegmentState, SessionState};
use station_sim::core::events::{SessionEvent, LOSS_REASON, WIN_REASON};
use station_sim::core::state::{MenuView, SessionSnapshot};
use station_sim::core::types::{PickTarget, Pose, RayHit, SegmentId};
use station_sim::{SessionController, SimConfig};

/// A session with automatic failures pushed past its end.
fn scripted(session: SessionConfig) -> SessionController {
    let mut controller = SessionController::new(SimConfig {
        seed: 3,
        session: SessionConfig {
            first_break_delay_secs: 10_000.0,
            ..session
        },
        ..Default::default()
    });
    controller.queue_command(PlayerCommand::Start);
    let snap = controller.tick(0.0);
    assert_eq!(snap.state, SessionState::Playing);
    controller
}

fn press(agent: usize, segment: SegmentId) -> PlayerCommand {
    PlayerCommand::Interact {
        agent,
        hit: Some(RayHit::new(PickTarget::Part(segment), 1.2)),
        phase: InteractPhase::Start,
    }
}

fn release_on(agent: usize, segment: SegmentId) -> PlayerCommand {
    PlayerCommand::Interact {
        agent,
        hit: Some(RayHit::new(PickTarget::Socket(segment), 1.0)),
        phase: InteractPhase::End,
    }
}

fn aim_along(agent: usize, axis: Vec3) -> PlayerCommand {
    PlayerCommand::UpdatePose {
        agent,
        pose: Pose::new(
            Vec3::new(0.3, 1.1, 0.0),
            Quat::from_rotation_arc(HELD_PART_LOCAL_AXIS, axis),
        ),
    }
}

fn run_for(controller: &mut SessionController, secs: f64, frames: u32) -> SessionSnapshot {
    let dt = secs / frames as f64;
    let mut snap = controller.snapshot();
    for _ in 0..frames {
        snap = controller.tick(dt);
    }
    snap
}

#[test]
fn oxygen_regenerates_with_no_failures() {
    let mut controller = scripted(SessionConfig {
        starting_oxygen: 50.0,
        ..Default::default()
    });

    let snap = run_for(&mut controller, 2.0, 144);

    assert_eq!(snap.broken_count, 0);
    assert!((snap.oxygen - 54.0).abs() < 1e-6, "oxygen {}", snap.oxygen);
    assert!((snap.time_remaining - 118.0).abs() < 1e-6);
    assert_eq!(snap.hud.oxygen_percent, 54);
}

#[test]
fn two_failures_drain_four_per_second() {
    let mut controller = scripted(SessionConfig::default());
    assert!(controller.inject_failure(SegmentId(0)));
    assert!(controller.inject_failure(SegmentId(1)));

    let snap = controller.tick(1.0);

    assert_eq!(snap.broken_count, 2);
    assert!((snap.oxygen - 96.0).abs() < 1e-9, "oxygen {}", snap.oxygen);
    assert_eq!(snap.parts.len(), 2);
    assert_eq!(snap.sockets.len(), 2);
}

#[test]
fn cross_segment_repair_respawns_origin_part() {
    let mut controller = scripted(SessionConfig {
        starting_oxygen: 50.0,
        ..Default::default()
    });
    let (a, b) = (SegmentId(0), SegmentId(2));
    controller.inject_failure(a);
    controller.inject_failure(b);
    let first_spot = controller.network().segment(a).unwrap().part().pose;

    controller.queue_commands([aim_along(0, Vec3::Z), press(0, a)]);
    let snap = controller.tick(0.0);
    assert_eq!(snap.agents[0].holding, Some(a));
    assert!(snap.agents[0].show_held_part);
    assert!(snap.parts.iter().all(|p| p.segment != a));

    controller.queue_command(release_on(0, b));
    let snap = controller.tick(0.0);

    assert_eq!(snap.segments[b.index()].state, SegmentState::Healthy);
    assert_eq!(snap.segments[a.index()].state, SegmentState::Broken);
    let respawned = snap
        .parts
        .iter()
        .find(|p| p.segment == a)
        .expect("a's part should be back on the floor");
    assert_ne!(respawned.pose, first_spot);
    assert_eq!(snap.agents[0].holding, None);
    assert!(!snap.agents[0].show_held_part);
    assert!((snap.oxygen - 60.0).abs() < 1e-9);
    assert!(snap.events.contains(&SessionEvent::SegmentRepaired {
        agent: 0,
        segment: b,
        part_from: a,
    }));
}

#[test]
fn release_on_nothing_drops_part() {
    let mut controller = scripted(SessionConfig::default());
    let a = SegmentId(5);
    controller.inject_failure(a);

    controller.queue_command(press(1, a));
    controller.tick(0.0);
    controller.queue_command(PlayerCommand::Interact {
        agent: 1,
        hit: None,
        phase: InteractPhase::End,
    });
    let snap = controller.tick(0.0);

    assert_eq!(snap.agents[1].holding, None);
    assert!(!snap.agents[1].show_held_part);
    assert!(snap.parts.iter().any(|p| p.segment == a));
    assert_eq!(snap.segments[a.index()].state, SegmentState::Broken);
    assert!(snap.events.contains(&SessionEvent::PartDropped {
        agent: 1,
        segment: a
    }));
}

#[test]
fn surviving_the_clock_is_a_win() {
    let mut controller = scripted(SessionConfig {
        session_length_secs: 2.0,
        ..Default::default()
    });
    controller.inject_failure(SegmentId(0));

    let snap = run_for(&mut controller, 2.5, 10);

    assert_eq!(snap.state, SessionState::Win);
    assert!(snap.oxygen > 0.0);
    assert_eq!(controller.end_reason(), Some(WIN_REASON));
    assert!(matches!(snap.menu, Some(MenuView::Success { .. })));
    assert_eq!(snap.broken_count, 0, "network resets at the end");
}

#[test]
fn running_out_of_oxygen_is_a_loss() {
    let mut controller = scripted(SessionConfig {
        starting_oxygen: 2.0,
        ..Default::default()
    });
    controller.inject_failure(SegmentId(7));

    let snap = controller.tick(1.0);

    assert_eq!(snap.state, SessionState::Loss);
    assert_eq!(snap.oxygen, 0.0);
    assert!(snap.time_remaining > 100.0);
    assert!(snap.events.contains(&SessionEvent::SessionEnded {
        state: SessionState::Loss,
        reason: LOSS_REASON.to_string(),
    }));
    let menu = snap.menu.expect("game over screen");
    assert_eq!(menu.title(), "GAME OVER");
}

#[test]
fn oxygen_running_out_on_the_last_frame_is_a_loss() {
    let mut controller = scripted(SessionConfig {
        session_length_secs: 1.0,
        starting_oxygen: 2.0,
        ..Default::default()
    });
    controller.inject_failure(SegmentId(0));

    let snap = controller.tick(1.0);
    assert_eq!(snap.time_remaining, 0.0);
    assert_eq!(snap.state, SessionState::Loss);
}

#[test]
fn restart_gives_a_fresh_session() {
    let mut controller = scripted(SessionConfig {
        starting_oxygen: 2.0,
        ..Default::default()
    });
    controller.inject_failure(SegmentId(0));
    controller.tick(1.0);
    assert_eq!(controller.state(), SessionState::Loss);

    controller.queue_command(PlayerCommand::Restart);
    let snap = controller.tick(0.0);

    assert_eq!(snap.state, SessionState::Playing);
    assert_eq!(snap.oxygen, 2.0);
    assert_eq!(snap.time_remaining, 120.0);
    assert_eq!(snap.broken_count, 0);
    assert!(snap.events.contains(&SessionEvent::SessionStarted));
}

#[test]
fn paused_session_ignores_time_and_triggers() {
    let mut controller = scripted(SessionConfig::default());
    controller.inject_failure(SegmentId(0));
    controller.queue_command(PlayerCommand::Pause);
    controller.tick(0.0);

    controller.queue_command(press(0, SegmentId(0)));
    let snap = run_for(&mut controller, 5.0, 50);
    assert!(snap.paused);
    assert_eq!(snap.time_remaining, 120.0);
    assert_eq!(snap.agents[0].holding, None);

    controller.queue_command(PlayerCommand::Resume);
    let snap = controller.tick(0.5);
    assert!(!snap.paused);
    assert!((snap.time_remaining - 119.5).abs() < 1e-9);
}

#[test]
fn config_file_drives_the_session() {
    let config = SessionConfig::from_json_str(
        r#"{ "session_length_secs": 30.0, "oxygen_recovery_per_sec": 0.5 }"#,
    )
    .unwrap();
    let mut controller = SessionController::new(SimConfig {
        session: config,
        ..Default::default()
    });
    controller.queue_command(PlayerCommand::Start);
    let snap = controller.tick(0.0);

    assert_eq!(snap.time_remaining, 30.0);
    assert_eq!(snap.hud.clock, "0:30");
    assert!(!snap.hud.time_critical);

    let snap = controller.tick(0.5);
    assert_eq!(snap.hud.clock, "0:29");
    assert!(snap.hud.time_critical);
}
