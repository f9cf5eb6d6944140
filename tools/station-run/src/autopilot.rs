//! Scripted player for headless runs.
//!
//! Drives controller 0: walks to the nearest spare part, grabs it, waits
//! a reaction delay, then walks to the nearest open socket and lets go
//! while holding the part along the pipe (more or less, depending on skill).

use clap::ValueEnum;
use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use station_core::commands::PlayerCommand;
use station_core::constants::HELD_PART_LOCAL_AXIS;
use station_core::enums::{InteractPhase, SessionState};
use station_core::state::SessionSnapshot;
use station_core::types::{PickTarget, Pose, RayHit};

/// How well the autopilot holds parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Skill {
    /// Never repairs anything.
    None,
    /// Always inside the alignment tolerance.
    Perfect,
    /// Up to 20° off, so some releases miss.
    Sloppy,
}

impl Skill {
    fn max_error_rad(self) -> f32 {
        match self {
            Skill::Sloppy => 20f32.to_radians(),
            Skill::None | Skill::Perfect => 0.0,
        }
    }
}

const AGENT: usize = 0;
/// Hand offset from the rig, roughly a lowered right arm.
const HAND_OFFSET: Vec3 = Vec3::new(0.3, 1.1, 0.0);
/// Ray length the autopilot reports for anything it points at.
const REACH: f32 = 1.0;

pub struct Autopilot {
    skill: Skill,
    reaction_secs: f64,
    rng: ChaCha8Rng,
    /// Time spent in the current phase (empty-handed or carrying).
    waited_secs: f64,
    was_holding: bool,
}

impl Autopilot {
    pub fn new(skill: Skill, reaction_secs: f64, seed: u64) -> Self {
        Self {
            skill,
            reaction_secs: reaction_secs.max(0.0),
            rng: ChaCha8Rng::seed_from_u64(seed),
            waited_secs: 0.0,
            was_holding: false,
        }
    }

    /// Commands to send before the next frame, given the last snapshot.
    pub fn step(&mut self, snap: &SessionSnapshot, dt: f64) -> Vec<PlayerCommand> {
        if snap.state != SessionState::Playing || snap.paused || self.skill == Skill::None {
            return Vec::new();
        }

        let holding = snap.agents.get(AGENT).and_then(|a| a.holding).is_some();
        if holding != self.was_holding {
            self.was_holding = holding;
            self.waited_secs = 0.0;
        }
        self.waited_secs += dt;
        if self.waited_secs < self.reaction_secs {
            return Vec::new();
        }

        if holding {
            self.place(snap)
        } else {
            self.fetch(snap)
        }
    }

    fn fetch(&self, snap: &SessionSnapshot) -> Vec<PlayerCommand> {
        let Some(part) = snap
            .parts
            .iter()
            .min_by(|a, b| {
                let da = a.pose.position.distance_squared(snap.rig_position);
                let db = b.pose.position.distance_squared(snap.rig_position);
                da.total_cmp(&db)
            })
        else {
            return Vec::new();
        };

        vec![
            PlayerCommand::Teleport {
                position: part.pose.position,
            },
            PlayerCommand::Interact {
                agent: AGENT,
                hit: Some(RayHit::new(PickTarget::Part(part.segment), REACH)),
                phase: InteractPhase::Start,
            },
        ]
    }

    fn place(&mut self, snap: &SessionSnapshot) -> Vec<PlayerCommand> {
        let Some(socket) = snap.sockets.iter().min_by(|a, b| {
            let da = a.center.distance_squared(snap.rig_position);
            let db = b.center.distance_squared(snap.rig_position);
            da.total_cmp(&db)
        }) else {
            return Vec::new();
        };
        let vertical = snap
            .segments
            .get(socket.segment.index())
            .is_some_and(|s| s.placement.vertical);

        let standing = Vec3::new(socket.center.x, 0.0, socket.center.z);
        vec![
            PlayerCommand::Teleport { position: standing },
            PlayerCommand::UpdatePose {
                agent: AGENT,
                pose: self.hold_for(standing, vertical),
            },
            PlayerCommand::Interact {
                agent: AGENT,
                hit: Some(RayHit::new(PickTarget::Socket(socket.segment), REACH)),
                phase: InteractPhase::End,
            },
        ]
    }

    /// Hand pose that points the held part along the pipe, give or take
    /// the skill's error.
    fn hold_for(&mut self, rig: Vec3, vertical: bool) -> Pose {
        let required = if vertical { Vec3::Y } else { Vec3::Z };
        let aligned = Quat::from_rotation_arc(HELD_PART_LOCAL_AXIS, required);

        let max_error = self.skill.max_error_rad();
        let error = if max_error > 0.0 {
            self.rng.gen_range(0.0..max_error)
        } else {
            0.0
        };
        let wobble = Quat::from_axis_angle(required.any_orthonormal_vector(), error);

        Pose::new(rig + HAND_OFFSET, wobble * aligned)
    }
}

