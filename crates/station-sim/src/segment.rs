//! Pipe segment state machine.
//!
//! A segment is either healthy or broken. While broken it owns a
//! replacement-part token that lies on the floor until an agent picks it
//! up. Placement is a separate immutable component; operations that need
//! to place the token take it by reference.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use station_core::components::{LeakEffect, PartToken, Placement};
use station_core::constants::*;
use station_core::enums::SegmentState;
use station_core::types::Pose;

/// Authoritative state of one pipe segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    state: SegmentState,
    part: PartToken,
    /// The token is in an agent's hand.
    part_held: bool,
    leak: LeakEffect,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SegmentState {
        self.state
    }

    pub fn is_broken(&self) -> bool {
        self.state == SegmentState::Broken
    }

    pub fn part(&self) -> &PartToken {
        &self.part
    }

    /// Whether an agent is carrying this segment's token.
    pub fn part_held(&self) -> bool {
        self.part_held
    }

    /// Whether the part token can be picked up right now.
    pub fn part_available(&self) -> bool {
        self.is_broken() && self.part.available
    }

    pub fn leak_intensity(&self) -> f32 {
        self.leak.intensity
    }

    pub fn leak(&self) -> &LeakEffect {
        &self.leak
    }

    /// Fail the segment and start leaking. The part goes on the floor
    /// unless an agent is still carrying it from an earlier break; it lands
    /// when that agent lets go. Returns `false` if it was already broken.
    pub fn break_segment(&mut self, placement: &Placement, rng: &mut impl Rng) -> bool {
        if self.is_broken() {
            return false;
        }
        self.state = SegmentState::Broken;
        self.leak = LeakEffect {
            intensity: LEAK_INTENSITY,
            elapsed_secs: 0.0,
        };
        if !self.part_held {
            self.place_part(placement, rng);
        }
        true
    }

    /// Take the part off the floor. Fails if someone already has it.
    pub fn try_pickup(&mut self) -> bool {
        if !self.part_available() {
            return false;
        }
        self.part.available = false;
        self.part_held = true;
        true
    }

    /// The token leaves the agent's hand and goes back on the floor at a
    /// new random spot. Healthy segments have no part, so nothing lands
    /// and this returns `false`.
    pub fn respawn_part(&mut self, placement: &Placement, rng: &mut impl Rng) -> bool {
        self.part_held = false;
        if !self.is_broken() {
            return false;
        }
        self.place_part(placement, rng);
        true
    }

    fn place_part(&mut self, placement: &Placement, rng: &mut impl Rng) {
        self.part = PartToken {
            available: true,
            pose: random_part_pose(placement, rng),
        };
    }

    /// Mark the segment healthy. Orientation is checked by the caller.
    /// Returns `false` if it was already healthy.
    pub fn repair(&mut self) -> bool {
        if !self.is_broken() {
            return false;
        }
        self.state = SegmentState::Healthy;
        self.part.available = false;
        self.leak = LeakEffect::default();
        true
    }

    /// Advance the cosmetic leak clock.
    pub fn tick(&mut self, dt: f32) {
        if self.is_broken() {
            self.leak.elapsed_secs += dt;
        }
    }

    /// Healthy, no part on the floor, no leak.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Random resting pose for a dropped part: on the floor, inset from the
/// segment's wall, shifted along the corridor, with a random yaw.
pub fn random_part_pose(placement: &Placement, rng: &mut impl Rng) -> Pose {
    let offset: f32 = rng.gen_range(-SPARE_PART_MAX_OFFSET..SPARE_PART_MAX_OFFSET);
    let yaw: f32 = rng.gen_range(0.0..PI);

    let position = Vec3::new(
        placement.side.sign() * (PIPE_WALL_X - SPARE_PART_INSET),
        SPARE_PART_REST_HEIGHT,
        placement.center.z + offset,
    );
    // Lying flat: pipe axis tipped onto the floor, then spun about vertical.
    let orientation = Quat::from_rotation_y(yaw) * Quat::from_rotation_z(FRAC_PI_2);

    Pose::new(position, orientation)
}
