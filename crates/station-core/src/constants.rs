//! Simulation constants and tuning parameters.

use glam::Vec3;

/// Nominal headset frame rate used by headless drivers (Hz).
pub const DEFAULT_FRAME_RATE: u32 = 72;

// --- Session ---

/// Length of one survival session in seconds.
pub const SESSION_LENGTH_SECS: f64 = 120.0;

/// Oxygen level at session start (percent).
pub const STARTING_OXYGEN: f64 = 100.0;

/// Upper clamp for oxygen (percent).
pub const OXYGEN_MAX: f64 = 100.0;

/// Oxygen lost per second while at least one segment is broken.
pub const OXYGEN_BASE_DECAY_PER_SEC: f64 = 1.0;

/// Additional oxygen lost per second for every broken segment.
pub const OXYGEN_DECAY_PER_BROKEN_PER_SEC: f64 = 1.5;

/// Oxygen regained per second while the whole network is healthy.
pub const OXYGEN_RECOVERY_PER_SEC: f64 = 2.0;

/// Oxygen granted for every successful repair.
pub const REPAIR_OXYGEN_BONUS: f64 = 10.0;

/// Oxygen at or below this level is shown as critical (percent).
pub const OXYGEN_WARNING_THRESHOLD: f64 = 30.0;

/// Remaining time below this is shown as critical (seconds).
pub const TIME_WARNING_THRESHOLD_SECS: f64 = 30.0;

// --- Failure scheduling ---

/// Grace period after session start before the first automatic failure.
pub const FIRST_BREAK_DELAY_SECS: f64 = 3.0;

/// Difficulty tiers as (played seconds at which the tier starts, spawn interval seconds).
pub const DIFFICULTY_TIERS: [(f64, f64); 4] = [(0.0, 8.0), (30.0, 6.0), (60.0, 4.0), (90.0, 2.5)];

// --- Interaction ---

/// Number of tracked controllers (carrying agents).
pub const AGENT_COUNT: usize = 2;

/// Maximum angle between held part and required axis (degrees).
/// Started at 30 and was tightened to 15.
pub const ALIGNMENT_TOLERANCE_DEG: f64 = 15.0;

/// Ray hits farther than this are ignored (meters).
pub const MAX_INTERACT_DISTANCE: f32 = 3.0;

/// Axis of the held part in the controller's local frame.
/// The part lies across the closed fist.
pub const HELD_PART_LOCAL_AXIS: Vec3 = Vec3::X;

// --- Layout ---

/// Number of longitudinal stations along the corridor.
pub const STATION_COUNT: usize = 8;

/// Corridor z of the first station (meters).
pub const CORRIDOR_START_Z: f32 = -8.75;

/// Distance between consecutive stations; also the horizontal segment length.
pub const STATION_SPACING: f32 = 2.5;

/// Pipe height at a high junction (meters).
pub const PIPE_HIGH_Y: f32 = 1.3;

/// Pipe height at a low junction (meters).
pub const PIPE_LOW_Y: f32 = 0.75;

/// Distance of the pipe runs from the corridor centreline (meters).
pub const PIPE_WALL_X: f32 = 1.45;

/// Half extents of the repair socket trigger box in segment-local axes
/// (across, up, along the pipe).
pub const SOCKET_HALF_EXTENTS: Vec3 = Vec3::new(0.15, 0.15, 0.25);

// --- Replacement parts ---

/// How far in from its wall a dropped part rests (meters).
pub const SPARE_PART_INSET: f32 = 1.0;

/// Resting height of a part above the floor (meters).
pub const SPARE_PART_REST_HEIGHT: f32 = 0.05;

/// Maximum offset of a part along the corridor from its segment (meters).
pub const SPARE_PART_MAX_OFFSET: f32 = 0.75;

// --- Cosmetics ---

/// Leak intensity reported for a broken segment.
pub const LEAK_INTENSITY: f32 = 0.4;

// --- Floor ---

/// Half width of the walkable floor (meters).
pub const FLOOR_HALF_WIDTH: f32 = 1.0;

/// Half length of the walkable floor (meters).
pub const FLOOR_HALF_LENGTH: f32 = 10.0;

/// Player rig position at session start.
pub const PLAYER_START: Vec3 = Vec3::new(0.0, 0.0, 3.0);
