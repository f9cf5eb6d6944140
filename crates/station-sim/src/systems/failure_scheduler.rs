//! Failure scheduling system: breaks a random healthy segment at
//! intervals that shrink as the session goes on.

use rand::Rng;

use station_core::config::SessionConfig;
use station_core::types::SegmentId;

use crate::network::Network;

/// Timer state of the failure scheduler.
#[derive(Debug, Clone, Default)]
pub struct FailureScheduler {
    /// Seconds since the last automatic failure (or since start).
    pub since_last_break_secs: f64,
    /// Whether the first, delayed failure has happened.
    pub first_break_done: bool,
}

impl FailureScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a failure is due after `dt` more seconds of play.
    fn advance(&mut self, played_secs: f64, dt: f64, config: &SessionConfig) -> bool {
        self.since_last_break_secs += dt;

        let due = if self.first_break_done {
            self.since_last_break_secs > config.spawn_interval(played_secs)
        } else {
            played_secs >= config.first_break_delay_secs
        };

        if due {
            self.since_last_break_secs = 0.0;
            self.first_break_done = true;
        }
        due
    }
}

/// Advance the timer and break a segment if one is due.
/// Returns the segment that broke, if any.
pub fn run(
    network: &mut Network,
    rng: &mut impl Rng,
    scheduler: &mut FailureScheduler,
    played_secs: f64,
    dt: f64,
    config: &SessionConfig,
) -> Option<SegmentId> {
    if !scheduler.advance(played_secs, dt, config) {
        return None;
    }

    let broken = network.break_random_healthy(rng);
    match broken {
        Some(id) => log::info!("segment {id} burst at {played_secs:.1}s"),
        None => log::debug!("failure due but every segment is already broken"),
    }
    broken
}
