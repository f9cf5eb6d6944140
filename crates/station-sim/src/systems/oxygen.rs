//! Resource system: runs the clock down and moves oxygen with the number
//! of broken segments.

use station_core::config::SessionConfig;

use crate::resources::Resources;

/// Oxygen change per second for a given number of broken segments.
/// Negative while anything leaks, positive when the network is whole.
pub fn oxygen_rate(broken: usize, config: &SessionConfig) -> f64 {
    if broken > 0 {
        -(config.oxygen_base_decay_per_sec
            + broken as f64 * config.oxygen_decay_per_broken_per_sec)
    } else {
        config.oxygen_recovery_per_sec
    }
}

/// Advance time and oxygen by `dt` seconds, then clamp.
pub fn run(resources: &mut Resources, broken: usize, dt: f64, config: &SessionConfig) {
    resources.time_remaining -= dt;
    resources.oxygen += oxygen_rate(broken, config) * dt;
    resources.clamp();
}
