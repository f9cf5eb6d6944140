//! Formatting of session values for the status screen and menu panel.
//!
//! Pure functions; the render collaborator only draws the result.

use crate::constants::{OXYGEN_MAX, OXYGEN_WARNING_THRESHOLD, TIME_WARNING_THRESHOLD_SECS};
use crate::state::{HudView, MenuView};

/// Format seconds as `M:SS`, rounding down.
pub fn format_clock(secs: f64) -> String {
    let whole = if secs.is_finite() { secs.max(0.0).floor() as u64 } else { 0 };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Oxygen rounded to a whole percent.
pub fn oxygen_percent(oxygen: f64) -> u32 {
    oxygen.clamp(0.0, OXYGEN_MAX).round() as u32
}

/// Build the status screen values.
pub fn build_hud(time_remaining: f64, oxygen: f64) -> HudView {
    HudView {
        clock: format_clock(time_remaining),
        oxygen_percent: oxygen_percent(oxygen),
        oxygen_fraction: (oxygen.clamp(0.0, OXYGEN_MAX) / OXYGEN_MAX) as f32,
        time_critical: time_remaining < TIME_WARNING_THRESHOLD_SECS,
        oxygen_critical: oxygen <= OXYGEN_WARNING_THRESHOLD,
    }
}

impl MenuView {
    /// Headline of the panel.
    pub fn title(&self) -> &'static str {
        match self {
            MenuView::Start => "STATION SAVER",
            MenuView::GameOver { .. } => "GAME OVER",
            MenuView::Success { .. } => "SUCCESS!",
        }
    }

    /// Body lines under the headline.
    pub fn body(&self) -> Vec<String> {
        match self {
            MenuView::Start => vec![
                "- GRIP (Side Button): Teleport".to_string(),
                "- TRIGGER (Front Button): Grab & Fix".to_string(),
                "- Rotate hand to align pipe!".to_string(),
            ],
            MenuView::GameOver { reason } => vec![reason.clone()],
            MenuView::Success { oxygen_left } => vec![format!("Oxygen: {oxygen_left}%")],
        }
    }

    /// Button prompt at the bottom of the panel.
    pub fn prompt(&self) -> &'static str {
        match self {
            MenuView::Start => "PRESS [ A ] or [ X ] TO START",
            MenuView::GameOver { .. } | MenuView::Success { .. } => "PRESS [ A ] TO RESTART",
        }
    }
}
