//! Orientation check for inserting a replacement part.
//!
//! Pure geometry with no hidden state. A pipe has no distinguishable ends,
//! so a part held the wrong way round is as good as one held the right way.

use glam::Vec3;

use station_core::components::Placement;

/// World axis a part must line up with to fit a segment: vertical for
/// connectors, along the corridor for horizontal runs.
pub fn required_axis(placement: &Placement) -> Vec3 {
    if placement.vertical {
        Vec3::Y
    } else {
        Vec3::Z
    }
}

/// Angle between two lines (radians, `0..=π/2`), ignoring direction.
/// `None` if either axis has no usable length.
pub fn line_angle(a: Vec3, b: Vec3) -> Option<f32> {
    let a = a.try_normalize()?;
    let b = b.try_normalize()?;
    Some(a.dot(b).abs().clamp(0.0, 1.0).acos())
}

/// Whether `held_axis` is within `tolerance_rad` of `required_axis` or of
/// its opposite.
pub fn is_aligned(held_axis: Vec3, required_axis: Vec3, tolerance_rad: f32) -> bool {
    line_angle(held_axis, required_axis).is_some_and(|angle| angle <= tolerance_rad)
}
