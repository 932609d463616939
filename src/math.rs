//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / `Vec3` inputs, making them straightforward to
//! unit-test.

use bevy::prelude::{Vec2, Vec3};

/// Scroll inputs at or below this magnitude are treated as noise.
pub const ZOOM_INPUT_THRESHOLD: f32 = 0.1;

/// Frame-rate scaled interpolation factor, clamped to `[0, 1]`.
///
/// `rate` is "fraction per second"; large `dt` spikes snap to the target
/// instead of overshooting it.
pub fn damp_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

/// Projects `v` onto the XZ plane and normalizes it (zero if vertical).
pub fn flatten_xz(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Screen-edge scroll direction for a cursor at `cursor` in a window of
/// `size` logical pixels.
///
/// Returns `x` in `{-1, 0, 1}` (left/right) and `y` in `{-1, 0, 1}`
/// (back/forward). `tolerance` is the edge band as a fraction of the window
/// size. Window coordinates have their origin in the top-left corner, so the
/// top band maps to forward.
pub fn edge_scroll_axes(cursor: Vec2, size: Vec2, tolerance: f32) -> Vec2 {
    let mut axes = Vec2::ZERO;

    if cursor.x < tolerance * size.x {
        axes.x = -1.0;
    } else if cursor.x > (1.0 - tolerance) * size.x {
        axes.x = 1.0;
    }

    if cursor.y < tolerance * size.y {
        axes.y = 1.0;
    } else if cursor.y > (1.0 - tolerance) * size.y {
        axes.y = -1.0;
    }

    axes
}

/// New camera height after `scroll` lines of wheel input, or `None` if the
/// input is too small to count.
///
/// Scrolling up (positive) moves the camera down. The result is clamped to
/// `[min, max]`.
pub fn zoom_target(current: f32, scroll: f32, step: f32, min: f32, max: f32) -> Option<f32> {
    let value = -scroll;
    if value.abs() <= ZOOM_INPUT_THRESHOLD {
        return None;
    }
    Some((current + value * step).clamp(min, max))
}

/// Local camera position the zoom is easing towards.
///
/// The camera keeps its XZ offset, moves to `zoom_height`, and additionally
/// backs away (`+Z`) by `zoom_speed` per unit of height still to climb so
/// the viewing angle flattens as it zooms in.
pub fn zoom_offset(local: Vec3, zoom_height: f32, zoom_speed: f32) -> Vec3 {
    let mut target = Vec3::new(local.x, zoom_height, local.z);
    target.z += zoom_speed * (zoom_height - local.y);
    target
}

/// Midpoint of two points on the ground plane.
pub fn ground_midpoint(a: Vec3, b: Vec3) -> Vec3 {
    let mid = (a + b) / 2.0;
    Vec3::new(mid.x, 0.0, mid.z)
}
