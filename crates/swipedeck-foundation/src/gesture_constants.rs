//! Shared gesture constants for touch/pointer handling.
//!
//! Values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor.

/// Drag threshold in logical pixels.
///
/// A press that moves further than this from its origin becomes a drag and
/// can no longer be reported as a tap. Android uses ~8dp for
/// `ViewConfiguration.TOUCH_SLOP`.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum release velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity on a baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
