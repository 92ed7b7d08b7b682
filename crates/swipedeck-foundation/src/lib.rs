//! Geometry, pointer input and drag tracking for SwipeDeck
//!
//! This crate turns a raw pointer stream into drag offsets, release
//! velocities and taps. It knows nothing about cards; the card crate decides
//! what a drag means.

pub mod drag;
pub mod geometry;
pub mod gesture_constants;
pub mod input;
pub mod velocity_tracker;

pub use drag::{DragCapability, DragEvent, DragTracker};
pub use geometry::{Offset, Point, Size, Velocity};
pub use gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
pub use input::{EventClock, PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::drag::{DragCapability, DragEvent, DragTracker};
    pub use crate::geometry::{Offset, Point, Size, Velocity};
    pub use crate::input::{PointerEvent, PointerEventKind};
}
