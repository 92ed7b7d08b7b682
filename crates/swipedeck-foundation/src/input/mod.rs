pub mod types;

pub use types::{EventClock, PointerEvent, PointerEventKind, PointerId};
