use crate::geometry::Point;
use web_time::Instant;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample in card-local coordinates.
///
/// `uptime_millis` must be monotonic within a gesture; it feeds the release
/// velocity estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub uptime_millis: i64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime_millis: i64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            uptime_millis,
        }
    }

    pub fn down(position: Point, uptime_millis: i64) -> Self {
        Self::new(PointerEventKind::Down, position, uptime_millis)
    }

    pub fn moved(position: Point, uptime_millis: i64) -> Self {
        Self::new(PointerEventKind::Move, position, uptime_millis)
    }

    pub fn up(position: Point, uptime_millis: i64) -> Self {
        Self::new(PointerEventKind::Up, position, uptime_millis)
    }

    pub fn cancel(position: Point, uptime_millis: i64) -> Self {
        Self::new(PointerEventKind::Cancel, position, uptime_millis)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }
}

/// Stamps pointer events with milliseconds since the clock was created.
///
/// Hosts that receive platform events without a usable timestamp use this to
/// produce `uptime_millis`. Backed by `web_time` so it also works on wasm.
#[derive(Clone, Copy, Debug)]
pub struct EventClock {
    origin: Instant,
}

impl EventClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn uptime_millis(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }

    pub fn stamp(&self, kind: PointerEventKind, position: Point) -> PointerEvent {
        PointerEvent::new(kind, position, self.uptime_millis())
    }
}

impl Default for EventClock {
    fn default() -> Self {
        Self::new()
    }
}
