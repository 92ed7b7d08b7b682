//! Frame-clock runtime for SwipeDeck.
//!
//! Everything that animates in a card (drag pull, snap springs, the entrance
//! tween, delayed haptics) is driven from one single-threaded clock. Hosts
//! call [`RuntimeHandle::drain_frame_callbacks`] once per frame; components
//! register frame callbacks and one-shot timers and hold the returned
//! registrations, which cancel themselves on drop.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, TimerRegistration};
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;
pub type TimerId = u64;

/// Nanoseconds in one millisecond of frame time.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock, TimerRegistration};
    pub use crate::runtime::{Runtime, RuntimeHandle};
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
