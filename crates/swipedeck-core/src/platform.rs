//! Platform abstraction traits for the SwipeDeck runtime.
//!
//! The runtime never drives frames itself. Hosts implement
//! [`RuntimeScheduler`] to learn when a new frame is wanted and then call
//! [`crate::RuntimeHandle::drain_frame_callbacks`] with their frame time.

/// Schedules work for the runtime.
///
/// Implementations are responsible for triggering frame processing on the
/// host's animation clock. They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler for hosts that poll the runtime every frame anyway.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
