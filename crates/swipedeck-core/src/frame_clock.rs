use crate::runtime::RuntimeHandle;
use crate::{FrameCallbackId, TimerId, NANOS_PER_MILLI};

/// Schedules work against the runtime's frame timeline.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Runs `callback` with the timestamp of the next drained frame.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut pending = Some(callback);
        let id = self.runtime.register_frame_callback(move |time| {
            if let Some(callback) = pending.take() {
                callback(time);
            }
        });
        FrameCallbackRegistration {
            runtime: self.runtime.clone(),
            id,
        }
    }

    /// One-shot timer measured on the frame clock.
    pub fn after_millis(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> TimerRegistration {
        let delay_nanos = delay_millis.saturating_mul(NANOS_PER_MILLI);
        TimerRegistration {
            runtime: self.runtime.clone(),
            id: self.runtime.register_timer(delay_nanos, callback),
        }
    }
}

/// Keeps a frame callback queued. Dropping or cancelling removes it.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Same as dropping the registration.
    pub fn cancel(self) {}
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

/// Keeps a one-shot timer armed. Dropping or cancelling disarms it.
pub struct TimerRegistration {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl TimerRegistration {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Same as dropping the registration.
    pub fn cancel(self) {}
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}
