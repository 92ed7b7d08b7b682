use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::{DefaultScheduler, RuntimeScheduler};
use crate::{FrameCallbackId, TimerId};

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;
type TimerCallback = Box<dyn FnOnce() + 'static>;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    timers: RefCell<FxHashMap<TimerId, TimerEntry>>,
    next_timer_id: Cell<u64>,
    last_frame_nanos: Cell<Option<u64>>,
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<FrameCallback>,
}

struct TimerEntry {
    /// Frame time at which the timer becomes due. `None` until the first frame
    /// drained after registration.
    deadline_nanos: Option<u64>,
    delay_nanos: u64,
    callback: TimerCallback,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            timers: RefCell::new(FxHashMap::default()),
            next_timer_id: Cell::new(1),
            last_frame_nanos: Cell::new(None),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn has_pending_timers(&self) -> bool {
        !self.timers.borrow().is_empty()
    }

    fn refresh_needs_frame(&self) {
        if !self.has_frame_callbacks() && !self.has_pending_timers() {
            self.needs_frame.set(false);
        }
    }

    fn register_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        drop(callbacks);
        self.refresh_needs_frame();
    }

    fn register_timer(&self, delay_nanos: u64, callback: TimerCallback) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        // The last frame may be arbitrarily old; arm on the next one.
        self.timers.borrow_mut().insert(
            id,
            TimerEntry {
                deadline_nanos: None,
                delay_nanos,
                callback,
            },
        );
        self.schedule();
        id
    }

    fn cancel_timer(&self, id: TimerId) {
        let removed = self.timers.borrow_mut().remove(&id).is_some();
        if removed {
            log::trace!("timer {id} cancelled");
        }
        self.refresh_needs_frame();
    }

    fn take_due_timers(&self, frame_time_nanos: u64) -> SmallVec<[(u64, TimerId, TimerCallback); 4]> {
        let mut timers = self.timers.borrow_mut();
        let mut due_ids: SmallVec<[(u64, TimerId); 4]> = SmallVec::new();
        for (id, entry) in timers.iter_mut() {
            let deadline = *entry
                .deadline_nanos
                .get_or_insert(frame_time_nanos.saturating_add(entry.delay_nanos));
            if deadline <= frame_time_nanos {
                due_ids.push((deadline, *id));
            }
        }
        // Deadline first, then registration order.
        due_ids.sort_unstable();
        due_ids
            .into_iter()
            .filter_map(|(deadline, id)| {
                timers
                    .remove(&id)
                    .map(|entry| (deadline, id, entry.callback))
            })
            .collect()
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.last_frame_nanos.set(Some(frame_time_nanos));

        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: SmallVec<[FrameCallback; 8]> = SmallVec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        if !pending.is_empty() {
            log::trace!(
                "frame {frame_time_nanos}: running {} frame callbacks",
                pending.len()
            );
        }
        for callback in pending {
            callback(frame_time_nanos);
        }

        for (deadline, id, callback) in self.take_due_timers(frame_time_nanos) {
            log::trace!("frame {frame_time_nanos}: timer {id} due at {deadline}");
            callback();
        }

        self.refresh_needs_frame();
    }
}

/// Owner of the frame callback queue and timer table.
///
/// The runtime is single-threaded: callbacks may capture `Rc`/`RefCell` state
/// because they only ever run from [`RuntimeHandle::drain_frame_callbacks`] on
/// the thread that owns the runtime.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }
}

/// Weak handle to a [`Runtime`].
///
/// Every method degrades to a no-op once the runtime has been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Registers a one-shot callback that runs during the first frame whose time
    /// is at least `delay_nanos` past the first frame drained after registration.
    pub fn register_timer(
        &self,
        delay_nanos: u64,
        callback: impl FnOnce() + 'static,
    ) -> Option<TimerId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_timer(delay_nanos, Box::new(callback)))
    }

    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_timer(id);
        }
    }

    /// Runs every pending frame callback, then every timer that is due.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn has_pending_timers(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_pending_timers())
            .unwrap_or(false)
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_nanos.get())
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
