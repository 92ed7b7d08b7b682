use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callbacks_run_once_with_frame_time() {
    let runtime = Runtime::default();
    let clock = runtime.frame_clock();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let seen_clone = Rc::clone(&seen);
    let _registration = clock.with_frame_nanos(move |time| seen_clone.borrow_mut().push(time));
    assert!(runtime.needs_frame());

    runtime.handle().drain_frame_callbacks(16_000_000);
    runtime.handle().drain_frame_callbacks(32_000_000);

    assert_eq!(seen.borrow().as_slice(), &[16_000_000]);
    assert!(!runtime.needs_frame());
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::default();
    let clock = runtime.frame_clock();
    let fired = Rc::new(Cell::new(false));

    let fired_clone = Rc::clone(&fired);
    let registration = clock.with_frame_nanos(move |_| fired_clone.set(true));
    assert!(runtime.handle().has_frame_callbacks());
    drop(registration);

    assert!(!runtime.handle().has_frame_callbacks());
    runtime.handle().drain_frame_callbacks(16_000_000);
    assert!(!fired.get());
    assert!(!runtime.needs_frame());
}

#[test]
fn scheduler_is_asked_for_frames() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let clock = runtime.frame_clock();

    let _frame = clock.with_frame_nanos(|_| {});
    let _timer = clock.after_millis(10, || {});

    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
}

#[test]
fn timer_delay_counts_from_first_frame_after_registration() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    handle.drain_frame_callbacks(100 * NANOS_PER_MILLI);

    let fired = Rc::new(Cell::new(0));
    let fired_clone = Rc::clone(&fired);
    let _timer = runtime
        .frame_clock()
        .after_millis(50, move || fired_clone.set(fired_clone.get() + 1));

    handle.drain_frame_callbacks(116 * NANOS_PER_MILLI);
    handle.drain_frame_callbacks(150 * NANOS_PER_MILLI);
    handle.drain_frame_callbacks(165 * NANOS_PER_MILLI);
    assert_eq!(fired.get(), 0);
    assert!(handle.has_pending_timers());

    handle.drain_frame_callbacks(166 * NANOS_PER_MILLI);
    assert_eq!(fired.get(), 1);

    handle.drain_frame_callbacks(400 * NANOS_PER_MILLI);
    assert_eq!(fired.get(), 1, "timers are one-shot");
    assert!(!handle.has_pending_timers());
    assert!(!runtime.needs_frame());
}

#[test]
fn timer_ignores_a_stale_last_frame() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    handle.drain_frame_callbacks(0);

    let fired = Rc::new(Cell::new(false));
    let fired_clone = Rc::clone(&fired);
    let _timer = runtime
        .frame_clock()
        .after_millis(50, move || fired_clone.set(true));

    handle.drain_frame_callbacks(10_000 * NANOS_PER_MILLI);
    assert!(!fired.get());
    handle.drain_frame_callbacks(10_049 * NANOS_PER_MILLI);
    assert!(!fired.get());
    handle.drain_frame_callbacks(10_050 * NANOS_PER_MILLI);
    assert!(fired.get());
}

#[test]
fn timer_registered_before_first_frame_arms_on_first_frame() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let fired_at = Rc::new(Cell::new(None));

    let fired_clone = Rc::clone(&fired_at);
    let handle_clone = handle.clone();
    let _timer = runtime.frame_clock().after_millis(50, move || {
        fired_clone.set(handle_clone.last_frame_nanos());
    });

    handle.drain_frame_callbacks(1_000 * NANOS_PER_MILLI);
    assert_eq!(fired_at.get(), None);
    handle.drain_frame_callbacks(1_040 * NANOS_PER_MILLI);
    assert_eq!(fired_at.get(), None);
    handle.drain_frame_callbacks(1_056 * NANOS_PER_MILLI);
    assert_eq!(fired_at.get(), Some(1_056 * NANOS_PER_MILLI));
}

#[test]
fn dropped_timer_never_fires() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let fired = Rc::new(Cell::new(false));

    let fired_clone = Rc::clone(&fired);
    let timer = runtime
        .frame_clock()
        .after_millis(10, move || fired_clone.set(true));
    assert!(timer.is_active());
    timer.cancel();

    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(500 * NANOS_PER_MILLI);
    assert!(!fired.get());
    assert!(!handle.has_pending_timers());
}

#[test]
fn due_timers_run_in_deadline_order() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    handle.drain_frame_callbacks(0);
    let order = Rc::new(RefCell::new(Vec::new()));

    let late = Rc::clone(&order);
    let _a = runtime
        .frame_clock()
        .after_millis(30, move || late.borrow_mut().push("late"));
    let early = Rc::clone(&order);
    let _b = runtime
        .frame_clock()
        .after_millis(10, move || early.borrow_mut().push("early"));

    handle.drain_frame_callbacks(100 * NANOS_PER_MILLI);
    assert!(order.borrow().is_empty());
    handle.drain_frame_callbacks(200 * NANOS_PER_MILLI);
    assert_eq!(order.borrow().as_slice(), &["early", "late"]);
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    let timer = handle.frame_clock().after_millis(5, || {});
    assert!(!timer.is_active());
    handle.drain_frame_callbacks(0);
}
