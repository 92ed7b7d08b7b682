//! Robot-style driver for a single card.
//!
//! The robot owns a runtime and a card, advances a manual frame clock in
//! 16 ms steps and stamps pointer events with the same clock, so drags,
//! flicks and animations line up exactly as they would on a device.
//!
//! # Example
//!
//! ```
//! use swipedeck_card::{CardConfig, DiscardDirection};
//! use swipedeck_testing::CardRobot;
//!
//! let mut robot = CardRobot::new(CardConfig::default(), "Ada");
//! robot.advance_millis(300);
//! robot.flick_by(250.0, 0.0);
//! robot.wait_for_idle();
//! assert_eq!(robot.effects().swipes(), vec![DiscardDirection::Right]);
//! ```

use std::rc::Rc;

use swipedeck_card::{CardConfig, CardFrame, ProfileCard};
use swipedeck_core::{Runtime, RuntimeHandle, NANOS_PER_MILLI};
use swipedeck_foundation::{Offset, Point, PointerEvent};

use crate::recording::RecordingEffects;

/// Frame interval of the simulated display.
pub const FRAME_MILLIS: u64 = 16;

/// Where gestures start unless a test presses somewhere else.
pub const DEFAULT_POINTER: Point = Point::new(195.0, 400.0);

/// Longest [`CardRobot::wait_for_idle`] keeps pumping before giving up.
const IDLE_TIMEOUT_MILLIS: u64 = 10_000;

pub type RobotCard<P> = ProfileCard<P, Rc<RecordingEffects>>;

pub struct CardRobot<P: 'static> {
    runtime: Runtime,
    effects: Rc<RecordingEffects>,
    card: Option<RobotCard<P>>,
    now_millis: u64,
    started: bool,
    pointer: Point,
}

impl<P: 'static> CardRobot<P> {
    /// Mount a card. No frame has been drawn yet; the first
    /// [`advance_millis`](Self::advance_millis) draws one at time zero.
    pub fn new(config: CardConfig, payload: P) -> Self {
        let runtime = Runtime::default();
        let effects = Rc::new(RecordingEffects::new());
        let card = ProfileCard::new(runtime.handle(), config, payload, effects.clone());
        Self {
            runtime,
            effects,
            card: Some(card),
            now_millis: 0,
            started: false,
            pointer: DEFAULT_POINTER,
        }
    }

    pub fn card(&self) -> &RobotCard<P> {
        self.card.as_ref().expect("card was dropped")
    }

    pub fn effects(&self) -> &RecordingEffects {
        &self.effects
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn now_millis(&self) -> u64 {
        self.now_millis
    }

    pub fn frame(&self) -> CardFrame {
        self.card().frame()
    }

    pub fn offset(&self) -> Offset {
        self.frame().offset
    }

    /// Draw one frame at the current time.
    pub fn pump_frame(&mut self) {
        self.started = true;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.now_millis * NANOS_PER_MILLI);
    }

    /// Move the clock forward, drawing a frame every [`FRAME_MILLIS`] and one
    /// at the exact end time.
    pub fn advance_millis(&mut self, millis: u64) {
        if !self.started {
            self.pump_frame();
        }
        let end = self.now_millis + millis;
        while self.now_millis < end {
            self.now_millis = (self.now_millis + FRAME_MILLIS).min(end);
            self.pump_frame();
        }
    }

    /// Pump frames until the runtime has nothing left to do.
    pub fn wait_for_idle(&mut self) {
        let deadline = self.now_millis + IDLE_TIMEOUT_MILLIS;
        if !self.started {
            self.pump_frame();
        }
        while self.has_pending_work() && self.now_millis < deadline {
            self.advance_millis(FRAME_MILLIS);
        }
    }

    pub fn has_pending_work(&self) -> bool {
        let handle = self.runtime.handle();
        handle.has_frame_callbacks() || handle.has_pending_timers()
    }

    pub fn press_at(&mut self, x: f32, y: f32) {
        self.pointer = Point::new(x, y);
        self.send(PointerEvent::down(self.pointer, self.uptime()));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pointer = Point::new(x, y);
        self.send(PointerEvent::moved(self.pointer, self.uptime()));
    }

    pub fn release(&mut self) {
        self.send(PointerEvent::up(self.pointer, self.uptime()));
    }

    pub fn cancel(&mut self) {
        self.send(PointerEvent::cancel(self.pointer, self.uptime()));
    }

    /// Press and release without moving.
    pub fn tap(&mut self) {
        self.press_at(DEFAULT_POINTER.x, DEFAULT_POINTER.y);
        self.advance_millis(FRAME_MILLIS);
        self.release();
    }

    /// Press, move by `(dx, dy)` in `steps` equal moves spread over
    /// `duration_millis`, and keep holding.
    pub fn hold_drag_by(&mut self, dx: f32, dy: f32, duration_millis: u64, steps: u32) {
        let steps = steps.max(1);
        let start = DEFAULT_POINTER;
        self.press_at(start.x, start.y);
        let step_millis = duration_millis / u64::from(steps);
        for i in 1..=steps {
            self.advance_millis(step_millis);
            let fraction = i as f32 / steps as f32;
            self.move_to(start.x + dx * fraction, start.y + dy * fraction);
        }
    }

    /// A drag released immediately after its last move.
    pub fn drag_by(&mut self, dx: f32, dy: f32, duration_millis: u64, steps: u32) {
        self.hold_drag_by(dx, dy, duration_millis, steps);
        self.release();
    }

    /// A deliberate drag: moves are far enough apart in time that the
    /// release reads as stationary.
    pub fn slow_drag_by(&mut self, dx: f32, dy: f32) {
        self.drag_by(dx, dy, 8 * 60, 8);
    }

    /// A quick flick over 80 ms.
    pub fn flick_by(&mut self, dx: f32, dy: f32) {
        self.drag_by(dx, dy, 80, 8);
    }

    /// Unmount the card. Returns false if it was already gone.
    pub fn drop_card(&mut self) -> bool {
        self.card.take().is_some()
    }

    fn uptime(&self) -> i64 {
        self.now_millis as i64
    }

    fn send(&mut self, event: PointerEvent) {
        if let Some(card) = &self.card {
            card.pointer_input(&event);
        }
    }
}
