//! Drag gesture tracking: pointer stream in, cumulative offset out.
//!
//! The tracker follows one pointer at a time. A press becomes a drag once it
//! travels further than the drag threshold; a press released before that is
//! a tap. Offsets are always measured from the press origin, so crossing the
//! threshold never makes the card jump.

use crate::geometry::{Offset, Point, Velocity};
use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::input::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker;

/// What the owner currently allows the pointer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragCapability {
    /// Whether a press may turn into a drag. Taps are reported either way.
    pub enabled: bool,
    /// Forces the vertical component of every offset and velocity to zero.
    pub horizontal_only: bool,
}

impl DragCapability {
    pub const FREE: DragCapability = DragCapability {
        enabled: true,
        horizontal_only: false,
    };

    pub const DISABLED: DragCapability = DragCapability {
        enabled: false,
        horizontal_only: false,
    };

    fn constrain(&self, offset: Offset) -> Offset {
        if self.horizontal_only {
            Offset::new(offset.x, 0.0)
        } else {
            offset
        }
    }
}

impl Default for DragCapability {
    fn default() -> Self {
        Self::FREE
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// The press crossed the threshold. `delta` is measured from the origin.
    Started { delta: Offset },
    Moved { delta: Offset },
    Released { delta: Offset, velocity: Velocity },
    /// The platform took the pointer away mid-drag.
    Cancelled { delta: Offset },
    Tap { position: Point },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum GestureState {
    Idle,
    Pressed {
        pointer: PointerId,
        origin: Point,
        slop_passed: bool,
    },
    Dragging {
        pointer: PointerId,
        origin: Point,
    },
}

pub struct DragTracker {
    state: GestureState,
    capability: DragCapability,
    velocity: VelocityTracker,
    threshold: f32,
    max_velocity: f32,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            capability: DragCapability::FREE,
            velocity: VelocityTracker::new(),
            threshold: DRAG_THRESHOLD,
            max_velocity: MAX_FLING_VELOCITY,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn capability(&self) -> DragCapability {
        self.capability
    }

    /// Takes effect for presses that have not become drags yet; an active drag
    /// keeps the capability it started with until it ends.
    pub fn set_capability(&mut self, capability: DragCapability) {
        self.capability = capability;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn is_pressed(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Forget the current gesture without reporting anything.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.velocity.reset();
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        match event.kind {
            PointerEventKind::Down => self.on_down(event),
            PointerEventKind::Move => self.on_move(event),
            PointerEventKind::Up => self.on_up(event),
            PointerEventKind::Cancel => self.on_cancel(event),
        }
    }

    fn tracked_pointer(&self) -> Option<PointerId> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Pressed { pointer, .. } | GestureState::Dragging { pointer, .. } => {
                Some(pointer)
            }
        }
    }

    fn on_down(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        if let Some(pointer) = self.tracked_pointer() {
            if pointer != event.id {
                return None;
            }
            log::debug!("pointer {} pressed again without release; restarting", event.id);
        }
        self.velocity.reset();
        self.velocity.add_position(event.uptime_millis, event.position);
        self.state = GestureState::Pressed {
            pointer: event.id,
            origin: event.position,
            slop_passed: false,
        };
        None
    }

    fn on_move(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        if self.tracked_pointer() != Some(event.id) {
            return None;
        }
        self.velocity.add_position(event.uptime_millis, event.position);

        match self.state {
            GestureState::Pressed {
                pointer,
                origin,
                slop_passed,
            } => {
                let raw = event.position - origin;
                let past_threshold = raw.distance() > self.threshold;
                if !past_threshold {
                    return None;
                }
                let delta = self.capability.constrain(raw);
                if self.capability.enabled && delta.distance() > self.threshold {
                    log::debug!("drag started at ({:.1}, {:.1})", delta.x, delta.y);
                    self.state = GestureState::Dragging { pointer, origin };
                    Some(DragEvent::Started { delta })
                } else {
                    if !slop_passed {
                        self.state = GestureState::Pressed {
                            pointer,
                            origin,
                            slop_passed: true,
                        };
                    }
                    None
                }
            }
            GestureState::Dragging { origin, .. } => Some(DragEvent::Moved {
                delta: self.capability.constrain(event.position - origin),
            }),
            GestureState::Idle => None,
        }
    }

    fn on_up(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        if self.tracked_pointer() != Some(event.id) {
            return None;
        }
        self.velocity.add_position(event.uptime_millis, event.position);
        let result = match self.state {
            GestureState::Pressed { slop_passed, .. } => {
                (!slop_passed).then_some(DragEvent::Tap {
                    position: event.position,
                })
            }
            GestureState::Dragging { origin, .. } => {
                let raw_velocity = self.velocity.calculate_velocity_with_max(self.max_velocity);
                let velocity = if self.capability.horizontal_only {
                    Velocity::new(raw_velocity.x, 0.0)
                } else {
                    raw_velocity
                };
                let delta = self.capability.constrain(event.position - origin);
                log::debug!(
                    "drag released at ({:.1}, {:.1}) with velocity ({:.0}, {:.0})",
                    delta.x,
                    delta.y,
                    velocity.x,
                    velocity.y
                );
                Some(DragEvent::Released { delta, velocity })
            }
            GestureState::Idle => None,
        };
        self.reset();
        result
    }

    fn on_cancel(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        if self.tracked_pointer() != Some(event.id) {
            return None;
        }
        let result = match self.state {
            GestureState::Dragging { origin, .. } => Some(DragEvent::Cancelled {
                delta: self.capability.constrain(event.position - origin),
            }),
            _ => None,
        };
        self.reset();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(tracker: &mut DragTracker, x: f32, y: f32, t: i64) -> Option<DragEvent> {
        tracker.on_pointer_event(&PointerEvent::down(Point::new(x, y), t))
    }

    fn drag_to(tracker: &mut DragTracker, x: f32, y: f32, t: i64) -> Option<DragEvent> {
        tracker.on_pointer_event(&PointerEvent::moved(Point::new(x, y), t))
    }

    fn release(tracker: &mut DragTracker, x: f32, y: f32, t: i64) -> Option<DragEvent> {
        tracker.on_pointer_event(&PointerEvent::up(Point::new(x, y), t))
    }

    #[test]
    fn press_and_release_in_place_is_a_tap() {
        let mut tracker = DragTracker::new();
        assert_eq!(press(&mut tracker, 100.0, 100.0, 0), None);
        assert_eq!(drag_to(&mut tracker, 103.0, 101.0, 16), None);
        assert_eq!(
            release(&mut tracker, 103.0, 101.0, 32),
            Some(DragEvent::Tap {
                position: Point::new(103.0, 101.0)
            })
        );
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn offsets_are_cumulative_from_press_origin() {
        let mut tracker = DragTracker::new();
        press(&mut tracker, 100.0, 100.0, 0);
        assert_eq!(
            drag_to(&mut tracker, 120.0, 105.0, 16),
            Some(DragEvent::Started {
                delta: Offset::new(20.0, 5.0)
            })
        );
        assert_eq!(
            drag_to(&mut tracker, 160.0, 90.0, 32),
            Some(DragEvent::Moved {
                delta: Offset::new(60.0, -10.0)
            })
        );
        assert!(tracker.is_dragging());
    }

    #[test]
    fn release_reports_delta_and_velocity() {
        let mut tracker = DragTracker::new();
        press(&mut tracker, 0.0, 0.0, 0);
        drag_to(&mut tracker, 50.0, 0.0, 10);
        drag_to(&mut tracker, 100.0, 0.0, 20);
        let Some(DragEvent::Released { delta, velocity }) = release(&mut tracker, 150.0, 0.0, 30)
        else {
            panic!("expected a release");
        };
        assert_eq!(delta, Offset::new(150.0, 0.0));
        assert!(velocity.x > 1_000.0);
        assert_eq!(velocity.y, 0.0);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn disabled_capability_never_starts_a_drag() {
        let mut tracker = DragTracker::new();
        tracker.set_capability(DragCapability::DISABLED);
        press(&mut tracker, 0.0, 0.0, 0);
        assert_eq!(drag_to(&mut tracker, 200.0, 0.0, 16), None);
        assert!(!tracker.is_dragging());
        assert_eq!(
            release(&mut tracker, 200.0, 0.0, 32),
            None,
            "a press that travelled is not a tap"
        );
    }

    #[test]
    fn disabled_capability_still_reports_taps() {
        let mut tracker = DragTracker::new();
        tracker.set_capability(DragCapability::DISABLED);
        press(&mut tracker, 10.0, 10.0, 0);
        assert!(matches!(
            release(&mut tracker, 10.0, 10.0, 50),
            Some(DragEvent::Tap { .. })
        ));
    }

    #[test]
    fn horizontal_only_zeroes_vertical_motion() {
        let mut tracker = DragTracker::new();
        tracker.set_capability(DragCapability {
            enabled: true,
            horizontal_only: true,
        });
        press(&mut tracker, 0.0, 0.0, 0);
        assert_eq!(
            drag_to(&mut tracker, 5.0, 40.0, 16),
            None,
            "vertical travel alone does not start a horizontal drag"
        );
        assert_eq!(
            drag_to(&mut tracker, 30.0, 60.0, 32),
            Some(DragEvent::Started {
                delta: Offset::new(30.0, 0.0)
            })
        );
        let Some(DragEvent::Released { delta, velocity }) = release(&mut tracker, 60.0, 90.0, 48)
        else {
            panic!("expected a release");
        };
        assert_eq!(delta.y, 0.0);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn other_pointers_are_ignored_while_tracking() {
        let mut tracker = DragTracker::new();
        press(&mut tracker, 0.0, 0.0, 0);
        let stray = PointerEvent::down(Point::new(300.0, 300.0), 5).with_id(7);
        assert_eq!(tracker.on_pointer_event(&stray), None);
        let stray_move = PointerEvent::moved(Point::new(400.0, 300.0), 6).with_id(7);
        assert_eq!(tracker.on_pointer_event(&stray_move), None);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn cancel_mid_drag_reports_last_offset() {
        let mut tracker = DragTracker::new();
        press(&mut tracker, 0.0, 0.0, 0);
        drag_to(&mut tracker, 40.0, 0.0, 16);
        assert_eq!(
            tracker.on_pointer_event(&PointerEvent::cancel(Point::new(45.0, 0.0), 32)),
            Some(DragEvent::Cancelled {
                delta: Offset::new(45.0, 0.0)
            })
        );
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn cancel_before_threshold_is_silent() {
        let mut tracker = DragTracker::new();
        press(&mut tracker, 0.0, 0.0, 0);
        assert_eq!(
            tracker.on_pointer_event(&PointerEvent::cancel(Point::new(1.0, 0.0), 16)),
            None
        );
    }

    #[test]
    fn custom_threshold_is_respected() {
        let mut tracker = DragTracker::new().with_threshold(30.0);
        press(&mut tracker, 0.0, 0.0, 0);
        assert_eq!(drag_to(&mut tracker, 20.0, 0.0, 16), None);
        assert!(matches!(
            drag_to(&mut tracker, 31.0, 0.0, 32),
            Some(DragEvent::Started { .. })
        ));
    }
}
