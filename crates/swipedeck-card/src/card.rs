//! The swipeable profile card.
//!
//! A [`ProfileCard`] owns everything one card needs: the drag tracker, the
//! animated offset, the entrance animation, the view-mode machine and the
//! discard latch. The host feeds it pointer events, drains the runtime once
//! per frame and reads a [`CardFrame`] to draw. Dropping the card cancels all
//! of its frame callbacks and timers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use swipedeck_animation::{Animatable, AnimationSpec, AnimationType, Easing};
use swipedeck_core::{RuntimeHandle, TimerRegistration};
use swipedeck_foundation::{DragEvent, DragTracker, Offset, PointerEvent, Velocity};

use crate::config::CardConfig;
use crate::content::{CardActions, CardContent, ContentHandlers, ContentProps};
use crate::discard::{DiscardDirection, DiscardLatch, SnapEvent};
use crate::effects::CardEffects;
use crate::physics::{settle_velocity, AnchorId, SnapAnchors, SnapResolver};
use crate::view_mode::{
    CardLayout, ContentFlags, Decorations, LayoutMetrics, Transition, ViewMode, ViewModeMachine,
};
use crate::visuals::{CardVisuals, VisualRanges};

/// Everything a renderer needs to draw one frame of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub offset: Offset,
    pub rotation_degrees: f32,
    pub entrance_scale: f32,
    pub helper_icon_scale: f32,
    pub layout: CardLayout,
    pub decorations: Decorations,
    pub content: ContentFlags,
    pub view_mode: ViewMode,
}

pub struct ProfileCard<P: 'static, E: CardEffects + 'static> {
    shared: Rc<CardShared<P, E>>,
}

struct CardShared<P, E> {
    payload: P,
    effects: E,
    config: CardConfig,
    resolver: SnapResolver,
    ranges: VisualRanges,
    metrics: LayoutMetrics,
    offset_x: Animatable<f32>,
    offset_y: Animatable<f32>,
    mount: Animatable<f32>,
    mount_haptic: RefCell<Option<TimerRegistration>>,
    state: RefCell<CardState>,
}

struct CardState {
    tracker: DragTracker,
    view_mode: ViewModeMachine,
    latch: DiscardLatch,
    /// Card offset when the current drag crossed the threshold.
    grab_origin: Offset,
    /// Displayed offset while a finger holds the card.
    live_offset: Option<Offset>,
    last_snap: Option<AnchorId>,
}

impl<P: 'static, E: CardEffects + 'static> ProfileCard<P, E> {
    /// Mounts a card: lays it out, starts the entrance animation and arms
    /// the mount haptic.
    pub fn new(runtime: RuntimeHandle, config: CardConfig, payload: P, effects: E) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("mounting card with an invalid config: {err}");
        }
        if !config.window.is_usable() {
            log::warn!(
                "window {}x{} cannot hold a card; layout collapses",
                config.window.width,
                config.window.height
            );
        }
        let anchors = SnapAnchors::from_width(config.window.width, config.center_damping);
        let resolver = SnapResolver::new(anchors, config.flick_velocity, config.toss_seconds);
        let ranges = VisualRanges::new(&anchors, config.rotation_degrees, config.helper_icon_scale);
        let metrics = LayoutMetrics {
            window: config.window,
            tab_height: config.tab_height,
            bottom_margin: config.bottom_margin,
        };

        let gravity = config.gravity.center();
        let offset_x = Animatable::new(gravity.x, runtime.clone());
        let offset_y = Animatable::new(gravity.y, runtime.clone());
        let mount = Animatable::new(0.0, runtime.clone());
        mount.animate_to(
            1.0,
            AnimationType::Tween(AnimationSpec::tween(
                config.mount_duration_millis,
                Easing::Elastic {
                    bounciness: config.mount_bounciness,
                },
            )),
        );

        let view_mode = ViewModeMachine::new();
        let mut tracker = DragTracker::new().with_threshold(config.drag_threshold);
        tracker.set_capability(view_mode.mode().drag_capability());

        let shared = Rc::new_cyclic(|weak: &Weak<CardShared<P, E>>| {
            let weak = weak.clone();
            let mount_haptic = runtime.frame_clock().after_millis(
                config.mount_haptic_delay_millis,
                move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.mount_haptic.borrow_mut().take();
                        log::debug!("card mounted");
                        shared.effects.haptic_feedback();
                    }
                },
            );
            CardShared {
                payload,
                effects,
                config,
                resolver,
                ranges,
                metrics,
                offset_x,
                offset_y,
                mount,
                mount_haptic: RefCell::new(Some(mount_haptic)),
                state: RefCell::new(CardState {
                    tracker,
                    view_mode,
                    latch: DiscardLatch::new(),
                    grab_origin: Offset::ZERO,
                    live_offset: None,
                    last_snap: None,
                }),
            }
        });

        Self { shared }
    }

    pub fn pointer_input(&self, event: &PointerEvent) {
        self.shared.pointer_input(event);
    }

    /// Sends the card right as if it had been swiped there.
    pub fn like(&self) {
        self.shared.like();
    }

    /// Sends the card left as if it had been swiped there.
    pub fn dislike(&self) {
        self.shared.dislike();
    }

    /// Body press: toggles between card and page.
    pub fn press(&self) {
        self.shared.press();
    }

    /// Close icon: folds a page back into a card.
    pub fn close(&self) {
        self.shared.close();
    }

    /// Handles for content to call back into this card. They do not keep the
    /// card alive.
    pub fn handlers(&self) -> ContentHandlers {
        let weak = Rc::downgrade(&self.shared);
        let target: Weak<dyn CardActions> = weak;
        ContentHandlers::attached(target)
    }

    pub fn content_props(&self) -> ContentProps<'_, P> {
        ContentProps {
            payload: &self.shared.payload,
            flags: self.view_mode().content_flags(),
        }
    }

    /// Lets `content` draw the payload with this card's flags and handlers.
    pub fn render_content(&self, content: &mut impl CardContent<P>) {
        let props = self.content_props();
        let handlers = self.handlers();
        content.render(&props, &handlers);
    }

    pub fn frame(&self) -> CardFrame {
        self.shared.frame()
    }

    pub fn payload(&self) -> &P {
        &self.shared.payload
    }

    pub fn effects(&self) -> &E {
        &self.shared.effects
    }

    pub fn config(&self) -> &CardConfig {
        &self.shared.config
    }

    pub fn anchors(&self) -> &SnapAnchors {
        self.shared.resolver.anchors()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.shared.state.borrow().view_mode.mode()
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.state.borrow().tracker.is_dragging()
    }

    /// Whether the card is still moving toward its last anchor.
    pub fn is_settling(&self) -> bool {
        self.shared.offset_x.is_running() || self.shared.offset_y.is_running()
    }

    /// Whether the card has been swiped away. A consumed card ignores input.
    pub fn is_consumed(&self) -> bool {
        self.shared.state.borrow().latch.is_consumed()
    }

    pub fn discard_direction(&self) -> Option<DiscardDirection> {
        self.shared.state.borrow().latch.direction()
    }

    /// Anchor chosen by the most recent release, like or dislike.
    pub fn last_snap(&self) -> Option<AnchorId> {
        self.shared.state.borrow().last_snap
    }
}

impl<P: 'static, E: CardEffects + 'static> Drop for ProfileCard<P, E> {
    fn drop(&mut self) {
        self.shared.dispose();
    }
}

impl<P, E: CardEffects> CardShared<P, E> {
    fn animated_offset(&self) -> Offset {
        Offset::new(self.offset_x.value(), self.offset_y.value())
    }

    fn pulled(&self, raw: Offset) -> Offset {
        self.config.gravity.pull(raw, self.config.drag_coupling)
    }

    fn pointer_input(&self, event: &PointerEvent) {
        let drag = {
            let mut state = self.state.borrow_mut();
            if state.latch.is_consumed() {
                return;
            }
            state.tracker.on_pointer_event(event)
        };
        let Some(drag) = drag else {
            return;
        };

        match drag {
            DragEvent::Started { delta } => {
                let grabbed = self.animated_offset();
                self.offset_x.stop();
                self.offset_y.stop();
                let displayed = self.pulled(grabbed + delta);
                let mut state = self.state.borrow_mut();
                state.grab_origin = grabbed;
                state.live_offset = Some(displayed);
                log::debug!("card grabbed at ({:.1}, {:.1})", grabbed.x, grabbed.y);
            }
            DragEvent::Moved { delta } => {
                let mut state = self.state.borrow_mut();
                let displayed = self.pulled(state.grab_origin + delta);
                state.live_offset = Some(displayed);
            }
            DragEvent::Released { delta, velocity } => {
                let offset = self.end_drag(delta);
                self.release(offset, velocity);
            }
            DragEvent::Cancelled { delta } => {
                let offset = self.end_drag(delta);
                self.release(offset, Velocity::ZERO);
            }
            DragEvent::Tap { .. } => self.press(),
        }
    }

    fn end_drag(&self, delta: Offset) -> Offset {
        let mut state = self.state.borrow_mut();
        state.live_offset = None;
        self.pulled(state.grab_origin + delta)
    }

    fn release(&self, offset: Offset, velocity: Velocity) {
        let velocity = settle_velocity(velocity);
        let anchor = self.resolver.resolve(offset.x, velocity.x);
        self.offset_x.snap_to(offset.x);
        self.offset_y.snap_to(offset.y);
        self.settle(anchor, velocity);
    }

    /// Springs toward `anchor` and reports the snap.
    fn settle(&self, anchor: AnchorId, velocity: Velocity) {
        let target = *self.resolver.anchors().get(anchor);
        let stiffness = self.config.snap_stiffness;
        self.offset_x.animate_to_with_velocity(
            target.x,
            AnimationType::Spring(target.spring(self.config.edge_damping, stiffness)),
            velocity.x,
        );
        self.offset_y.animate_to_with_velocity(
            self.config.gravity.y,
            AnimationType::Spring(self.config.gravity.return_spring(stiffness)),
            velocity.y,
        );
        self.snapped(SnapEvent { id: anchor });
    }

    fn snapped(&self, event: SnapEvent) {
        let direction = {
            let mut state = self.state.borrow_mut();
            state.last_snap = Some(event.id);
            let direction = state.latch.resolve(event);
            if direction.is_some() {
                state.view_mode.lock();
                state.tracker.reset();
            }
            direction
        };
        if let Some(direction) = direction {
            log::debug!("card discarded {direction:?}");
            self.effects.haptic_feedback();
            self.effects.on_swipe(direction);
        }
    }

    /// Button-driven snap. Keeps the card's current motion if it is not
    /// held; a held card is let go of where it is.
    fn send_to(&self, anchor: AnchorId) {
        let held = {
            let mut state = self.state.borrow_mut();
            if state.latch.is_consumed() {
                return;
            }
            state.tracker.reset();
            state.live_offset.take()
        };
        let velocity = match held {
            Some(offset) => {
                self.offset_x.snap_to(offset.x);
                self.offset_y.snap_to(offset.y);
                Velocity::ZERO
            }
            None => Velocity::new(self.offset_x.velocity(), self.offset_y.velocity()),
        };
        log::debug!("card sent to {anchor}");
        self.settle(anchor, velocity);
    }

    fn change_mode(&self, change: impl FnOnce(&mut ViewModeMachine) -> Option<Transition>) {
        let transition = {
            let mut state = self.state.borrow_mut();
            if state.latch.is_consumed() || state.tracker.is_dragging() {
                return;
            }
            let Some(transition) = change(&mut state.view_mode) else {
                return;
            };
            state.tracker.set_capability(transition.to.drag_capability());
            transition
        };
        log::debug!("card view {:?} -> {:?}", transition.from, transition.to);
        self.effects.haptic_feedback();
    }

    fn frame(&self) -> CardFrame {
        let (offset, mode) = {
            let state = self.state.borrow();
            let offset = state
                .live_offset
                .unwrap_or_else(|| self.animated_offset());
            (offset, state.view_mode.mode())
        };
        let visuals = CardVisuals::compute(offset, self.mount.value(), &self.ranges);
        log::trace!(
            "card frame offset=({:.1}, {:.1}) rotation={:.1}",
            offset.x,
            offset.y,
            visuals.rotation_degrees
        );
        CardFrame {
            offset,
            rotation_degrees: visuals.rotation_degrees,
            entrance_scale: visuals.entrance_scale,
            helper_icon_scale: visuals.helper_icon_scale,
            layout: mode.layout(&self.metrics),
            decorations: mode.decorations(),
            content: mode.content_flags(),
            view_mode: mode,
        }
    }

    fn dispose(&self) {
        if let Some(timer) = self.mount_haptic.borrow_mut().take() {
            timer.cancel();
        }
        self.offset_x.stop();
        self.offset_y.stop();
        self.mount.stop();
        let mut state = self.state.borrow_mut();
        state.tracker.reset();
        state.live_offset = None;
        log::debug!("card disposed");
    }
}

impl<P, E: CardEffects> CardActions for CardShared<P, E> {
    fn press(&self) {
        self.change_mode(ViewModeMachine::press);
    }

    fn like(&self) {
        self.send_to(AnchorId::Right);
    }

    fn dislike(&self) {
        self.send_to(AnchorId::Left);
    }
}

impl<P, E: CardEffects> CardShared<P, E> {
    fn close(&self) {
        self.change_mode(ViewModeMachine::close);
    }
}

#[cfg(test)]
#[path = "tests/card_tests.rs"]
mod tests;
