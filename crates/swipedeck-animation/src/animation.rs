//! Time-based animations with easing curves and spring physics.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use swipedeck_core::{FrameCallbackRegistration, RuntimeHandle, NANOS_PER_MILLI};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Trait for values that can participate in spring animations.
pub trait SpringScalar: Lerp + Clone {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(&self) -> f32;

    /// Build a value back from the physics representation.
    fn from_f32(value: f32) -> Self;

    /// Determine whether the current value is close enough to the target to
    /// consider the spring finished.
    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current.to_f32() - target.to_f32()).abs() < threshold
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}

/// Easing functions for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// Spring-like overshoot that settles on the target.
    ///
    /// `bounciness == 1.0` overshoots once; `0.0` degenerates to an ease-in.
    Elastic { bounciness: f32 },
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::Elastic { bounciness } => elastic(*bounciness, fraction),
        }
    }
}

fn elastic(bounciness: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }
    let p = bounciness.max(0.0) * PI;
    1.0 - (fraction * PI / 2.0).cos().powi(3) * (fraction * p).cos()
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric `t` of the requested x, falling back to
    // bisection when the derivative flattens out.
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold (units/sec) to stop animation.
    pub velocity_threshold: f32,
    /// Position threshold (units) to stop animation.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.5,
            position_threshold: 0.1,
        }
    }

    /// Create a bouncy spring.
    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn with_damping_ratio(mut self, damping_ratio: f32) -> Self {
        self.damping_ratio = damping_ratio;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// Integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 0.004;

/// Longest frame gap a spring integrates in one go. Longer gaps (a suspended
/// host, a stalled frame) advance the spring by this much only.
const MAX_SPRING_FRAME_NANOS: u64 = 100 * NANOS_PER_MILLI;

/// Generic animatable value holder driven by the runtime's frame clock.
///
/// Clones share the same underlying animation. The pending frame callback
/// holds only a weak reference, so dropping every clone stops the animation
/// and removes its callback from the runtime.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    runtime: RuntimeHandle,
    current: T,
    /// Units per second; only meaningful for springs.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    running: bool,
    registration: Option<FrameCallbackRegistration>,
}

impl<T: SpringScalar + 'static> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            running: false,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate to the target value using the specified animation.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        let velocity = self.inner.borrow().velocity;
        self.animate_to_with_velocity(target, animation, velocity);
    }

    /// Animate to `target`, seeding spring physics with `initial_velocity`
    /// (units per second). Tweens ignore the velocity.
    pub fn animate_to_with_velocity(&self, target: T, animation: AnimationType, initial_velocity: f32) {
        {
            let mut inner = self.inner.borrow_mut();

            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }

            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.velocity = initial_velocity;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.running = true;
        }

        Self::schedule_frame(&self.inner);
    }

    /// Snap immediately to the target value without animating.
    pub fn snap_to(&self, target: T) {
        let mut inner = self.inner.borrow_mut();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.current = target.clone();
        inner.start = target.clone();
        inner.target = target;
        inner.velocity = 0.0;
        inner.start_time_nanos = None;
        inner.last_frame_nanos = None;
        inner.running = false;
    }

    /// Stop wherever the animation currently is.
    pub fn stop(&self) {
        let current = self.value();
        self.snap_to(current);
    }

    /// Current animated value.
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    /// Return the current animation target.
    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || !inner.running {
                return;
            }
            inner.runtime.frame_clock()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let schedule_next = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            let keep_going = match inner.animation_type {
                AnimationType::Tween(spec) => Self::step_tween(&mut inner, spec, frame_time_nanos),
                AnimationType::Spring(spec) => {
                    Self::step_spring(&mut inner, spec, frame_time_nanos)
                }
            };
            if !keep_going {
                inner.running = false;
                log::trace!("animation reached its target at {frame_time_nanos}ns");
            }
            keep_going
        };

        if schedule_next {
            Self::schedule_frame(this);
        }
    }

    fn finish(inner: &mut AnimatableInner<T>) {
        inner.current = inner.target.clone();
        inner.start = inner.target.clone();
        inner.start_time_nanos = None;
        inner.last_frame_nanos = None;
        inner.velocity = 0.0;
    }

    fn step_tween(inner: &mut AnimatableInner<T>, spec: AnimationSpec, frame_time_nanos: u64) -> bool {
        let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let delay_nanos = spec.delay_millis.saturating_mul(NANOS_PER_MILLI);

        if elapsed_nanos < delay_nanos {
            return true;
        }

        let animation_elapsed = elapsed_nanos - delay_nanos;
        let duration_nanos = spec.duration_millis.saturating_mul(NANOS_PER_MILLI).max(1);
        let linear_progress = (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        let progress = spec.easing.transform(linear_progress);
        inner.current = inner.start.lerp(&inner.target, progress);

        if linear_progress >= 1.0 {
            Self::finish(inner);
            false
        } else {
            true
        }
    }

    fn step_spring(inner: &mut AnimatableInner<T>, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let last = *inner.last_frame_nanos.get_or_insert(frame_time_nanos);
        inner.last_frame_nanos = Some(frame_time_nanos);
        let gap_nanos = frame_time_nanos
            .saturating_sub(last)
            .min(MAX_SPRING_FRAME_NANOS);
        let dt = gap_nanos as f32 / 1_000_000_000.0;

        if dt > 0.0 {
            let stiffness = spec.stiffness.max(0.0);
            let damping = 2.0 * spec.damping_ratio.max(0.0) * stiffness.sqrt();
            let target = inner.target.to_f32();
            let mut position = inner.current.to_f32();
            let mut velocity = inner.velocity;

            // Semi-implicit Euler over equal sub-steps no longer than the timestep.
            let steps = (dt / SPRING_TIMESTEP).ceil().max(1.0) as u32;
            let step = dt / steps as f32;
            for _ in 0..steps {
                let force = -stiffness * (position - target) - damping * velocity;
                velocity += force * step;
                position += velocity * step;
            }

            inner.velocity = velocity;
            inner.current = T::from_f32(position);
        }

        let at_rest = inner.velocity.abs() < spec.velocity_threshold;
        let near_target =
            <T as SpringScalar>::is_near_target(&inner.current, &inner.target, spec.position_threshold);

        if at_rest && near_target {
            Self::finish(inner);
            false
        } else {
            true
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
