//! Side effects a card asks its owner to perform.

use std::rc::Rc;

use crate::discard::DiscardDirection;

/// Owner-side hooks. Both are called synchronously from inside pointer
/// handling or frame draining, never while the card holds internal borrows,
/// so implementations may call back into the card.
pub trait CardEffects {
    fn haptic_feedback(&self);

    /// Called at most once per card, only with `Left` or `Right`.
    fn on_swipe(&self, direction: DiscardDirection);
}

impl<E: CardEffects + ?Sized> CardEffects for Rc<E> {
    fn haptic_feedback(&self) {
        (**self).haptic_feedback();
    }

    fn on_swipe(&self, direction: DiscardDirection) {
        (**self).on_swipe(direction);
    }
}

impl<E: CardEffects + ?Sized> CardEffects for Box<E> {
    fn haptic_feedback(&self) {
        (**self).haptic_feedback();
    }

    fn on_swipe(&self, direction: DiscardDirection) {
        (**self).on_swipe(direction);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEffects;

impl CardEffects for NoopEffects {
    fn haptic_feedback(&self) {}

    fn on_swipe(&self, _direction: DiscardDirection) {}
}

/// Effects backed by optional closures; a missing closure is a no-op.
#[derive(Default)]
pub struct CallbackEffects {
    on_swipe: Option<Box<dyn Fn(DiscardDirection)>>,
    haptics: Option<Box<dyn Fn()>>,
}

impl CallbackEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_swipe(mut self, callback: impl Fn(DiscardDirection) + 'static) -> Self {
        self.on_swipe = Some(Box::new(callback));
        self
    }

    pub fn with_haptics(mut self, callback: impl Fn() + 'static) -> Self {
        self.haptics = Some(Box::new(callback));
        self
    }
}

impl CardEffects for CallbackEffects {
    fn haptic_feedback(&self) {
        if let Some(haptics) = &self.haptics {
            haptics();
        }
    }

    fn on_swipe(&self, direction: DiscardDirection) {
        if let Some(on_swipe) = &self.on_swipe {
            on_swipe(direction);
        }
    }
}
