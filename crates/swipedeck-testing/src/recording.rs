//! Effects sink that remembers what a card asked for.

use std::cell::{Cell, RefCell};

use swipedeck_card::{CardEffects, DiscardDirection};

#[derive(Debug, Default)]
pub struct RecordingEffects {
    haptics: Cell<usize>,
    swipes: RefCell<Vec<DiscardDirection>>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn haptic_count(&self) -> usize {
        self.haptics.get()
    }

    pub fn swipes(&self) -> Vec<DiscardDirection> {
        self.swipes.borrow().clone()
    }

    pub fn swipe_count(&self) -> usize {
        self.swipes.borrow().len()
    }
}

impl CardEffects for RecordingEffects {
    fn haptic_feedback(&self) {
        self.haptics.set(self.haptics.get() + 1);
    }

    fn on_swipe(&self, direction: DiscardDirection) {
        self.swipes.borrow_mut().push(direction);
    }
}
