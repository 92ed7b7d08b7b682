//! The contract between a card and whatever renders its payload.

use std::rc::Weak;

use crate::view_mode::ContentFlags;

/// What a content renderer gets to draw from.
#[derive(Debug)]
pub struct ContentProps<'a, P> {
    pub payload: &'a P,
    pub flags: ContentFlags,
}

impl<P> Clone for ContentProps<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for ContentProps<'_, P> {}

/// Renders a card's payload. The card decides what is shown through the
/// flags; the renderer wires its buttons and body to the handlers.
pub trait CardContent<P> {
    fn render(&mut self, props: &ContentProps<'_, P>, handlers: &ContentHandlers);
}

impl<P, F> CardContent<P> for F
where
    F: FnMut(&ContentProps<'_, P>, &ContentHandlers),
{
    fn render(&mut self, props: &ContentProps<'_, P>, handlers: &ContentHandlers) {
        self(props, handlers)
    }
}

/// Card operations reachable from rendered content.
pub(crate) trait CardActions {
    fn press(&self);
    fn like(&self);
    fn dislike(&self);
}

/// Handles the renderer can keep and call later. They hold the card weakly:
/// once the card is dropped every call is a no-op.
#[derive(Clone, Default)]
pub struct ContentHandlers {
    target: Option<Weak<dyn CardActions>>,
}

impl ContentHandlers {
    pub(crate) fn attached(target: Weak<dyn CardActions>) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Handlers bound to nothing.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.target
            .as_ref()
            .is_some_and(|target| target.strong_count() > 0)
    }

    pub fn on_press(&self) {
        self.with_target(|card| card.press());
    }

    pub fn on_like(&self) {
        self.with_target(|card| card.like());
    }

    pub fn on_dislike(&self) {
        self.with_target(|card| card.dislike());
    }

    fn with_target(&self, f: impl FnOnce(&dyn CardActions)) {
        match self.target.as_ref().and_then(Weak::upgrade) {
            Some(card) => f(&*card),
            None => log::trace!("content handler called without a live card"),
        }
    }
}

impl std::fmt::Debug for ContentHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentHandlers")
            .field("attached", &self.is_attached())
            .finish()
    }
}
