//! Card/page presentation state.
//!
//! A card starts compact with like/dislike buttons. Tapping its body opens
//! the full page (description, hobbies, close icon); tapping again or using
//! the close icon folds it back. Everything the renderer needs per mode is a
//! pure function of [`ViewMode`].

use swipedeck_foundation::{DragCapability, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Card,
    Page,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Card => ViewMode::Page,
            ViewMode::Page => ViewMode::Card,
        }
    }

    pub fn content_flags(self) -> ContentFlags {
        match self {
            ViewMode::Card => ContentFlags {
                show_buttons: true,
                show_description: false,
                show_hobbies: false,
            },
            ViewMode::Page => ContentFlags {
                show_buttons: false,
                show_description: true,
                show_hobbies: true,
            },
        }
    }

    pub fn decorations(self) -> Decorations {
        match self {
            ViewMode::Card => Decorations {
                like_helper: true,
                dislike_helper: true,
                close_icon: false,
            },
            ViewMode::Page => Decorations {
                like_helper: false,
                dislike_helper: false,
                close_icon: true,
            },
        }
    }

    /// A page scrolls vertically, so it takes no drags at all; the card only
    /// moves freely in card mode.
    pub fn drag_capability(self) -> DragCapability {
        match self {
            ViewMode::Card => DragCapability::FREE,
            ViewMode::Page => DragCapability {
                enabled: false,
                horizontal_only: true,
            },
        }
    }

    pub fn layout(self, metrics: &LayoutMetrics) -> CardLayout {
        match self {
            ViewMode::Card => CardLayout {
                height: CardHeight::Fixed(metrics.card_height()),
                margin_bottom: Some(metrics.tab_height),
            },
            ViewMode::Page => CardLayout {
                height: CardHeight::Fill,
                margin_bottom: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentFlags {
    pub show_buttons: bool,
    pub show_description: bool,
    pub show_hobbies: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decorations {
    pub like_helper: bool,
    pub dislike_helper: bool,
    pub close_icon: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardHeight {
    Fixed(f32),
    /// Fill the window.
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub height: CardHeight,
    pub margin_bottom: Option<f32>,
}

/// Window measurements the card layout is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub window: Size,
    pub tab_height: f32,
    pub bottom_margin: f32,
}

impl LayoutMetrics {
    /// Height of the compact card, never negative. An unusable window gives
    /// a zero-height card.
    pub fn card_height(&self) -> f32 {
        if !self.window.is_usable() {
            return 0.0;
        }
        let height = self.window.height - self.tab_height - self.bottom_margin;
        if height.is_finite() {
            height.max(0.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ViewMode,
    pub to: ViewMode,
}

#[derive(Debug, Clone, Default)]
pub struct ViewModeMachine {
    mode: ViewMode,
    locked: bool,
}

impl ViewModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Refuse every later transition.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Body tap: card and page toggle into each other.
    pub fn press(&mut self) -> Option<Transition> {
        let to = self.mode.toggled();
        self.transition(to)
    }

    /// Close icon: only a page can be closed.
    pub fn close(&mut self) -> Option<Transition> {
        match self.mode {
            ViewMode::Page => self.transition(ViewMode::Card),
            ViewMode::Card => None,
        }
    }

    fn transition(&mut self, to: ViewMode) -> Option<Transition> {
        if self.locked {
            log::debug!("view mode locked; ignoring transition to {to:?}");
            return None;
        }
        let from = self.mode;
        self.mode = to;
        log::debug!("view mode {from:?} -> {to:?}");
        Some(Transition { from, to })
    }
}
