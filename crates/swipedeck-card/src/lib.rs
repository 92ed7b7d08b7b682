//! Swipeable profile card for SwipeDeck.
//!
//! The card follows the finger under a gravity well pull, springs back to
//! center or flies off to a discard edge when released, and reports at most
//! one swipe to its owner. Tapping the card opens its full-page view.

mod card;
mod config;
mod content;
mod discard;
mod effects;
mod physics;
mod view_mode;
mod visuals;

pub use card::{CardFrame, ProfileCard};
pub use config::{CardConfig, ConfigError, BOTTOM_MARGIN, TAB_HEIGHT};
pub use content::{CardContent, ContentHandlers, ContentProps};
pub use discard::{DiscardDirection, DiscardLatch, SnapEvent};
pub use effects::{CallbackEffects, CardEffects, NoopEffects};
pub use physics::{
    settle_velocity, AnchorId, GravityPoint, SnapAnchor, SnapAnchors, SnapResolver,
    EDGE_WIDTH_FACTOR,
};
pub use view_mode::{
    CardHeight, CardLayout, ContentFlags, Decorations, LayoutMetrics, Transition, ViewMode,
    ViewModeMachine,
};
pub use visuals::{CardVisuals, VisualRanges};

pub mod prelude {
    pub use crate::card::{CardFrame, ProfileCard};
    pub use crate::config::CardConfig;
    pub use crate::content::{CardContent, ContentHandlers, ContentProps};
    pub use crate::discard::DiscardDirection;
    pub use crate::effects::{CallbackEffects, CardEffects, NoopEffects};
    pub use crate::view_mode::ViewMode;
}
