//! Animation system for SwipeDeck
//!
//! Provides frame-clock driven tweens and springs plus piecewise-linear
//! interpolation for mapping one animated value onto another.

mod animation;
mod interpolation;

pub use animation::*;
pub use interpolation::{Extrapolate, Interpolation};

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
