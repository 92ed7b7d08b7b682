//! Testing utilities and harness for SwipeDeck cards

pub mod recording;
pub mod robot;
pub mod robot_assertions;

pub use recording::RecordingEffects;
pub use robot::*;
pub use robot_assertions::{assert_approx_eq, assert_offset_approx_eq};

pub mod prelude {
    pub use crate::recording::RecordingEffects;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use crate::robot_assertions::{assert_approx_eq, assert_offset_approx_eq};
}
