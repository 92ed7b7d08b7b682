//! Card configuration.
//!
//! Defaults reproduce the tuning of the shipped card: an 80px tab bar, a
//! 150px bottom margin, a 2000-strength gravity well with a 40px falloff,
//! ±40° rotation and a 200ms elastic entrance.

use std::fmt;

use swipedeck_foundation::{Size, DRAG_THRESHOLD};

use crate::physics::GravityPoint;

/// Height of the tab bar the card sits above, including its bottom inset.
pub const TAB_HEIGHT: f32 = 80.0;

/// Space kept free below the card in card mode.
pub const BOTTOM_MARGIN: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardConfig {
    /// Screen size the card lays out against.
    pub window: Size,
    pub tab_height: f32,
    pub bottom_margin: f32,
    /// Attraction toward the rest position while the card is held.
    pub gravity: GravityPoint,
    /// Stiffness of the virtual spring between finger and card. Higher values
    /// let the gravity well pull the card less far from the finger.
    pub drag_coupling: f32,
    /// Damping ratio of the spring-back to center.
    pub center_damping: f32,
    /// Damping ratio of the fly-out toward a discard edge.
    pub edge_damping: f32,
    pub snap_stiffness: f32,
    /// Release speed (px/s) that commits to the edge in the flick direction.
    pub flick_velocity: f32,
    /// How far ahead (seconds) release velocity projects the resting x.
    pub toss_seconds: f32,
    pub rotation_degrees: f32,
    pub helper_icon_scale: f32,
    pub mount_duration_millis: u64,
    pub mount_bounciness: f32,
    pub mount_haptic_delay_millis: u64,
    pub drag_threshold: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            window: Size::new(390.0, 844.0),
            tab_height: TAB_HEIGHT,
            bottom_margin: BOTTOM_MARGIN,
            gravity: GravityPoint::default(),
            drag_coupling: 100.0,
            center_damping: 0.5,
            edge_damping: 1.0,
            snap_stiffness: 400.0,
            flick_velocity: 1_000.0,
            toss_seconds: 0.1,
            rotation_degrees: 40.0,
            helper_icon_scale: 2.0,
            mount_duration_millis: 200,
            mount_bounciness: 1.0,
            mount_haptic_delay_millis: 50,
            drag_threshold: DRAG_THRESHOLD,
        }
    }
}

impl CardConfig {
    pub fn with_window(mut self, window: Size) -> Self {
        self.window = window;
        self
    }

    pub fn with_gravity(mut self, gravity: GravityPoint) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_flick_velocity(mut self, flick_velocity: f32) -> Self {
        self.flick_velocity = flick_velocity;
        self
    }

    pub fn with_snap_stiffness(mut self, snap_stiffness: f32) -> Self {
        self.snap_stiffness = snap_stiffness;
        self
    }

    pub fn with_mount_haptic_delay(mut self, delay_millis: u64) -> Self {
        self.mount_haptic_delay_millis = delay_millis;
        self
    }

    /// Checks the tuning parameters. The window size is deliberately not
    /// checked: a degenerate layout collapses the card toward its center
    /// instead of failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("tab_height", self.tab_height),
            ("bottom_margin", self.bottom_margin),
            ("gravity.strength", self.gravity.strength),
            ("gravity.damping", self.gravity.damping),
            ("center_damping", self.center_damping),
            ("edge_damping", self.edge_damping),
            ("flick_velocity", self.flick_velocity),
            ("toss_seconds", self.toss_seconds),
            ("rotation_degrees", self.rotation_degrees),
            ("helper_icon_scale", self.helper_icon_scale),
            ("mount_bounciness", self.mount_bounciness),
            ("drag_threshold", self.drag_threshold),
        ];
        let positive = [
            ("gravity.falloff", self.gravity.falloff),
            ("drag_coupling", self.drag_coupling),
            ("snap_stiffness", self.snap_stiffness),
        ];

        for (field, value) in non_negative.iter().chain(positive.iter()) {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.mount_duration_millis == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "mount_duration_millis",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite { field: &'static str },
    Negative { field: &'static str, value: f32 },
    NotPositive { field: &'static str, value: f32 },
    ZeroDuration { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field } => write!(f, "{field} must be finite"),
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            ConfigError::ZeroDuration { field } => write!(f, "{field} must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(CardConfig::default().validate(), Ok(()));
    }

    #[test]
    fn degenerate_window_is_not_a_config_error() {
        let config = CardConfig::default().with_window(Size::new(0.0, -10.0));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_negative_gravity() {
        let mut gravity = GravityPoint::default();
        gravity.strength = -1.0;
        let config = CardConfig::default().with_gravity(gravity);
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "gravity.strength",
                value: -1.0
            })
        );
    }

    #[test]
    fn rejects_non_finite_and_zero_values() {
        let config = CardConfig::default().with_flick_velocity(f32::NAN);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "flick_velocity"
            })
        );

        let config = CardConfig::default().with_snap_stiffness(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "snap_stiffness",
                ..
            })
        ));

        let config = CardConfig {
            mount_duration_millis: 0,
            ..CardConfig::default()
        };
        assert_eq!(
            config.validate().map_err(|err| err.to_string()),
            Err("mount_duration_millis must be non-zero".to_string())
        );
    }
}
