//! Drag physics: the gravity well that holds a card near its rest position
//! and the snap resolution that decides where a released card goes.

use std::fmt;

use swipedeck_animation::SpringSpec;
use swipedeck_foundation::{Offset, Velocity};

/// A radial attraction centered on `(x, y)` in card-offset space.
///
/// The force follows a Gaussian profile: zero at the center, strongest around
/// one `falloff` away and vanishing beyond a few falloffs. While the card is
/// held, it is pulled back from the finger by `force / drag_coupling`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityPoint {
    pub x: f32,
    pub y: f32,
    pub strength: f32,
    pub falloff: f32,
    /// Damping ratio of the vertical return to the well after release.
    pub damping: f32,
}

impl Default for GravityPoint {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            strength: 2_000.0,
            falloff: 40.0,
            damping: 1.0,
        }
    }
}

impl GravityPoint {
    pub fn center(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    /// Force acting on a card displaced to `offset`.
    pub fn force(&self, offset: Offset) -> Offset {
        if self.falloff <= 0.0 || !offset.is_finite() {
            return Offset::ZERO;
        }
        let relative = offset - self.center();
        let normalized = relative.distance() / self.falloff;
        let magnitude = self.strength * (-0.5 * normalized * normalized).exp();
        relative.scale(-magnitude / self.falloff)
    }

    /// Displayed offset of a card whose finger has moved it to `raw`.
    ///
    /// The pull never carries the card past the well's center and the result
    /// is always finite for finite input.
    pub fn pull(&self, raw: Offset, coupling: f32) -> Offset {
        if !raw.is_finite() || coupling <= 0.0 || !coupling.is_finite() {
            return raw;
        }
        let relative = raw - self.center();
        let distance = relative.distance();
        if distance == 0.0 {
            return raw;
        }
        let shift = self.force(raw).scale(1.0 / coupling);
        let shift_len = shift.distance();
        if !shift_len.is_finite() {
            return self.center();
        }
        if shift_len >= distance {
            return self.center();
        }
        raw + shift
    }

    /// Spring that returns the vertical offset to the well after release.
    pub fn return_spring(&self, stiffness: f32) -> SpringSpec {
        SpringSpec::default_spring()
            .with_stiffness(stiffness)
            .with_damping_ratio(self.damping)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorId {
    Left,
    Center,
    Right,
}

impl AnchorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorId::Left => "left",
            AnchorId::Center => "center",
            AnchorId::Right => "right",
        }
    }

    pub fn is_edge(&self) -> bool {
        !matches!(self, AnchorId::Center)
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resting x position a released card can settle on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnchor {
    pub id: AnchorId,
    pub x: f32,
    /// Overrides the default settle damping for this anchor.
    pub damping: Option<f32>,
}

impl SnapAnchor {
    pub fn spring(&self, default_damping: f32, stiffness: f32) -> SpringSpec {
        SpringSpec::default_spring()
            .with_stiffness(stiffness)
            .with_damping_ratio(self.damping.unwrap_or(default_damping))
    }
}

/// Edge anchors sit one and a half card widths off center, fully off screen.
pub const EDGE_WIDTH_FACTOR: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnchors {
    pub left: SnapAnchor,
    pub center: SnapAnchor,
    pub right: SnapAnchor,
}

impl SnapAnchors {
    /// Anchors for a card of the given width. A width that is not finite and
    /// positive collapses every anchor onto center.
    pub fn from_width(width: f32, center_damping: f32) -> Self {
        let edge = if width.is_finite() && width > 0.0 {
            width * EDGE_WIDTH_FACTOR
        } else {
            log::warn!("unusable card width {width}; snap anchors collapse to center");
            0.0
        };
        Self {
            left: SnapAnchor {
                id: AnchorId::Left,
                x: -edge,
                damping: None,
            },
            center: SnapAnchor {
                id: AnchorId::Center,
                x: 0.0,
                damping: Some(center_damping),
            },
            right: SnapAnchor {
                id: AnchorId::Right,
                x: edge,
                damping: None,
            },
        }
    }

    pub fn get(&self, id: AnchorId) -> &SnapAnchor {
        match id {
            AnchorId::Left => &self.left,
            AnchorId::Center => &self.center,
            AnchorId::Right => &self.right,
        }
    }

    /// Distance from center to either edge anchor.
    pub fn edge_distance(&self) -> f32 {
        self.right.x
    }

    pub fn is_collapsed(&self) -> bool {
        self.edge_distance() <= 0.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &SnapAnchor> {
        [&self.left, &self.center, &self.right].into_iter()
    }
}

/// Picks the anchor a released card settles on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResolver {
    anchors: SnapAnchors,
    flick_velocity: f32,
    toss_seconds: f32,
}

impl SnapResolver {
    pub fn new(anchors: SnapAnchors, flick_velocity: f32, toss_seconds: f32) -> Self {
        Self {
            anchors,
            flick_velocity,
            toss_seconds,
        }
    }

    pub fn anchors(&self) -> &SnapAnchors {
        &self.anchors
    }

    /// Resolution order:
    /// 1. a card at or beyond an edge anchor stays committed to that edge;
    /// 2. a flick at least `flick_velocity` fast goes to the edge it points at;
    /// 3. otherwise the anchor nearest the projected resting x wins, with
    ///    ties going to center.
    pub fn resolve(&self, x: f32, velocity_x: f32) -> AnchorId {
        if self.anchors.is_collapsed() || !x.is_finite() {
            return AnchorId::Center;
        }
        let velocity_x = if velocity_x.is_finite() { velocity_x } else { 0.0 };

        let chosen = if x >= self.anchors.right.x {
            AnchorId::Right
        } else if x <= self.anchors.left.x {
            AnchorId::Left
        } else if velocity_x.abs() >= self.flick_velocity && velocity_x != 0.0 {
            if velocity_x > 0.0 {
                AnchorId::Right
            } else {
                AnchorId::Left
            }
        } else {
            self.nearest(x + velocity_x * self.toss_seconds)
        };

        log::debug!("release at x={x:.1} vx={velocity_x:.0} resolved to {chosen}");
        chosen
    }

    fn nearest(&self, projected: f32) -> AnchorId {
        let to_center = (projected - self.anchors.center.x).abs();
        let to_left = (projected - self.anchors.left.x).abs();
        let to_right = (projected - self.anchors.right.x).abs();
        if to_center <= to_left && to_center <= to_right {
            AnchorId::Center
        } else if to_right < to_left {
            AnchorId::Right
        } else {
            AnchorId::Left
        }
    }
}

/// Release velocity with non-finite components zeroed.
pub fn settle_velocity(velocity: Velocity) -> Velocity {
    let clean = |v: f32| if v.is_finite() { v } else { 0.0 };
    Velocity::new(clean(velocity.x), clean(velocity.y))
}

#[cfg(test)]
#[path = "tests/physics_tests.rs"]
mod tests;
