//! Per-frame visual values derived from the card offset.

use swipedeck_animation::Interpolation;
use swipedeck_foundation::Offset;

use crate::physics::SnapAnchors;

/// Interpolations keyed on the horizontal offset, built once per layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualRanges {
    rotation: Interpolation<3>,
    helper_icon_scale: Interpolation<3>,
}

impl VisualRanges {
    /// Rotation runs from `-rotation_degrees` at the left anchor to
    /// `+rotation_degrees` at the right one and keeps its slope beyond them.
    /// The like/dislike helper icons grow symmetrically from zero at center.
    pub fn new(anchors: &SnapAnchors, rotation_degrees: f32, helper_icon_scale: f32) -> Self {
        let input = [anchors.left.x, anchors.center.x, anchors.right.x];
        Self {
            rotation: Interpolation::new(input, [-rotation_degrees, 0.0, rotation_degrees]),
            helper_icon_scale: Interpolation::new(
                input,
                [helper_icon_scale, 0.0, helper_icon_scale],
            ),
        }
    }

    pub fn rotation(&self, x: f32) -> f32 {
        self.rotation.apply(x)
    }

    pub fn helper_icon_scale(&self, x: f32) -> f32 {
        self.helper_icon_scale.apply(x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisuals {
    pub rotation_degrees: f32,
    pub helper_icon_scale: f32,
    pub entrance_scale: f32,
}

impl CardVisuals {
    /// `mount_progress` is the eased entrance value; it may overshoot 1
    /// while the elastic entrance settles.
    pub fn compute(offset: Offset, mount_progress: f32, ranges: &VisualRanges) -> Self {
        let entrance_scale = if mount_progress.is_finite() {
            mount_progress.max(0.0)
        } else {
            1.0
        };
        Self {
            rotation_degrees: ranges.rotation(offset.x),
            helper_icon_scale: ranges.helper_icon_scale(offset.x),
            entrance_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges() -> VisualRanges {
        VisualRanges::new(&SnapAnchors::from_width(390.0, 0.5), 40.0, 2.0)
    }

    #[test]
    fn rotation_follows_offset() {
        let ranges = ranges();
        assert_eq!(ranges.rotation(0.0), 0.0);
        assert_eq!(ranges.rotation(585.0), 40.0);
        assert_eq!(ranges.rotation(-585.0), -40.0);
        assert!((ranges.rotation(292.5) - 20.0).abs() < 1e-4);
        assert!(ranges.rotation(700.0) > 40.0);
    }

    #[test]
    fn helper_icons_grow_away_from_center() {
        let ranges = ranges();
        assert_eq!(ranges.helper_icon_scale(0.0), 0.0);
        assert_eq!(ranges.helper_icon_scale(585.0), 2.0);
        assert_eq!(ranges.helper_icon_scale(-585.0), 2.0);
        assert!(ranges.helper_icon_scale(100.0) > 0.0);
    }

    #[test]
    fn entrance_scale_passes_mount_progress_through() {
        let ranges = ranges();
        let start = CardVisuals::compute(Offset::ZERO, 0.0, &ranges);
        assert_eq!(start.entrance_scale, 0.0);
        let overshoot = CardVisuals::compute(Offset::ZERO, 1.04, &ranges);
        assert_eq!(overshoot.entrance_scale, 1.04);
        let broken = CardVisuals::compute(Offset::ZERO, f32::NAN, &ranges);
        assert_eq!(broken.entrance_scale, 1.0);
    }

    #[test]
    fn collapsed_layout_rests_at_neutral_visuals() {
        let ranges = VisualRanges::new(&SnapAnchors::from_width(0.0, 0.5), 40.0, 2.0);
        let visuals = CardVisuals::compute(Offset::new(120.0, 0.0), 1.0, &ranges);
        assert_eq!(visuals.rotation_degrees, 0.0);
        assert_eq!(visuals.helper_icon_scale, 0.0);
        assert_eq!(visuals.entrance_scale, 1.0);
    }
}
