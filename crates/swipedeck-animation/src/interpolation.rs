//! Piecewise-linear mapping from an animated input to a derived output.

/// Behaviour outside the first/last control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolate {
    /// Continue the slope of the outermost segment.
    #[default]
    Extend,
    /// Hold the outermost output value.
    Clamp,
}

/// Maps an input through `N` control points.
///
/// `input` must be non-decreasing. A segment whose two inputs coincide is
/// treated as a step to its right-hand output; a range whose inputs all
/// coincide collapses to the middle output, so a degenerate layout maps
/// everything to the resting value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation<const N: usize> {
    input: [f32; N],
    output: [f32; N],
    extrapolate: Extrapolate,
}

impl<const N: usize> Interpolation<N> {
    pub fn new(input: [f32; N], output: [f32; N]) -> Self {
        debug_assert!(N >= 1, "interpolation needs at least one control point");
        debug_assert!(
            input.windows(2).all(|pair| pair[0] <= pair[1]),
            "interpolation input range must be non-decreasing"
        );
        Self {
            input,
            output,
            extrapolate: Extrapolate::Extend,
        }
    }

    pub fn with_extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    pub fn input(&self) -> &[f32; N] {
        &self.input
    }

    pub fn output(&self) -> &[f32; N] {
        &self.output
    }

    pub fn apply(&self, value: f32) -> f32 {
        if N == 0 {
            return 0.0;
        }
        if N == 1 || self.input[0] == self.input[N - 1] {
            return self.output[N / 2];
        }
        if value.is_nan() {
            return self.output[N / 2];
        }

        if value <= self.input[0] && self.extrapolate == Extrapolate::Clamp {
            return self.output[0];
        }
        if value >= self.input[N - 1] && self.extrapolate == Extrapolate::Clamp {
            return self.output[N - 1];
        }

        // Last segment whose start is at or below the value; values left of the
        // range reuse the first segment.
        let segment = (0..N - 1)
            .rev()
            .find(|&i| self.input[i] <= value)
            .unwrap_or(0);

        let (in_start, in_end) = (self.input[segment], self.input[segment + 1]);
        let (out_start, out_end) = (self.output[segment], self.output[segment + 1]);
        let width = in_end - in_start;
        if width == 0.0 {
            return out_end;
        }
        let fraction = (value - in_start) / width;
        out_start + (out_end - out_start) * fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation() -> Interpolation<3> {
        Interpolation::new([-600.0, 0.0, 600.0], [-40.0, 0.0, 40.0])
    }

    #[test]
    fn control_points_map_exactly() {
        let rotation = rotation();
        assert_eq!(rotation.apply(-600.0), -40.0);
        assert_eq!(rotation.apply(0.0), 0.0);
        assert_eq!(rotation.apply(600.0), 40.0);
    }

    #[test]
    fn interior_values_are_linear() {
        let rotation = rotation();
        assert!((rotation.apply(300.0) - 20.0).abs() < 1e-4);
        assert!((rotation.apply(-150.0) + 10.0).abs() < 1e-4);
    }

    #[test]
    fn extend_continues_outer_slope() {
        let rotation = rotation();
        assert!((rotation.apply(900.0) - 60.0).abs() < 1e-4);
        assert!((rotation.apply(-1200.0) + 80.0).abs() < 1e-4);
    }

    #[test]
    fn clamp_holds_outer_values() {
        let rotation = rotation().with_extrapolate(Extrapolate::Clamp);
        assert_eq!(rotation.apply(900.0), 40.0);
        assert_eq!(rotation.apply(-1200.0), -40.0);
    }

    #[test]
    fn v_shaped_output_is_symmetric() {
        let scale = Interpolation::new([-600.0, 0.0, 600.0], [2.0, 0.0, 2.0]);
        assert_eq!(scale.apply(0.0), 0.0);
        assert!((scale.apply(300.0) - 1.0).abs() < 1e-4);
        assert!((scale.apply(-300.0) - 1.0).abs() < 1e-4);
        assert_eq!(scale.apply(600.0), 2.0);
    }

    #[test]
    fn collapsed_range_maps_to_middle_output() {
        let degenerate = Interpolation::new([0.0, 0.0, 0.0], [-40.0, 0.0, 40.0]);
        assert_eq!(degenerate.apply(0.0), 0.0);
        assert_eq!(degenerate.apply(25.0), 0.0);
        assert_eq!(degenerate.apply(-25.0), 0.0);
    }

    #[test]
    fn nan_input_maps_to_middle_output() {
        assert_eq!(rotation().apply(f32::NAN), 0.0);
    }
}
