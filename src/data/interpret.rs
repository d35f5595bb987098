//! Coordinate interpretation of a sampled `(s0, s1)` pair.

use serde::{Deserialize, Serialize};

/// How a pair of axis scalars is turned into an `(x, y)` position.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    /// Pass-through.
    #[default]
    Cartesian,
    /// `s0` is an angle in radians, `s1` a radius.
    Polar,
}

impl Interpretation {
    pub const ALL: &'static [Interpretation] = &[Interpretation::Cartesian, Interpretation::Polar];

    pub fn label(&self) -> &'static str {
        match self {
            Interpretation::Cartesian => "Cartesian",
            Interpretation::Polar => "Polar",
        }
    }
}

/// Apply `mode` to `(s0, s1)`.
///
/// Polar inputs are signal scalars in `[-1, 1]` and are used as-is: a
/// negative radius is not folded through `angle + π`, it simply lands on the
/// opposite side of the origin, which is what `r·cos θ, r·sin θ` yields.
pub fn interpret(mode: Interpretation, (s0, s1): (f64, f64)) -> (f64, f64) {
    match mode {
        Interpretation::Cartesian => (s0, s1),
        Interpretation::Polar => (s1 * s0.cos(), s1 * s0.sin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn cartesian_is_identity() {
        for &(a, b) in &[(0.0, 0.0), (-1.0, 0.5), (0.25, -0.75), (1e9, -1e-9)] {
            assert_eq!(interpret(Interpretation::Cartesian, (a, b)), (a, b));
        }
    }

    #[test]
    fn polar_unit_vectors() {
        assert_eq!(interpret(Interpretation::Polar, (0.0, 1.0)), (1.0, 0.0));
        let (x, y) = interpret(Interpretation::Polar, (FRAC_PI_2, 1.0));
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn polar_negative_radius_mirrors() {
        let (x, y) = interpret(Interpretation::Polar, (0.0, -0.5));
        assert_abs_diff_eq!(x, -0.5);
        assert_abs_diff_eq!(y, 0.0);
    }
}
