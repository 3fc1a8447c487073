//! Angle extraction at station 1 from the six range measurements
//!
//! Three angles are recovered, all at the vertex of station 1:
//! - θ12: between stations 0 and 2 (sides D01, D12, opposite D02)
//! - θ13: between stations 0 and 3 (sides D01, D13, opposite D03)
//! - θ1:  between stations 2 and 3 (sides D12, D13, opposite D23)
//!
//! Well-formed measurements use the Law of Sines through Heron's area, which
//! keeps precision on thin triangles. When any triangle breaks the triangle
//! inequality the cosines come from a clamped Law of Cosines instead and the
//! sines from the Pythagorean identity.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithms::triangle::TriangleFeasibility;
use crate::core::DistanceSet;

/// Sine and cosine of one angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinCos {
    pub sin: f64,
    pub cos: f64,
}

impl SinCos {
    pub fn new(sin: f64, cos: f64) -> Self {
        Self { sin, cos }
    }

    /// Angle in radians, valid for triangle angles in [0, π]
    pub fn radians(&self) -> f64 {
        angle_from_sin_cos(self.sin, self.cos)
    }

    pub fn degrees(&self) -> f64 {
        self.radians().to_degrees()
    }
}

/// Formula branch used to derive an [`AngleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleBranch {
    /// Heron area sines with unclamped Law of Cosines
    LawOfSines,
    /// Clamped Law of Cosines with Pythagorean sines
    ClampedLawOfCosines,
}

/// Sine/cosine pairs of θ12, θ13 and θ1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSet {
    pub theta_12: SinCos,
    pub theta_13: SinCos,
    pub theta_1: SinCos,
    pub branch: AngleBranch,
}

/// Recover an angle from its sine and cosine
///
/// The sine is clamped to [-1, 1] and the cosine only selects between `asin`
/// and `π - asin`. This is not an `atan2` replacement: it is only correct for
/// angles in [0, π], which holds for every interior angle of a triangle.
pub fn angle_from_sin_cos(sin: f64, cos: f64) -> f64 {
    let a = sin.clamp(-1.0, 1.0).asin();
    if cos < 0.0 {
        PI - a
    } else {
        a
    }
}

/// Divide a triangle's sides by its longest side
///
/// Angles do not depend on scale, and unit-sized sides keep the squares and
/// Heron's product clear of overflow and underflow. Returns `None` when a
/// side adjacent to the angle vanishes relative to the longest one.
fn normalized(a: f64, b: f64, c: f64) -> Option<(f64, f64, f64)> {
    let longest = a.max(b).max(c);
    if longest <= 0.0 || !longest.is_finite() {
        return None;
    }
    let (a, b, c) = (a / longest, b / longest, c / longest);
    if a * b > 0.0 {
        Some((a, b, c))
    } else {
        None
    }
}

/// Law of Cosines: cosine of the angle between sides `a` and `b`, opposite `c`
fn law_of_cosines(a: f64, b: f64, c: f64) -> f64 {
    (a * a + b * b - c * c) / (2.0 * a * b)
}

/// Law of Sines via Heron: sine of the angle between sides `a` and `b`, opposite `c`
fn heron_sine(a: f64, b: f64, c: f64) -> f64 {
    let s = 0.5 * (a + b + c);
    // Rounding can push a feasible degenerate triangle slightly negative
    let radicand = (s * (s - a) * (s - b) * (s - c)).max(0.0);
    2.0 * radicand.sqrt() / (a * b)
}

/// Collinear pair used when an adjacent side is negligible
const DEGENERATE: SinCos = SinCos { sin: 0.0, cos: 1.0 };

fn clamped_pair(a: f64, b: f64, c: f64) -> SinCos {
    let Some((a, b, c)) = normalized(a, b, c) else {
        return DEGENERATE;
    };
    let cos = law_of_cosines(a, b, c).clamp(-1.0, 1.0);
    let sin = (1.0 - cos * cos).max(0.0).sqrt();
    SinCos::new(sin, cos)
}

fn heron_pair(a: f64, b: f64, c: f64) -> SinCos {
    let Some((a, b, c)) = normalized(a, b, c) else {
        return DEGENERATE;
    };
    // Exact for feasible triangles; the clamp only absorbs last-bit rounding
    SinCos::new(
        heron_sine(a, b, c).min(1.0),
        law_of_cosines(a, b, c).clamp(-1.0, 1.0),
    )
}

/// Converts range measurements into the three station-1 angles
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleExtractor;

impl AngleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Derive the angle set; reference edges must already be validated as positive
    pub fn extract(&self, d: &DistanceSet, feasibility: TriangleFeasibility) -> AngleSet {
        let angles = if feasibility.all_feasible() {
            AngleSet {
                theta_12: heron_pair(d.d01, d.d12, d.d02),
                theta_13: heron_pair(d.d01, d.d13, d.d03),
                theta_1: heron_pair(d.d12, d.d13, d.d23),
                branch: AngleBranch::LawOfSines,
            }
        } else {
            warn!(
                flags = feasibility.bits(),
                "inconsistent ranges, approximating angles with clamped law of cosines"
            );
            AngleSet {
                theta_12: clamped_pair(d.d01, d.d12, d.d02),
                theta_13: clamped_pair(d.d01, d.d13, d.d03),
                theta_1: clamped_pair(d.d12, d.d13, d.d23),
                branch: AngleBranch::ClampedLawOfCosines,
            }
        };

        debug!(
            cos_theta_12 = angles.theta_12.cos,
            sin_theta_12 = angles.theta_12.sin,
            cos_theta_13 = angles.theta_13.cos,
            sin_theta_13 = angles.theta_13.sin,
            cos_theta_1 = angles.theta_1.cos,
            sin_theta_1 = angles.theta_1.sin,
            branch = ?angles.branch,
            "extracted station angles"
        );

        angles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::triangle::TriangleValidator;

    fn extract(d: DistanceSet) -> (AngleSet, TriangleFeasibility) {
        let flags = TriangleValidator::new().validate_all(&d);
        (AngleExtractor::new().extract(&d, flags), flags)
    }

    fn components(angles: &AngleSet) -> [f64; 6] {
        [
            angles.theta_12.sin,
            angles.theta_12.cos,
            angles.theta_13.sin,
            angles.theta_13.cos,
            angles.theta_1.sin,
            angles.theta_1.cos,
        ]
    }

    #[test]
    fn test_angle_from_sin_cos_quadrants() {
        assert!((angle_from_sin_cos(0.0, 1.0) - 0.0).abs() < 1e-12);
        assert!((angle_from_sin_cos(1.0, 0.0) - PI / 2.0).abs() < 1e-12);
        assert!((angle_from_sin_cos(0.0, -1.0) - PI).abs() < 1e-12);

        let obtuse = 2.0_f64;
        assert!((angle_from_sin_cos(obtuse.sin(), obtuse.cos()) - obtuse).abs() < 1e-12);
    }

    #[test]
    fn test_angle_from_sin_cos_clamps_sine() {
        assert!((angle_from_sin_cos(1.5, 0.0) - PI / 2.0).abs() < 1e-12);
        assert!(angle_from_sin_cos(-3.0, 1.0).is_finite());
    }

    #[test]
    fn test_square_angles() {
        let diagonal = 200.0_f64.sqrt();
        let (angles, _) = extract(DistanceSet::new(10.0, diagonal, 10.0, 10.0, diagonal, 10.0));

        assert_eq!(angles.branch, AngleBranch::LawOfSines);
        assert!((angles.theta_12.degrees() - 90.0).abs() < 1e-9);
        assert!((angles.theta_13.degrees() - 45.0).abs() < 1e-9);
        assert!((angles.theta_1.degrees() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_heron_and_law_of_cosines_agree_on_3_4_5() {
        let (angles, _) = extract(DistanceSet::new(3.0, 5.0, 5.0, 4.0, 4.0, 4.0 * 2.0_f64.sqrt()));

        // Right angle at station 1 between stations 0 and 2
        assert!((angles.theta_12.sin - 1.0).abs() < 1e-12);
        assert!(angles.theta_12.cos.abs() < 1e-12);
        // Right angle between stations 2 and 3 as well
        assert!((angles.theta_1.sin - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_near_degenerate_triangle_stays_in_range() {
        let (angles, flags) = extract(DistanceSet::new(5.0, 5.0, 5.0, 0.0001, 5.0, 5.0));

        assert!(flags.all_feasible());
        assert_eq!(angles.branch, AngleBranch::LawOfSines);
        for value in components(&angles) {
            assert!(value.is_finite());
            assert!((-1.0..=1.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn test_collinear_feasible_triangle_has_zero_sine() {
        let (angles, flags) = extract(DistanceSet::new(1.0, 1.0, 1.0, 2.0, 1.0, 1.0));

        assert!(flags.all_feasible());
        assert!(angles.theta_12.sin.abs() < 1e-6);
        assert!(!angles.theta_12.sin.is_nan());
    }

    #[test]
    fn test_infeasible_input_clamps_cosine() {
        let (angles, flags) = extract(DistanceSet::new(1.0, 1.0, 5.0, 10.0, 5.0, 5.0));

        assert!(!flags.all_feasible());
        assert_eq!(angles.branch, AngleBranch::ClampedLawOfCosines);
        assert_eq!(angles.theta_12.cos, 1.0);
        assert_eq!(angles.theta_12.sin, 0.0);
    }

    #[test]
    fn test_adversarial_inputs_stay_in_range() {
        let cases = [
            DistanceSet::new(1.0, 100.0, 0.0, 1.0, 1.0, 0.0),
            DistanceSet::new(1e-9, 1e9, 1e9, 1e-9, 1e-9, 1e9),
            DistanceSet::new(7.0, 0.0, 0.0, 3.0, 2.0, 100.0),
            DistanceSet::new(4.0, 4.0, 4.0, 4.0, 4.0, 4.0),
            DistanceSet::new(2.0, 9.0, 0.5, 3.0, 6.0, 1.0),
        ];

        for d in cases {
            let (angles, _) = extract(d);
            for value in components(&angles) {
                assert!(value.is_finite(), "{d:?}");
                assert!((-1.0..=1.0).contains(&value), "{d:?} -> {value}");
            }
        }
    }

    #[test]
    fn test_extreme_magnitudes_keep_angles_finite() {
        let half_sqrt_3 = 3.0_f64.sqrt() / 2.0;
        for scale in [1e200, 1e-200, 1e300, 1e-300] {
            let (angles, flags) = extract(DistanceSet::from_array([scale; 6]));

            assert!(flags.all_feasible());
            for pair in [angles.theta_12, angles.theta_13, angles.theta_1] {
                assert!((pair.sin - half_sqrt_3).abs() < 1e-12, "{scale}: {pair:?}");
                assert!((pair.cos - 0.5).abs() < 1e-12, "{scale}: {pair:?}");
            }
        }
    }

    #[test]
    fn test_mixed_scale_ranges_stay_in_range() {
        let cases = [
            DistanceSet::new(1e200, 1.0, 1.0, 1e200, 1e200, 1.0),
            DistanceSet::new(1e-200, 1e200, 1e200, 1e200, 1e-200, 1e200),
            DistanceSet::new(1e-200, 1.0, 1.0, 1.0, 1.0, 1e-200),
            DistanceSet::new(1e308, 1e308, 1e308, 1e308, 1e308, 1e308),
            DistanceSet::new(1e-320, 1.0, 1.0, 1.0, 1.0, 1.0),
        ];

        for d in cases {
            let (angles, _) = extract(d);
            for value in components(&angles) {
                assert!(value.is_finite(), "{d:?}");
                assert!((-1.0..=1.0).contains(&value), "{d:?} -> {value}");
            }
        }
    }

    #[test]
    fn test_thin_triangle_at_large_scale() {
        // Two 1e200 sides one meter apart at the far end
        let (angles, _) = extract(DistanceSet::new(1e200, 1.0, 1.0, 1e200, 1e200, 1.0));
        assert!((angles.theta_12.cos - 1.0).abs() < 1e-12);
        assert!(angles.theta_12.sin.abs() < 1e-12);
    }
}
