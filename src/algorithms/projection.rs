use nalgebra::Vector2;

use crate::algorithms::angles::AngleSet;
use crate::algorithms::sign::Sign;
use crate::core::{CoordinateSet, DistanceSet, AXIS_STATION, ORIGIN_STATION, STATION_COUNT};

/// Places the stations in the canonical frame
///
/// Station 1 is the origin, station 2 lies on the positive x-axis and
/// station 3 in the upper half-plane. Station 0 is mirrored by K.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateProjector;

impl CoordinateProjector {
    pub fn new() -> Self {
        Self
    }

    pub fn project(&self, distances: &DistanceSet, angles: &AngleSet, sign: Sign) -> CoordinateSet {
        let k = sign.factor();
        let mut stations = [Vector2::zeros(); STATION_COUNT];

        stations[ORIGIN_STATION] = Vector2::zeros();
        stations[AXIS_STATION] = Vector2::new(distances.d12, 0.0);
        stations[3] = Vector2::new(
            distances.d13 * angles.theta_1.cos,
            distances.d13 * angles.theta_1.sin,
        );
        stations[0] = Vector2::new(
            distances.d01 * angles.theta_12.cos,
            k * distances.d01 * angles.theta_12.sin,
        );

        CoordinateSet::new(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::angles::{AngleBranch, SinCos};

    fn right_angles() -> AngleSet {
        AngleSet {
            theta_12: SinCos::new(1.0, 0.0),
            theta_13: SinCos::new(1.0, 0.0),
            theta_1: SinCos::new(0.6, 0.8),
            branch: AngleBranch::LawOfSines,
        }
    }

    #[test]
    fn test_frame_convention() {
        let distances = DistanceSet::new(2.0, 0.0, 0.0, 7.0, 5.0, 0.0);
        let coords = CoordinateProjector::new().project(&distances, &right_angles(), Sign::Positive);
        let [x0, y0, x1, y1, x2, y2, x3, y3] = coords.to_array();

        assert_eq!((x1, y1), (0.0, 0.0));
        assert_eq!((x2, y2), (7.0, 0.0));
        assert!((x3 - 4.0).abs() < 1e-12);
        assert!((y3 - 3.0).abs() < 1e-12);
        assert!(x0.abs() < 1e-12);
        assert!((y0 - 2.0).abs() < 1e-12);

        assert_eq!(coords.stations()[ORIGIN_STATION], Vector2::zeros());
        assert_eq!(coords.stations()[AXIS_STATION].y, 0.0);
    }

    #[test]
    fn test_negative_sign_mirrors_station_0_only() {
        let distances = DistanceSet::new(2.0, 0.0, 0.0, 7.0, 5.0, 0.0);
        let projector = CoordinateProjector::new();
        let up = projector.project(&distances, &right_angles(), Sign::Positive);
        let down = projector.project(&distances, &right_angles(), Sign::Negative);

        assert_eq!(down.stations()[0].y, -up.stations()[0].y);
        assert_eq!(down.stations()[0].x, up.stations()[0].x);
        assert_eq!(&down.stations()[1..], &up.stations()[1..]);
    }
}
