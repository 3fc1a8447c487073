use serde::{Deserialize, Serialize};

use crate::core::{CoordinateSet, DistanceSet, Edge, DEFAULT_CONSISTENCY_TOLERANCE_M};

/// Difference between a measured range and the one implied by solved coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeResidual {
    pub edge: Edge,
    /// Measured range (meters)
    pub measured_m: f64,
    /// Range between the solved stations (meters)
    pub reconstructed_m: f64,
    /// reconstructed - measured (meters)
    pub residual_m: f64,
}

/// How well solved coordinates reproduce the measured ranges
///
/// Exact, feasible measurements reproduce every edge. Noisy measurements that
/// forced the clamped fallback leave residuals on the edges the canonical
/// frame could not honour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub residuals: Vec<EdgeResidual>,
    /// Largest absolute residual (meters)
    pub max_abs_residual_m: f64,
    /// Root mean square residual (meters)
    pub rms_residual_m: f64,
    /// Edge with the largest absolute residual
    pub worst_edge: Edge,
}

impl ConsistencyReport {
    pub fn evaluate(measured: &DistanceSet, solved: &CoordinateSet) -> Self {
        let residuals: Vec<EdgeResidual> = measured
            .iter()
            .map(|(edge, measured_m)| {
                let reconstructed_m = solved.edge_length(edge);
                EdgeResidual {
                    edge,
                    measured_m,
                    reconstructed_m,
                    residual_m: reconstructed_m - measured_m,
                }
            })
            .collect();

        let mut worst = &residuals[0];
        for residual in &residuals[1..] {
            if residual.residual_m.abs() > worst.residual_m.abs() {
                worst = residual;
            }
        }

        let sum_sq: f64 = residuals.iter().map(|r| r.residual_m * r.residual_m).sum();
        let rms_residual_m = (sum_sq / residuals.len() as f64).sqrt();

        Self {
            max_abs_residual_m: worst.residual_m.abs(),
            worst_edge: worst.edge,
            rms_residual_m,
            residuals,
        }
    }

    /// True when every residual is within `tolerance_m`
    pub fn is_consistent(&self, tolerance_m: f64) -> bool {
        self.max_abs_residual_m <= tolerance_m
    }

    pub fn is_exact(&self) -> bool {
        self.is_consistent(DEFAULT_CONSISTENCY_TOLERANCE_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::solver::{solve_from_coordinates, solve_from_distances};

    #[test]
    fn test_exact_measurements_have_no_residual() {
        let original = CoordinateSet::from_array([2.0, 5.0, 0.0, 0.0, 8.0, 1.0, 6.0, 9.0]);
        let distances = solve_from_coordinates(&original);
        let solution = solve_from_distances(&distances).unwrap();

        let report = ConsistencyReport::evaluate(&distances, &solution.coordinates);
        assert_eq!(report.residuals.len(), 6);
        assert!(report.is_exact(), "{report:?}");
        assert!(report.rms_residual_m < 1e-9);
    }

    #[test]
    fn test_inconsistent_measurements_leave_residual() {
        let distances = DistanceSet::new(1.0, 1.0, 5.0, 10.0, 5.0, 5.0);
        let solution = solve_from_distances(&distances).unwrap();

        let report = ConsistencyReport::evaluate(&distances, &solution.coordinates);
        assert!(!report.is_exact());
        // Station 0 lands at x = 1, nine meters from station 2 instead of one
        assert_eq!(report.worst_edge, Edge::D02);
        assert!((report.max_abs_residual_m - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_matching_layout_is_consistent_at_zero_tolerance() {
        let measured = DistanceSet::new(3.0, 5.0, 4.0, 4.0, 5.0, 3.0);
        let coords = CoordinateSet::from_array([0.0, 0.0, 3.0, 0.0, 3.0, 4.0, 0.0, 4.0]);

        let report = ConsistencyReport::evaluate(&measured, &coords);
        assert!(report.max_abs_residual_m < 1e-12);
        assert!(report.is_consistent(0.0));
    }
}
