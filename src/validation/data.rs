use tracing::debug;

use crate::core::{DistanceSet, Edge};
use crate::validation::error::{DistanceIssue, SolverError, SolverResult};

/// Input checks applied to range measurements before any angle is computed
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceValidator;

impl DistanceValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check a single range measurement
    pub fn validate_edge(&self, edge: Edge, value: f64) -> SolverResult<()> {
        let issue = if !value.is_finite() {
            Some(DistanceIssue::NonFinite)
        } else if edge.is_reference() && value <= 0.0 {
            Some(DistanceIssue::NonPositiveReference)
        } else if value < 0.0 {
            Some(DistanceIssue::Negative)
        } else {
            None
        };

        match issue {
            Some(issue) => {
                debug!(%edge, value, ?issue, "rejecting range measurement");
                Err(SolverError::invalid_distance(edge, value, issue))
            }
            None => Ok(()),
        }
    }

    /// Check all six measurements; reports the first offending edge in canonical order
    pub fn validate(&self, distances: &DistanceSet) -> SolverResult<()> {
        for (edge, value) in distances.iter() {
            self.validate_edge(edge, value)?;
        }
        Ok(())
    }
}
