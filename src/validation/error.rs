use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Edge;

/// Why a range measurement was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceIssue {
    /// Reference edge is zero or negative; the angle formulas divide by it
    NonPositiveReference,
    /// Range is below zero
    Negative,
    /// Range is NaN or infinite
    NonFinite,
}

impl fmt::Display for DistanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceIssue::NonPositiveReference => write!(f, "reference distance must be positive"),
            DistanceIssue::Negative => write!(f, "distance must not be negative"),
            DistanceIssue::NonFinite => write!(f, "distance must be finite"),
        }
    }
}

/// Errors raised by the station solver
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SolverError {
    /// A range measurement cannot be used
    #[error("invalid distance {edge} = {value}: {issue}")]
    InvalidDistance {
        edge: Edge,
        value: f64,
        issue: DistanceIssue,
    },
}

impl SolverError {
    pub fn invalid_distance(edge: Edge, value: f64, issue: DistanceIssue) -> Self {
        SolverError::InvalidDistance { edge, value, issue }
    }

    /// Edge that triggered the error
    pub fn edge(&self) -> Edge {
        match self {
            SolverError::InvalidDistance { edge, .. } => *edge,
        }
    }
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_edge() {
        let error = SolverError::invalid_distance(Edge::D12, 0.0, DistanceIssue::NonPositiveReference);
        let message = error.to_string();
        assert!(message.contains("D12"));
        assert_eq!(message, "invalid distance D12 = 0: reference distance must be positive");
        assert_eq!(error.edge(), Edge::D12);
    }

    #[test]
    fn test_error_display_reads_as_prose() {
        let negative = SolverError::invalid_distance(Edge::D02, -1.5, DistanceIssue::Negative);
        assert_eq!(negative.to_string(), "invalid distance D02 = -1.5: distance must not be negative");

        let non_finite = SolverError::invalid_distance(Edge::D23, f64::NAN, DistanceIssue::NonFinite);
        assert!(non_finite.to_string().ends_with("distance must be finite"));
        assert!(!non_finite.to_string().contains("NonFinite"));
    }
}
