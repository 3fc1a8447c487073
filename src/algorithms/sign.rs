//! Reflection ambiguity resolution for θ12
//!
//! Distances alone cannot tell whether station 0 lies above or below the
//! station 1 → station 2 axis relative to station 3. The resolver scores four
//! angle-sum hypotheses and takes the first one with the smallest error.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::algorithms::angles::AngleSet;

/// Orientation of θ12 in the canonical frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// +1.0 or -1.0
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// Angle combination a hypothesis compares against sin(θ1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleCombination {
    /// sin(θ12 + θ13)
    Sum,
    /// sin(θ12 - θ13)
    Difference,
}

/// One candidate relation between θ12, θ13 and θ1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignHypothesis {
    pub combination: AngleCombination,
    /// Sign applied to sin(θ1) to form the target value
    pub target: Sign,
    /// K chosen when this hypothesis wins
    pub sign: Sign,
}

/// Scan order doubles as the tie-break order; do not reorder
pub const HYPOTHESES: [SignHypothesis; 4] = [
    SignHypothesis { combination: AngleCombination::Sum, target: Sign::Positive, sign: Sign::Positive },
    SignHypothesis { combination: AngleCombination::Sum, target: Sign::Negative, sign: Sign::Negative },
    SignHypothesis { combination: AngleCombination::Difference, target: Sign::Positive, sign: Sign::Positive },
    SignHypothesis { combination: AngleCombination::Difference, target: Sign::Negative, sign: Sign::Negative },
];

impl SignHypothesis {
    /// Absolute error of this hypothesis for an angle set
    pub fn error(&self, angles: &AngleSet) -> f64 {
        let (a, b) = (angles.theta_12, angles.theta_13);
        let value = match self.combination {
            AngleCombination::Sum => a.sin * b.cos + a.cos * b.sin,
            AngleCombination::Difference => a.sin * b.cos - a.cos * b.sin,
        };
        let target = self.target.factor() * angles.theta_1.sin;
        (value - target).abs()
    }
}

/// Outcome of sign resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignEstimate {
    pub sign: Sign,
    /// Index into [`HYPOTHESES`] of the winning hypothesis
    pub hypothesis_index: usize,
    /// Error of the winning hypothesis
    pub error: f64,
    /// Errors of all hypotheses in scan order
    pub errors: [f64; 4],
}

/// Selects K from the four hypotheses
#[derive(Debug, Clone, Copy, Default)]
pub struct SignResolver;

impl SignResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, angles: &AngleSet) -> SignEstimate {
        Self::select(HYPOTHESES.map(|h| h.error(angles)))
    }

    /// First strict minimum wins; NaN errors never win
    pub fn select(errors: [f64; 4]) -> SignEstimate {
        let mut best = 0;
        for (index, error) in errors.iter().enumerate() {
            trace!(index, error, "sign hypothesis");
            if index > best && (*error < errors[best] || errors[best].is_nan()) {
                best = index;
            }
        }

        let estimate = SignEstimate {
            sign: HYPOTHESES[best].sign,
            hypothesis_index: best,
            error: errors[best],
            errors,
        };
        debug!(
            index = estimate.hypothesis_index,
            min_error = estimate.error,
            k = estimate.sign.factor(),
            "sign estimation"
        );
        estimate
    }
}
