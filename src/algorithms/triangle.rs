//! Triangle-inequality checks over the three triangles that share station 1

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::DistanceSet;

/// One of the three triangles the solver works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Triangle {
    /// Stations 0, 1, 2 (sides D01, D02, D12)
    St012,
    /// Stations 0, 1, 3 (sides D01, D03, D13)
    St013,
    /// Stations 1, 2, 3 (sides D12, D13, D23)
    St123,
}

impl Triangle {
    pub const ALL: [Triangle; 3] = [Triangle::St012, Triangle::St013, Triangle::St123];

    /// Flag bit reported in [`TriangleFeasibility`]
    pub fn bit(self) -> u8 {
        match self {
            Triangle::St012 => 0x01,
            Triangle::St013 => 0x02,
            Triangle::St123 => 0x04,
        }
    }

    /// Side lengths of this triangle taken from a distance set
    pub fn sides(self, distances: &DistanceSet) -> (f64, f64, f64) {
        match self {
            Triangle::St012 => (distances.d01, distances.d02, distances.d12),
            Triangle::St013 => (distances.d01, distances.d03, distances.d13),
            Triangle::St123 => (distances.d12, distances.d13, distances.d23),
        }
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Triangle::St012 => write!(f, "ST0-ST1-ST2"),
            Triangle::St013 => write!(f, "ST0-ST1-ST3"),
            Triangle::St123 => write!(f, "ST1-ST2-ST3"),
        }
    }
}

/// Set of triangles that violate the triangle inequality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriangleFeasibility {
    bits: u8,
}

impl TriangleFeasibility {
    /// No violations
    pub const FEASIBLE: TriangleFeasibility = TriangleFeasibility { bits: 0 };

    pub fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0x07 }
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn mark_infeasible(self, triangle: Triangle) -> Self {
        Self { bits: self.bits | triangle.bit() }
    }

    pub fn is_infeasible(&self, triangle: Triangle) -> bool {
        self.bits & triangle.bit() != 0
    }

    /// True when every triangle satisfies the triangle inequality
    pub fn all_feasible(&self) -> bool {
        self.bits == 0
    }

    pub fn infeasible_triangles(&self) -> Vec<Triangle> {
        Triangle::ALL
            .iter()
            .copied()
            .filter(|t| self.is_infeasible(*t))
            .collect()
    }
}

/// Triangle-inequality validator
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleValidator;

impl TriangleValidator {
    pub fn new() -> Self {
        Self
    }

    /// A triple of sides forms a triangle iff no side exceeds the semiperimeter
    pub fn is_valid_triangle(a: f64, b: f64, c: f64) -> bool {
        // Halve each side first so huge ranges cannot overflow the sum
        let s = 0.5 * a + 0.5 * b + 0.5 * c;
        !(a > s || b > s || c > s)
    }

    /// Check the triangles {0,1,2}, {0,1,3} and {1,2,3}
    pub fn validate_all(&self, distances: &DistanceSet) -> TriangleFeasibility {
        Triangle::ALL
            .iter()
            .fold(TriangleFeasibility::FEASIBLE, |flags, &triangle| {
                let (a, b, c) = triangle.sides(distances);
                if Self::is_valid_triangle(a, b, c) {
                    flags
                } else {
                    warn!(%triangle, a, b, c, "triangle inequality violated");
                    flags.mark_infeasible(triangle)
                }
            })
    }
}
