//! Four-station solver pipeline
//!
//! distances → triangle feasibility → station-1 angles → sign K → coordinates

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::algorithms::angles::{AngleExtractor, AngleSet};
use crate::algorithms::projection::CoordinateProjector;
use crate::algorithms::sign::{SignEstimate, SignResolver};
use crate::algorithms::triangle::{TriangleFeasibility, TriangleValidator};
use crate::core::{CoordinateSet, DistanceSet};
use crate::validation::data::DistanceValidator;
use crate::validation::error::SolverResult;

/// How the station geometry was supplied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SolverInput {
    /// Six measured ranges
    Distances(DistanceSet),
    /// Known station coordinates; ranges are derived from them
    Coordinates(CoordinateSet),
}

impl SolverInput {
    /// Ranges fed to the solver for this input
    pub fn distances(&self) -> DistanceSet {
        match self {
            SolverInput::Distances(distances) => *distances,
            SolverInput::Coordinates(coordinates) => solve_from_coordinates(coordinates),
        }
    }
}

/// Intermediate values of one solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveDiagnostics {
    pub feasibility: TriangleFeasibility,
    pub angles: AngleSet,
    /// θ12, θ13, θ1 in degrees
    pub angles_deg: [f64; 3],
    pub sign: SignEstimate,
}

/// Solved coordinates with the values that produced them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub distances: DistanceSet,
    pub coordinates: CoordinateSet,
    pub diagnostics: SolveDiagnostics,
}

/// Runs the solver stages in order
#[derive(Debug, Clone, Copy, Default)]
pub struct StationSolver {
    validator: DistanceValidator,
    triangles: TriangleValidator,
    extractor: AngleExtractor,
    resolver: SignResolver,
    projector: CoordinateProjector,
}

impl StationSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the input mode once and solve
    pub fn solve(&self, input: &SolverInput) -> SolverResult<Solution> {
        self.solve_distances(&input.distances())
    }

    /// Solve station coordinates from six ranges
    pub fn solve_distances(&self, distances: &DistanceSet) -> SolverResult<Solution> {
        let _span = info_span!("solve_distances").entered();

        self.validator.validate(distances)?;

        let feasibility = self.triangles.validate_all(distances);
        let angles = self.extractor.extract(distances, feasibility);
        let sign = self.resolver.resolve(&angles);
        let coordinates = self.projector.project(distances, &angles, sign.sign);

        let angles_deg = [
            angles.theta_12.degrees(),
            angles.theta_13.degrees(),
            angles.theta_1.degrees(),
        ];
        debug!(
            theta_12_deg = angles_deg[0],
            theta_13_deg = angles_deg[1],
            theta_1_deg = angles_deg[2],
            "solved station angles"
        );

        Ok(Solution {
            distances: *distances,
            coordinates,
            diagnostics: SolveDiagnostics {
                feasibility,
                angles,
                angles_deg,
                sign,
            },
        })
    }
}

/// Solve station coordinates from six ranges with a default solver
pub fn solve_from_distances(distances: &DistanceSet) -> SolverResult<Solution> {
    StationSolver::new().solve_distances(distances)
}

/// Six pairwise Euclidean distances of known station coordinates
pub fn solve_from_coordinates(coordinates: &CoordinateSet) -> DistanceSet {
    coordinates.pairwise_distances()
}
