//! Station geometry algorithms

pub mod triangle;
pub mod angles;
pub mod sign;
pub mod projection;
pub mod solver;

pub use triangle::{Triangle, TriangleFeasibility, TriangleValidator};
pub use angles::{angle_from_sin_cos, AngleBranch, AngleExtractor, AngleSet, SinCos};
pub use sign::{Sign, SignEstimate, SignHypothesis, SignResolver, HYPOTHESES};
pub use projection::CoordinateProjector;
pub use solver::{solve_from_coordinates, solve_from_distances, Solution, SolveDiagnostics, SolverInput, StationSolver};
