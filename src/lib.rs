//! Four-station range trilateration
//!
//! Recovers planar coordinates of four stations from their six pairwise
//! ranges (for example Wi-Fi FTM round-trip distances). Station 1 is placed
//! at the origin and station 2 on the positive x-axis; the reflection of
//! station 0 is resolved from angle-sum identities.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use self::core::{CoordinateSet, DistanceSet, Edge, STATION_COUNT};
pub use algorithms::{
    angle_from_sin_cos, solve_from_coordinates, solve_from_distances, AngleSet, Sign, SinCos, Solution,
    SolveDiagnostics, SolverInput, StationSolver, TriangleFeasibility, TriangleValidator,
};
pub use validation::{ConsistencyReport, SolverError, SolverResult};
pub use utils::{ConfigError, ConfigurationManager, SolverConfig};
pub use api::{CsvFormatter, FormattedSolution, JsonFormatter, OutputFormat, SolutionFormatter, TextFormatter};
