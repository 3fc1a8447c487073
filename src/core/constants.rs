//! Physical constants and solver parameters

/// Number of stations in a ranging cell
pub const STATION_COUNT: usize = 4;

/// Number of pairwise range measurements between the stations
pub const EDGE_COUNT: usize = 6;

/// Station placed at the origin of the canonical frame
pub const ORIGIN_STATION: usize = 1;

/// Station placed on the positive x-axis of the canonical frame
pub const AXIS_STATION: usize = 2;

/// Default tolerance (meters) when comparing measured and reconstructed ranges
pub const DEFAULT_CONSISTENCY_TOLERANCE_M: f64 = 1e-6;
