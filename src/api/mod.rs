//! Report types and output formatting for solved station layouts

pub mod types;
pub mod formatting;

pub use types::{station_label, OutputFormat};
pub use formatting::{
    CsvFormatter, DiagnosticInfo, FormattedSolution, JsonFormatter, SolutionFormatter, StationCoordinates,
    TextFormatter,
};
