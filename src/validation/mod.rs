//! Input validation and post-solve consistency checks

pub mod data;
pub mod error;
pub mod consistency;

pub use data::DistanceValidator;
pub use error::{DistanceIssue, SolverError, SolverResult};
pub use consistency::{ConsistencyReport, EdgeResidual};
