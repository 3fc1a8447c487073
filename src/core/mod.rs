//! Core types and constants for four-station trilateration

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
