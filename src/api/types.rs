//! Common API types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON document
    Json,
    /// One CSV row per station
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Display label of a station index ("ST0".."ST3")
pub fn station_label(index: usize) -> String {
    format!("ST{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_serde_names() {
        assert_eq!(serde_json::to_string(&OutputFormat::Csv).unwrap(), "\"csv\"");
        let parsed: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
        assert_eq!(OutputFormat::default().to_string(), "text");
    }
}
