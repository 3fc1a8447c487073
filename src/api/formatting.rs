//! Solution output formatting and serialization
//!
//! [`SolutionFormatter`] turns a [`Solution`] into a rounded, serializable
//! [`FormattedSolution`]; the text, JSON and CSV formatters render that.

use serde::{Deserialize, Serialize};

use crate::algorithms::angles::{AngleBranch, SinCos};
use crate::algorithms::solver::Solution;
use crate::api::types::station_label;
use crate::core::{DistanceSet, DEFAULT_CONSISTENCY_TOLERANCE_M};
use crate::validation::consistency::ConsistencyReport;

/// Formatted solution ready for output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSolution {
    /// Ranges the solve was run on
    pub distances: DistanceSet,
    /// Station coordinates in the canonical frame
    pub stations: Vec<StationCoordinates>,
    /// θ12, θ13 and θ1
    pub angles: Vec<AngleReport>,
    /// Resolved sign K of θ12 (+1 or -1)
    pub sign: f64,
    /// Diagnostic information (optional)
    pub diagnostics: Option<DiagnosticInfo>,
}

/// Coordinates of one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationCoordinates {
    pub station: String,
    pub x: f64,
    pub y: f64,
}

/// One solved angle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleReport {
    pub name: String,
    pub sin: f64,
    pub cos: f64,
    pub degrees: f64,
}

/// Diagnostic information for a solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticInfo {
    /// Triangles that violate the triangle inequality
    pub infeasible_triangles: Vec<String>,
    /// Formula branch used for the angles
    pub angle_branch: AngleBranch,
    /// Index of the winning sign hypothesis
    pub hypothesis_index: usize,
    /// Error of the winning sign hypothesis
    pub hypothesis_error: f64,
    /// Errors of all four sign hypotheses
    pub hypothesis_errors: [f64; 4],
    /// Measured versus reconstructed ranges
    pub consistency: ConsistencyReport,
    /// Whether all residuals are within tolerance
    pub consistent: bool,
    /// Warnings (if any)
    pub warnings: Vec<String>,
}

/// Builds [`FormattedSolution`] values
#[derive(Debug, Clone)]
pub struct SolutionFormatter {
    /// Include diagnostic information
    pub include_diagnostics: bool,
    /// Decimals kept for coordinates, distances and angles
    pub precision: u8,
    /// Residual tolerance for the consistency check (meters)
    pub consistency_tolerance_m: f64,
}

impl Default for SolutionFormatter {
    fn default() -> Self {
        Self {
            include_diagnostics: false,
            precision: 3,
            consistency_tolerance_m: DEFAULT_CONSISTENCY_TOLERANCE_M,
        }
    }
}

impl SolutionFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create formatter with diagnostic information enabled
    pub fn with_diagnostics() -> Self {
        Self {
            include_diagnostics: true,
            ..Default::default()
        }
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_consistency_tolerance(mut self, tolerance_m: f64) -> Self {
        self.consistency_tolerance_m = tolerance_m;
        self
    }

    pub fn format(&self, solution: &Solution) -> FormattedSolution {
        let stations = solution
            .coordinates
            .stations()
            .iter()
            .enumerate()
            .map(|(index, point)| StationCoordinates {
                station: station_label(index),
                x: self.round_to_precision(point.x),
                y: self.round_to_precision(point.y),
            })
            .collect();

        let angles = &solution.diagnostics.angles;
        let angles = vec![
            self.angle_report("theta_12", &angles.theta_12),
            self.angle_report("theta_13", &angles.theta_13),
            self.angle_report("theta_1", &angles.theta_1),
        ];

        let distances = DistanceSet::from_array(solution.distances.to_array().map(|d| self.round_to_precision(d)));

        let diagnostics = if self.include_diagnostics {
            Some(self.format_diagnostic_info(solution))
        } else {
            None
        };

        FormattedSolution {
            distances,
            stations,
            angles,
            sign: solution.diagnostics.sign.sign.factor(),
            diagnostics,
        }
    }

    fn angle_report(&self, name: &str, pair: &SinCos) -> AngleReport {
        AngleReport {
            name: name.to_string(),
            sin: self.round_to_precision(pair.sin),
            cos: self.round_to_precision(pair.cos),
            degrees: self.round_to_precision(pair.degrees()),
        }
    }

    fn format_diagnostic_info(&self, solution: &Solution) -> DiagnosticInfo {
        let diagnostics = &solution.diagnostics;
        let consistency = ConsistencyReport::evaluate(&solution.distances, &solution.coordinates);
        let consistent = consistency.is_consistent(self.consistency_tolerance_m);

        let infeasible_triangles: Vec<String> = diagnostics
            .feasibility
            .infeasible_triangles()
            .iter()
            .map(|t| t.to_string())
            .collect();

        let mut warnings: Vec<String> = infeasible_triangles
            .iter()
            .map(|t| format!("Triangularity error in Triangle {}", t))
            .collect();
        if diagnostics.angles.branch == AngleBranch::ClampedLawOfCosines {
            warnings.push("Due to the triangularity error, some angles are approximated".to_string());
        }
        if !consistent {
            warnings.push(format!(
                "Range {} differs from the solved layout by {:.3e} m",
                consistency.worst_edge, consistency.max_abs_residual_m
            ));
        }

        DiagnosticInfo {
            infeasible_triangles,
            angle_branch: diagnostics.angles.branch,
            hypothesis_index: diagnostics.sign.hypothesis_index,
            hypothesis_error: diagnostics.sign.error,
            hypothesis_errors: diagnostics.sign.errors,
            consistency,
            consistent,
            warnings,
        }
    }

    /// Round floating-point value to specified precision
    fn round_to_precision(&self, value: f64) -> f64 {
        let multiplier = 10_f64.powi(self.precision as i32);
        let rounded = (value * multiplier).round() / multiplier;
        // Avoid printing "-0.0"
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}

/// Human-readable text formatter
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Include diagnostic information
    pub include_diagnostics: bool,
    /// Use compact format
    pub compact: bool,
    /// Decimals printed for coordinates
    pub precision: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            include_diagnostics: false,
            compact: false,
            precision: 1,
        }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format_text(&self, formatted: &FormattedSolution) -> String {
        if self.compact {
            return self.format_compact(formatted);
        }

        let p = self.precision;
        let mut output = String::new();

        let d = &formatted.distances;
        output.push_str("Distances:\n");
        output.push_str(&format!("\td01={:.2} d02={:.2} d03={:.2}\n", d.d01, d.d02, d.d03));
        output.push_str(&format!("\td12={:.2} d13={:.2} d23={:.2}\n", d.d12, d.d13, d.d23));

        output.push_str("\nCosines and Sines:\n");
        for angle in &formatted.angles {
            output.push_str(&format!(
                "\tcos_{name:<9}= {:.3}\tsin_{name:<9}= {:.3}\n",
                angle.cos,
                angle.sin,
                name = angle.name
            ));
        }

        output.push_str("\nAngles:\n");
        for angle in &formatted.angles {
            output.push_str(&format!("\t{:<9}= {:.1} degrees\n", angle.name, angle.degrees));
        }

        if self.include_diagnostics {
            if let Some(diag) = &formatted.diagnostics {
                output.push_str("\nSign Estimation (K):\n");
                output.push_str(&format!(
                    "\tIndex= {}  Min Error= {:.3e}  K= {}\n",
                    diag.hypothesis_index, diag.hypothesis_error, formatted.sign
                ));
            }
        }

        output.push_str("\nX,Y Coordinates Estimation:\n");
        for station in &formatted.stations {
            output.push_str(&format!("\t{} : [ {:.p$} , {:.p$} ]\n", station.station, station.x, station.y));
        }

        if self.include_diagnostics {
            if let Some(diag) = &formatted.diagnostics {
                output.push_str("\nConsistency:\n");
                output.push_str(&format!(
                    "\tMax Residual= {:.3e} m ({})  RMS= {:.3e} m\n",
                    diag.consistency.max_abs_residual_m, diag.consistency.worst_edge, diag.consistency.rms_residual_m
                ));

                if !diag.warnings.is_empty() {
                    output.push_str("\nWarnings:\n");
                    for warning in &diag.warnings {
                        output.push_str(&format!("\t[!] {}\n", warning));
                    }
                }
            }
        }

        output
    }

    fn format_compact(&self, formatted: &FormattedSolution) -> String {
        let p = self.precision;
        let stations: Vec<String> = formatted
            .stations
            .iter()
            .map(|s| format!("{} [{:.p$}, {:.p$}]", s.station, s.x, s.y))
            .collect();
        format!("{} | K={:+}", stations.join(" | "), formatted.sign)
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pretty-printing JSON formatter
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, formatted: &FormattedSolution) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(formatted)
        } else {
            serde_json::to_string(formatted)
        }
    }
}

/// CSV formatter, one row per station
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Include header row
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { include_header: true }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        "station,x,y".to_string()
    }

    pub fn format_csv(&self, formatted: &FormattedSolution) -> String {
        let mut lines = Vec::with_capacity(formatted.stations.len() + 1);
        if self.include_header {
            lines.push(self.header());
        }
        for station in &formatted.stations {
            lines.push(format!("{},{},{}", station.station, station.x, station.y));
        }
        lines.join("\n")
    }
}
