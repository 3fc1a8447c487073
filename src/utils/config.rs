use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

use crate::api::types::OutputFormat;
use crate::core::DEFAULT_CONSISTENCY_TOLERANCE_M;

/// Largest number of decimals accepted for report rounding
pub const MAX_PRECISION: u8 = 12;

/// Solver and report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Report settings
    pub output: OutputConfig,
    /// Log verbosity: error, warn, info, debug or trace
    pub log_level: String,
    /// Residual tolerance for the consistency check (meters)
    pub consistency_tolerance_m: f64,
}

/// Report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Decimals kept when rounding coordinates and angles
    pub precision: u8,
    /// Include sign-estimation details and consistency residuals
    pub include_diagnostics: bool,
    /// Single-line text output
    pub compact: bool,
    /// Pretty-print JSON output
    pub pretty_json: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            log_level: "warn".to_string(),
            consistency_tolerance_m: DEFAULT_CONSISTENCY_TOLERANCE_M,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            precision: 3,
            include_diagnostics: false,
            compact: false,
            pretty_json: true,
        }
    }
}

impl SolverConfig {
    /// Parsed log level
    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidParameter {
            parameter: "log_level".to_string(),
            value: self.log_level.clone(),
            reason: "expected one of error, warn, info, debug, trace".to_string(),
        })
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("invalid value '{value}' for {parameter}: {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    #[error("{message}")]
    IoError { message: String },
    /// JSON serialization/deserialization error
    #[error("{message}")]
    SerializationError { message: String },
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether configuration is valid
    pub is_valid: bool,
    /// Validation errors
    pub errors: Vec<ConfigError>,
    /// Validation warnings
    pub warnings: Vec<String>,
}

/// Loads, validates and stores the solver configuration
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: SolverConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: SolverConfig) -> Result<(), ConfigError> {
        let validation = Self::validate_config(&config);
        if let Some(error) = validation.errors.into_iter().next() {
            return Err(error);
        }
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from a JSON file; missing fields keep their defaults
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: SolverConfig = serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to parse config file '{}': {}", path_str, e),
        })?;

        let validation = Self::validate_config(&config);
        if let Some(error) = validation.errors.into_iter().next() {
            return Err(error);
        }
        for warning in &validation.warnings {
            tracing::warn!(path = %path_str, "{}", warning);
        }

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::IoError {
                message: "No file path set for saving configuration".to_string(),
            }),
        }
    }

    /// Check if configuration has been modified since last load or save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.config.output.format = format;
        self.is_modified = true;
    }

    pub fn set_precision(&mut self, precision: u8) -> Result<u8, ConfigError> {
        if precision > MAX_PRECISION {
            return Err(ConfigError::InvalidParameter {
                parameter: "output.precision".to_string(),
                value: precision.to_string(),
                reason: format!("must be at most {}", MAX_PRECISION),
            });
        }
        let previous = self.config.output.precision;
        self.config.output.precision = precision;
        self.is_modified = true;
        Ok(previous)
    }

    pub fn set_log_level(&mut self, level: Level) {
        self.config.log_level = level.to_string().to_lowercase();
        self.is_modified = true;
    }

    pub fn set_include_diagnostics(&mut self, enabled: bool) {
        self.config.output.include_diagnostics = enabled;
        self.is_modified = true;
    }

    /// Validate a configuration without applying it
    pub fn validate_config(config: &SolverConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        if config.output.precision > MAX_PRECISION {
            result.errors.push(ConfigError::InvalidParameter {
                parameter: "output.precision".to_string(),
                value: config.output.precision.to_string(),
                reason: format!("must be at most {}", MAX_PRECISION),
            });
        }

        if let Err(error) = config.level() {
            result.errors.push(error);
        }

        if !config.consistency_tolerance_m.is_finite() || config.consistency_tolerance_m < 0.0 {
            result.errors.push(ConfigError::InvalidParameter {
                parameter: "consistency_tolerance_m".to_string(),
                value: config.consistency_tolerance_m.to_string(),
                reason: "must be a non-negative number".to_string(),
            });
        }

        if config.output.compact && config.output.format != OutputFormat::Text {
            result
                .warnings
                .push("output.compact only applies to text output".to_string());
        }

        result.is_valid = result.errors.is_empty();
        result
    }
}
