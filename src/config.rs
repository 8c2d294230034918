//! YAML configuration file support for rosterkpi
//!
//! Every setting has a default, so an empty document (or no file at all)
//! reproduces the built-in behaviour. A file only needs the keys it changes.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! validation:
//!   fields:
//!     name: "nome"
//!     area: "area"
//!     salary: "salario"
//!     bonus_percentage: "bonus_percentual"
//!   areas: ["Vendas", "TI", "Financeiro", "RH", "Operações"]
//!   reason_field: "reason"
//!
//! report:
//!   base_bonus: 1000.0
//!
//! output:
//!   validated_file: "validated.csv"
//!   rejected_file: "errors.csv"
//!   report_file: "report.json"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use report::ReportConfig;
use validate::ValidationConfig;

/// Errors that can occur when loading or checking a configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Configuration format version.
    pub version: String,

    pub validation: ValidationConfig,

    pub report: ReportConfig,

    pub output: OutputNames,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            validation: ValidationConfig::default(),
            report: ReportConfig::default(),
            output: OutputNames::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.validation
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        self.report
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        self.output.validate()?;

        Ok(())
    }
}

/// Artifact names written into the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputNames {
    pub validated_file: String,
    pub rejected_file: String,
    pub report_file: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            validated_file: "validated.csv".to_string(),
            rejected_file: "errors.csv".to_string(),
            report_file: "report.json".to_string(),
        }
    }
}

impl OutputNames {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        let names = [
            ("validated_file", &self.validated_file),
            ("rejected_file", &self.rejected_file),
            ("report_file", &self.report_file),
        ];

        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigLoadError::Validation(format!("output.{key} is blank")));
            }
            if name.contains(['/', '\\']) {
                return Err(ConfigLoadError::Validation(format!(
                    "output.{key} must be a plain file name, got '{name}'"
                )));
            }
        }

        if self.validated_file == self.rejected_file
            || self.validated_file == self.report_file
            || self.rejected_file == self.report_file
        {
            return Err(ConfigLoadError::Validation(
                "output file names must be distinct".to_string(),
            ));
        }

        Ok(())
    }
}
