//! Configuration for KPI aggregation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of employees listed in the bonus ranking.
pub const TOP_EARNERS: usize = 3;

/// Runtime configuration for [`aggregate`](crate::aggregate).
///
/// ```rust
/// use report::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(config.base_bonus, 1000.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Flat amount every employee receives on top of the salary share.
    ///
    /// Default: `1000.0`
    pub base_bonus: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { base_bonus: 1000.0 }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_bonus.is_finite() {
            return Err(ConfigError::NonFiniteBaseBonus(self.base_bonus));
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("base_bonus must be a finite number, got {0}")]
    NonFiniteBaseBonus(f64),
}
