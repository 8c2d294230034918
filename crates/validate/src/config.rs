//! Configuration types for the validation engine.
//!
//! [`ValidationConfig`] carries everything the rules treat as a constant: the
//! column names of the four required fields, the closed set of allowed areas,
//! and the name of the column appended to rejected rows. Defaults describe the
//! source file layout (`nome`, `area`, `salario`, `bonus_percentual`);
//! [`ValidationConfig::english`] is the English-header preset.
//!
//! ```rust
//! use validate::ValidationConfig;
//!
//! let config = ValidationConfig::default();
//! config.validate().expect("defaults are valid");
//!
//! assert_eq!(config.fields.salary, "salario");
//! assert!(config.areas.contains("TI"));
//! assert_eq!(config.reason_field, "reason");
//! ```
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Area;

/// Runtime configuration for row validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Source column names of the required fields.
    pub fields: FieldNames,

    /// Closed set of areas a row may belong to. Membership is an exact match
    /// against the trimmed cell value.
    pub areas: AreaSet,

    /// Column appended to rejected rows to carry the rejection reason.
    ///
    /// Default: `"reason"`
    pub reason_field: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fields: FieldNames::default(),
            areas: AreaSet::default(),
            reason_field: "reason".into(),
        }
    }
}

impl ValidationConfig {
    /// English column names with the English area set
    /// (`Sales`, `IT`, `Finance`, `HR`, `Operations`).
    pub fn english() -> Self {
        Self {
            fields: FieldNames {
                name: "name".into(),
                area: "area".into(),
                salary: "salary".into(),
                bonus_percentage: "bonus_percentage".into(),
            },
            areas: AreaSet::new(["Sales", "IT", "Finance", "HR", "Operations"]),
            reason_field: "reason".into(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fields.validate()?;
        self.areas.validate()?;

        if self.fields.iter().any(|(_, column)| column == self.reason_field) {
            return Err(ConfigError::ReasonFieldCollision(self.reason_field.clone()));
        }

        Ok(())
    }
}

/// Column names for the four required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub name: String,
    pub area: String,
    pub salary: String,
    pub bonus_percentage: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            name: "nome".into(),
            area: "area".into(),
            salary: "salario".into(),
            bonus_percentage: "bonus_percentual".into(),
        }
    }
}

impl FieldNames {
    /// `(role, column)` pairs in rule-evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", self.name.as_str()),
            ("area", self.area.as_str()),
            ("salary", self.salary.as_str()),
            ("bonus_percentage", self.bonus_percentage.as_str()),
        ]
        .into_iter()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<&str> = Vec::with_capacity(4);
        for (role, column) in self.iter() {
            if column.trim().is_empty() {
                return Err(ConfigError::BlankFieldName { role });
            }
            if seen.contains(&column) {
                return Err(ConfigError::DuplicateFieldName(column.to_string()));
            }
            seen.push(column);
        }
        Ok(())
    }
}

/// Closed set of allowed area names, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaSet(Vec<String>);

impl Default for AreaSet {
    fn default() -> Self {
        Self::new(["Vendas", "TI", "Financeiro", "RH", "Operações"])
    }
}

impl AreaSet {
    pub fn new<I, S>(areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(areas.into_iter().map(Into::into).collect())
    }

    /// Exact, case-sensitive membership test. Callers trim first.
    pub fn contains(&self, candidate: &str) -> bool {
        self.0.iter().any(|area| area == candidate)
    }

    /// Returns the canonical [`Area`] for `candidate` when it is a member.
    pub fn resolve(&self, candidate: &str) -> Option<Area> {
        self.0
            .iter()
            .find(|area| *area == candidate)
            .map(|area| Area::new_unchecked(area.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::EmptyAreaSet);
        }
        for (idx, area) in self.0.iter().enumerate() {
            if area.is_empty() || area.trim() != area {
                return Err(ConfigError::UnmatchableArea(area.clone()));
            }
            if self.0[..idx].contains(area) {
                return Err(ConfigError::DuplicateArea(area.clone()));
            }
        }
        Ok(())
    }
}
