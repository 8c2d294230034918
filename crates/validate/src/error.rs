//! Error types produced by the validate crate.
//!
//! Field access on a [`Record`](crate::Record) can fail in two ways: the
//! column is absent, or its text does not parse as a number. Both collapse
//! into [`FieldError`] so the first validation rule can treat them alike.
//!
//! ```rust
//! use validate::{FieldError, Record};
//!
//! let record = Record::from_pairs([("salario", "abc")]);
//!
//! assert_eq!(
//!     record.number("salario"),
//!     Err(FieldError::NotNumeric {
//!         field: "salario".into(),
//!         value: "abc".into(),
//!     })
//! );
//! assert!(matches!(record.text("nome"), Err(FieldError::Missing { .. })));
//! ```
use thiserror::Error;

/// Typed failure of a field lookup or numeric parse.
///
/// The enum is `#[non_exhaustive]`; match with a catch-all arm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldError {
    /// The record has no column with this name (short row or wrong header).
    #[error("field '{field}' is missing")]
    Missing { field: String },

    /// The column exists but its value is not a finite number.
    #[error("field '{field}' is not a finite number: '{value}'")]
    NotNumeric { field: String, value: String },
}

impl FieldError {
    /// Name of the column that failed.
    pub fn field(&self) -> &str {
        match self {
            FieldError::Missing { field } | FieldError::NotNumeric { field, .. } => field,
        }
    }
}

/// Errors returned by [`ValidationConfig::validate`](crate::ValidationConfig::validate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("area set is empty; at least one area must be allowed")]
    EmptyAreaSet,

    #[error("area '{0}' is blank or has surrounding whitespace and can never match")]
    UnmatchableArea(String),

    #[error("area '{0}' is listed more than once")]
    DuplicateArea(String),

    #[error("column name for '{role}' is blank")]
    BlankFieldName { role: &'static str },

    #[error("column '{0}' is mapped to more than one required field")]
    DuplicateFieldName(String),

    #[error("reason column '{0}' collides with a required input column")]
    ReasonFieldCollision(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_is_reported_for_both_variants() {
        let missing = FieldError::Missing {
            field: "area".into(),
        };
        let invalid = FieldError::NotNumeric {
            field: "salario".into(),
            value: "x".into(),
        };

        assert_eq!(missing.field(), "area");
        assert_eq!(invalid.field(), "salario");
        assert!(invalid.to_string().contains("'x'"));
    }
}
