//! Result types of row validation.
//!
//! Validation never fails as a whole: every row becomes either an
//! [`Employee`] (accepted, with a typed view of its fields) or a
//! [`Rejection`] (the untouched row plus the [`RejectReason`] of the first
//! rule it broke).
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::error::FieldError;
use crate::record::Record;

/// A member of the configured area set.
///
/// Only [`AreaSet::resolve`](crate::AreaSet::resolve) hands these out, so an
/// `Area` always names an allowed area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Area(String);

impl Area {
    pub(crate) fn new_unchecked(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Area {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Why a row was rejected. `Display` renders the human-readable reason
/// written to the rejected output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RejectReason {
    #[error("type/parse error: {}", .0.field())]
    Field(#[source] FieldError),

    #[error("name is blank")]
    BlankName,

    #[error("name contains a number")]
    NameContainsNumber,

    #[error("area '{0}' not in allowed set")]
    AreaNotAllowed(String),

    #[error("salary is negative")]
    NegativeSalary,

    #[error("bonus percentage out of [0,1] range")]
    BonusOutOfRange,
}

impl From<FieldError> for RejectReason {
    fn from(value: FieldError) -> Self {
        RejectReason::Field(value)
    }
}

/// An accepted row: the source record plus its parsed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub(crate) record: Record,
    pub(crate) name: String,
    pub(crate) area: Area,
    pub(crate) salary: f64,
    pub(crate) bonus_percentage: f64,
}

impl Employee {
    /// The source row, unchanged.
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    /// Trimmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    /// Bonus percentage in `[0, 1]`.
    pub fn bonus_percentage(&self) -> f64 {
        self.bonus_percentage
    }
}

/// A rejected row and the reason it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub(crate) record: Record,
    pub(crate) reason: RejectReason,
}

impl Rejection {
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn reason(&self) -> &RejectReason {
        &self.reason
    }

    /// The source row with `reason_field` set to the rendered reason.
    pub fn into_record(self, reason_field: &str) -> Record {
        let Rejection { mut record, reason } = self;
        record.insert(reason_field, reason.to_string());
        record
    }
}

/// Outcome of validating a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(Employee),
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Reason of a rejected outcome; `None` when accepted.
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(rejection) => Some(rejection.reason()),
        }
    }
}

/// Both partitions produced by [`run_validation`](crate::run_validation),
/// each in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationRun {
    pub validated: Vec<Employee>,
    pub rejected: Vec<Rejection>,
}

impl ValidationRun {
    /// Number of input rows this run covered.
    pub fn total(&self) -> usize {
        self.validated.len() + self.rejected.len()
    }

    /// Converts both partitions back into plain records ready for writing.
    /// Rejected records gain a trailing `reason_field` column.
    pub fn into_records(self, reason_field: &str) -> (Vec<Record>, Vec<Record>) {
        let validated = self
            .validated
            .into_iter()
            .map(Employee::into_record)
            .collect();
        let rejected = self
            .rejected
            .into_iter()
            .map(|rejection| rejection.into_record(reason_field))
            .collect();
        (validated, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_render_human_readable_text() {
        let cases = [
            (
                RejectReason::Field(FieldError::Missing {
                    field: "salario".into(),
                }),
                "type/parse error: salario",
            ),
            (RejectReason::BlankName, "name is blank"),
            (RejectReason::NameContainsNumber, "name contains a number"),
            (
                RejectReason::AreaNotAllowed("Marketing".into()),
                "area 'Marketing' not in allowed set",
            ),
            (RejectReason::NegativeSalary, "salary is negative"),
            (
                RejectReason::BonusOutOfRange,
                "bonus percentage out of [0,1] range",
            ),
        ];

        for (reason, expected) in cases {
            assert_eq!(reason.to_string(), expected);
        }
    }

    #[test]
    fn rejection_appends_reason_column_last() {
        let rejection = Rejection {
            record: Record::from_pairs([("nome", ""), ("area", "TI")]),
            reason: RejectReason::BlankName,
        };

        let record = rejection.into_record("motivo");
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, ["nome", "area", "motivo"]);
        assert_eq!(record.get("motivo"), Some("name is blank"));
    }
}
