//! rosterkpi validation layer
//!
//! Employee rows enter here as loosely-typed [`Record`]s and leave split into
//! two ordered partitions: accepted [`Employee`]s and [`Rejection`]s that carry
//! the reason of the first rule they broke.
//!
//! ## What we do here
//!
//! - **Typed field access** - [`Record::text`] and [`Record::number`] turn a
//!   missing column or an unparsable number into a [`FieldError`], never a panic.
//! - **Row validation** - [`validate_record`] applies the fixed rule list with
//!   the columns and the area set taken from [`ValidationConfig`].
//! - **Partitioning** - [`run_validation`] validates a whole input in order.
//!   Nothing is dropped: `validated.len() + rejected.len()` always equals the
//!   input length.
//!
//! Nothing in this crate logs or touches the filesystem; callers decide what
//! to report.
//!
//! ## Example
//!
//! ```
//! use validate::{run_validation, Record, ValidationConfig};
//!
//! let rows = vec![
//!     Record::from_pairs([
//!         ("nome", "Ana Silva"),
//!         ("area", "TI"),
//!         ("salario", "5000"),
//!         ("bonus_percentual", "0.1"),
//!     ]),
//!     Record::from_pairs([
//!         ("nome", ""),
//!         ("area", "TI"),
//!         ("salario", "3000"),
//!         ("bonus_percentual", "0.1"),
//!     ]),
//! ];
//!
//! let run = run_validation(rows, &ValidationConfig::default());
//!
//! assert_eq!(run.validated.len(), 1);
//! assert_eq!(run.validated[0].name(), "Ana Silva");
//! assert_eq!(run.rejected[0].reason().to_string(), "name is blank");
//! ```
mod config;
mod error;
mod record;
mod rules;
mod types;

pub use crate::config::{AreaSet, FieldNames, ValidationConfig};
pub use crate::error::{ConfigError, FieldError};
pub use crate::record::Record;
pub use crate::rules::validate_record;
pub use crate::types::{Area, Employee, Outcome, RejectReason, Rejection, ValidationRun};

/// Validates every record in input order and partitions the results.
pub fn run_validation<I>(records: I, cfg: &ValidationConfig) -> ValidationRun
where
    I: IntoIterator<Item = Record>,
{
    let mut run = ValidationRun::default();
    for record in records {
        match validate_record(record, cfg) {
            Outcome::Accepted(employee) => run.validated.push(employee),
            Outcome::Rejected(rejection) => run.rejected.push(rejection),
        }
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, area: &str, salary: &str, bonus: &str) -> Record {
        Record::from_pairs([
            ("nome", name),
            ("area", area),
            ("salario", salary),
            ("bonus_percentual", bonus),
        ])
    }

    #[test]
    fn blank_name_scenario() {
        let rows = vec![
            row("Ana Silva", "TI", "5000", "0.1"),
            row("", "TI", "3000", "0.1"),
        ];

        let run = run_validation(rows.clone(), &ValidationConfig::default());

        assert_eq!(run.validated.len(), 1);
        assert_eq!(run.validated[0].record(), &rows[0]);
        assert_eq!(run.rejected.len(), 1);
        assert_eq!(run.rejected[0].record(), &rows[1]);
        assert_eq!(run.rejected[0].reason(), &RejectReason::BlankName);
    }

    #[test]
    fn order_is_preserved_in_both_partitions() {
        let rows = vec![
            row("A", "TI", "1", "0.1"),
            row("", "TI", "1", "0.1"),
            row("B", "RH", "2", "0.1"),
            row("C", "Legal", "3", "0.1"),
            row("D", "Vendas", "4", "0.1"),
            row("E", "TI", "-1", "0.1"),
        ];

        let run = run_validation(rows, &ValidationConfig::default());

        let accepted: Vec<&str> = run.validated.iter().map(Employee::name).collect();
        assert_eq!(accepted, ["A", "B", "D"]);

        let reasons: Vec<String> = run
            .rejected
            .iter()
            .map(|r| r.reason().to_string())
            .collect();
        assert_eq!(
            reasons,
            [
                "name is blank",
                "area 'Legal' not in allowed set",
                "salary is negative"
            ]
        );
        assert_eq!(run.total(), 6);
    }

    #[test]
    fn into_records_tags_rejections_only() {
        let rows = vec![row("Ana", "TI", "1", "0.1"), row("Ana 7", "TI", "1", "0.1")];
        let cfg = ValidationConfig::default();

        let (validated, rejected) = run_validation(rows, &cfg).into_records(&cfg.reason_field);

        assert!(!validated[0].contains("reason"));
        assert_eq!(rejected[0].get("reason"), Some("name contains a number"));
    }

    #[test]
    fn empty_input_yields_empty_run() {
        let run = run_validation(Vec::new(), &ValidationConfig::default());
        assert_eq!(run, ValidationRun::default());
        assert_eq!(run.total(), 0);
    }
}
