//! The row validator.
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! ```text
//! 1. parse name, area, salary, bonus_percentage   -> type/parse error
//! 2. trimmed name is empty                        -> name is blank
//! 3. a name token is all ASCII digits             -> name contains a number
//! 4. trimmed area not in the area set             -> area not in allowed set
//! 5. salary < 0                                   -> salary is negative
//! 6. bonus_percentage outside [0, 1]              -> bonus out of range
//! ```
use crate::config::ValidationConfig;
use crate::record::Record;
use crate::types::{Area, Employee, Outcome, RejectReason, Rejection};

/// Validates one row. Pure: no I/O, no logging.
pub fn validate_record(record: Record, cfg: &ValidationConfig) -> Outcome {
    match check_record(&record, cfg) {
        Ok(parsed) => Outcome::Accepted(Employee {
            record,
            name: parsed.name,
            area: parsed.area,
            salary: parsed.salary,
            bonus_percentage: parsed.bonus_percentage,
        }),
        Err(reason) => Outcome::Rejected(Rejection { record, reason }),
    }
}

struct Parsed {
    name: String,
    area: Area,
    salary: f64,
    bonus_percentage: f64,
}

fn check_record(record: &Record, cfg: &ValidationConfig) -> Result<Parsed, RejectReason> {
    let fields = &cfg.fields;
    let name = record.text(&fields.name)?.trim();
    let area_text = record.text(&fields.area)?.trim();
    let salary = record.number(&fields.salary)?;
    let bonus_percentage = record.number(&fields.bonus_percentage)?;

    if name.is_empty() {
        return Err(RejectReason::BlankName);
    }

    if name.split_whitespace().any(is_numeric_token) {
        return Err(RejectReason::NameContainsNumber);
    }

    let Some(area) = cfg.areas.resolve(area_text) else {
        return Err(RejectReason::AreaNotAllowed(area_text.to_string()));
    };

    if salary < 0.0 {
        return Err(RejectReason::NegativeSalary);
    }

    if !(0.0..=1.0).contains(&bonus_percentage) {
        return Err(RejectReason::BonusOutOfRange);
    }

    Ok(Parsed {
        name: name.to_string(),
        area,
        salary,
        bonus_percentage,
    })
}

fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;

    fn row(name: &str, area: &str, salary: &str, bonus: &str) -> Record {
        Record::from_pairs([
            ("nome", name),
            ("area", area),
            ("salario", salary),
            ("bonus_percentual", bonus),
        ])
    }

    fn reason_of(record: Record) -> Option<RejectReason> {
        validate_record(record, &ValidationConfig::default())
            .reason()
            .cloned()
    }

    #[test]
    fn accepts_well_formed_row() {
        let outcome = validate_record(
            row("  Ana Silva ", " TI ", "5000", "0.1"),
            &ValidationConfig::default(),
        );

        let Outcome::Accepted(employee) = outcome else {
            panic!("expected acceptance");
        };
        assert_eq!(employee.name(), "Ana Silva");
        assert_eq!(employee.area().as_str(), "TI");
        assert_eq!(employee.salary(), 5000.0);
        assert_eq!(employee.bonus_percentage(), 0.1);
        // the record itself is not rewritten
        assert_eq!(employee.record().get("nome"), Some("  Ana Silva "));
    }

    #[test]
    fn rule_messages() {
        let cases = [
            (row("", "TI", "3000", "0.1"), RejectReason::BlankName),
            (row("   ", "TI", "3000", "0.1"), RejectReason::BlankName),
            (row("Ana 2", "TI", "3000", "0.1"), RejectReason::NameContainsNumber),
            (row("123", "TI", "3000", "0.1"), RejectReason::NameContainsNumber),
            (
                row("Ana", " Marketing ", "3000", "0.1"),
                RejectReason::AreaNotAllowed("Marketing".into()),
            ),
            (row("Ana", "TI", "-1", "0.1"), RejectReason::NegativeSalary),
            (row("Ana", "TI", "3000", "1.5"), RejectReason::BonusOutOfRange),
            (row("Ana", "TI", "3000", "-0.5"), RejectReason::BonusOutOfRange),
        ];

        for (record, expected) in cases {
            assert_eq!(reason_of(record), Some(expected));
        }
    }

    #[test]
    fn names_with_digits_inside_words_pass() {
        assert_eq!(reason_of(row("R2D2", "TI", "3000", "0.1")), None);
        assert_eq!(reason_of(row("Ana 2a", "TI", "3000", "0.1")), None);
        assert_eq!(reason_of(row("Henrique Ⅷ", "TI", "3000", "0.1")), None);
        assert_eq!(reason_of(row("Ana ½", "TI", "3000", "0.1")), None);
    }

    #[test]
    fn parse_failures_name_the_column() {
        let reason = reason_of(row("Ana", "TI", "abc", "0.1")).expect("rejected");
        assert_eq!(reason.to_string(), "type/parse error: salario");

        let missing = Record::from_pairs([("nome", "Ana"), ("area", "TI"), ("salario", "1")]);
        assert_eq!(
            reason_of(missing),
            Some(RejectReason::Field(FieldError::Missing {
                field: "bonus_percentual".into()
            }))
        );
    }

    #[test]
    fn parse_errors_win_over_later_rules() {
        // blank name and bad salary: rule 1 runs first
        let reason = reason_of(row("", "TI", "x", "0.1")).expect("rejected");
        assert!(matches!(reason, RejectReason::Field(_)));

        // bad area and negative salary: area is checked first
        let reason = reason_of(row("Ana", "Legal", "-5", "2")).expect("rejected");
        assert_eq!(reason, RejectReason::AreaNotAllowed("Legal".into()));
    }

    #[test]
    fn numeric_boundaries() {
        let accepted = [
            row("Ana", "TI", "0", "0"),
            row("Ana", "TI", "0", "1"),
            row("Ana", "TI", "0.0", "1.0"),
        ];
        for record in accepted {
            assert_eq!(reason_of(record), None);
        }

        assert_eq!(
            reason_of(row("Ana", "TI", "-0.01", "0.5")),
            Some(RejectReason::NegativeSalary)
        );
        assert_eq!(
            reason_of(row("Ana", "TI", "100", "-0.0001")),
            Some(RejectReason::BonusOutOfRange)
        );
        assert_eq!(
            reason_of(row("Ana", "TI", "100", "1.0001")),
            Some(RejectReason::BonusOutOfRange)
        );
    }

    #[test]
    fn english_preset_uses_english_columns() {
        let cfg = ValidationConfig::english();
        let record = Record::from_pairs([
            ("name", "Jo Park"),
            ("area", "Sales"),
            ("salary", "4200"),
            ("bonus_percentage", "0.2"),
        ]);

        assert!(validate_record(record.clone(), &cfg).is_accepted());
        assert_eq!(
            validate_record(record, &ValidationConfig::default())
                .reason()
                .map(ToString::to_string),
            Some("type/parse error: nome".to_string())
        );
    }
}
