use validate::Employee;

use crate::config::ReportConfig;

/// Final bonus of an accepted employee: `base_bonus + salary * bonus_percentage`.
pub fn final_bonus(employee: &Employee, cfg: &ReportConfig) -> f64 {
    cfg.base_bonus + employee.salary() * employee.bonus_percentage()
}

/// Rounds to two decimals, halves away from zero.
///
/// The scaling happens in binary floating point before rounding, so a
/// stored value just below a decimal half still rounds up: `1.115` (held as
/// `1.11499...`) becomes `1.12`, not the `1.11` a correctly rounded decimal
/// conversion gives.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use validate::{validate_record, Outcome, Record, ValidationConfig};

    fn employee(salary: &str, bonus: &str) -> Employee {
        let record = Record::from_pairs([
            ("nome", "Ana"),
            ("area", "TI"),
            ("salario", salary),
            ("bonus_percentual", bonus),
        ]);
        match validate_record(record, &ValidationConfig::default()) {
            Outcome::Accepted(employee) => employee,
            Outcome::Rejected(rejection) => panic!("unexpected rejection: {}", rejection.reason()),
        }
    }

    #[test]
    fn bonus_is_base_plus_salary_share() {
        let cfg = ReportConfig::default();
        assert_eq!(final_bonus(&employee("400", "0.5"), &cfg), 1200.0);
        assert_eq!(final_bonus(&employee("0", "1"), &cfg), 1000.0);
        assert_eq!(final_bonus(&employee("8000", "0"), &cfg), 1000.0);
    }

    #[test]
    fn base_bonus_is_configurable() {
        let cfg = ReportConfig { base_bonus: 0.0 };
        assert_eq!(final_bonus(&employee("400", "0.5"), &cfg), 200.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(0.375), 0.38);
        assert_eq!(round_cents(3000.0), 3000.0);
        assert_eq!(round_cents(1234.5678), 1234.57);
    }

    #[test]
    fn rounding_scales_before_rounding() {
        assert_eq!(round_cents(1.115), 1.12);
        assert_eq!(round_cents(2.675), 2.68);
        assert_eq!(round_cents(-0.125), -0.13);
    }
}
