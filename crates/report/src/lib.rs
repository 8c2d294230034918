//! rosterkpi KPI aggregation
//!
//! Turns the accepted side of a validation run into a [`Report`]: mean salary
//! and headcount per area, the three largest final bonuses, and the bonus
//! total across everyone.
//!
//! Aggregation is pure. An empty input yields
//! [`ReportOutcome::NothingToReport`] rather than an empty document, so the
//! caller can tell "nothing valid came in" apart from a real report.
//!
//! ```
//! use report::{aggregate, ReportConfig};
//! use validate::{run_validation, Record, ValidationConfig};
//!
//! let rows = [("Ana", "400"), ("Bia", "1000"), ("Caio", "200")].map(|(name, salary)| {
//!     Record::from_pairs([
//!         ("nome", name),
//!         ("area", "TI"),
//!         ("salario", salary),
//!         ("bonus_percentual", "0.5"),
//!     ])
//! });
//! let run = run_validation(rows, &ValidationConfig::default());
//!
//! let outcome = aggregate(&run.validated, &ReportConfig::default());
//! let report = outcome.report().expect("three employees");
//!
//! assert_eq!(report.employee_count("TI"), Some(3));
//! assert_eq!(report.top_earners()[0].name, "Bia");
//! assert_eq!(report.total_bonus(), 3800.0);
//! ```
mod bonus;
mod config;
mod error;
mod types;

use validate::{validate_record, Area, Employee, Outcome, Record, ValidationConfig};

pub use crate::bonus::final_bonus;
pub use crate::config::{ConfigError, ReportConfig, TOP_EARNERS};
pub use crate::error::ReportError;
pub use crate::types::{AreaSummary, Report, ReportOutcome, TopEarner};

use crate::bonus::round_cents;

/// Aggregates validated employees into a report.
pub fn aggregate(employees: &[Employee], cfg: &ReportConfig) -> ReportOutcome {
    if employees.is_empty() {
        return ReportOutcome::NothingToReport;
    }

    let areas = summarize_areas(employees);

    let ranked: Vec<TopEarner> = employees
        .iter()
        .map(|employee| TopEarner {
            name: employee.name().to_string(),
            bonus: final_bonus(employee, cfg),
        })
        .collect();

    let total_bonus: f64 = ranked.iter().map(|earner| earner.bonus).sum();
    let top_earners = top_by_bonus(ranked);

    ReportOutcome::Produced(Report {
        areas,
        top_earners,
        total_bonus,
    })
}

/// Re-validates records read back from a validated file, then aggregates.
///
/// A record that no longer validates fails the whole call: the report must
/// only ever see accepted rows.
pub fn report_from_records<I>(
    records: I,
    validation: &ValidationConfig,
    cfg: &ReportConfig,
) -> Result<ReportOutcome, ReportError>
where
    I: IntoIterator<Item = Record>,
{
    let mut employees = Vec::new();
    for (idx, record) in records.into_iter().enumerate() {
        match validate_record(record, validation) {
            Outcome::Accepted(employee) => employees.push(employee),
            Outcome::Rejected(rejection) => {
                return Err(ReportError::UnvalidatedRecord {
                    row: idx + 1,
                    reason: rejection.reason().clone(),
                })
            }
        }
    }
    Ok(aggregate(&employees, cfg))
}

fn summarize_areas(employees: &[Employee]) -> Vec<AreaSummary> {
    let mut groups: Vec<(&Area, Vec<f64>)> = Vec::new();
    for employee in employees {
        match groups.iter_mut().find(|(area, _)| *area == employee.area()) {
            Some((_, salaries)) => salaries.push(employee.salary()),
            None => groups.push((employee.area(), vec![employee.salary()])),
        }
    }

    groups
        .into_iter()
        .map(|(area, salaries)| {
            let sum: f64 = salaries.iter().sum();
            AreaSummary {
                area: area.clone(),
                average_salary: round_cents(sum / salaries.len() as f64),
                employee_count: salaries.len(),
            }
        })
        .collect()
}

/// Stable descending sort, truncated to [`TOP_EARNERS`].
fn top_by_bonus(mut ranked: Vec<TopEarner>) -> Vec<TopEarner> {
    ranked.sort_by(|a, b| b.bonus.total_cmp(&a.bonus));
    ranked.truncate(TOP_EARNERS);
    ranked
}
