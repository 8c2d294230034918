//! The KPI report document.
//!
//! [`Report`] keeps everything in ordered lists: areas in the order they
//! first appear in the validated input, earners in ranking order. It only
//! becomes name-keyed when serialized:
//!
//! ```json
//! {
//!   "average_salary_by_area": { "TI": 3000.0 },
//!   "count_employees_by_area": { "TI": 5 },
//!   "top_3_final_bonus": { "Ana Silva": 1500.0 },
//!   "total_bonus_value": 8000.0
//! }
//! ```
//!
//! Two ranked employees sharing a name collapse into one entry of
//! `top_3_final_bonus`; [`Report::top_earners`] still shows both.
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use validate::Area;

/// Salary statistics for one area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSummary {
    pub area: Area,
    /// Arithmetic mean, rounded to two decimals.
    pub average_salary: f64,
    pub employee_count: usize,
}

/// One entry of the bonus ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct TopEarner {
    pub name: String,
    pub bonus: f64,
}

/// Aggregated KPIs over a non-empty validated set.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub(crate) areas: Vec<AreaSummary>,
    pub(crate) top_earners: Vec<TopEarner>,
    pub(crate) total_bonus: f64,
}

impl Report {
    /// Per-area statistics in first-appearance order.
    pub fn areas(&self) -> &[AreaSummary] {
        &self.areas
    }

    pub fn average_salary(&self, area: &str) -> Option<f64> {
        self.area(area).map(|summary| summary.average_salary)
    }

    pub fn employee_count(&self, area: &str) -> Option<usize> {
        self.area(area).map(|summary| summary.employee_count)
    }

    /// Highest bonuses first; ties keep input order. At most three entries.
    pub fn top_earners(&self) -> &[TopEarner] {
        &self.top_earners
    }

    /// The ranking as a name-keyed mapping, as it is serialized. A repeated
    /// name keeps the position of its first entry and the value of its last.
    pub fn top_earners_by_name(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = Vec::with_capacity(self.top_earners.len());
        for earner in &self.top_earners {
            match entries.iter_mut().find(|(name, _)| *name == earner.name) {
                Some(entry) => entry.1 = earner.bonus,
                None => entries.push((earner.name.as_str(), earner.bonus)),
            }
        }
        entries
    }

    /// Sum of final bonuses over every validated employee, not just the top.
    pub fn total_bonus(&self) -> f64 {
        self.total_bonus
    }

    fn area(&self, area: &str) -> Option<&AreaSummary> {
        self.areas
            .iter()
            .find(|summary| summary.area.as_str() == area)
    }
}

struct AverageSalaries<'a>(&'a [AreaSummary]);

impl Serialize for AverageSalaries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for summary in self.0 {
            map.serialize_entry(summary.area.as_str(), &summary.average_salary)?;
        }
        map.end()
    }
}

struct EmployeeCounts<'a>(&'a [AreaSummary]);

impl Serialize for EmployeeCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for summary in self.0 {
            map.serialize_entry(summary.area.as_str(), &summary.employee_count)?;
        }
        map.end()
    }
}

struct BonusByName<'a>(Vec<(&'a str, f64)>);

impl Serialize for BonusByName<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, bonus) in &self.0 {
            map.serialize_entry(name, bonus)?;
        }
        map.end()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut doc = serializer.serialize_struct("Report", 4)?;
        doc.serialize_field("average_salary_by_area", &AverageSalaries(&self.areas))?;
        doc.serialize_field("count_employees_by_area", &EmployeeCounts(&self.areas))?;
        doc.serialize_field("top_3_final_bonus", &BonusByName(self.top_earners_by_name()))?;
        doc.serialize_field("total_bonus_value", &self.total_bonus)?;
        doc.end()
    }
}

/// Result of aggregation. An empty validated set is not an error, it simply
/// has nothing to report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Produced(Report),
    NothingToReport,
}

impl ReportOutcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            ReportOutcome::Produced(report) => Some(report),
            ReportOutcome::NothingToReport => None,
        }
    }

    pub fn into_report(self) -> Option<Report> {
        match self {
            ReportOutcome::Produced(report) => Some(report),
            ReportOutcome::NothingToReport => None,
        }
    }
}
