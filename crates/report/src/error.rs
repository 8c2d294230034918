use thiserror::Error;
use validate::RejectReason;

/// Errors from building a report out of records that were not validated in
/// the same run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    /// A record handed in as validated fails validation. `row` is 1-based.
    #[error("record {row} is not a validated record: {reason}")]
    UnvalidatedRecord { row: usize, reason: RejectReason },
}
