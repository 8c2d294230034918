//! Workspace umbrella crate for rosterkpi.
//!
//! This crate stitches together reading, row validation, KPI aggregation and
//! writing so callers can process an employee file with a single entry point.
//! The stage crates stay pure; everything that logs, times or touches the
//! filesystem lives here or in `records`.

pub mod config;

pub use config::{ConfigLoadError, OutputNames, PipelineConfig};
pub use records::{
    CsvFileSource, DirectorySink, InMemorySink, InMemorySource, RecordSink, RecordSource,
    RecordsError, WriteOutcome, read_records, write_records,
};
pub use report::{
    AreaSummary, ConfigError as ReportConfigError, Report, ReportConfig, ReportError,
    ReportOutcome, TOP_EARNERS, TopEarner, aggregate, final_bonus, report_from_records,
};
pub use validate::{
    Area, AreaSet, ConfigError as ValidationConfigError, Employee, FieldError, FieldNames,
    Outcome, Record, RejectReason, Rejection, ValidationConfig, ValidationRun, run_validation,
    validate_record,
};

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use tracing::{Level, info, warn};

/// Errors that abort a pipeline run. Rejected rows are not errors.
#[derive(Debug)]
pub enum PipelineError {
    Config(ConfigLoadError),
    Input(RecordsError),
    Output(RecordsError),
    Report(ReportError),
    Document(serde_json::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(err) => write!(f, "invalid configuration: {err}"),
            PipelineError::Input(err) => write!(f, "input failure: {err}"),
            PipelineError::Output(err) => write!(f, "output failure: {err}"),
            PipelineError::Report(err) => write!(f, "report failure: {err}"),
            PipelineError::Document(err) => write!(f, "report serialization failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Config(err) => Some(err),
            PipelineError::Input(err) | PipelineError::Output(err) => Some(err),
            PipelineError::Report(err) => Some(err),
            PipelineError::Document(err) => Some(err),
        }
    }
}

impl From<ConfigLoadError> for PipelineError {
    fn from(value: ConfigLoadError) -> Self {
        PipelineError::Config(value)
    }
}

impl From<ReportError> for PipelineError {
    fn from(value: ReportError) -> Self {
        PipelineError::Report(value)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_read(&self, latency: Duration, result: Result<usize, &RecordsError>);
    fn record_validation(&self, latency: Duration, validated: usize, rejected: usize);
    fn record_report(&self, latency: Duration, produced: bool);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_read(self, result: Result<usize, &RecordsError>) {
        self.recorder.record_read(self.start.elapsed(), result);
    }

    fn record_validation(self, run: &ValidationRun) {
        self.recorder.record_validation(
            self.start.elapsed(),
            run.validated.len(),
            run.rejected.len(),
        );
    }

    fn record_report(self, outcome: &ReportOutcome) {
        self.recorder
            .record_report(self.start.elapsed(), outcome.report().is_some());
    }
}

/// What happened to the report document in a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportStatus {
    Written { name: String, report: Report },
    NothingToReport,
}

/// Counts and outcomes of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub input_rows: usize,
    pub validated_rows: usize,
    pub rejected_rows: usize,
    pub validated_output: WriteOutcome,
    pub rejected_output: WriteOutcome,
    pub report: ReportStatus,
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} rows read: {} validated, {} rejected",
            self.input_rows, self.validated_rows, self.rejected_rows
        )?;
        match &self.report {
            ReportStatus::Written { name, report } => write!(
                f,
                "report '{name}' written: {} areas, total bonus {:.2}",
                report.areas().len(),
                report.total_bonus()
            ),
            ReportStatus::NothingToReport => write!(f, "no validated rows, no report written"),
        }
    }
}

/// Validate records with explicit configuration, reporting to the metrics
/// recorder when one is installed.
pub fn validate_records(records: Vec<Record>, cfg: &ValidationConfig) -> ValidationRun {
    let metrics = MetricsSpan::start();
    let run = run_validation(records, cfg);
    if let Some(span) = metrics {
        span.record_validation(&run);
    }
    run
}

/// Aggregate validated employees, reporting to the metrics recorder.
pub fn build_report(employees: &[Employee], cfg: &ReportConfig) -> ReportOutcome {
    let metrics = MetricsSpan::start();
    let outcome = aggregate(employees, cfg);
    if let Some(span) = metrics {
        span.record_report(&outcome);
    }
    outcome
}

/// Run the full pipeline: read, validate, write both partitions, aggregate,
/// write the report.
///
/// A source that cannot be read aborts the run before anything is written.
/// An empty validated set is not a failure: the summary says
/// [`ReportStatus::NothingToReport`] and no report document is written.
/// Artifacts a run does not produce are cleared from the sink, so a reused
/// output directory never mixes in files from an earlier run.
pub fn run_pipeline_with(
    source: &dyn RecordSource,
    sink: &dyn RecordSink,
    cfg: &PipelineConfig,
) -> Result<PipelineSummary, PipelineError> {
    let start = Instant::now();
    cfg.validate()?;

    let span = tracing::span!(Level::INFO, "rosterkpi.run", input = %source.describe());
    let _guard = span.enter();

    let records = read_input(source)?;
    let input_rows = records.len();
    info!(rows = input_rows, "input_read");

    let run = validate_records(records, &cfg.validation);
    let validated_rows = run.validated.len();
    let rejected_rows = run.rejected.len();
    info!(
        validated = validated_rows,
        rejected = rejected_rows,
        "validation_complete"
    );

    let outcome = build_report(&run.validated, &cfg.report);

    let (validated, rejected) = run.into_records(&cfg.validation.reason_field);
    let validated_output = write_output(sink, &cfg.output.validated_file, &validated)?;
    let rejected_output = write_output(sink, &cfg.output.rejected_file, &rejected)?;

    let report = match outcome {
        ReportOutcome::Produced(report) => {
            write_report(sink, &cfg.output.report_file, &report)?;
            ReportStatus::Written {
                name: cfg.output.report_file.clone(),
                report,
            }
        }
        ReportOutcome::NothingToReport => {
            warn!("nothing_to_report");
            clear_report(sink, &cfg.output.report_file)?;
            ReportStatus::NothingToReport
        }
    };

    info!(
        input_rows,
        validated_rows,
        rejected_rows,
        elapsed_micros = start.elapsed().as_micros(),
        "pipeline_success"
    );

    Ok(PipelineSummary {
        input_rows,
        validated_rows,
        rejected_rows,
        validated_output,
        rejected_output,
        report,
    })
}

/// File-backed [`run_pipeline_with`]: reads `input` as CSV and writes all
/// artifacts into `output_dir`, creating it if needed.
pub fn run_pipeline(
    input: &Path,
    output_dir: &Path,
    cfg: &PipelineConfig,
) -> Result<PipelineSummary, PipelineError> {
    run_pipeline_with(
        &CsvFileSource::new(input),
        &DirectorySink::new(output_dir),
        cfg,
    )
}

/// Build the report from an already validated record set, such as a
/// `validated.csv` written by an earlier run. Every record is re-validated
/// first; one that fails aborts with [`ReportError::UnvalidatedRecord`].
pub fn report_from_source(
    source: &dyn RecordSource,
    sink: &dyn RecordSink,
    cfg: &PipelineConfig,
) -> Result<ReportStatus, PipelineError> {
    cfg.validate()?;

    let span = tracing::span!(Level::INFO, "rosterkpi.report", input = %source.describe());
    let _guard = span.enter();

    let records = read_input(source)?;
    let metrics = MetricsSpan::start();
    let outcome = report_from_records(records, &cfg.validation, &cfg.report)?;
    if let Some(span) = metrics {
        span.record_report(&outcome);
    }

    match outcome {
        ReportOutcome::Produced(report) => {
            write_report(sink, &cfg.output.report_file, &report)?;
            Ok(ReportStatus::Written {
                name: cfg.output.report_file.clone(),
                report,
            })
        }
        ReportOutcome::NothingToReport => {
            warn!("nothing_to_report");
            clear_report(sink, &cfg.output.report_file)?;
            Ok(ReportStatus::NothingToReport)
        }
    }
}

fn read_input(source: &dyn RecordSource) -> Result<Vec<Record>, PipelineError> {
    let metrics = MetricsSpan::start();
    match source.read_records() {
        Ok(records) => {
            if let Some(span) = metrics {
                span.record_read(Ok(records.len()));
            }
            Ok(records)
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_read(Err(&err));
            }
            warn!(error = %err, "input_read_failure");
            Err(PipelineError::Input(err))
        }
    }
}

fn write_output(
    sink: &dyn RecordSink,
    name: &str,
    records: &[Record],
) -> Result<WriteOutcome, PipelineError> {
    let outcome = sink
        .write_records(name, records)
        .map_err(PipelineError::Output)?;
    if outcome == WriteOutcome::NothingWritten {
        info!(artifact = name, "nothing_written");
    }
    Ok(outcome)
}

fn write_report(sink: &dyn RecordSink, name: &str, report: &Report) -> Result<(), PipelineError> {
    let doc = serde_json::to_value(report).map_err(PipelineError::Document)?;
    sink.write_document(name, &doc)
        .map_err(PipelineError::Output)?;
    info!(
        artifact = name,
        areas = report.areas().len(),
        total_bonus = report.total_bonus(),
        "report_written"
    );
    Ok(())
}

fn clear_report(sink: &dyn RecordSink, name: &str) -> Result<(), PipelineError> {
    if sink.clear_artifact(name).map_err(PipelineError::Output)? {
        info!(artifact = name, "stale_report_removed");
    }
    Ok(())
}
