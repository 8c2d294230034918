//! rosterkpi - validate an employee CSV and write the KPI report.
//!
//! ```text
//! rosterkpi [INPUT] [OUTPUT] [--config pipeline.yaml] [--from-validated] [--json-logs]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rosterkpi::{
    CsvFileSource, DirectorySink, PipelineConfig, PipelineError, ReportStatus, report_from_source,
    run_pipeline,
};

#[derive(Debug, Parser)]
#[command(name = "rosterkpi", version, about = "Validate employee records and report KPIs")]
struct Cli {
    /// Employee CSV to read.
    #[arg(default_value = "data/funcionarios.csv")]
    input: PathBuf,

    /// Directory for validated.csv, errors.csv and report.json.
    #[arg(default_value = "out")]
    output: PathBuf,

    /// YAML configuration; built-in defaults when absent.
    #[arg(long, value_name = "YAML")]
    config: Option<PathBuf>,

    /// Treat INPUT as a previously validated file and only build the report.
    #[arg(long)]
    from_validated: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let cfg = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if cli.from_validated {
        let status = report_from_source(
            &CsvFileSource::new(&cli.input),
            &DirectorySink::new(&cli.output),
            &cfg,
        )
        .map_err(|err| describe(err, &cli))?;
        match status {
            ReportStatus::Written { name, report } => println!(
                "report '{name}' written: {} areas, total bonus {:.2}",
                report.areas().len(),
                report.total_bonus()
            ),
            ReportStatus::NothingToReport => println!("no validated rows, no report written"),
        }
        return Ok(());
    }

    let summary = run_pipeline(&cli.input, &cli.output, &cfg).map_err(|err| describe(err, &cli))?;
    println!("{summary}");
    Ok(())
}

fn describe(err: PipelineError, cli: &Cli) -> anyhow::Error {
    let missing = matches!(&err, PipelineError::Input(source) if source.is_missing_input());
    let err = anyhow::Error::new(err);
    if missing {
        err.context(format!(
            "input file {} not found, no output written",
            cli.input.display()
        ))
    } else {
        err.context(format!("processing {}", cli.input.display()))
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
