use std::fs;

use rosterkpi::{
    ConfigLoadError, CsvFileSource, DirectorySink, PipelineConfig, PipelineError, RecordsError,
    RejectReason, ReportError, ReportStatus, report_from_source, run_pipeline,
};

#[test]
fn missing_input_aborts_without_writing_anything() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out");

    let result = run_pipeline(
        &dir.path().join("absent.csv"),
        &out,
        &PipelineConfig::default(),
    );

    match result {
        Err(PipelineError::Input(err)) => assert!(err.is_missing_input()),
        other => panic!("expected missing input, got {other:?}"),
    }
    assert!(!out.exists());
}

#[test]
fn missing_input_error_chains_to_io_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = run_pipeline(
        &dir.path().join("absent.csv"),
        &dir.path().join("out"),
        &PipelineConfig::default(),
    )
    .expect_err("input is absent");

    let source = std::error::Error::source(&err).expect("has source");
    assert!(source.downcast_ref::<RecordsError>().is_some());
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn missing_columns_become_rejections_not_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("short.csv");
    fs::write(&input, "nome,area\nAna,TI\n").expect("write input");
    let out = dir.path().join("out");

    let summary = run_pipeline(&input, &out, &PipelineConfig::default()).expect("pipeline runs");

    assert_eq!(summary.rejected_rows, 1);
    assert_eq!(summary.report, ReportStatus::NothingToReport);
    let errors = fs::read_to_string(out.join("errors.csv")).expect("errors written");
    assert_eq!(errors, "nome,area,reason\nAna,TI,type/parse error: salario\n");
}

#[test]
fn unparsable_numbers_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("bad.csv");
    fs::write(
        &input,
        "nome,area,salario,bonus_percentual\nAna,TI,abc,0.1\nBia,TI,100,NaN\n",
    )
    .expect("write input");
    let out = dir.path().join("out");

    let summary = run_pipeline(&input, &out, &PipelineConfig::default()).expect("pipeline runs");

    assert_eq!(summary.rejected_rows, 2);
    let errors = fs::read_to_string(out.join("errors.csv")).expect("errors written");
    assert!(errors.contains("type/parse error: salario"));
    assert!(errors.contains("type/parse error: bonus_percentual"));
}

#[test]
fn unreadable_config_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pipeline.yaml");
    fs::write(&path, "validation: [not, a, mapping]\n").expect("write config");

    let result = PipelineConfig::from_file(&path);
    assert!(matches!(result, Err(ConfigLoadError::YamlParse(_))));
}

#[test]
fn invalid_config_is_rejected_before_reading_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cfg = PipelineConfig::default();
    cfg.report.base_bonus = f64::INFINITY;

    let result = run_pipeline(&dir.path().join("absent.csv"), &dir.path().join("out"), &cfg);

    assert!(matches!(result, Err(PipelineError::Config(_))));
}

#[test]
fn report_from_source_refuses_unvalidated_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("validated.csv");
    fs::write(
        &input,
        "nome,area,salario,bonus_percentual\nAna,TI,100,0.1\nBia,TI,-5,0.1\n",
    )
    .expect("write input");
    let out = dir.path().join("out");

    let result = report_from_source(
        &CsvFileSource::new(&input),
        &DirectorySink::new(&out),
        &PipelineConfig::default(),
    );

    match result {
        Err(PipelineError::Report(ReportError::UnvalidatedRecord { row, reason })) => {
            assert_eq!(row, 2);
            assert_eq!(reason, RejectReason::NegativeSalary);
        }
        other => panic!("expected unvalidated record, got {other:?}"),
    }
    assert!(!out.join("report.json").exists());
}
