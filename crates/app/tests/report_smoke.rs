use std::fs;

use tempfile::tempdir;
use tracker_app::{AppError, AppState, OutputFormat, ReportOptions};
use tracker_core::{ClaudeCounters, QwenCounters};

const CLAUDE_LOG: &str = concat!(
    r#"{"timestamp":"2026-01-01T10:00:00.123Z","type":"assistant","message":{"model":"claude-sonnet-4","usage":{"input_tokens":100,"output_tokens":50}}}"#,
    "\n",
    r#"{"timestamp":"2026-01-01T23:00:00Z","usage":{"input_tokens":20}}"#,
    "\n",
    "not json\n",
);

#[test]
fn claude_report_build_render_and_save() {
    let dir = tempdir().expect("temp dir");
    let logs = dir.path().join("logs");
    fs::create_dir_all(&logs).expect("logs dir");
    fs::write(logs.join("session.jsonl"), CLAUDE_LOG).expect("write log");

    let app_state = AppState::new(dir.path().join("usage.db"));
    let service = &app_state.services.report;
    let options = ReportOptions {
        format: OutputFormat::Text,
        dir: None,
        candidates: vec![dir.path().join("missing"), logs.clone()],
    };

    let report = service.build::<ClaudeCounters>(&options).expect("build");
    assert_eq!(report.log_dir, logs);
    assert_eq!(report.stats.files_scanned, 1);
    let bucket = report.usage.get("2026-01-01").expect("day");
    assert_eq!(bucket.counters.input_tokens, 120);
    assert_eq!(bucket.counters.output_tokens, 50);

    let text = service.render(&report, &options).expect("render");
    assert!(text.contains("\n2026-01-01\n  Input tokens:        120\n"));
    assert!(text.contains("  Total tokens:        170\n"));

    let summary = service.save(&report).expect("save");
    assert_eq!(summary.days, 1);
    assert_eq!(summary.rows_written, 1);
    assert_eq!(
        summary.message(),
        format!(
            "\nSaved 1 days of data to database ({})",
            dir.path().join("usage.db").display()
        )
    );

    let db = app_state.open_db().expect("open db");
    let rows = db.list_daily_usage("claude").expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tokens_used, 170);
}

#[test]
fn explicit_dir_overrides_candidates() {
    let dir = tempdir().expect("temp dir");
    fs::write(
        dir.path().join("chat.jsonl"),
        r#"{"timestamp":"2026-02-01T00:00:00Z","type":"assistant","model":"qwen3","usageMetadata":{"promptTokenCount":3,"totalTokenCount":4}}"#,
    )
    .expect("write log");

    let app_state = AppState::new(dir.path().join("usage.db"));
    let options = ReportOptions {
        format: OutputFormat::Json { pretty: false },
        dir: Some(dir.path().to_path_buf()),
        candidates: vec![dir.path().join("never-used")],
    };
    let report = app_state
        .services
        .report
        .build::<QwenCounters>(&options)
        .expect("build");
    let json = app_state
        .services
        .report
        .render(&report, &options)
        .expect("render");
    assert!(json.starts_with(r#"{"provider":"qwen","source":"jsonl""#));
    assert!(json.contains(r#""totalTokens":4"#));
    assert!(json.ends_with("}\n"));
}

#[test]
fn missing_directory_reports_first_candidate() {
    let dir = tempdir().expect("temp dir");
    let app_state = AppState::new(dir.path().join("usage.db"));
    let first = dir.path().join("a");
    let options = ReportOptions {
        candidates: vec![first.clone(), dir.path().join("b")],
        ..ReportOptions::default()
    };
    match app_state.services.report.build::<ClaudeCounters>(&options) {
        Err(AppError::NoLogDirectory { expected, .. }) => assert_eq!(expected, first),
        other => panic!("unexpected result: {:?}", other.map(|report| report.log_dir)),
    }
}

#[test]
fn empty_directory_and_empty_usage_fail() {
    let dir = tempdir().expect("temp dir");
    let app_state = AppState::new(dir.path().join("usage.db"));
    let options = ReportOptions {
        dir: Some(dir.path().to_path_buf()),
        ..ReportOptions::default()
    };
    assert!(matches!(
        app_state.services.report.build::<ClaudeCounters>(&options),
        Err(AppError::NoLogFiles { .. })
    ));

    fs::write(dir.path().join("idle.jsonl"), "{\"type\":\"user\"}\n").expect("write log");
    assert!(matches!(
        app_state.services.report.build::<ClaudeCounters>(&options),
        Err(AppError::NoUsage { .. })
    ));
}
