use std::fs;

use ingest::{ingest_log_dir, list_jsonl_files};
use tempfile::tempdir;
use tracker_core::{ClaudeCounters, QwenCounters};

#[test]
fn ingest_aggregates_every_jsonl_file_in_dir() {
    let dir = tempdir().expect("temp dir");
    fs::write(
        dir.path().join("a.jsonl"),
        concat!(
            r#"{"timestamp":"2026-01-01T10:00:00.123Z","type":"assistant","message":{"model":"claude-opus-4","usage":{"input_tokens":100,"output_tokens":50}}}"#,
            "\n",
            r#"{"timestamp":"2026-01-02T10:00:00Z","type":"user","message":{"content":"hi"}}"#,
            "\n",
        ),
    )
    .expect("write a");
    fs::write(
        dir.path().join("b.jsonl"),
        concat!(
            r#"{"timestamp":"2026-01-01T23:00:00Z","type":"assistant","message":{"model":"claude-haiku-4","usage":{"input_tokens":20,"cache_read_input_tokens":5}}}"#,
            "\n",
            r#"{"timestamp":"2026-01-03T00:00:01Z","usage":{"cache_creation_input_tokens":9}}"#,
            "\n",
        ),
    )
    .expect("write b");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write txt");

    let result = ingest_log_dir::<ClaudeCounters>(dir.path()).expect("ingest");
    assert_eq!(result.stats.files_scanned, 2);
    assert_eq!(result.stats.lines_read, 4);
    assert_eq!(result.stats.records_aggregated, 3);
    assert!(result.stats.issues.is_empty());

    let dates: Vec<&str> = result.usage.dates().collect();
    assert_eq!(dates, vec!["2026-01-01", "2026-01-03"]);
    let day = result.usage.get("2026-01-01").expect("day");
    assert_eq!(
        day.counters,
        ClaudeCounters {
            input_tokens: 120,
            output_tokens: 50,
            cache_read_tokens: 5,
            cache_creation_tokens: 0,
        }
    );
    let models: Vec<&str> = day.models.iter().map(String::as_str).collect();
    assert_eq!(models, vec!["claude-haiku-4", "claude-opus-4"]);
}

#[test]
fn list_jsonl_files_is_not_recursive() {
    let dir = tempdir().expect("temp dir");
    let nested = dir.path().join("nested");
    fs::create_dir_all(&nested).expect("create nested");
    fs::write(nested.join("deep.jsonl"), "{}").expect("write deep");
    fs::write(dir.path().join("top.jsonl"), "{}").expect("write top");

    let files = list_jsonl_files(dir.path()).expect("list");
    assert_eq!(files, vec![dir.path().join("top.jsonl")]);
}

#[test]
fn list_jsonl_files_fails_for_missing_dir() {
    let dir = tempdir().expect("temp dir");
    assert!(list_jsonl_files(&dir.path().join("missing")).is_err());
}

#[test]
fn invalid_utf8_records_issue_and_keeps_earlier_lines() {
    let dir = tempdir().expect("temp dir");
    let line = r#"{"timestamp":"2026-02-01T00:00:00Z","type":"assistant","model":"qwen3","usageMetadata":{"promptTokenCount":7,"totalTokenCount":9}}"#;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');
    bytes.push(0xff);
    bytes.push(b'\n');
    fs::write(dir.path().join("chat.jsonl"), bytes).expect("write log");

    let result = ingest_log_dir::<QwenCounters>(dir.path()).expect("ingest");
    assert_eq!(result.stats.issues.len(), 1);
    let day = result.usage.get("2026-02-01").expect("day");
    assert_eq!(day.counters.total_tokens, 9);
    assert_eq!(day.counters.prompt_tokens, 7);
}

#[test]
fn empty_dir_yields_empty_usage() {
    let dir = tempdir().expect("temp dir");
    let result = ingest_log_dir::<ClaudeCounters>(dir.path()).expect("ingest");
    assert_eq!(result.stats.files_scanned, 0);
    assert!(result.usage.is_empty());
}
