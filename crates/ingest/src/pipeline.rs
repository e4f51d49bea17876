use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration as StdDuration, Instant};

use tracker_core::DailyUsage;
use walkdir::WalkDir;

use crate::parser::ExtractSample;
use crate::totals::{merge_daily_usage, sample_from_line};
use crate::types::{IngestIssue, IngestStats, ProviderUsage, Result};

fn is_jsonl_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|value| value.to_str()),
        Some("jsonl")
    )
}

/// Lists `*.jsonl` files directly under `dir`, sorted by path.
pub fn list_jsonl_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && is_jsonl_path(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

struct ParsedFile<C> {
    usage: DailyUsage<C>,
    lines_read: usize,
    records: usize,
    bytes_read: u64,
    issue: Option<IngestIssue>,
    parse_duration: StdDuration,
}

fn parse_file<C: ExtractSample>(path: &Path) -> ParsedFile<C> {
    let file_start = Instant::now();
    let file_path = path.to_string_lossy().to_string();
    let mut usage = DailyUsage::new();
    let mut lines_read = 0usize;
    let mut records = 0usize;
    let mut bytes_read = 0u64;

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            return ParsedFile {
                usage,
                lines_read,
                records,
                bytes_read,
                issue: Some(IngestIssue {
                    file_path,
                    message: err.to_string(),
                }),
                parse_duration: file_start.elapsed(),
            };
        }
    };

    let mut reader = BufReader::new(file);
    let mut buf = String::new();
    let mut issue = None;
    loop {
        match reader.read_line(&mut buf) {
            Ok(0) => break,
            Ok(bytes) => {
                bytes_read = bytes_read.saturating_add(bytes as u64);
                lines_read += 1;
                if let Some((date, sample)) = sample_from_line::<C>(&buf) {
                    usage.record(date, sample);
                    records += 1;
                }
                buf.clear();
            }
            Err(err) => {
                issue = Some(IngestIssue {
                    file_path: file_path.clone(),
                    message: err.to_string(),
                });
                break;
            }
        }
    }

    ParsedFile {
        usage,
        lines_read,
        records,
        bytes_read,
        issue,
        parse_duration: file_start.elapsed(),
    }
}

/// Aggregates every `*.jsonl` file in `dir`, one file at a time.
pub fn ingest_log_dir<C: ExtractSample>(dir: &Path) -> Result<ProviderUsage<C>> {
    let files = list_jsonl_files(dir)?;
    let mut stats = IngestStats::default();
    let mut parts = Vec::with_capacity(files.len());

    for path in &files {
        let parsed = parse_file::<C>(path);
        stats.files_scanned += 1;
        stats.lines_read += parsed.lines_read;
        stats.records_aggregated += parsed.records;
        stats.bytes_read += parsed.bytes_read;
        tracing::debug!(
            file = %path.display(),
            lines = parsed.lines_read,
            records = parsed.records,
            elapsed_ms = parsed.parse_duration.as_millis() as u64,
            "parsed log file"
        );
        if let Some(issue) = parsed.issue {
            tracing::warn!(file = %issue.file_path, error = %issue.message, "stopped reading log file");
            stats.issues.push(issue);
        }
        parts.push(parsed.usage);
    }

    Ok(ProviderUsage {
        usage: merge_daily_usage(parts),
        stats,
    })
}
