#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use tracker_core::{ClaudeCounters, DailyUsage, TokenSample};
use tracker_db::Db;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn claude_sample(input: u64, output: u64) -> TokenSample<ClaudeCounters> {
    TokenSample {
        counters: ClaudeCounters {
            input_tokens: input,
            output_tokens: output,
            ..ClaudeCounters::default()
        },
        model: None,
    }
}

pub fn claude_usage(days: &[(&str, u64, u64)]) -> DailyUsage<ClaudeCounters> {
    days.iter()
        .map(|(date, input, output)| (date.to_string(), claude_sample(*input, *output)))
        .collect()
}
