use std::path::PathBuf;

use thiserror::Error;
use tracker_core::Provider;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot find {} directory.", .provider.directory_label())]
    NoLogDirectory { provider: Provider, expected: PathBuf },
    #[error("No .jsonl files found in {}", .dir.display())]
    NoLogFiles { dir: PathBuf },
    #[error("No token usage data found in {} logs.", .provider.display_name())]
    NoUsage { provider: Provider },
    #[error("db error: {0}")]
    Db(#[from] tracker_db::DbError),
    #[error("ingest error: {0}")]
    Ingest(#[from] ingest::IngestError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Lines printed to stderr when a report run fails.
    pub fn report_lines(&self) -> Vec<String> {
        match self {
            Self::NoLogDirectory { expected, .. } => vec![
                format!("Error: {}", self),
                format!("Expected: {}", expected.display()),
            ],
            Self::NoUsage { .. } => vec![self.to_string()],
            _ => vec![format!("Error: {}", self)],
        }
    }
}
