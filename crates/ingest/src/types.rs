use serde::Serialize;
use std::io;
use tracker_core::DailyUsage;

/// Ingest summary returned after scanning a provider's log directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    pub files_scanned: usize,
    pub lines_read: usize,
    pub records_aggregated: usize,
    pub bytes_read: u64,
    pub issues: Vec<IngestIssue>,
}

/// Non-fatal issues encountered during ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestIssue {
    pub file_path: String,
    pub message: String,
}

/// Aggregate for one provider plus the stats gathered while building it.
#[derive(Debug, Clone)]
pub struct ProviderUsage<C> {
    pub usage: DailyUsage<C>,
    pub stats: IngestStats,
}

/// Errors emitted by the ingest pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
