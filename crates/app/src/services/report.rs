use std::path::PathBuf;

use crate::config::ReportOptions;
use crate::error::{AppError, Result};
use crate::render::{ReportCounters, render_report};
use crate::services::{SharedConfig, open_db};
use ingest::{ExtractSample, IngestStats, discover_log_dir, ingest_log_dir};
use tracker_core::{DailyUsage, Provider};

/// Aggregate for one provider, ready to render or persist.
#[derive(Debug, Clone)]
pub struct ProviderReport<C> {
    pub log_dir: PathBuf,
    pub usage: DailyUsage<C>,
    pub stats: IngestStats,
}

/// Outcome of persisting a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    /// Dates in the aggregate, including any that were skipped for a zero total.
    pub days: usize,
    pub rows_written: usize,
    pub db_path: PathBuf,
}

impl SaveSummary {
    pub fn message(&self) -> String {
        format!(
            "\nSaved {} days of data to database ({})",
            self.days,
            self.db_path.display()
        )
    }
}

#[derive(Clone)]
pub struct ReportService {
    config: SharedConfig,
}

impl ReportService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Discovers the log directory and aggregates every `*.jsonl` file in it.
    ///
    /// Fails when no directory or no files are found, or when no line carried usage.
    pub fn build<C>(&self, options: &ReportOptions) -> Result<ProviderReport<C>>
    where
        C: ExtractSample + ReportCounters,
    {
        let provider = C::PROVIDER;
        let log_dir = resolve_log_dir(provider, options)?;
        tracing::debug!(provider = %provider, dir = %log_dir.display(), "using log directory");

        let result = ingest_log_dir::<C>(&log_dir)?;
        if result.stats.files_scanned == 0 {
            return Err(AppError::NoLogFiles { dir: log_dir });
        }
        tracing::debug!(
            provider = %provider,
            files = result.stats.files_scanned,
            lines = result.stats.lines_read,
            records = result.stats.records_aggregated,
            issues = result.stats.issues.len(),
            "aggregated logs"
        );
        if result.usage.is_empty() {
            return Err(AppError::NoUsage { provider });
        }
        Ok(ProviderReport {
            log_dir,
            usage: result.usage,
            stats: result.stats,
        })
    }

    pub fn render<C: ReportCounters>(
        &self,
        report: &ProviderReport<C>,
        options: &ReportOptions,
    ) -> Result<String> {
        render_report(&report.usage, options.format)
    }

    /// Upserts one row per date with a non-zero total under the provider's tool name.
    pub fn save<C: ReportCounters>(&self, report: &ProviderReport<C>) -> Result<SaveSummary> {
        let mut db = open_db(&self.config)?;
        let rows_written = db.save_daily_usage(&report.usage)?;
        tracing::info!(
            tool = C::PROVIDER.tool_name(),
            rows = rows_written,
            db = %self.config.db_path.display(),
            "saved daily usage"
        );
        Ok(SaveSummary {
            days: report.usage.len(),
            rows_written,
            db_path: self.config.db_path.clone(),
        })
    }
}

fn resolve_log_dir(provider: Provider, options: &ReportOptions) -> Result<PathBuf> {
    if let Some(dir) = options.dir.as_deref() {
        return if dir.is_dir() {
            Ok(dir.to_path_buf())
        } else {
            Err(AppError::NoLogDirectory {
                provider,
                expected: dir.to_path_buf(),
            })
        };
    }
    discover_log_dir(&options.candidates).ok_or_else(|| AppError::NoLogDirectory {
        provider,
        expected: options.candidates.first().cloned().unwrap_or_default(),
    })
}
