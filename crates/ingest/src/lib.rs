mod parser;
mod paths;
mod pipeline;
mod totals;
mod types;

pub use parser::{
    ExtractSample, extract_claude_sample, extract_date_key, extract_qwen_sample, normalize_date,
};
pub use paths::{default_log_dirs, default_user_home, discover_log_dir, workspace_slug};
pub use pipeline::{ingest_log_dir, list_jsonl_files};
pub use totals::{
    daily_usage_from_lines, daily_usage_from_reader, merge_daily_usage, sample_from_line,
};
pub use types::{IngestError, IngestIssue, IngestStats, ProviderUsage, Result};
