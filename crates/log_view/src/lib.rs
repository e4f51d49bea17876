//! Pretty-printer and tail for structured JSON log files.

mod entry;
mod error;
mod format;
mod paths;
mod tail;

pub use entry::{ParsedLogEntry, parse_log_line};
pub use error::{LogViewError, Result};
pub use format::{LogFormatter, RULE_WIDTH, module_palette_index};
pub use paths::{find_latest_log, resolve_log_file};
pub use tail::LogTail;
