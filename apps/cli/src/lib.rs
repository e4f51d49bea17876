pub mod args;
pub mod config;
pub mod dirs;
pub mod error;
pub mod format_log;
pub mod logging;
pub mod report;

pub use error::CliError;
