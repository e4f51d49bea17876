use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LogViewError {
    #[error("Log file '{}' does not exist.", .0.display())]
    MissingLogFile(PathBuf),
    #[error("No log files found in {}/", .0.display())]
    NoLogFiles(PathBuf),
    #[error("display offset {0}h is out of range")]
    InvalidOffset(i32),
    #[error("{0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LogViewError>;
