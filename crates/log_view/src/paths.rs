use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::{LogViewError, Result};

/// Newest `*.log` file directly under `dir`, by modification time.
pub fn find_latest_log(dir: &Path) -> Option<PathBuf> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|value| value.to_str()) != Some("log")
        {
            continue;
        }
        let modified = match entry.metadata().ok().and_then(|meta| meta.modified().ok()) {
            Some(modified) => modified,
            None => continue,
        };
        if newest.as_ref().is_none_or(|(best, _)| modified > *best) {
            newest = Some((modified, path.to_path_buf()));
        }
    }
    newest.map(|(_, path)| path)
}

/// The explicit path when given (it must be a file), otherwise the newest log in `dir`.
pub fn resolve_log_file(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(LogViewError::MissingLogFile(path.to_path_buf())),
        None => find_latest_log(dir).ok_or_else(|| LogViewError::NoLogFiles(dir.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;

    #[test]
    fn picks_newest_log_by_mtime() {
        let dir = tempfile::tempdir().expect("temp dir");
        let old = dir.path().join("b-old.log");
        let new = dir.path().join("a-new.log");
        fs::write(&old, "old\n").expect("write old");
        fs::write(&new, "new\n").expect("write new");
        fs::write(dir.path().join("z.txt"), "skip\n").expect("write txt");

        let base = SystemTime::now();
        File::options()
            .write(true)
            .open(&old)
            .and_then(|file| file.set_modified(base - Duration::from_secs(60)))
            .expect("age old log");
        File::options()
            .write(true)
            .open(&new)
            .and_then(|file| file.set_modified(base))
            .expect("touch new log");

        assert_eq!(find_latest_log(dir.path()), Some(new));
    }

    #[test]
    fn missing_dir_or_no_logs_is_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(find_latest_log(&dir.path().join("nope")), None);
        fs::write(dir.path().join("notes.txt"), "x").expect("write");
        assert_eq!(find_latest_log(dir.path()), None);
    }

    #[test]
    fn explicit_path_must_be_a_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("gone.log");
        assert!(matches!(
            resolve_log_file(Some(&missing), dir.path()),
            Err(LogViewError::MissingLogFile(path)) if path == missing
        ));
        assert!(matches!(
            resolve_log_file(Some(dir.path()), dir.path()),
            Err(LogViewError::MissingLogFile(_))
        ));
        assert!(matches!(
            resolve_log_file(None, dir.path()),
            Err(LogViewError::NoLogFiles(_))
        ));
    }
}
