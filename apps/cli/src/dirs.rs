use std::path::{Path, PathBuf};

use ingest::default_log_dirs;
use tracker_core::Provider;

use crate::config::CliConfig;

const DB_FILE_NAME: &str = ".ai_token_usage.db";

pub fn user_home() -> Result<PathBuf, String> {
    ingest::default_user_home().ok_or_else(|| "resolve HOME: not set".to_string())
}

pub fn db_path(config: &CliConfig, home: &Path) -> PathBuf {
    config
        .db_path
        .clone()
        .unwrap_or_else(|| home.join(DB_FILE_NAME))
}

pub fn workspace_dir(config: &CliConfig) -> Result<PathBuf, String> {
    match &config.workspace {
        Some(workspace) => Ok(workspace.clone()),
        None => std::env::current_dir().map_err(|err| format!("resolve current dir: {}", err)),
    }
}

/// Discovery candidates for `provider`: the configured list, or the defaults.
pub fn log_dir_candidates(
    provider: Provider,
    config: &CliConfig,
    home: &Path,
    workspace: &Path,
) -> Vec<PathBuf> {
    let configured = match provider {
        Provider::Claude => config.claude_dirs.as_ref(),
        Provider::Qwen => config.qwen_dirs.as_ref(),
    };
    match configured {
        Some(dirs) if !dirs.is_empty() => dirs.clone(),
        _ => default_log_dirs(provider, home, workspace),
    }
}
