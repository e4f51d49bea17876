use std::path::{Path, PathBuf};

use tracker_core::Provider;

pub fn default_user_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Project directory name derived from an absolute workspace path.
///
/// `/Users/me/workspace` becomes `-Users-me-workspace`.
pub fn workspace_slug(workspace: &Path) -> String {
    workspace.to_string_lossy().replace('/', "-")
}

/// Candidate log directories for a provider, in discovery order.
pub fn default_log_dirs(provider: Provider, home: &Path, workspace: &Path) -> Vec<PathBuf> {
    let slug = workspace_slug(workspace);
    match provider {
        Provider::Claude => vec![
            home.join(".claude").join("projects").join(&slug),
            home.join(".config").join("claude").join("projects"),
        ],
        Provider::Qwen => vec![
            home.join(".qwen").join("projects").join(&slug).join("chats"),
            home.join(".qwen").join("projects"),
        ],
    }
}

/// First candidate that exists as a directory.
pub fn discover_log_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|candidate| candidate.is_dir()).cloned()
}
