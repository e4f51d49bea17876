use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "token-tracker";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_OPENCLAW_LOG_DIR: &str = "/tmp/openclaw";
const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;
const DEFAULT_FOLLOW_POLL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Summary database; `~/.ai_token_usage.db` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    /// Project whose log directory is tried first; the current directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claude_dirs: Option<Vec<PathBuf>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qwen_dirs: Option<Vec<PathBuf>>,
    pub openclaw_log_dir: PathBuf,
    pub display_utc_offset_hours: i32,
    pub follow_poll_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            workspace: None,
            claude_dirs: None,
            qwen_dirs: None,
            openclaw_log_dir: PathBuf::from(DEFAULT_OPENCLAW_LOG_DIR),
            display_utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            follow_poll_ms: DEFAULT_FOLLOW_POLL_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

/// Loads the config from `explicit`, which must exist, or from the default
/// location, writing defaults there on first run.
pub fn load_or_create(explicit: Option<&Path>) -> Result<ConfigLoad, String> {
    match explicit {
        Some(file) => {
            if !file.is_file() {
                return Err(format!("config file {} does not exist", file.display()));
            }
            load_existing(file)
        }
        None => load_or_create_at(&config_dir()?.join(CONFIG_FILE_NAME)),
    }
}

pub fn load_or_create_at(file: &Path) -> Result<ConfigLoad, String> {
    if file.exists() {
        return load_existing(file);
    }
    if let Some(dir) = file.parent() {
        fs::create_dir_all(dir)
            .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    }

    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(file, contents).map_err(|err| format!("write config {}: {}", file.display(), err))?;
    tracing::info!(path = %file.display(), "created default config");

    Ok(ConfigLoad {
        config,
        file: file.to_path_buf(),
        created: true,
    })
}

fn load_existing(file: &Path) -> Result<ConfigLoad, String> {
    let contents = fs::read_to_string(file)
        .map_err(|err| format!("read config {}: {}", file.display(), err))?;
    let config: CliConfig = toml::from_str(&contents)
        .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
    Ok(ConfigLoad {
        config,
        file: file.to_path_buf(),
        created: false,
    })
}

fn config_dir() -> Result<PathBuf, String> {
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}
