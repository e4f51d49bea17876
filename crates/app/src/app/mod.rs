use std::path::PathBuf;

use crate::error::Result;
use crate::services::{AppServices, open_db};
use tracker_db::Db;

/// Paths needed to run the report binaries.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
}

/// Application state shared by the CLI binaries.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        let config = AppConfig { db_path };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    /// Opens the summary store, migrating it first.
    pub fn open_db(&self) -> Result<Db> {
        open_db(&self.config)
    }
}
