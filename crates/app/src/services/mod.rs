mod report;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use tracker_db::Db;

pub use report::{ProviderReport, ReportService, SaveSummary};

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub report: ReportService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            report: ReportService::new(shared),
        }
    }
}

pub(crate) fn open_db(config: &AppConfig) -> Result<Db> {
    let mut db = Db::open(&config.db_path)?;
    db.migrate()?;
    Ok(db)
}
