pub mod app;
pub mod config;
pub mod error;
pub mod render;
pub mod services;

pub use app::{AppConfig, AppState};
pub use config::{OutputFormat, ReportOptions};
pub use error::{AppError, Result};
pub use render::{ReportCounters, render_json, render_report, render_text};
pub use services::{AppServices, ProviderReport, ReportService, SaveSummary};
