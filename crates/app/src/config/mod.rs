use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    /// Structured output; `pretty` indents by two spaces and sorts keys.
    Json { pretty: bool },
}

/// Inputs for one aggregation run.
#[derive(Clone, Debug, Default)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Use this directory instead of the discovery candidates.
    pub dir: Option<PathBuf>,
    /// Discovery candidates, first existing directory wins.
    pub candidates: Vec<PathBuf>,
}
