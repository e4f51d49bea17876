use tracker_app::AppError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    App(#[from] AppError),
}

impl CliError {
    /// Lines printed to stderr before exiting with status 1.
    pub fn report_lines(&self) -> Vec<String> {
        match self {
            Self::Config(message) => vec![format!("Error: {}", message)],
            Self::App(err) => err.report_lines(),
        }
    }
}
