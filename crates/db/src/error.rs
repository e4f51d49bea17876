#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("token count {0} does not fit in an sqlite integer")]
    TokenOverflow(u64),
}

pub type Result<T> = std::result::Result<T, DbError>;
