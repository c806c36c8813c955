use pullboard_types::dates::DateParseError;

/// Failures of the backing store. Never retried here; callers decide.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database lock poisoned: {0}")]
    LockPoisoned(String),

    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
