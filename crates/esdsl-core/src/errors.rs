use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("invalid sort mode: {0}")]
    InvalidSortMode(String),
    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),
    #[error("invalid specification: {0}")]
    Invalid(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QueryError>;
