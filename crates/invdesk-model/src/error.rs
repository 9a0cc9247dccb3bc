use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid record id: {0:?}")]
    InvalidRecordId(String),
    #[error("invalid list view key: {0:?}")]
    InvalidViewKey(String),
    #[error("invalid filter entry {0:?} (expected KEY=VALUE)")]
    InvalidFilterEntry(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
