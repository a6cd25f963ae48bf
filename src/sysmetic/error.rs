use crate::filters::RangeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SysmeticError {
    #[error("{0}")]
    Range(#[from] RangeError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A bulk action was requested with no rows checked.
    #[error("Nothing selected: {0}")]
    EmptySelection(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, SysmeticError>;
