use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardboxError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid format: {0}")]
    Parse(String),

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CardboxError>;
