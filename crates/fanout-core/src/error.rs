use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access provider file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse provider file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Provider not found: {0}")]
    NotFound(String),

    #[error("Invalid position {position}: list has {len} providers")]
    InvalidPosition { position: usize, len: usize },

    #[error("Could not determine data directory")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, Error>;
