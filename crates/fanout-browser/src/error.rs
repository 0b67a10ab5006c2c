use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL '{0}': only http and https URLs can be opened")]
    InvalidUrl(String),

    #[error("Browser not found at: {}", .0.display())]
    BrowserNotFound(PathBuf),

    #[error("Failed to launch browser: {0}")]
    Launch(String),
}

pub type Result<T> = std::result::Result<T, Error>;
