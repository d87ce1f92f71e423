use thiserror::Error;

/// Errors surfaced while setting up the dashboard.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid preferences file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;
