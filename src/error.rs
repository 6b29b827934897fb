use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing input file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Daily feed error: {0}")]
    Feed(String),

    #[error("Invalid series file {}: {reason}", .path.display())]
    InvalidStore { path: PathBuf, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PriceError {
    /// True when the error comes from retrieving the external daily snapshot
    /// (network, timeout, bad status or malformed document).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, PriceError::Http(_) | PriceError::Feed(_))
    }

    /// True when a file we just wrote did not read back as a canonical store.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, PriceError::Validation(_))
    }

    /// Process exit status for a run ending in this error: 2 for fetch
    /// failures, 3 for post-write validation failures, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        if self.is_fetch_failure() {
            2
        } else if self.is_validation_failure() {
            3
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceError>;
