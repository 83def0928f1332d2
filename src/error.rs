use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Report data is empty")]
    EmptyData,

    #[error("Malformed report data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid source: {0}")]
    InvalidSource(String),
}

impl ViewerError {
    /// True for failures of the read itself, as opposed to bad content.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ViewerError::Io { .. } | ViewerError::Status { .. } | ViewerError::Transport { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
