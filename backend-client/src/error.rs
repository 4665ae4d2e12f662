use thiserror::Error;

/// Failure talking to the classification backend.
///
/// Every variant is terminal for the request that produced it; nothing is
/// retried and no partial payload is handed back.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    InvalidUpload(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Backend API error: {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl BackendError {
    /// HTTP status of a non-success response, if that is what failed
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;
