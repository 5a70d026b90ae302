use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("API Error: {reason} ({})", .status.as_u16())]
    Status { status: StatusCode, reason: String },

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Element not on page: {0}")]
    MissingElement(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DispatchError {
    /// Stable, machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Network(_) => "network",
            DispatchError::Status { .. } => "status",
            DispatchError::Parse(_) => "parse",
            DispatchError::InvalidUrl(_) => "invalid_url",
            DispatchError::InvalidRequest(_) => "invalid_request",
            DispatchError::MissingElement(_) => "missing_element",
            DispatchError::Io { .. } => "io",
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        DispatchError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn status(status: StatusCode) -> Self {
        DispatchError::Status {
            status,
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DispatchError::Parse(err.to_string())
        } else if err.is_builder() {
            DispatchError::InvalidRequest(err.to_string())
        } else {
            DispatchError::Network(err)
        }
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::Parse(err.to_string())
    }
}
