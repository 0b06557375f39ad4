use thiserror::Error;

use crate::types::Service;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),

    #[error("Verification error: {0}")]
    Verify(#[from] VerifyError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single exchange with a detection backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The backend answered with a non-success status.
    #[error("{service} answered {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Server {
        service: Service,
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a response (refused, reset, timed out).
    #[error("{service} not reachable at {endpoint}: {reason}")]
    Transport {
        service: Service,
        endpoint: String,
        port: Option<u16>,
        reason: String,
    },

    /// A success status with a body that is not a verification result.
    #[error("{service} sent an unreadable response: {reason}")]
    Decode { service: Service, reason: String },
}

impl VerifyError {
    pub fn service(&self) -> Service {
        match self {
            VerifyError::Server { service, .. }
            | VerifyError::Transport { service, .. }
            | VerifyError::Decode { service, .. } => *service,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, VerifyError::Transport { .. })
    }
}
