//! API access errors.

use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// Convenience alias for API call results.
pub type ApiResult<T> = Result<T, ApiError>;

/// What went wrong, tagged at the point of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response within the configured window; the call was aborted.
    Timeout,
    /// The exchange was cut off before a complete response arrived.
    Aborted,
    /// Connection-level failure (DNS, refused, reset).
    Network,
    /// The request could not be built or sent as specified.
    Request,
    /// The server answered with a non-success status.
    Http(StatusCode),
}

impl FailureKind {
    /// Only transport-level failures are worth retrying.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            FailureKind::Timeout | FailureKind::Aborted | FailureKind::Network
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => f.write_str("timeout"),
            FailureKind::Aborted => f.write_str("aborted"),
            FailureKind::Network => f.write_str("network"),
            FailureKind::Request => f.write_str("request"),
            FailureKind::Http(status) => write!(f, "http {}", status.as_u16()),
        }
    }
}

/// Failure reported by a [`Transport`](super::transport::Transport).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Terminal failure of an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. The session has already been cleared.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0} is already in progress")]
    DuplicateSubmission(&'static str),
}

impl ApiError {
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ApiError::Unauthorized(_) => Some(FailureKind::Http(StatusCode::UNAUTHORIZED)),
            ApiError::Http { status, .. } => Some(FailureKind::Http(*status)),
            ApiError::Transport(e) => Some(e.kind),
            ApiError::Decode(_) | ApiError::InvalidUrl(_) | ApiError::DuplicateSubmission(_) => {
                None
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_some_and(FailureKind::is_retryable)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self.kind()? {
            FailureKind::Http(status) => Some(status),
            _ => None,
        }
    }
}
