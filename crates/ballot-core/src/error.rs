//! Shared error type across ballot crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Key (or other resource) is absent.
    NotFound,
    /// Health/load sink could not be reached.
    SinkUnavailable,
    /// Configuration could not be parsed or failed validation.
    ConfigInvalid,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::SinkUnavailable => "SINK_UNAVAILABLE",
            ClientCode::ConfigInvalid => "CONFIG_INVALID",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BallotError>;

/// Unified error type used by core and service.
#[derive(Debug, Error)]
pub enum BallotError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("sink unavailable: {0}")]
    Sink(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl BallotError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BallotError::BadRequest(_) => ClientCode::BadRequest,
            BallotError::NotFound(_) => ClientCode::NotFound,
            BallotError::Sink(_) => ClientCode::SinkUnavailable,
            BallotError::Config(_) => ClientCode::ConfigInvalid,
            BallotError::Internal(_) => ClientCode::Internal,
        }
    }
}
