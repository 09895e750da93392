//! Shared error type across sysmon crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported config or protocol version.
    UnsupportedVersion,
    /// A metric could not be read or converted; no snapshot this cycle.
    SnapshotFailed,
    /// The request type is not handled by the receiver.
    Unhandled,
    /// The provider is not running, went away, or did not answer in time.
    Unavailable,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::SnapshotFailed => "SNAPSHOT_FAILED",
            ErrorCode::Unhandled => "UNHANDLED",
            ErrorCode::Unavailable => "UNAVAILABLE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Unified error type used by core and provider.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MonitorError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("a metric named {0} is already registered")]
    AlreadyRegistered(String),
    #[error("duplicate metric {0} in snapshot")]
    DuplicateMetric(String),
    #[error("sensor {name} unavailable: {reason}")]
    SensorUnavailable { name: String, reason: String },
    #[error("metric {name}: expected {expected} value, found {found}")]
    UnexpectedValue {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("unhandled message: {0}")]
    Unhandled(String),
    #[error("metrics provider mailbox closed")]
    MailboxClosed,
    #[error("system metrics request timed out after {0} ms")]
    Timeout(u64),
    #[error("internal: {0}")]
    Internal(String),
}

impl MonitorError {
    /// Map internal error to a stable client-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MonitorError::BadRequest(_) | MonitorError::AlreadyRegistered(_) => {
                ErrorCode::BadRequest
            }
            MonitorError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MonitorError::DuplicateMetric(_)
            | MonitorError::SensorUnavailable { .. }
            | MonitorError::UnexpectedValue { .. } => ErrorCode::SnapshotFailed,
            MonitorError::Unhandled(_) => ErrorCode::Unhandled,
            MonitorError::MailboxClosed | MonitorError::Timeout(_) => ErrorCode::Unavailable,
            MonitorError::Internal(_) => ErrorCode::Internal,
        }
    }
}
