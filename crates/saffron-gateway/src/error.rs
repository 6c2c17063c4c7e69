//! # Gateway Errors
//!
//! Failure taxonomy for backend calls. Transport problems and structured
//! backend rejections end up in the same enum because the flow layer
//! treats them identically: both become recorded settlement state, never
//! an unhandled panic.

use thiserror::Error;

use crate::types::FailureDetail;

/// Errors produced by gateway operations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The backend rejected the call and sent structured failure detail.
    #[error("{}", .0.display("Request rejected"))]
    Rejected(FailureDetail),

    /// Non-success HTTP status with an unstructured body.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure (DNS, refused, TLS, broken pipe).
    #[error("transport failure: {0}")]
    Transport(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::InvalidResponse(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

/// Convenience type alias for Results with GatewayError.
pub type GatewayResult<T> = Result<T, GatewayError>;
