//! # Gateway Errors
//!
//! This module defines the error taxonomy shared by every gateway operation.
//! Backend contracts report a [`BackendError`]; the gateway either retries it
//! (see [`crate::retry`]) or hands it back verbatim inside [`GatewayError`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status codes a backend can attach to a failure.
///
/// Mirrors the canonical RPC status codes so that an error can cross the
/// gateway without being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Code {
    Unknown,
    InvalidArgument,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    DeadlineExceeded,
    Cancelled,
    Unavailable,
    Internal,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Code::Unknown => "unknown",
            Code::InvalidArgument => "invalid argument",
            Code::NotFound => "not found",
            Code::AlreadyExists => "already exists",
            Code::PermissionDenied => "permission denied",
            Code::DeadlineExceeded => "deadline exceeded",
            Code::Cancelled => "cancelled",
            Code::Unavailable => "unavailable",
            Code::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// A failure reported by a backend client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct BackendError {
    pub code: Code,
    pub message: String,
}

impl BackendError {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for the transient "service unavailable" failure.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(Code::Unavailable, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }
}

/// Errors returned by gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// A required dependency or input was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The caller's cancellation token fired before the call finished.
    #[error("call cancelled")]
    Cancelled,
    /// The backend failed; the error is carried unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl GatewayError {
    /// The status code a transport should report for this error.
    pub fn code(&self) -> Code {
        match self {
            GatewayError::InvalidArgument(_) => Code::InvalidArgument,
            GatewayError::Cancelled => Code::Cancelled,
            GatewayError::Backend(e) => e.code,
        }
    }

    /// Returns the backend error if this failure came from a backend.
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            GatewayError::Backend(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors raised while loading [`GatewayConfig`](crate::config::GatewayConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
