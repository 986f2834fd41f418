//! Error types for memds core.

use crate::types::TransactionHandle;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in memds core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No backend is registered under the requested service name.
    #[error("unknown service: {service}")]
    UnknownService {
        /// The requested service name.
        service: String,
    },

    /// The service does not implement the requested method.
    #[error("unknown method {method} for service {service}")]
    UnknownMethod {
        /// The service that was called.
        service: String,
        /// The requested method name.
        method: String,
    },

    /// The request payload does not fit the requested method.
    #[error("request payload does not match method {method}")]
    RequestMismatch {
        /// The method that was called.
        method: String,
    },

    /// The query uses a feature this engine does not implement.
    #[error("unsupported query feature: {feature}")]
    UnsupportedQuery {
        /// Name of the rejected feature.
        feature: String,
    },

    /// The operation is never supported by this engine.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: String,
    },

    /// The transaction handle is unknown or already finished.
    #[error("transaction not found: {handle}")]
    TransactionNotFound {
        /// The handle that was not found.
        handle: TransactionHandle,
    },

    /// The request is malformed.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },

    /// An internal invariant of the store was violated.
    #[error("internal invariant violated: {message}")]
    InvariantViolation {
        /// Description of the violation.
        message: String,
    },
}

impl CoreError {
    /// Creates an unknown service error.
    pub fn unknown_service(service: impl Into<String>) -> Self {
        Self::UnknownService {
            service: service.into(),
        }
    }

    /// Creates an unknown method error.
    pub fn unknown_method(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            service: service.into(),
            method: method.into(),
        }
    }

    /// Creates a request mismatch error.
    pub fn request_mismatch(method: impl Into<String>) -> Self {
        Self::RequestMismatch {
            method: method.into(),
        }
    }

    /// Creates an unsupported query feature error.
    pub fn unsupported_query(feature: impl Into<String>) -> Self {
        Self::UnsupportedQuery {
            feature: feature.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported_operation(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Creates a transaction not found error.
    pub fn transaction_not_found(handle: TransactionHandle) -> Self {
        Self::TransactionNotFound { handle }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates an invariant violation error.
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Returns true if this error reports a broken store invariant
    /// rather than a caller mistake.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}
