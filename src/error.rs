//! Error types for operation handlers, request dispatch, and service
//! construction.

use std::error::Error;

use thiserror::Error;

use crate::response::Status;

/// Error type for operation handlers.
///
/// Every variant is a handler fault: the dispatcher answers it with
/// `500 Internal Server Error` and logs the description.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The operation could not produce a result.
    #[error("operation failed: {0}")]
    Failed(String),
    /// A required query argument was not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(String),
    /// Encoding the reply (or decoding input) failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The handler panicked.
    #[error("operation panicked: {0}")]
    Panicked(String),
    /// Other error.
    #[error("handler error: {0}")]
    Other(Box<dyn Error + Send + Sync>),
}

impl HandlerError {
    /// Wrap any error as a handler fault.
    pub fn other(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        HandlerError::Other(err.into())
    }
}

impl From<String> for HandlerError {
    fn from(msg: String) -> Self {
        HandlerError::Failed(msg)
    }
}

impl From<&str> for HandlerError {
    fn from(msg: &str) -> Self {
        HandlerError::Failed(msg.to_string())
    }
}

/// Request-time failures. Each one is converted into a response at the
/// dispatcher boundary and never reaches the host server.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No operation matched and the strict not-found policy is active.
    #[error("no operation at {0}")]
    RouteNotFound(String),
    /// The path resolved but the HTTP method is not allowed.
    #[error("method {method} not allowed on {path}")]
    MethodNotSupported { method: String, path: String },
    /// The resolved operation failed while running.
    #[error("operation `{operation}` failed: {source}")]
    HandlerFault {
        operation: String,
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// The response status for this failure.
    pub fn status(&self) -> Status {
        match self {
            DispatchError::RouteNotFound(_) => Status::NotFound,
            DispatchError::MethodNotSupported { .. } => Status::MethodNotAllowed,
            DispatchError::HandlerFault { .. } => Status::InternalServerError,
        }
    }
}

/// Construction-time defects in a service definition.
///
/// These indicate a programming error, so `Service::new` surfaces them
/// instead of tolerating them at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A descriptor has a missing or inconsistent name or path.
    #[error("malformed descriptor for `{name}`: {reason}")]
    MalformedDescriptor { name: String, reason: String },
    /// Two operations on the same level claim one path.
    #[error("operations `{first}` and `{second}` both claim path {path}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
    /// One level declares the same operation name twice.
    #[error("operation `{0}` is declared more than once")]
    DuplicateName(String),
    /// A reserved path (root or fallback) has no operation.
    #[error("no operation is registered at reserved path {0}")]
    MissingReserved(String),
}
