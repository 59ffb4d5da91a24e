//! Error types and handling for the graph actor service
//!
//! Every failure inside a handler or a direct read is expressed as one of these
//! types. The adapters in [`crate::actor::adapter`] turn them into response-shaped
//! [`Reply`](crate::core::types::Reply) values, so nothing here ever reaches a caller
//! as a panic.

use axum::http::StatusCode;
use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the graph actor service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Graph store errors
    #[error("{0}")]
    Graph(#[from] GraphError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The actor thread is gone and will never complete the request
    #[error("Graph actor is not running")]
    ActorStopped,

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prometheus metrics errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Errors raised by a [`GraphStore`](crate::storage::GraphStore)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {id}")]
    NodeNotFound {
        /// ID of the missing node
        id: String,
    },

    /// Edge not found
    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound {
        /// Source node of the missing edge
        from: String,
        /// Target node of the missing edge
        to: String,
    },
}

impl GraphError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create an edge not found error
    pub fn edge_not_found(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::EdgeNotFound {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this error means the referenced node or edge is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Graph(GraphError::NodeNotFound { .. })
                | Error::Graph(GraphError::EdgeNotFound { .. })
        )
    }

    /// HTTP status that best describes this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            _ if self.is_not_found() => StatusCode::NOT_FOUND,
            Error::ActorStopped => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
