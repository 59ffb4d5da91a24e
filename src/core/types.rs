//! Shared type definitions for the graph actor service
//!
//! These are the values that travel between HTTP handlers, the actor queue and the
//! graph store: node identifiers, edges, page requests and the response-shaped
//! [`Reply`] every task resolves to.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::error::Error;

/// Node identifier as used by the graph store
pub type NodeId = String;

/// Default number of entries returned by a batch read
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Body used by the queued adapter for every not-found failure
pub const RESOURCE_NOT_FOUND: &str = "resource not found";

/// A directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
}

impl Edge {
    /// Create a new edge
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Offset page over the store's deterministic ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Maximum number of entries in the page
    pub size: usize,
    /// Zero-based page index
    pub page: usize,
}

impl Page {
    /// Create a page request
    pub fn new(size: usize, page: usize) -> Self {
        Self { size, page }
    }

    /// Number of entries to skip before this page starts
    pub fn offset(&self) -> usize {
        self.size.saturating_mul(self.page)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, 0)
    }
}

/// Response-shaped result of one operation: a status plus a JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// HTTP-style status (200, 404, 500, ...)
    pub status: StatusCode,
    /// JSON payload
    pub body: Value,
}

impl Reply {
    /// Successful reply carrying `body`
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// Error reply with an `{"error": message}` body
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    /// Reply describing an error with its natural status code
    pub fn from_error(err: &Error) -> Self {
        Self::error(err.status_code(), err.to_string())
    }

    /// Whether the reply carries a 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
