//! Turn handler results into response-shaped replies
//!
//! The two paths report failures differently: queued operations hide not-found
//! details behind a fixed message, direct reads surface the error text as a 404.

use axum::http::StatusCode;
use serde_json::Value;

use crate::core::error::Result;
use crate::core::types::{Reply, RESOURCE_NOT_FOUND};

/// Reply for a queued operation
pub fn queued(result: Result<Value>) -> Reply {
    match result {
        Ok(body) => Reply::ok(body),
        Err(err) if err.is_not_found() => Reply::error(StatusCode::NOT_FOUND, RESOURCE_NOT_FOUND),
        Err(err) => {
            tracing::warn!(error = %err, "queued operation failed");
            Reply::error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Run a direct read and map any failure to a 404
pub fn direct<F>(call: F) -> Reply
where
    F: FnOnce() -> Result<Value>,
{
    match call() {
        Ok(body) => Reply::ok(body),
        Err(err) => {
            tracing::debug!(error = %err, "direct read failed");
            Reply::error(StatusCode::NOT_FOUND, err.to_string())
        }
    }
}
