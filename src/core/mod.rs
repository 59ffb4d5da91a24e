//! Core system types and foundations
//!
//! This module contains the fundamental building blocks of the service:
//! type definitions, error handling and configuration.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::Config;
pub use error::{Error, GraphError, Result};
pub use types::{Edge, NodeId, Page, Reply};
