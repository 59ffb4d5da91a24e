//! Graph Actor - a single-writer graph service
//!
//! All mutations of the graph are funnelled through one dedicated thread that
//! drains a priority queue, while cheap reads may bypass the queue entirely.
//! The HTTP layer in [`api`] is a thin shell over [`actor::GraphHandle`] and
//! [`actor::GraphReader`].
#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Main functional modules
pub mod actor;
pub mod api;
pub mod storage;
pub mod system;

// Re-export commonly used items for convenience
pub use actor::{GraphActor, GraphHandle, GraphReader, Operation, Task};
pub use crate::core::{Config, Error, Result};

use crate::core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install the global tracing subscriber and register metrics
///
/// `RUST_LOG` wins over `logging.level` when set.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| Error::config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if logging.format == "json" {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };
    installed.map_err(|e| Error::internal(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::info!("Initializing {} v{}", NAME, VERSION);

    system::metrics::init_registry();

    Ok(())
}
