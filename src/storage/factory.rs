//! Storage factory for creating graph stores based on configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::actor::GraphActor;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::storage::MemGraph;

/// Available storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Volatile in-memory graph
    #[default]
    Memory,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "memory" => Ok(StorageType::Memory),
            other => Err(Error::config(format!(
                "Invalid storage type: {}. Valid options: memory",
                other
            ))),
        }
    }
}

/// Create the configured graph store and hand it to a freshly spawned actor
///
/// The store is moved straight into the actor so no write handle to it survives
/// outside the actor thread.
pub fn create_graph_actor(config: &Config) -> Result<GraphActor> {
    match config.graph.storage {
        StorageType::Memory => GraphActor::spawn(MemGraph::new(), &config.actor),
    }
}
