//! Storage layer for the graph actor service
//!
//! The graph engine itself is an external collaborator; this module only fixes the
//! contract the actor needs from it ([`GraphStore`]) and ships one in-memory
//! implementation ([`MemGraph`]).
//!
//! Implementations are not expected to tolerate concurrent mutation. The actor is
//! the only caller of the `&mut self` methods; the direct-call path only ever holds
//! a shared reference.

use crate::core::error::GraphError;
use crate::core::types::{Edge, NodeId, Page};

/// In-memory adjacency store
pub mod mem_graph;

/// Store construction from configuration
pub mod factory;

pub use factory::{create_graph_actor, StorageType};
pub use mem_graph::MemGraph;

/// Result type returned by every store operation
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Contract of the graph storage engine driven by the actor
///
/// Lookups keyed by an unknown identifier must fail with
/// [`GraphError::NodeNotFound`] or [`GraphError::EdgeNotFound`]; the adapters rely
/// on that to tell "not found" apart from other failures.
pub trait GraphStore: Send + Sync {
    /// Insert a node. Adding an existing node is a no-op.
    fn add_node(&mut self, node: &str) -> GraphResult<()>;

    /// Remove a node together with every edge touching it
    fn remove_node(&mut self, node: &str) -> GraphResult<()>;

    /// Check that a node exists
    fn node(&self, node: &str) -> GraphResult<()>;

    /// Insert an edge, creating missing endpoints. Adding an existing edge is a no-op.
    fn add_edge(&mut self, source: &str, target: &str) -> GraphResult<()>;

    /// Remove an edge
    fn remove_edge(&mut self, source: &str, target: &str) -> GraphResult<()>;

    /// Check that an edge exists
    fn edge(&self, source: &str, target: &str) -> GraphResult<()>;

    /// Number of nodes
    fn node_count(&self) -> usize;

    /// Number of edges
    fn edge_count(&self) -> usize;

    /// One page of nodes in storage order
    fn nodes_page(&self, page: Page) -> GraphResult<Vec<NodeId>>;

    /// One page of edges in storage order
    fn edges_page(&self, page: Page) -> GraphResult<Vec<Edge>>;

    /// Successors of `node`, in the order they were stored
    fn neighbors(&self, node: &str) -> GraphResult<Vec<NodeId>>;

    /// Predecessors of `node`, in the order they were stored
    fn predecessors(&self, node: &str) -> GraphResult<Vec<NodeId>>;

    /// Replace every outgoing edge of `node` with edges to `nodes`
    ///
    /// # Arguments
    ///
    /// * `node` - The node whose successors are replaced, created if missing
    /// * `nodes` - The new successors, created if missing
    fn set_neighbors(&mut self, node: &str, nodes: &[NodeId]) -> GraphResult<()>;

    /// Replace every incoming edge of `node` with edges from `nodes`
    ///
    /// # Arguments
    ///
    /// * `node` - The node whose predecessors are replaced, created if missing
    /// * `nodes` - The new predecessors, created if missing
    fn set_predecessors(&mut self, node: &str, nodes: &[NodeId]) -> GraphResult<()>;

    /// Union of successors of `nodes`, deduplicated in first-seen order
    ///
    /// Unknown nodes are skipped rather than reported.
    fn neighbors_from(&self, nodes: &[NodeId]) -> GraphResult<Vec<NodeId>> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for node in nodes {
            let Ok(successors) = self.neighbors(node) else {
                continue;
            };
            for successor in successors {
                if seen.insert(successor.clone()) {
                    out.push(successor);
                }
            }
        }
        Ok(out)
    }

    /// Union of predecessors of `nodes`, deduplicated in first-seen order
    fn predecessors_from(&self, nodes: &[NodeId]) -> GraphResult<Vec<NodeId>> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for node in nodes {
            let Ok(parents) = self.predecessors(node) else {
                continue;
            };
            for parent in parents {
                if seen.insert(parent.clone()) {
                    out.push(parent);
                }
            }
        }
        Ok(out)
    }

    /// Edges whose endpoints both belong to `nodes`
    fn subgraph(&self, nodes: &[NodeId]) -> GraphResult<Vec<Edge>> {
        let members: std::collections::HashSet<&str> = nodes.iter().map(String::as_str).collect();
        let mut edges = Vec::new();
        for node in nodes {
            let Ok(successors) = self.neighbors(node) else {
                continue;
            };
            edges.extend(
                successors
                    .into_iter()
                    .filter(|s| members.contains(s.as_str()))
                    .map(|s| Edge::new(node.clone(), s)),
            );
        }
        // Duplicate entries in `nodes` would emit the same edge twice
        let mut seen = std::collections::HashSet::new();
        edges.retain(|e| seen.insert(e.clone()));
        Ok(edges)
    }
}
