//! In-memory directed graph with deterministic insertion ordering.
//!
//! Layout:
//! - `nodes` / `edges`: ordered by an insertion sequence number, which gives batch
//!   reads a stable page order
//! - `index`: node id to its sequence number and adjacency lists
//! - `edge_index`: edge to its sequence number for O(1) existence checks
//!
//! Adjacency lists keep the order edges were added, so `neighbors` returns nodes
//! "as stored".

use std::collections::{BTreeMap, HashMap};

use crate::core::error::GraphError;
use crate::core::types::{Edge, NodeId, Page};
use crate::storage::{GraphResult, GraphStore};

#[derive(Debug, Default)]
struct NodeEntry {
    seq: u64,
    successors: Vec<NodeId>,
    predecessors: Vec<NodeId>,
}

/// Directed graph held entirely in memory
#[derive(Debug, Default)]
pub struct MemGraph {
    nodes: BTreeMap<u64, NodeId>,
    index: HashMap<NodeId, NodeEntry>,
    edges: BTreeMap<u64, Edge>,
    edge_index: HashMap<Edge, u64>,
    next_seq: u64,
}

impl MemGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn entry(&self, node: &str) -> GraphResult<&NodeEntry> {
        self.index
            .get(node)
            .ok_or_else(|| GraphError::node_not_found(node))
    }

    /// Drop an edge from the edge maps and both adjacency lists.
    /// Returns false when the edge did not exist.
    fn unlink(&mut self, edge: &Edge) -> bool {
        let Some(seq) = self.edge_index.remove(edge) else {
            return false;
        };
        self.edges.remove(&seq);

        if let Some(entry) = self.index.get_mut(&edge.source) {
            entry.successors.retain(|n| *n != edge.target);
        }
        if let Some(entry) = self.index.get_mut(&edge.target) {
            entry.predecessors.retain(|n| *n != edge.source);
        }
        true
    }
}

impl GraphStore for MemGraph {
    fn add_node(&mut self, node: &str) -> GraphResult<()> {
        if self.index.contains_key(node) {
            return Ok(());
        }
        let seq = self.allocate_seq();
        self.nodes.insert(seq, node.to_string());
        self.index.insert(
            node.to_string(),
            NodeEntry {
                seq,
                ..Default::default()
            },
        );
        Ok(())
    }

    fn remove_node(&mut self, node: &str) -> GraphResult<()> {
        let entry = self
            .index
            .get(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;

        let outgoing: Vec<Edge> = entry
            .successors
            .iter()
            .map(|s| Edge::new(node, s.clone()))
            .collect();
        let incoming: Vec<Edge> = entry
            .predecessors
            .iter()
            .map(|p| Edge::new(p.clone(), node))
            .collect();

        for edge in outgoing.iter().chain(incoming.iter()) {
            self.unlink(edge);
        }

        if let Some(entry) = self.index.remove(node) {
            self.nodes.remove(&entry.seq);
        }
        Ok(())
    }

    fn node(&self, node: &str) -> GraphResult<()> {
        self.entry(node).map(|_| ())
    }

    fn add_edge(&mut self, source: &str, target: &str) -> GraphResult<()> {
        self.add_node(source)?;
        self.add_node(target)?;

        let edge = Edge::new(source, target);
        if self.edge_index.contains_key(&edge) {
            return Ok(());
        }

        let seq = self.allocate_seq();
        self.edges.insert(seq, edge.clone());
        self.edge_index.insert(edge, seq);

        if let Some(entry) = self.index.get_mut(source) {
            entry.successors.push(target.to_string());
        }
        if let Some(entry) = self.index.get_mut(target) {
            entry.predecessors.push(source.to_string());
        }
        Ok(())
    }

    fn remove_edge(&mut self, source: &str, target: &str) -> GraphResult<()> {
        if self.unlink(&Edge::new(source, target)) {
            Ok(())
        } else {
            Err(GraphError::edge_not_found(source, target))
        }
    }

    fn edge(&self, source: &str, target: &str) -> GraphResult<()> {
        if self.edge_index.contains_key(&Edge::new(source, target)) {
            Ok(())
        } else {
            Err(GraphError::edge_not_found(source, target))
        }
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn nodes_page(&self, page: Page) -> GraphResult<Vec<NodeId>> {
        Ok(self
            .nodes
            .values()
            .skip(page.offset())
            .take(page.size)
            .cloned()
            .collect())
    }

    fn edges_page(&self, page: Page) -> GraphResult<Vec<Edge>> {
        Ok(self
            .edges
            .values()
            .skip(page.offset())
            .take(page.size)
            .cloned()
            .collect())
    }

    fn neighbors(&self, node: &str) -> GraphResult<Vec<NodeId>> {
        self.entry(node).map(|e| e.successors.clone())
    }

    fn predecessors(&self, node: &str) -> GraphResult<Vec<NodeId>> {
        self.entry(node).map(|e| e.predecessors.clone())
    }

    fn set_neighbors(&mut self, node: &str, nodes: &[NodeId]) -> GraphResult<()> {
        self.add_node(node)?;
        for successor in self.neighbors(node)? {
            self.unlink(&Edge::new(node, successor));
        }
        for successor in nodes {
            self.add_edge(node, successor)?;
        }
        Ok(())
    }

    fn set_predecessors(&mut self, node: &str, nodes: &[NodeId]) -> GraphResult<()> {
        self.add_node(node)?;
        for parent in self.predecessors(node)? {
            self.unlink(&Edge::new(parent, node));
        }
        for parent in nodes {
            self.add_edge(parent, node)?;
        }
        Ok(())
    }
}
