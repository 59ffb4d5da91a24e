//! Operations the actor knows how to run

use crate::actor::queue::Priority;
use crate::core::types::{NodeId, Page};

/// One unit of queued work, with its typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert edge `source -> target`
    AddEdge {
        /// Source node
        source: NodeId,
        /// Target node
        target: NodeId,
    },
    /// Remove edge `source -> target`
    RemoveEdge {
        /// Source node
        source: NodeId,
        /// Target node
        target: NodeId,
    },
    /// Look up edge `source -> target`
    GetEdge {
        /// Source node
        source: NodeId,
        /// Target node
        target: NodeId,
    },
    /// Insert a node
    AddNode(NodeId),
    /// Remove a node and its incident edges
    RemoveNode(NodeId),
    /// Look up a node
    GetNode(NodeId),
    /// Read one page of edges
    BatchEdges(Page),
    /// Read one page of nodes
    BatchNodes(Page),
    /// Successors of a node
    Neighbors(NodeId),
    /// Replace the successors of a node
    SetNeighbors {
        /// Node whose successors are replaced
        node: NodeId,
        /// New successors
        nodes: Vec<NodeId>,
    },
    /// Predecessors of a node
    Predecessors(NodeId),
    /// Replace the predecessors of a node
    SetPredecessors {
        /// Node whose predecessors are replaced
        node: NodeId,
        /// New predecessors
        nodes: Vec<NodeId>,
    },
    /// Node and edge totals
    Count,
    /// Stop the actor loop
    Shutdown,
}

impl Operation {
    /// Short name used in logs and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::AddEdge { .. } => "add_edge",
            Operation::RemoveEdge { .. } => "remove_edge",
            Operation::GetEdge { .. } => "get_edge",
            Operation::AddNode(_) => "add_node",
            Operation::RemoveNode(_) => "remove_node",
            Operation::GetNode(_) => "get_node",
            Operation::BatchEdges(_) => "batch_edges",
            Operation::BatchNodes(_) => "batch_nodes",
            Operation::Neighbors(_) => "neighbors",
            Operation::SetNeighbors { .. } => "set_neighbors",
            Operation::Predecessors(_) => "predecessors",
            Operation::SetPredecessors { .. } => "set_predecessors",
            Operation::Count => "count",
            Operation::Shutdown => "shutdown",
        }
    }

    /// Tier the operation is queued at
    pub fn priority(&self) -> Priority {
        match self {
            Operation::GetEdge { .. }
            | Operation::GetNode(_)
            | Operation::BatchEdges(_)
            | Operation::BatchNodes(_)
            | Operation::Neighbors(_)
            | Operation::Predecessors(_)
            | Operation::Count => Priority::Read,
            Operation::AddEdge { .. }
            | Operation::RemoveEdge { .. }
            | Operation::AddNode(_)
            | Operation::RemoveNode(_)
            | Operation::SetNeighbors { .. }
            | Operation::SetPredecessors { .. } => Priority::Mutation,
            Operation::Shutdown => Priority::Shutdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(Operation::Count.priority(), Priority::Read);
        assert_eq!(Operation::GetNode("a".into()).priority(), Priority::Read);
        assert_eq!(Operation::AddNode("a".into()).priority(), Priority::Mutation);
        assert_eq!(
            Operation::SetNeighbors {
                node: "a".into(),
                nodes: vec![]
            }
            .priority(),
            Priority::Mutation
        );
        assert_eq!(Operation::Shutdown.priority(), Priority::Shutdown);
        assert_eq!(Operation::BatchEdges(Page::default()).kind(), "batch_edges");
    }
}
