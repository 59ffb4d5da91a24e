//! Operation handlers run on the actor thread

use serde_json::{json, Value};
use std::ops::ControlFlow;

use crate::actor::adapter;
use crate::actor::operation::Operation;
use crate::actor::queue::QueueEntry;
use crate::core::error::Result;
use crate::core::types::Edge;
use crate::storage::GraphStore;
use crate::system::metrics::{Metrics, Timer};

/// Run one dequeued entry and complete its task
///
/// Returns `Break` after a shutdown entry; the loop must not pop again.
pub(crate) fn dispatch(store: &mut dyn GraphStore, entry: QueueEntry) -> ControlFlow<()> {
    let seq = entry.seq();
    let (completer, operation) = entry.into_parts();
    tracing::debug!(seq, kind = operation.kind(), "dispatching");

    let metrics = Metrics::global();
    let timer = Timer::start(metrics.operation_duration.clone());
    let reply = adapter::queued(execute(store, &operation));
    timer.finish();

    metrics
        .operations_completed
        .with_label_values(&[reply.status.as_str()])
        .inc();
    completer.complete(reply);

    if operation == Operation::Shutdown {
        ControlFlow::Break(())
    } else {
        ControlFlow::Continue(())
    }
}

/// Apply `operation` to `store` and build its success payload
pub fn execute(store: &mut dyn GraphStore, operation: &Operation) -> Result<Value> {
    match operation {
        Operation::AddEdge { source, target } => {
            store.add_edge(source, target)?;
            Ok(json!({ "edge": Edge::new(source, target), "created": true }))
        }
        Operation::RemoveEdge { source, target } => {
            store.remove_edge(source, target)?;
            Ok(json!({ "edge": Edge::new(source, target), "removed": true }))
        }
        Operation::GetEdge { source, target } => {
            store.edge(source, target)?;
            Ok(json!({ "edge": Edge::new(source, target), "found": true }))
        }
        Operation::AddNode(node) => {
            store.add_node(node)?;
            Ok(json!({ "node": node, "created": true }))
        }
        Operation::RemoveNode(node) => {
            store.remove_node(node)?;
            Ok(json!({ "node": node, "removed": true }))
        }
        Operation::GetNode(node) => {
            store.node(node)?;
            Ok(json!({ "node": node, "found": true }))
        }
        Operation::BatchEdges(page) => {
            let edges = store.edges_page(*page)?;
            Ok(json!({ "edges": edges, "page": page.page }))
        }
        Operation::BatchNodes(page) => {
            let nodes = store.nodes_page(*page)?;
            Ok(json!({ "nodes": nodes, "page": page.page }))
        }
        Operation::Neighbors(node) => {
            let neighbors = store.neighbors(node)?;
            Ok(json!({ "node": node, "neighbors": neighbors }))
        }
        Operation::SetNeighbors { node, nodes } => {
            store.set_neighbors(node, nodes)?;
            Ok(json!({ "success": true }))
        }
        Operation::Predecessors(node) => {
            let predecessors = store.predecessors(node)?;
            Ok(json!({ "node": node, "predecessors": predecessors }))
        }
        Operation::SetPredecessors { node, nodes } => {
            store.set_predecessors(node, nodes)?;
            Ok(json!({ "success": true }))
        }
        Operation::Count => Ok(count_payload(store.node_count(), store.edge_count())),
        Operation::Shutdown => {
            tracing::info!("shutdown requested");
            Ok(json!({ "closing": true }))
        }
    }
}

/// `{nodes_count, edges_count, avg_degree}` with the degree rounded to one decimal
pub(crate) fn count_payload(nodes: usize, edges: usize) -> Value {
    let avg_degree = if nodes == 0 {
        json!(0)
    } else {
        json!(round_one_decimal(edges as f64 / nodes as f64))
    };
    json!({
        "nodes_count": nodes,
        "edges_count": edges,
        "avg_degree": avg_degree,
    })
}

/// Round to one decimal on the exact binary value, ties to even
fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Page;
    use crate::storage::MemGraph;

    fn run(store: &mut MemGraph, op: Operation) -> Result<Value> {
        execute(store, &op)
    }

    #[test]
    fn test_count_payload() {
        assert_eq!(
            count_payload(0, 0),
            json!({"nodes_count": 0, "edges_count": 0, "avg_degree": 0})
        );
        assert_eq!(count_payload(2, 1)["avg_degree"], 0.5);
        assert_eq!(count_payload(3, 1)["avg_degree"], 0.3);
    }

    #[test]
    fn test_avg_degree_rounds_half_to_even() {
        // 0.25 and 1.25 are exact ties; 0.35 is stored just below the tie
        assert_eq!(count_payload(4, 1)["avg_degree"], 0.2);
        assert_eq!(count_payload(20, 7)["avg_degree"], 0.3);
        assert_eq!(count_payload(4, 5)["avg_degree"], 1.2);
        assert_eq!(count_payload(4, 3)["avg_degree"], 0.8);
        assert_eq!(count_payload(1, 3)["avg_degree"], 3.0);
    }

    #[test]
    fn test_node_lifecycle() {
        let mut g = MemGraph::new();
        let added = run(&mut g, Operation::AddNode("x".into())).unwrap();
        assert_eq!(added, json!({"node": "x", "created": true}));

        let found = run(&mut g, Operation::GetNode("x".into())).unwrap();
        assert_eq!(found, json!({"node": "x", "found": true}));

        run(&mut g, Operation::RemoveNode("x".into())).unwrap();
        let err = run(&mut g, Operation::GetNode("x".into())).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edge_payloads() {
        let mut g = MemGraph::new();
        let added = run(
            &mut g,
            Operation::AddEdge {
                source: "a".into(),
                target: "b".into(),
            },
        )
        .unwrap();
        assert_eq!(
            added,
            json!({"edge": {"source": "a", "target": "b"}, "created": true})
        );

        let page = run(&mut g, Operation::BatchEdges(Page::new(10, 0))).unwrap();
        assert_eq!(page, json!({"edges": [{"source": "a", "target": "b"}], "page": 0}));
    }

    #[test]
    fn test_neighbor_payloads() {
        let mut g = MemGraph::new();
        let set = run(
            &mut g,
            Operation::SetNeighbors {
                node: "a".into(),
                nodes: vec!["b".into(), "c".into()],
            },
        )
        .unwrap();
        assert_eq!(set, json!({"success": true}));

        let got = run(&mut g, Operation::Neighbors("a".into())).unwrap();
        assert_eq!(got, json!({"node": "a", "neighbors": ["b", "c"]}));

        let preds = run(&mut g, Operation::Predecessors("c".into())).unwrap();
        assert_eq!(preds, json!({"node": "c", "predecessors": ["a"]}));
    }

    #[test]
    fn test_shutdown_payload() {
        let mut g = MemGraph::new();
        assert_eq!(
            run(&mut g, Operation::Shutdown).unwrap(),
            json!({"closing": true})
        );
    }
}
