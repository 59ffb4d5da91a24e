//! The actor thread and the handles used to reach it
//!
//! [`GraphActor`] owns the store and the OS thread that drains the queue.
//! [`GraphHandle`] submits queued work; [`GraphReader`] serves the read-only
//! direct path, which is not ordered relative to queued work.

use parking_lot::RwLock;
use serde_json::json;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::actor::adapter;
use crate::actor::dispatch::{count_payload, dispatch};
use crate::actor::operation::Operation;
use crate::actor::queue::TaskQueue;
use crate::actor::task::Task;
use crate::core::config::ActorConfig;
use crate::core::error::{Error, Result};
use crate::core::types::{NodeId, Page, Reply};
use crate::storage::GraphStore;

type SharedStore = Arc<RwLock<dyn GraphStore>>;

/// Owner of the graph store and the thread that mutates it
pub struct GraphActor {
    queue: Arc<TaskQueue>,
    store: SharedStore,
    thread: Option<JoinHandle<()>>,
}

impl GraphActor {
    /// Move `store` onto a new named thread and start draining the queue
    pub fn spawn<S>(store: S, config: &ActorConfig) -> Result<Self>
    where
        S: GraphStore + 'static,
    {
        let queue = Arc::new(TaskQueue::new());
        let store: SharedStore = Arc::new(RwLock::new(store));

        let thread = {
            let queue = queue.clone();
            let store = store.clone();
            std::thread::Builder::new()
                .name(config.thread_name.clone())
                .spawn(move || run(&queue, &store))?
        };

        tracing::info!(thread = %config.thread_name, "graph actor spawned");

        Ok(Self {
            queue,
            store,
            thread: Some(thread),
        })
    }

    /// Cloneable handle for submitting queued operations
    pub fn handle(&self) -> GraphHandle {
        GraphHandle {
            queue: self.queue.clone(),
        }
    }

    /// Cloneable read-only handle for the direct path
    pub fn reader(&self) -> GraphReader {
        GraphReader {
            store: self.store.clone(),
        }
    }

    /// Whether the actor thread is still alive
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Request shutdown and block until the thread has exited
    ///
    /// Work queued before the call still runs first.
    pub fn close(mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        drop(self.queue.submit(Operation::Shutdown));
        join(thread)
    }

    /// Async variant of [`close`](Self::close); the join runs on the blocking pool
    pub async fn shutdown(mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        self.queue.submit(Operation::Shutdown).wait().await;
        tokio::task::spawn_blocking(move || join(thread))
            .await
            .map_err(|e| Error::internal(format!("join task failed: {}", e)))?
    }
}

impl Drop for GraphActor {
    fn drop(&mut self) {
        // Ask the thread to stop but do not wait for it
        if self.thread.take().is_some() {
            drop(self.queue.submit(Operation::Shutdown));
        }
    }
}

fn join(thread: JoinHandle<()>) -> Result<()> {
    thread
        .join()
        .map_err(|_| Error::internal("graph actor thread panicked"))
}

/// Closes the queue when the loop exits, including by unwinding
struct CloseOnDrop<'a>(&'a TaskQueue);

impl Drop for CloseOnDrop<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            tracing::error!("graph actor panicked, closing queue");
        }
        self.0.close();
    }
}

fn run(queue: &TaskQueue, store: &RwLock<dyn GraphStore>) {
    let _guard = CloseOnDrop(queue);
    tracing::info!("graph actor running");

    while let Some(entry) = queue.pop() {
        let mut graph = store.write();
        if dispatch(&mut *graph, entry).is_break() {
            break;
        }
    }

    tracing::info!("graph actor stopped");
}

/// Submits operations to the actor queue
#[derive(Clone)]
pub struct GraphHandle {
    queue: Arc<TaskQueue>,
}

impl GraphHandle {
    /// Submit any operation at its natural tier
    pub fn submit(&self, operation: Operation) -> Task {
        self.queue.submit(operation)
    }

    /// Add edge `source -> target`
    pub fn add_edge(&self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Task {
        self.submit(Operation::AddEdge {
            source: source.into(),
            target: target.into(),
        })
    }

    /// Remove edge `source -> target`
    pub fn remove_edge(&self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Task {
        self.submit(Operation::RemoveEdge {
            source: source.into(),
            target: target.into(),
        })
    }

    /// Look up edge `source -> target`
    pub fn edge(&self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Task {
        self.submit(Operation::GetEdge {
            source: source.into(),
            target: target.into(),
        })
    }

    /// Add a node
    pub fn add_node(&self, node: impl Into<NodeId>) -> Task {
        self.submit(Operation::AddNode(node.into()))
    }

    /// Remove a node with its incident edges
    pub fn remove_node(&self, node: impl Into<NodeId>) -> Task {
        self.submit(Operation::RemoveNode(node.into()))
    }

    /// Look up a node
    pub fn node(&self, node: impl Into<NodeId>) -> Task {
        self.submit(Operation::GetNode(node.into()))
    }

    /// One page of edges
    pub fn batch_get_edges(&self, page: Page) -> Task {
        self.submit(Operation::BatchEdges(page))
    }

    /// One page of nodes
    pub fn batch_get_nodes(&self, page: Page) -> Task {
        self.submit(Operation::BatchNodes(page))
    }

    /// Successors of a node, ordered with queued work
    pub fn neighbors(&self, node: impl Into<NodeId>) -> Task {
        self.submit(Operation::Neighbors(node.into()))
    }

    /// Replace the successors of a node
    pub fn set_neighbors(&self, node: impl Into<NodeId>, nodes: Vec<NodeId>) -> Task {
        self.submit(Operation::SetNeighbors {
            node: node.into(),
            nodes,
        })
    }

    /// Predecessors of a node, ordered with queued work
    pub fn predecessors(&self, node: impl Into<NodeId>) -> Task {
        self.submit(Operation::Predecessors(node.into()))
    }

    /// Replace the predecessors of a node
    pub fn set_predecessors(&self, node: impl Into<NodeId>, nodes: Vec<NodeId>) -> Task {
        self.submit(Operation::SetPredecessors {
            node: node.into(),
            nodes,
        })
    }

    /// Node and edge totals, ordered with queued work
    pub fn count(&self) -> Task {
        self.submit(Operation::Count)
    }

    /// Queue a shutdown request without waiting for the thread
    pub fn close(&self) -> Task {
        self.submit(Operation::Shutdown)
    }

    /// Number of operations waiting to run
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Read-only access to the store that bypasses the queue
#[derive(Clone)]
pub struct GraphReader {
    store: SharedStore,
}

impl GraphReader {
    /// Node and edge totals
    pub fn count(&self) -> Reply {
        adapter::direct(|| {
            let graph = self.store.read();
            Ok(count_payload(graph.node_count(), graph.edge_count()))
        })
    }

    /// Successors of `node`
    pub fn neighbors(&self, node: &str) -> Reply {
        adapter::direct(|| {
            let neighbors = self.store.read().neighbors(node)?;
            Ok(json!({ "node": node, "neighbors": neighbors }))
        })
    }

    /// Predecessors of `node`
    pub fn predecessors(&self, node: &str) -> Reply {
        adapter::direct(|| {
            let predecessors = self.store.read().predecessors(node)?;
            Ok(json!({ "node": node, "predecessors": predecessors }))
        })
    }

    /// Union of successors of `nodes`
    pub fn neighbors_from(&self, nodes: &[NodeId]) -> Reply {
        adapter::direct(|| {
            let neighbors = self.store.read().neighbors_from(nodes)?;
            Ok(json!({ "neighbors": neighbors }))
        })
    }

    /// Union of predecessors of `nodes`
    pub fn predecessors_from(&self, nodes: &[NodeId]) -> Reply {
        adapter::direct(|| {
            let predecessors = self.store.read().predecessors_from(nodes)?;
            Ok(json!({ "predecessors": predecessors }))
        })
    }

    /// Edges induced by `nodes`
    pub fn subgraph(&self, nodes: &[NodeId]) -> Reply {
        adapter::direct(|| {
            let edges = self.store.read().subgraph(nodes)?;
            Ok(json!({ "edges": edges, "_nodes": nodes }))
        })
    }
}
