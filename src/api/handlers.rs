//! HTTP request handlers for the graph actor API
//!
//! Handlers translate a request into either a queued operation (awaiting its task)
//! or a direct read, and return the resulting [`Reply`] as-is.

use axum::{
    async_trait,
    extract::{rejection::QueryRejection, Form, FromRequest, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::actor::{GraphHandle, GraphReader};
use crate::core::config::Config;
use crate::core::error::Error;
use crate::core::types::{NodeId, Page, Reply};
use crate::system::metrics::collect_metrics;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Queued path
    pub graph: GraphHandle,
    /// Direct read path
    pub reader: GraphReader,
    /// Effective configuration
    pub config: Arc<Config>,
}

/// `?size=&page=` on batch reads
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Requested page size, clamped to the configured maximum
    pub size: Option<usize>,
    /// Zero-based page index
    pub page: Option<usize>,
}

/// Node list sent as JSON `{"nodes": [...]}` or as a form field `nodes=a,b,c`
#[derive(Debug, Deserialize)]
pub struct NodesBody {
    /// Node identifiers
    pub nodes: Vec<NodeId>,
}

#[derive(Deserialize)]
struct NodesForm {
    nodes: String,
}

#[async_trait]
impl<S> FromRequest<S> for NodesBody
where
    S: Send + Sync,
{
    type Rejection = Reply;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<NodesBody>::from_request(req, state)
                .await
                .map_err(|e| invalid_input(e.body_text()))?;
            return Ok(body);
        }

        let Form(form) = Form::<NodesForm>::from_request(req, state)
            .await
            .map_err(|e| invalid_input(e.body_text()))?;
        let nodes = form
            .nodes
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        Ok(NodesBody { nodes })
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn invalid_input(msg: String) -> Reply {
    Reply::from_error(&Error::invalid_input(msg))
}

impl AppState {
    fn page(&self, query: Result<Query<PageQuery>, QueryRejection>) -> Result<Page, Reply> {
        let Query(query) = query.map_err(|e| invalid_input(e.body_text()))?;
        Ok(Page::new(
            self.config.clamp_batch_size(query.size),
            query.page.unwrap_or(0),
        ))
    }
}

/// Service banner
pub async fn home() -> Json<Value> {
    Json(json!({ "version": { "server": crate::VERSION } }))
}

/// Prometheus scrape endpoint
pub async fn metrics(State(state): State<AppState>) -> Response {
    if !state.config.metrics.enable_prometheus {
        return Reply::error(StatusCode::NOT_FOUND, "metrics disabled").into_response();
    }
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        collect_metrics(),
    )
        .into_response()
}

/// Direct node and edge totals
pub async fn count(State(state): State<AppState>) -> Reply {
    state.reader.count()
}

// Edges

/// Add an edge
pub async fn add_edge(
    State(state): State<AppState>,
    Path((u, v)): Path<(String, String)>,
) -> Reply {
    state.graph.add_edge(u, v).wait().await
}

/// Remove an edge
pub async fn remove_edge(
    State(state): State<AppState>,
    Path((u, v)): Path<(String, String)>,
) -> Reply {
    state.graph.remove_edge(u, v).wait().await
}

/// Look up an edge
pub async fn get_edge(
    State(state): State<AppState>,
    Path((u, v)): Path<(String, String)>,
) -> Reply {
    state.graph.edge(u, v).wait().await
}

/// One page of edges
pub async fn batch_get_edges(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Reply, Reply> {
    let page = state.page(query)?;
    Ok(state.graph.batch_get_edges(page).wait().await)
}

/// Edges induced by a node set
pub async fn subgraph(State(state): State<AppState>, body: NodesBody) -> Reply {
    state.reader.subgraph(&body.nodes)
}

// Nodes

/// Add a node
pub async fn add_node(State(state): State<AppState>, Path(u): Path<String>) -> Reply {
    state.graph.add_node(u).wait().await
}

/// Remove a node
pub async fn remove_node(State(state): State<AppState>, Path(u): Path<String>) -> Reply {
    state.graph.remove_node(u).wait().await
}

/// Look up a node
pub async fn get_node(State(state): State<AppState>, Path(u): Path<String>) -> Reply {
    state.graph.node(u).wait().await
}

/// One page of nodes
pub async fn batch_get_nodes(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Reply, Reply> {
    let page = state.page(query)?;
    Ok(state.graph.batch_get_nodes(page).wait().await)
}

// Adjacency

/// Union of successors of a node set
pub async fn neighbors_from(
    State(state): State<AppState>,
    body: NodesBody,
) -> Reply {
    state.reader.neighbors_from(&body.nodes)
}

/// Successors of a node
pub async fn neighbors(State(state): State<AppState>, Path(u): Path<String>) -> Reply {
    state.reader.neighbors(&u)
}

/// Replace the successors of a node
pub async fn set_neighbors(
    State(state): State<AppState>,
    Path(u): Path<String>,
    body: NodesBody,
) -> Reply {
    state.graph.set_neighbors(u, body.nodes).wait().await
}

/// Union of predecessors of a node set
pub async fn predecessors_from(
    State(state): State<AppState>,
    body: NodesBody,
) -> Reply {
    state.reader.predecessors_from(&body.nodes)
}

/// Predecessors of a node
pub async fn predecessors(State(state): State<AppState>, Path(u): Path<String>) -> Reply {
    state.reader.predecessors(&u)
}

/// Replace the predecessors of a node
pub async fn set_predecessors(
    State(state): State<AppState>,
    Path(u): Path<String>,
    body: NodesBody,
) -> Reply {
    state.graph.set_predecessors(u, body.nodes).wait().await
}
