//! End-to-end tests of the HTTP routes against a live actor

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use graph_actor::api::{create_app, AppState};
use graph_actor::{Config, GraphActor};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn setup(config: Config) -> (GraphActor, Router) {
    let actor = graph_actor::storage::create_graph_actor(&config).unwrap();
    let state = AppState {
        graph: actor.handle(),
        reader: actor.reader(),
        config: Arc::new(config),
    };
    (actor, create_app(state))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn test_home_reports_version() {
    let (actor, app) = setup(Config::default());
    let (status, body) = call(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"]["server"], graph_actor::VERSION);
    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_node_lifecycle() {
    let (actor, app) = setup(Config::default());

    let (status, body) = call(&app, Method::POST, "/node/X", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"node": "X", "created": true}));

    let (status, body) = call(&app, Method::GET, "/node/X", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"node": "X", "found": true}));

    let (status, body) = call(&app, Method::DELETE, "/node/X", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"node": "X", "removed": true}));

    let (status, body) = call(&app, Method::GET, "/node/X", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "resource not found"}));

    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_edges_and_count() {
    let (actor, app) = setup(Config::default());

    let (_, body) = call(&app, Method::GET, "/_count", None).await;
    assert_eq!(body, json!({"nodes_count": 0, "edges_count": 0, "avg_degree": 0}));

    call(&app, Method::POST, "/node/A", None).await;
    call(&app, Method::POST, "/node/B", None).await;
    let (status, body) = call(&app, Method::POST, "/edge/A/B", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"edge": {"source": "A", "target": "B"}, "created": true})
    );

    let (_, body) = call(&app, Method::GET, "/_count", None).await;
    assert_eq!(body["nodes_count"], 2);
    assert_eq!(body["edges_count"], 1);
    assert_eq!(body["avg_degree"], 0.5);

    let (status, _) = call(&app, Method::GET, "/edge/B/A", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, Method::DELETE, "/edge/A/B", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], true);

    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_batch_pagination() {
    let (actor, app) = setup(Config::default());
    call(&app, Method::POST, "/node/A", None).await;
    call(&app, Method::POST, "/node/B", None).await;

    let (_, first) = call(&app, Method::GET, "/node?size=1&page=0", None).await;
    let (_, second) = call(&app, Method::GET, "/node?size=1&page=1", None).await;
    assert_eq!(first, json!({"nodes": ["A"], "page": 0}));
    assert_eq!(second, json!({"nodes": ["B"], "page": 1}));

    let (_, all) = call(&app, Method::GET, "/node", None).await;
    assert_eq!(all["nodes"], json!(["A", "B"]));

    call(&app, Method::POST, "/edge/A/B", None).await;
    let (_, edges) = call(&app, Method::GET, "/edge?size=10", None).await;
    assert_eq!(
        edges,
        json!({"edges": [{"source": "A", "target": "B"}], "page": 0})
    );

    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_page_size_is_clamped() {
    let mut config = Config::default();
    config.graph.max_batch_size = 2;
    config.graph.default_batch_size = 2;
    let (actor, app) = setup(config);
    for node in ["a", "b", "c"] {
        call(&app, Method::POST, &format!("/node/{}", node), None).await;
    }

    let (_, body) = call(&app, Method::GET, "/node?size=50", None).await;
    assert_eq!(body["nodes"], json!(["a", "b"]));

    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_neighbors_and_predecessors() {
    let (actor, app) = setup(Config::default());

    let (status, body) = call(
        &app,
        Method::POST,
        "/neighbors/A",
        Some(json!({"nodes": ["B", "C"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, body) = call(&app, Method::GET, "/neighbors/A", None).await;
    assert_eq!(body, json!({"node": "A", "neighbors": ["B", "C"]}));

    call(
        &app,
        Method::POST,
        "/predecessors/C",
        Some(json!({"nodes": ["D"]})),
    )
    .await;
    let (_, body) = call(&app, Method::GET, "/predecessors/C", None).await;
    assert_eq!(body, json!({"node": "C", "predecessors": ["D"]}));

    let (_, body) = call(&app, Method::GET, "/neighbors/A", None).await;
    assert_eq!(body["neighbors"], json!(["B"]));

    let (status, body) = call(&app, Method::GET, "/neighbors/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Node not found: missing"}));

    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_multi_node_reads() {
    let (actor, app) = setup(Config::default());
    call(&app, Method::POST, "/edge/a/b", None).await;
    call(&app, Method::POST, "/edge/b/c", None).await;
    call(&app, Method::POST, "/edge/c/a", None).await;

    let (_, body) = call(
        &app,
        Method::POST,
        "/neighbors",
        Some(json!({"nodes": ["a", "b", "nope"]})),
    )
    .await;
    assert_eq!(body, json!({"neighbors": ["b", "c"]}));

    let (_, body) = call(
        &app,
        Method::POST,
        "/predecessors",
        Some(json!({"nodes": ["a"]})),
    )
    .await;
    assert_eq!(body, json!({"predecessors": ["c"]}));

    let (status, body) = call(
        &app,
        Method::POST,
        "/subgraph",
        Some(json!({"nodes": ["a", "b"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"edges": [{"source": "a", "target": "b"}], "_nodes": ["a", "b"]})
    );

    actor.shutdown().await.unwrap();
}

fn form_post(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_form_encoded_node_lists() {
    let (actor, app) = setup(Config::default());
    call(&app, Method::POST, "/edge/a/b", None).await;
    call(&app, Method::POST, "/edge/b/c", None).await;

    let (status, body) = send(&app, form_post("/subgraph", "nodes=a,b")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"edges": [{"source": "a", "target": "b"}], "_nodes": ["a", "b"]})
    );

    let (_, body) = send(&app, form_post("/neighbors", "nodes=a%2C%20b")).await;
    assert_eq!(body, json!({"neighbors": ["b", "c"]}));

    let (_, body) = send(&app, form_post("/predecessors", "nodes=c")).await;
    assert_eq!(body, json!({"predecessors": ["b"]}));

    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_malformed_input_gets_error_body() {
    let (actor, app) = setup(Config::default());

    let (status, body) = call(&app, Method::GET, "/node?size=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));

    let (status, body) = call(&app, Method::GET, "/edge?page=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = call(
        &app,
        Method::POST,
        "/subgraph",
        Some(json!({"wrong": ["a"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, form_post("/neighbors", "other=a")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (actor, app) = setup(Config::default());
    call(&app, Method::POST, "/node/m", None).await;

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("ga_operations_submitted_total"));
    assert!(text.contains("ga_operations_completed_total"));

    actor.shutdown().await.unwrap();

    let mut config = Config::default();
    config.metrics.enable_prometheus = false;
    let (actor, app) = setup(config);
    let (status, _) = call(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    actor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stopped_actor_returns_503() {
    let (actor, app) = setup(Config::default());
    actor.shutdown().await.unwrap();

    let (status, body) = call(&app, Method::POST, "/node/late", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"error": "Graph actor is not running"}));

    // Direct reads keep working off the last state
    let (status, _) = call(&app, Method::GET, "/_count", None).await;
    assert_eq!(status, StatusCode::OK);
}
