//! HTTP server for the graph actor API

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use std::future::Future;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use crate::core::error::Result;

/// Creates the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let enable_cors = state.config.server.enable_cors;

    let router = Router::new()
        .route("/", get(handlers::home))
        .route("/_count", get(handlers::count))
        .route("/metrics", get(handlers::metrics))
        // Edges
        .route("/edge", get(handlers::batch_get_edges))
        .route(
            "/edge/:u/:v",
            post(handlers::add_edge)
                .delete(handlers::remove_edge)
                .get(handlers::get_edge),
        )
        .route("/subgraph", post(handlers::subgraph))
        // Nodes
        .route("/node", get(handlers::batch_get_nodes))
        .route(
            "/node/:u",
            post(handlers::add_node)
                .delete(handlers::remove_node)
                .get(handlers::get_node),
        )
        // Adjacency
        .route("/neighbors", post(handlers::neighbors_from))
        .route(
            "/neighbors/:u",
            get(handlers::neighbors).post(handlers::set_neighbors),
        )
        .route("/predecessors", post(handlers::predecessors_from))
        .route(
            "/predecessors/:u",
            get(handlers::predecessors).post(handlers::set_predecessors),
        )
        .with_state(state);

    let router = if enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([CONTENT_TYPE])
            .allow_origin(Any);
        router.layer(cors)
    } else {
        router
    };

    router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Serve the API until `shutdown` resolves
pub async fn start_server<F>(state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.server.http_addr;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
