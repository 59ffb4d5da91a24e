//! # API Module
//!
//! HTTP front end for the graph actor.
//!
//! ## Endpoints Overview
//!
//! ### Service
//! - `GET /` - Version banner
//! - `GET /_count` - Node and edge totals (direct)
//! - `GET /metrics` - Prometheus metrics
//!
//! ### Edges
//! - `POST|DELETE|GET /edge/{u}/{v}` - Add, remove or look up an edge
//! - `GET /edge?size=&page=` - Page through edges
//! - `POST /subgraph` - Edges induced by `{"nodes": [...]}` (direct)
//!
//! ### Nodes
//! - `POST|DELETE|GET /node/{u}` - Add, remove or look up a node
//! - `GET /node?size=&page=` - Page through nodes
//!
//! ### Adjacency
//! - `POST /neighbors` - Successors of `{"nodes": [...]}` (direct)
//! - `GET /neighbors/{u}` - Successors of a node (direct)
//! - `POST /neighbors/{u}` - Replace successors with `{"nodes": [...]}`
//! - `POST /predecessors`, `GET|POST /predecessors/{u}` - Same, for predecessors

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::{create_app, start_server};
