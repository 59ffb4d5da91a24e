//! Graph Actor server
//!
//! Serves the graph over HTTP, with every mutation executed on a single actor thread.

use clap::{Arg, Command};
use graph_actor::api::{start_server, AppState};
use graph_actor::{core::Config, storage::create_graph_actor, Error, Result};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new(graph_actor::NAME)
        .version(graph_actor::VERSION)
        .about("Graph service with a single-writer actor.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("http-addr")
                .long("http-addr")
                .value_name("ADDR")
                .help("HTTP server bind address"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .arg(
            Arg::new("batch-size")
                .long("batch-size")
                .value_name("N")
                .help("Default page size for batch reads"),
        )
        .get_matches();

    let mut config = if let Some(config_path) = matches.get_one::<String>("config") {
        let mut config = Config::from_file(config_path)?;
        config.apply_env_overrides()?;
        config
    } else {
        Config::load()?
    };

    apply_cli_overrides(&mut config, &matches)?;
    config.validate()?;

    graph_actor::init(&config.logging)?;
    info!("Starting {} v{}", graph_actor::NAME, graph_actor::VERSION);

    let actor = create_graph_actor(&config)?;
    info!("Storage initialized: {}", config.graph.storage);

    let state = AppState {
        graph: actor.handle(),
        reader: actor.reader(),
        config: Arc::new(config),
    };

    let served = start_server(state, shutdown_signal()).await;
    warn!("HTTP server stopped, shutting down graph actor...");

    actor.shutdown().await?;
    info!("Shutdown complete");
    served
}

/// Apply command line argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, matches: &clap::ArgMatches) -> Result<()> {
    if let Some(addr) = matches.get_one::<String>("http-addr") {
        config.server.http_addr = addr
            .parse()
            .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    if let Some(size) = matches.get_one::<String>("batch-size") {
        config.graph.default_batch_size = size
            .parse()
            .map_err(|e| Error::config(format!("Invalid batch size: {}", e)))?;
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
