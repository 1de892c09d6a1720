//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging, connects the store client and
//! starts the server with the configured transport.
//!
//! Pass `--http` (or `--sse`) to serve over HTTP regardless of
//! `MCP_TRANSPORT`.

use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use financial_mcp_server::core::{Config, McpServer, PostgrestStore, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing store settings are fatal before any transport starts
    #[allow(unused_mut)]
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    #[cfg(feature = "http")]
    if std::env::args().skip(1).any(|arg| arg == "--http" || arg == "--sse") {
        config.use_http_transport();
    }

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Store endpoint: {}", config.store.url);

    let store = Arc::new(PostgrestStore::new(&config.store)?);
    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config, store);

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` directives are honored on top of the configured level. Output
/// goes to stderr so the stdio transport owns stdout.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
