//! Signflow MCP Server - Main entry point

use signflow_mcp::{McpServer, ServerConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.client.template_id.trim().is_empty() {
        tracing::warn!("SIGNFLOW_TEMPLATE_ID is not set; only preview_workflow will work");
    }

    let server = match McpServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to create MCP server: {}", e);
            std::process::exit(1);
        }
    };

    // Blocks until stdin closes
    if let Err(e) = server.run() {
        eprintln!("MCP server error: {}", e);
        std::process::exit(1);
    }
}
