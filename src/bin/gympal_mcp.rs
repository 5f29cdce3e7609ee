//! GymPal MCP server
//!
//! The same operations as the HTTP API, as MCP tools over stdio.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use gympal::build_info;
use gympal::config::ServerConfig;
use gympal::mcp::GympalService;
use gympal::store::DataStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stderr only, stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gympal=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("MCP server");
    eprintln!("Starting MCP server on stdio...");

    let config = ServerConfig::from_env()?;
    eprintln!("Data directory: {}", config.data_dir.display());
    let store = DataStore::open(&config.data_dir)?;

    let service = GympalService::new(store);
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
