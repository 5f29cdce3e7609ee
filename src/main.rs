//! GymPal HTTP server
//!
//! Serves the JSON API the mobile client talks to.

use tracing::info;
use tracing_subscriber::EnvFilter;

use gympal::api::{build_router, cors_layer, AppState};
use gympal::build_info;
use gympal::config::ServerConfig;
use gympal::store::DataStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gympal=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("HTTP server");

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;
    eprintln!("Data directory: {}", config.data_dir.display());

    let store = DataStore::open(&config.data_dir)?;
    let app = build_router(AppState::new(store), cors_layer(&config.cors_origins));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
