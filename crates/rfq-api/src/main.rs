//! RFQ API server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use rfq_api::{app, AppState};
use rfq_core::RfqConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rfq_api=info".parse()?)
                .add_directive("rfq_store=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let config_path = std::env::var_os("RFQ_CONFIG").map(std::path::PathBuf::from);
    let config = RfqConfig::load(config_path.as_deref())?;

    info!("Initializing RFQ API...");
    let state = Arc::new(AppState::from_config(&config).await?);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Starting RFQ API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
