use anyhow::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{AppState, config::AppConfig, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting blog API service");

    // Missing DATABASE_URL or PORT ends the process here
    let config = AppConfig::from_env()?;
    let app_state = AppState::from_config(&config).await?;

    info!("Blog API service initialized successfully");

    let app = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Blog API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
