pub mod api;
pub mod config;
pub mod middleware;
pub mod pms;
pub mod server;
pub mod transport;
pub mod users;
pub mod util;
pub mod xml;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Transport error: {0}")]
    Transport(#[from] transport::TransportError),
    #[error("Endpoint error: {0}")]
    Endpoint(#[from] pms::EndpointError),
    #[error("Server error: {0}")]
    Server(String),
}

pub fn load(config_path: &str) -> Result<(config::Config, pms::PmsConnect), AppError> {
    let config = config::Config::from_file(config_path)?;
    info!("Using config file: {}", config_path);

    match config.pms.base_url() {
        Some(url) => info!("Media server: {}", url),
        None => info!("No media server host configured"),
    }
    if config.pms.use_bif {
        info!("Index thumbnails enabled");
    }

    let pms = pms::PmsConnect::from_config(&config)?;
    Ok((config, pms))
}

pub async fn serve(config: config::Config, pms: pms::PmsConnect) -> Result<(), AppError> {
    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| AppError::Server(format!("Invalid address: {}", e)))?;

    let state = server::AppState::new(Arc::new(pms));
    let app = server::build_router(state);

    info!("Serving HTTP on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
