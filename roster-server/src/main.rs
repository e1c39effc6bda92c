use clap::Parser;
use roster_server::{
    config::ServerConfig, database::ServerDatabase, errors::ServerError, AppState,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roster_server=debug,tower_http=debug")),
        )
        .init();

    let config = ServerConfig::parse();

    // No requests are served against a storage backend that failed to come up.
    let db = match ServerDatabase::connect(&config.database).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!(%e, "Failed to initialize database");
            return Err(e);
        }
    };

    let listener = match tokio::net::TcpListener::bind(&config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%e, addr = %config.bind_address, "Failed to bind listener");
            return Err(e.into());
        }
    };

    tracing::info!("Server up with address: {}", config.bind_address);

    let result = roster_server::serve(listener, AppState::new(db.clone())).await;
    db.pool.close().await;
    result
}
