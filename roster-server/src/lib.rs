pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod queries;
pub mod store;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use errors::ServerError;
use std::future::Future;
use std::sync::Arc;
use store::UserStore;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

/// Bind `POST /register` and `GET /users`. Other methods on those paths get
/// a 405 from the method router, unknown paths the default 404. Request
/// bodies are not size-limited.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(api::register))
        // `get` would also answer HEAD
        .route("/users", get(api::list_users).head(api::get_only))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Serve until SIGINT or SIGTERM, then drain in-flight requests.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(%e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(%e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
