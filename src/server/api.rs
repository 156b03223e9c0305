//! Router assembly and server loop

use crate::server::{handlers, AppState, Result, ServerError};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let config = state.config();

    let mut app: Router<AppState> = Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TraceLayer::new_for_http());

    if config.cors_enabled {
        app = app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));
    }

    app.with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let address = state.config().address;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| ServerError::Bind(format!("{address}: {e}")))?;

    info!(%address, ready = state.is_ready(), "server listening");

    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
