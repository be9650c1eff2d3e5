//! HTTP front end for the PSE gas release calculator.
//!
//! JSON in, JSON out. Every handler delegates to `pse_app`; this crate only
//! maps requests, shares the record store and turns errors into status codes.

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Create the router with all API routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::catalog::router())
        .merge(routes::calc::router())
        .merge(routes::calculations::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server.
pub async fn serve(state: Arc<AppState>, addr: &str) -> std::io::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("pse-web listening on http://{}", addr);

    axum::serve(listener, app).await
}
