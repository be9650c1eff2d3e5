use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use serde_json::json;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/health", get(api_health))
}

async fn api_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read().await;

    Json(json!({
        "status": "ok",
        "records": store.len(),
        "store_path": store.path().display().to_string(),
    }))
}
