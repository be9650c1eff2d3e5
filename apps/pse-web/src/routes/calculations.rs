//! Saved calculations.
//!
//! Reads take the store's read lock; save and delete hold the write lock
//! across the in-memory change and the file rewrite.

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;

use pse_app::{DeleteOutcome, SaveOutcome, SaveRequest, SavedCalculation, record_service};
use pse_records::CalculationRecord;

use crate::{ApiResult, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/calculations", get(list_calculations).post(save_calculation))
        .route(
            "/api/calculations/{id}",
            get(view_calculation).delete(delete_calculation),
        )
}

async fn list_calculations(State(state): State<Arc<AppState>>) -> Json<Vec<CalculationRecord>> {
    let store = state.store.read().await;
    Json(store.list().to_vec())
}

async fn save_calculation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SaveOutcome>)> {
    let Json(request) = payload?;
    let mut store = state.store.write().await;
    let outcome = record_service::save_calculation(&mut store, &request)?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn view_calculation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SavedCalculation>> {
    let store = state.store.read().await;
    Ok(Json(record_service::view_calculation(&store, &id)?))
}

async fn delete_calculation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteOutcome>> {
    let mut store = state.store.write().await;
    Ok(Json(record_service::delete_calculation(&mut store, &id)?))
}
