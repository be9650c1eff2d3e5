//! Static form choices: gases, unit tags and discharge coefficient presets.

use std::sync::Arc;

use axum::Router;
use axum::response::Json;
use axum::routing::get;

use pse_app::{UnitCatalog, unit_catalog};
use pse_gas::{GasCatalogEntry, gas_catalog};

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/gases", get(api_gases))
        .route("/api/units", get(api_units))
}

async fn api_gases() -> Json<&'static [GasCatalogEntry]> {
    Json(gas_catalog())
}

async fn api_units() -> Json<UnitCatalog> {
    Json(unit_catalog())
}
