//! Stateless calculator endpoints.

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use axum::routing::post;

use pse_app::{
    FlowReport, FlowRequest, OrificeConversion, OrificeConvertRequest, RequiredAreaReport,
    RequiredAreaRequest, calc_service,
};

use crate::{ApiResult, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/calculate", post(api_calculate))
        .route("/api/required-area", post(api_required_area))
        .route("/api/orifice/convert", post(api_orifice_convert))
}

async fn api_calculate(
    payload: Result<Json<FlowRequest>, JsonRejection>,
) -> ApiResult<Json<FlowReport>> {
    let Json(request) = payload?;
    Ok(Json(calc_service::calculate(&request)?))
}

async fn api_required_area(
    payload: Result<Json<RequiredAreaRequest>, JsonRejection>,
) -> ApiResult<Json<RequiredAreaReport>> {
    let Json(request) = payload?;
    Ok(Json(calc_service::required_area(&request)?))
}

async fn api_orifice_convert(
    payload: Result<Json<OrificeConvertRequest>, JsonRejection>,
) -> ApiResult<Json<OrificeConversion>> {
    let Json(request) = payload?;
    Ok(Json(calc_service::convert_orifice(&request)?))
}
