//! HTTP handler functions for the fire watch API.

use actix_web::{HttpResponse, web};
use fire_watch_analytics::{aggregate, apply_trend};
use fire_watch_engine::decide_with_inputs;
use fire_watch_fusion::sensor_score;
use fire_watch_grid::sensors::latest_per_device;
use fire_watch_hotspot::detect_hotspots;
use fire_watch_server_models::{ApiHealth, ApiHotspot, ApiRegion, ApiSensor, HotspotQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/regions`
///
/// Per-region aggregates with trend classification against the prior
/// dataset when one is loaded.
pub async fn regions(state: web::Data<AppState>) -> HttpResponse {
    let today = aggregate(state.table.cells(), state.context.index());
    let prior = state
        .prior
        .as_ref()
        .map(|table| aggregate(table.cells(), state.context.index()));

    let aggregates = apply_trend(&today, prior.as_deref());
    let api: Vec<ApiRegion> = aggregates.iter().map(ApiRegion::from).collect();
    HttpResponse::Ok().json(api)
}

/// `GET /api/hotspots`
///
/// Hotspot clusters over the loaded grid. Query parameters override the
/// configured clustering parameters field by field.
pub async fn hotspots(
    state: web::Data<AppState>,
    params: web::Query<HotspotQueryParams>,
) -> HttpResponse {
    let merged = params
        .into_inner()
        .apply_to(state.context.config().hotspot.params());

    let clusters = detect_hotspots(state.table.cells(), &merged);
    let api: Vec<ApiHotspot> = clusters.iter().map(ApiHotspot::from).collect();
    HttpResponse::Ok().json(api)
}

/// `GET /api/decision`
///
/// Runs the full pipeline over the loaded inputs.
pub async fn decision(state: web::Data<AppState>) -> HttpResponse {
    let report = decide_with_inputs(
        &state.context,
        &state.table,
        state.prior.as_ref(),
        &state.readings,
    );
    HttpResponse::Ok().json(report)
}

/// `GET /api/sensors`
///
/// The latest reading per device with its derived ground score.
pub async fn sensors(state: web::Data<AppState>) -> HttpResponse {
    let latest = latest_per_device(&state.readings);
    let api: Vec<ApiSensor> = latest
        .iter()
        .map(|reading| ApiSensor::from_reading(reading, sensor_score(reading)))
        .collect();
    HttpResponse::Ok().json(api)
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Not found"
    }))
}
