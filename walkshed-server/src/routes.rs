use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use walkshed_core::algo::BoundingBox;
use walkshed_core::config::Garage;
use walkshed_core::model::amenities_to_geojson;
use walkshed_core::render::{RenderOptions, render_isochrone_svg};
use walkshed_core::summary::AmenityTally;
use walkshed_core::Isochrone;

use crate::error::AppError;
use crate::page::{self, PageResult};
use crate::state::AppState;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 15;
pub const DEFAULT_MINUTES: u32 = 5;

/// Requests per route served at once; each holds a blocking thread
const MAX_CONCURRENT_REQUESTS: usize = 8;

/// Build the Axum router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/", get(index))
        .route("/map.svg", get(map_svg))
        .route("/api/isochrone", get(isochrone_json))
        .route("/health", get(health))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// User selection; both fields fall back to the page defaults.
/// `minutes` stays raw text so a malformed value still gets the failure page.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub garage: Option<String>,
    pub minutes: Option<String>,
}

fn parse_minutes(raw: Option<&str>) -> Result<u32, AppError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MINUTES);
    };
    let minutes = raw.trim().parse::<u32>().map_err(|_| {
        AppError::BadRequest(format!(
            "Walking time must be a whole number of minutes, got {raw:?}"
        ))
    })?;
    if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
        return Err(AppError::BadRequest(format!(
            "Walking time must be between {MIN_MINUTES} and {MAX_MINUTES} minutes, got {minutes}"
        )));
    }
    Ok(minutes)
}

fn resolve_selection<'a>(
    state: &'a AppState,
    query: &SelectionQuery,
) -> Result<(&'a Garage, u32), AppError> {
    let garage = match &query.garage {
        Some(name) => state
            .settings
            .garage(name)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown parking structure: {name}")))?,
        None => state
            .settings
            .garages
            .first()
            .ok_or_else(|| AppError::BadRequest("No parking structures configured".to_string()))?,
    };

    let minutes = parse_minutes(query.minutes.as_deref())?;
    Ok((garage, minutes))
}

/// Runs the blocking pipeline off the async runtime
async fn compute(state: Arc<AppState>, garage: Garage, minutes: u32) -> Result<Isochrone, AppError> {
    info!("Isochrone request: {} for {minutes} min", garage.name);
    let iso = tokio::task::spawn_blocking(move || state.isochrone(&garage, minutes)).await??;
    Ok(iso)
}

async fn render(iso: Isochrone) -> Result<(Isochrone, String), AppError> {
    let result = tokio::task::spawn_blocking(move || {
        render_isochrone_svg(&iso, &RenderOptions::default()).map(|svg| (iso, svg))
    })
    .await??;
    Ok(result)
}

async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Html<String>, AppError> {
    let (garage, minutes) = resolve_selection(&state, &query)?;
    let garage = garage.clone();

    let iso = compute(Arc::clone(&state), garage.clone(), minutes).await?;
    let (iso, svg) = render(iso).await?;
    let tally = iso.tally();

    Ok(Html(page::amenity_page(
        &state.settings.garages,
        &garage,
        minutes,
        &PageResult {
            svg: &svg,
            tally: &tally,
        },
    )))
}

async fn map_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, AppError> {
    let (garage, minutes) = resolve_selection(&state, &query)?;
    let iso = compute(Arc::clone(&state), garage.clone(), minutes).await?;
    let (_, svg) = render(iso).await?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

#[derive(Debug, Serialize)]
pub struct IsochroneResponse {
    pub garage: String,
    pub address: String,
    pub minutes: u32,
    pub bbox: BoundingBox,
    pub node_count: usize,
    pub edge_count: usize,
    pub tally: AmenityTally,
    pub amenities: serde_json::Value,
}

async fn isochrone_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<IsochroneResponse>, AppError> {
    let (garage, minutes) = resolve_selection(&state, &query)?;
    let garage = garage.clone();
    let iso = compute(Arc::clone(&state), garage.clone(), minutes).await?;

    let amenities = amenities_to_geojson(&iso.amenities)?;
    let amenities = serde_json::to_value(&amenities)
        .map_err(|e| AppError::Pipeline(walkshed_core::Error::from(e)))?;

    Ok(Json(IsochroneResponse {
        garage: garage.name,
        address: garage.address,
        minutes,
        bbox: iso.bbox,
        node_count: iso.subgraph.node_count(),
        edge_count: iso.subgraph.edge_count(),
        tally: iso.tally(),
        amenities,
    }))
}

async fn health() -> &'static str {
    "ok"
}
