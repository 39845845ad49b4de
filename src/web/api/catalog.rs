use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{position_at, scene_range, trail, CatalogEntry, OrbitBand};
use crate::geo::{earth_surface, CartesianPosition, GeodeticPosition};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

const DEFAULT_TRAIL_POINTS: usize = 100;
const MAX_TRAIL_POINTS: usize = 10_000;
const DEFAULT_EARTH_RESOLUTION: usize = 30;
const MAX_EARTH_RESOLUTION: usize = 200;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    pub band: Option<OrbitBand>,
    /// Overrides the band's default zoom factor.
    pub zoom: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub band: OrbitBand,
    pub earth_scale: f64,
    pub zoom: f64,
    /// Half-width of a scene holding every listed orbit, km.
    pub scene_range_km: Option<f64>,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PositionQuery {
    /// Seconds after the model epoch.
    #[serde(default)]
    pub t: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelPositionResponse {
    pub id: String,
    pub time_offset_seconds: f64,
    pub position: CartesianPosition,
    pub geodetic: GeodeticPosition,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrailQuery {
    pub points: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EarthQuery {
    pub resolution: Option<usize>,
    pub scale: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Catalog entries in the band", body = CatalogResponse),
        (status = 400, description = "Invalid zoom", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn list_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<CatalogResponse>> {
    let band = query.band.unwrap_or_default();
    let zoom = query.zoom.unwrap_or_else(|| band.default_zoom());
    if !(zoom.is_finite() && zoom > 0.0) {
        return Err(ApiError::Validation("zoom must be positive".into()));
    }
    let entries: Vec<CatalogEntry> = state.catalog.in_band(band).cloned().collect();

    Ok(Json(CatalogResponse {
        band,
        earth_scale: band.earth_scale(),
        zoom,
        scene_range_km: scene_range(&entries, zoom),
        entries,
    }))
}

#[utoipa::path(
    get,
    path = "/api/catalog/{id}/position",
    params(("id" = String, Path, description = "Catalog id, any case"), PositionQuery),
    responses(
        (status = 200, description = "Model position", body = ModelPositionResponse),
        (status = 400, description = "Invalid time offset", body = ErrorResponse),
        (status = 404, description = "Unknown catalog id", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn model_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PositionQuery>,
) -> ApiResult<Json<ModelPositionResponse>> {
    let entry = state
        .catalog
        .get(&id)
        .ok_or(ApiError::NotFound("satellite_not_in_catalog"))?;
    if !query.t.is_finite() {
        return Err(ApiError::Validation("t must be finite".into()));
    }

    let position = position_at(&entry.params, query.t);
    Ok(Json(ModelPositionResponse {
        id: entry.params.id.clone(),
        time_offset_seconds: query.t,
        position,
        geodetic: position.to_geodetic(state.convention),
    }))
}

#[utoipa::path(
    get,
    path = "/api/catalog/{id}/trail",
    params(("id" = String, Path, description = "Catalog id, any case"), TrailQuery),
    responses(
        (status = 200, description = "Orbit outline", body = Vec<CartesianPosition>),
        (status = 400, description = "Invalid point count", body = ErrorResponse),
        (status = 404, description = "Unknown catalog id", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn orbit_trail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TrailQuery>,
) -> ApiResult<Json<Vec<CartesianPosition>>> {
    let entry = state
        .catalog
        .get(&id)
        .ok_or(ApiError::NotFound("satellite_not_in_catalog"))?;

    let points = query.points.unwrap_or(DEFAULT_TRAIL_POINTS);
    if points == 0 || points > MAX_TRAIL_POINTS {
        return Err(ApiError::Validation(format!(
            "points must be between 1 and {MAX_TRAIL_POINTS}"
        )));
    }

    Ok(Json(trail(&entry.params, points)))
}

#[utoipa::path(
    get,
    path = "/api/earth",
    params(EarthQuery),
    responses(
        (status = 200, description = "Earth surface grid", body = Vec<Vec<CartesianPosition>>),
        (status = 400, description = "Invalid resolution or scale", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn earth(Query(query): Query<EarthQuery>) -> ApiResult<Json<Vec<Vec<CartesianPosition>>>> {
    let resolution = query.resolution.unwrap_or(DEFAULT_EARTH_RESOLUTION);
    let scale = query.scale.unwrap_or(1.0);

    if !(2..=MAX_EARTH_RESOLUTION).contains(&resolution) {
        return Err(ApiError::Validation(format!(
            "resolution must be between 2 and {MAX_EARTH_RESOLUTION}"
        )));
    }
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ApiError::Validation("scale must be positive".into()));
    }

    Ok(Json(earth_surface(resolution, scale)))
}
