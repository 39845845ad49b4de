use utoipa::OpenApi;

use super::api::catalog::{CatalogResponse, ModelPositionResponse};
use super::api::error::ErrorResponse;
use super::api::tracks::TrackResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::tracks::list_satellites,
        super::api::tracks::get_track,
        super::api::tracks::latest,
        super::api::catalog::list_catalog,
        super::api::catalog::model_position,
        super::api::catalog::orbit_trail,
        super::api::catalog::earth,
    ),
    components(
        schemas(
            TrackResponse,
            CatalogResponse,
            ModelPositionResponse,
            ErrorResponse,
            crate::store::Track,
            crate::store::PositionSample,
            crate::catalog::CatalogEntry,
            crate::catalog::OrbitalParameters,
            crate::catalog::OrbitClass,
            crate::catalog::DisplayStyle,
            crate::catalog::OrbitBand,
            crate::geo::CartesianPosition,
            crate::geo::GeodeticPosition,
            crate::geo::LongitudeConvention,
        )
    ),
    info(
        title = "Orbit View API",
        description = "Satellite positions from the live feed and the built-in orbit catalog",
        version = "0.1.0"
    ),
    tags(
        (name = "tracks", description = "Normalized live-feed tracks"),
        (name = "catalog", description = "Built-in orbit model")
    )
)]
pub struct ApiDoc;
