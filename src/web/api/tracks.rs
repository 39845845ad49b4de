use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::DisplayStyle;
use crate::store::{PositionSample, Track};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackResponse {
    pub track: Track,
    /// Present when the satellite is also in the catalog.
    pub display: Option<DisplayStyle>,
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    responses(
        (status = 200, description = "Ids with an installed track", body = Vec<String>)
    ),
    tag = "tracks"
)]
pub async fn list_satellites(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.all_ids().into_iter().collect())
}

#[utoipa::path(
    get,
    path = "/api/tracks/{id}",
    params(("id" = String, Path, description = "Satellite id, any case")),
    responses(
        (status = 200, description = "Full track", body = TrackResponse),
        (status = 404, description = "No track for this satellite", body = ErrorResponse)
    ),
    tag = "tracks"
)]
pub async fn get_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TrackResponse>> {
    let track = state
        .store
        .track(&id)
        .ok_or(ApiError::NotFound("track_not_found"))?;
    let display = state.catalog.get(&id).map(|e| e.display.clone());

    Ok(Json(TrackResponse {
        track: track.as_ref().clone(),
        display,
    }))
}

#[utoipa::path(
    get,
    path = "/api/tracks/{id}/latest",
    params(("id" = String, Path, description = "Satellite id, any case")),
    responses(
        (status = 200, description = "Most recent sample, null for an empty track", body = Option<PositionSample>),
        (status = 404, description = "No track for this satellite", body = ErrorResponse)
    ),
    tag = "tracks"
)]
pub async fn latest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<PositionSample>>> {
    if state.store.track(&id).is_none() {
        return Err(ApiError::NotFound("track_not_found"));
    }
    Ok(Json(state.store.latest(&id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{synthesize_track, Catalog};
    use crate::geo::LongitudeConvention;
    use crate::store::PositionStore;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn state() -> AppState {
        let catalog = Catalog::builtin().unwrap();
        let store = PositionStore::new();
        let now = Utc::now();
        let iss = catalog.get("ISS").unwrap();
        store.replace_track(
            "ISS",
            synthesize_track(
                iss,
                now,
                now,
                now + Duration::minutes(10),
                Duration::minutes(1),
                LongitudeConvention::Signed180,
            ),
        );

        AppState {
            catalog: Arc::new(catalog),
            store: Arc::new(store),
            convention: LongitudeConvention::Signed180,
        }
    }

    #[tokio::test]
    async fn track_carries_catalog_display() {
        let Json(response) = get_track(State(state()), Path("iss".into())).await.unwrap();
        assert_eq!(response.track.len(), 11);
        assert_eq!(response.display.unwrap().color, "#00BFFF");
    }

    #[tokio::test]
    async fn unknown_track_is_not_found() {
        assert!(get_track(State(state()), Path("wind".into())).await.is_err());
        assert!(latest(State(state()), Path("wind".into())).await.is_err());
    }

    #[tokio::test]
    async fn latest_sample_or_null() {
        let state = state();
        let Json(sample) = latest(State(state.clone()), Path("ISS".into()))
            .await
            .unwrap();
        assert_eq!(sample, state.store.latest("iss"));
        assert!(sample.is_some());

        state
            .store
            .replace_track("ace", Track::new("ace", LongitudeConvention::Signed180));
        let Json(empty) = latest(State(state), Path("ace".into())).await.unwrap();
        assert!(empty.is_none());
    }

    #[tokio::test]
    async fn lists_installed_ids() {
        let Json(ids) = list_satellites(State(state())).await;
        assert_eq!(ids, vec!["iss"]);
    }
}
