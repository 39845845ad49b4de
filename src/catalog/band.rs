use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::params::CatalogEntry;
use crate::constants::{
    EARTH_RADIUS_KM, GEO_MAX_ALTITUDE_KM, LEO_MAX_ALTITUDE_KM, MEO_MAX_ALTITUDE_KM,
    SCENE_MARGIN_KM,
};

/// Altitude band used to filter the catalog.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum OrbitBand {
    #[default]
    All,
    Leo,
    Meo,
    Geo,
    DeepSpace,
}

impl OrbitBand {
    /// Band bounds are strict, so an altitude sitting exactly on a threshold
    /// belongs to no band except `All`.
    pub fn contains(self, altitude_km: f64) -> bool {
        match self {
            OrbitBand::All => true,
            OrbitBand::Leo => altitude_km < LEO_MAX_ALTITUDE_KM,
            OrbitBand::Meo => {
                LEO_MAX_ALTITUDE_KM < altitude_km && altitude_km < MEO_MAX_ALTITUDE_KM
            }
            OrbitBand::Geo => {
                MEO_MAX_ALTITUDE_KM < altitude_km && altitude_km < GEO_MAX_ALTITUDE_KM
            }
            OrbitBand::DeepSpace => altitude_km > GEO_MAX_ALTITUDE_KM,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrbitBand::All => "All Orbits",
            OrbitBand::Leo => "LEO",
            OrbitBand::Meo => "MEO",
            OrbitBand::Geo => "GEO",
            OrbitBand::DeepSpace => "Deep Space",
        }
    }

    /// Factor applied to the drawn Earth so satellites in the band stay visible.
    pub fn earth_scale(self) -> f64 {
        match self {
            OrbitBand::Leo => 0.1,
            OrbitBand::Meo => 0.3,
            OrbitBand::Geo => 0.5,
            OrbitBand::All | OrbitBand::DeepSpace => 0.2,
        }
    }

    pub fn default_zoom(self) -> f64 {
        match self {
            OrbitBand::Leo => 0.3,
            OrbitBand::Meo => 0.8,
            OrbitBand::Geo | OrbitBand::All | OrbitBand::DeepSpace => 1.0,
        }
    }
}

/// Half-width of a cubic scene holding every entry, or `None` for an empty set.
pub fn scene_range<'a>(
    entries: impl IntoIterator<Item = &'a CatalogEntry>,
    zoom: f64,
) -> Option<f64> {
    entries
        .into_iter()
        .map(|e| e.params.altitude_km)
        .reduce(f64::max)
        .map(|max_altitude| (EARTH_RADIUS_KM + max_altitude + SCENE_MARGIN_KM) * zoom)
}
