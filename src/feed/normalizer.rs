use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::FeedError;
use super::types::{CoordinateBlock, SatelliteData};
use crate::constants::EARTH_RADIUS_KM;
use crate::geo::{CartesianPosition, LongitudeConvention};
use crate::store::{PositionSample, Track};

/// Unit of the provider's X/Y/Z arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartesianUnits {
    #[default]
    EarthRadii,
    Kilometers,
}

impl CartesianUnits {
    pub fn km_per_unit(self) -> f64 {
        match self {
            CartesianUnits::EarthRadii => EARTH_RADIUS_KM,
            CartesianUnits::Kilometers => 1.0,
        }
    }
}

#[derive(Debug)]
pub struct Normalized {
    pub track: Track,
    /// Indices dropped for missing or non-finite values, or for going back in time.
    pub skipped: usize,
}

/// Turns raw provider samples in one configured frame into a `Track`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    coordinate_system: String,
    units: CartesianUnits,
    convention: LongitudeConvention,
}

impl Normalizer {
    pub fn new(
        coordinate_system: &str,
        units: CartesianUnits,
        convention: LongitudeConvention,
    ) -> Self {
        Self {
            coordinate_system: coordinate_system.to_string(),
            units,
            convention,
        }
    }

    pub fn coordinate_system(&self) -> &str {
        &self.coordinate_system
    }

    /// Picks the block tagged with the configured coordinate system, ignoring case.
    pub fn select<'a>(&self, data: &'a SatelliteData) -> Result<&'a CoordinateBlock, FeedError> {
        data.coordinates
            .iter()
            .find(|c| c.coordinate_system.eq_ignore_ascii_case(&self.coordinate_system))
            .ok_or_else(|| FeedError::UnsupportedCoordinateSystem {
                satellite: data.id.clone(),
                requested: self.coordinate_system.clone(),
            })
    }

    /// Converts every index of the selected block into a sample.
    ///
    /// Samples are expected in time order. An index is skipped when any of its
    /// arrays is too short, a value is not finite, or its timestamp precedes
    /// the last kept sample.
    pub fn normalize(&self, data: &SatelliteData) -> Result<Normalized, FeedError> {
        let block = self.select(data)?;
        let mut track = Track::new(&data.id, self.convention);
        let mut skipped = 0;

        let len = [
            data.time.len(),
            block.x.len(),
            block.y.len(),
            block.z.len(),
            block.latitude.as_ref().map_or(0, Vec::len),
            block.longitude.as_ref().map_or(0, Vec::len),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        for i in 0..len {
            let accepted = self
                .sample_at(&data.id, &data.time, block, i)
                .map(|sample| track.push(sample).is_ok())
                .unwrap_or(false);
            if !accepted {
                skipped += 1;
            }
        }

        if skipped > 0 {
            log::warn!(
                "{}: skipped {} of {} malformed samples",
                data.id,
                skipped,
                len
            );
        }

        Ok(Normalized { track, skipped })
    }

    fn sample_at(
        &self,
        satellite_id: &str,
        times: &[DateTime<Utc>],
        block: &CoordinateBlock,
        i: usize,
    ) -> Option<PositionSample> {
        let timestamp = *times.get(i)?;
        let raw = CartesianPosition::new(*block.x.get(i)?, *block.y.get(i)?, *block.z.get(i)?);
        if !raw.is_finite() {
            return None;
        }

        let scale = self.units.km_per_unit();
        // scale the magnitude before removing the Earth radius
        let altitude_km = raw.magnitude() * scale - EARTH_RADIUS_KM;
        let cartesian_km = raw.scaled(scale);

        let (latitude_deg, longitude_deg) = match (&block.latitude, &block.longitude) {
            (Some(lat), Some(lon)) => {
                let (lat, lon) = (*lat.get(i)?, *lon.get(i)?);
                if !(lat.is_finite() && lon.is_finite()) {
                    return None;
                }
                (lat, self.convention.apply(lon))
            }
            _ => {
                let geodetic = cartesian_km.to_geodetic(self.convention);
                (geodetic.latitude_deg, geodetic.longitude_deg)
            }
        };

        Some(PositionSample {
            satellite_id: satellite_id.to_string(),
            timestamp,
            latitude_deg,
            longitude_deg,
            altitude_km,
            cartesian_km: Some(cartesian_km),
        })
    }
}
