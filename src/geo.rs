use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::EARTH_RADIUS_KM;

/// Position in kilometers in an Earth-centred frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartesianPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPosition {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Spherical latitude/longitude over a sphere of `EARTH_RADIUS_KM`.
    ///
    /// The origin maps to latitude 0, longitude 0 and an altitude of minus one
    /// Earth radius.
    pub fn to_geodetic(&self, convention: LongitudeConvention) -> GeodeticPosition {
        let radius = self.magnitude();
        let latitude_deg = if radius > 0.0 {
            (self.z / radius).clamp(-1.0, 1.0).asin().to_degrees()
        } else {
            0.0
        };
        let longitude_deg = convention.apply(self.y.atan2(self.x).to_degrees());

        GeodeticPosition {
            latitude_deg,
            longitude_deg,
            altitude_km: radius - EARTH_RADIUS_KM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

/// Range in which longitudes are emitted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum LongitudeConvention {
    /// `[-180, 180)`
    #[default]
    Signed180,
    /// `[0, 360)`
    Positive360,
}

impl LongitudeConvention {
    pub fn label(self) -> &'static str {
        match self {
            LongitudeConvention::Signed180 => "[-180, 180)",
            LongitudeConvention::Positive360 => "[0, 360)",
        }
    }

    pub fn apply(self, longitude_deg: f64) -> f64 {
        match self {
            LongitudeConvention::Signed180 => {
                let wrapped = (longitude_deg + 180.0).rem_euclid(360.0) - 180.0;
                // rem_euclid can round up to the excluded bound
                if wrapped >= 180.0 {
                    -180.0
                } else {
                    wrapped
                }
            }
            LongitudeConvention::Positive360 => {
                let wrapped = longitude_deg.rem_euclid(360.0);
                if wrapped >= 360.0 {
                    0.0
                } else {
                    wrapped
                }
            }
        }
    }
}

/// Sphere of radius `EARTH_RADIUS_KM * scale` sampled on a `resolution` x
/// `resolution` grid, rows indexed by azimuth `u` in `[0, 2π]` and columns by
/// polar angle `v` in `[0, π]`, both endpoints included.
pub fn earth_surface(resolution: usize, scale: f64) -> Vec<Vec<CartesianPosition>> {
    let resolution = resolution.max(2);
    let radius = EARTH_RADIUS_KM * scale;
    let last = (resolution - 1) as f64;

    (0..resolution)
        .map(|i| {
            let u = 2.0 * PI * i as f64 / last;
            (0..resolution)
                .map(|j| {
                    let v = PI * j as f64 / last;
                    CartesianPosition::new(
                        radius * u.cos() * v.sin(),
                        radius * u.sin() * v.sin(),
                        radius * v.cos(),
                    )
                })
                .collect()
        })
        .collect()
}
