use std::f64::consts::PI;

use super::error::CatalogError;
use super::params::{Catalog, CatalogEntry, DisplayStyle, OrbitalParameters};

const MINUTE: f64 = 60.0;
const DAY: f64 = 86_400.0;
const GEO_ALTITUDE_KM: f64 = 35_786.0;
const L1_ALTITUDE_KM: f64 = 1_500_000.0;

impl Catalog {
    /// Well-known satellites with representative orbital parameters.
    pub fn builtin() -> Result<Self, CatalogError> {
        Catalog::new(builtin_entries())
    }
}

fn entry(params: OrbitalParameters, color: &str, marker_size: u32) -> CatalogEntry {
    CatalogEntry {
        params,
        display: DisplayStyle {
            color: color.to_string(),
            marker_size,
        },
    }
}

fn circular(id: &str, alt: f64, incl: f64, period: f64, phase: f64) -> OrbitalParameters {
    OrbitalParameters::circular(id, alt, incl, phase, period)
}

fn geostationary(id: &str, longitude_deg: f64) -> OrbitalParameters {
    OrbitalParameters::geostationary(id, GEO_ALTITUDE_KM, longitude_deg)
}

pub fn builtin_entries() -> Vec<CatalogEntry> {
    let gps = |n: u32, phase: f64| {
        entry(
            circular(&format!("GPS{n}"), 20_200.0, 55.0, 43_200.0, phase),
            "#FF6347",
            80,
        )
    };

    vec![
        // LEO
        entry(circular("ISS", 408.0, 51.6, 92.5 * MINUTE, 0.0), "#00BFFF", 120),
        entry(circular("HUBBLE", 540.0, 28.5, 95.4 * MINUTE, PI / 3.0), "#FFD700", 100),
        entry(circular("LANDSAT8", 705.0, 98.2, 98.8 * MINUTE, 2.0 * PI / 3.0), "#32CD32", 90),
        entry(circular("AQUA", 705.0, 98.2, 98.8 * MINUTE, PI), "#00CED1", 90),
        entry(circular("TERRA", 705.0, 98.2, 98.8 * MINUTE, 4.0 * PI / 3.0), "#228B22", 90),
        entry(circular("AURA", 705.0, 98.2, 98.8 * MINUTE, 5.0 * PI / 3.0), "#20B2AA", 90),
        entry(circular("SENTINEL1A", 693.0, 98.2, 98.6 * MINUTE, PI / 6.0), "#FF69B4", 85),
        entry(circular("SENTINEL2A", 786.0, 98.2, 99.1 * MINUTE, PI / 4.0), "#FF1493", 85),
        entry(circular("SENTINEL3A", 814.0, 98.2, 99.3 * MINUTE, PI / 2.0), "#FF6347", 85),
        entry(circular("NOAA20", 824.0, 98.2, 99.4 * MINUTE, 3.0 * PI / 4.0), "#FF4500", 85),
        // MEO
        gps(1, 0.0),
        gps(2, PI / 6.0),
        gps(3, PI / 3.0),
        gps(4, PI / 2.0),
        gps(5, 2.0 * PI / 3.0),
        gps(6, 5.0 * PI / 6.0),
        // GEO
        entry(geostationary("GOES16", -75.0), "#FF8C00", 100),
        entry(geostationary("GOES17", -137.0), "#FF8C00", 100),
        entry(geostationary("METEOSAT11", 0.0), "#FFA500", 100),
        entry(geostationary("HIMAWARI8", 140.0), "#FFB347", 100),
        // Sun-Earth L1
        entry(circular("ACE", L1_ALTITUDE_KM, 0.0, 365.0 * DAY, 0.0), "#DC143C", 60),
        entry(circular("SOHO", L1_ALTITUDE_KM, 0.0, 365.0 * DAY, PI / 4.0), "#B22222", 60),
        entry(circular("DSCOVR", L1_ALTITUDE_KM, 0.0, 365.0 * DAY, PI / 2.0), "#8B0000", 60),
    ]
}
