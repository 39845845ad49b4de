/// Mean Earth radius used by every position computation in the crate.
pub const EARTH_RADIUS_KM: f64 = 6378.16;

/// Upper altitude bound (exclusive) of the low Earth orbit band.
pub const LEO_MAX_ALTITUDE_KM: f64 = 1_000.0;
/// Upper altitude bound (exclusive) of the medium Earth orbit band.
pub const MEO_MAX_ALTITUDE_KM: f64 = 30_000.0;
/// Upper altitude bound (exclusive) of the geostationary band.
pub const GEO_MAX_ALTITUDE_KM: f64 = 100_000.0;

/// Padding added around the outermost orbit when sizing a scene.
pub const SCENE_MARGIN_KM: f64 = 10_000.0;
