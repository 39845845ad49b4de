use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog entry has an empty id")]
    EmptyId,
    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),
    #[error("{id}: altitude must be a positive number of km, got {altitude_km}")]
    InvalidAltitude { id: String, altitude_km: f64 },
    #[error("{id}: orbital period must be positive, got {period_seconds} s")]
    InvalidPeriod { id: String, period_seconds: f64 },
    #[error("{id}: inclination and phase must be finite")]
    InvalidInclination { id: String },
    #[error("{id}: longitude must be finite, got {longitude_deg}")]
    InvalidLongitude { id: String, longitude_deg: f64 },
}
