use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geo::CartesianPosition;

/// One unified position record, independent of where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PositionSample {
    pub satellite_id: String,
    pub timestamp: DateTime<Utc>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
    /// Position in km in the frame the sample originated in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cartesian_km: Option<CartesianPosition>,
}
