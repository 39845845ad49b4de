use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Location query result: one entry per requested satellite.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderResponse {
    #[serde(default)]
    pub data: Vec<SatelliteData>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SatelliteData {
    pub id: String,
    #[serde(default)]
    pub time: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub coordinates: Vec<CoordinateBlock>,
}

/// Samples of one satellite in one reference frame, parallel to
/// `SatelliteData::time`. Missing numbers (`null`) read as NaN.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoordinateBlock {
    pub coordinate_system: String,
    #[serde(default, deserialize_with = "nullable_floats")]
    pub x: Vec<f64>,
    #[serde(default, deserialize_with = "nullable_floats")]
    pub y: Vec<f64>,
    #[serde(default, deserialize_with = "nullable_floats")]
    pub z: Vec<f64>,
    #[serde(
        default,
        alias = "LAT",
        alias = "Lat",
        deserialize_with = "optional_nullable_floats"
    )]
    pub latitude: Option<Vec<f64>>,
    #[serde(
        default,
        alias = "LON",
        alias = "Lon",
        deserialize_with = "optional_nullable_floats"
    )]
    pub longitude: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Observatory {
    pub id: String,
    pub name: String,
    /// Sample spacing in minutes.
    #[serde(default)]
    pub resolution: Option<u32>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl Observatory {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.end_time.map_or(true, |end| end > now)
    }
}

pub fn active_observatories(all: Vec<Observatory>, now: DateTime<Utc>) -> Vec<Observatory> {
    all.into_iter().filter(|o| o.is_active(now)).collect()
}

fn nullable_floats<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn optional_nullable_floats<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(values.map(|v| v.into_iter().map(|x| x.unwrap_or(f64::NAN)).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_provider_json() {
        let json = r#"{
            "Data": [{
                "Id": "iss",
                "Time": ["2025-10-04T12:00:00Z", "2025-10-04T12:01:00Z"],
                "Coordinates": [
                    {"CoordinateSystem": "Gse", "X": [1.0, 1.0], "Y": [0.0, 0.0], "Z": [0.0, 0.0]},
                    {"CoordinateSystem": "Geo", "X": [1.06, null], "Y": [0.0, 0.0], "Z": [0.0, 0.0],
                     "LAT": [0.0, 0.1], "LON": [0.0, 3.5]}
                ]
            }]
        }"#;
        let response: ProviderResponse = serde_json::from_str(json).unwrap();
        let sat = &response.data[0];

        assert_eq!(sat.id, "iss");
        assert_eq!(sat.time.len(), 2);
        assert_eq!(sat.coordinates.len(), 2);
        assert!(sat.coordinates[0].latitude.is_none());

        let geo = &sat.coordinates[1];
        assert!(geo.x[1].is_nan());
        assert_eq!(geo.longitude.as_deref(), Some(&[0.0, 3.5][..]));
    }

    #[test]
    fn observatory_activity() {
        let now = Utc.with_ymd_and_hms(2025, 10, 4, 0, 0, 0).unwrap();
        let json = r#"[
            {"Id": "iss", "Name": "ISS", "Resolution": 60, "EndTime": "2039-12-31T00:00:00Z"},
            {"Id": "isee1", "Name": "ISEE-1", "EndTime": "1987-09-26T00:00:00Z"},
            {"Id": "ace", "Name": "ACE"}
        ]"#;
        let all: Vec<Observatory> = serde_json::from_str(json).unwrap();
        let active = active_observatories(all, now);

        let ids: Vec<_> = active.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["iss", "ace"]);
    }
}
