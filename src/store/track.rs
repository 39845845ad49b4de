use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::sample::PositionSample;
use crate::geo::LongitudeConvention;

#[derive(Debug, Error, PartialEq)]
#[error("sample at {timestamp} precedes the last sample at {last}")]
pub struct OutOfOrder {
    pub last: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

/// Time-ordered samples for one satellite.
///
/// Samples are kept in the order they are pushed and never re-sorted; `push`
/// refuses a sample older than the current last one, so timestamps are
/// non-decreasing. Every longitude in a track follows `convention`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Track {
    satellite_id: String,
    convention: LongitudeConvention,
    samples: Vec<PositionSample>,
}

impl Track {
    pub fn new(satellite_id: &str, convention: LongitudeConvention) -> Self {
        Self {
            satellite_id: satellite_id.to_string(),
            convention,
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: PositionSample) -> Result<(), OutOfOrder> {
        if let Some(last) = self.samples.last() {
            if sample.timestamp < last.timestamp {
                return Err(OutOfOrder {
                    last: last.timestamp,
                    timestamp: sample.timestamp,
                });
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    pub fn satellite_id(&self) -> &str {
        &self.satellite_id
    }

    pub fn convention(&self) -> LongitudeConvention {
        self.convention
    }

    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&PositionSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(secs: i64) -> PositionSample {
        PositionSample {
            satellite_id: "iss".into(),
            timestamp: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            latitude_deg: 0.0,
            longitude_deg: secs as f64,
            altitude_km: 408.0,
            cartesian_km: None,
        }
    }

    #[test]
    fn keeps_push_order() {
        let mut track = Track::new("iss", LongitudeConvention::Signed180);
        track.push(sample(0)).unwrap();
        track.push(sample(60)).unwrap();
        track.push(sample(60)).unwrap();

        assert_eq!(track.len(), 3);
        assert_eq!(track.latest().unwrap().longitude_deg, 60.0);
    }

    #[test]
    fn rejects_older_sample() {
        let mut track = Track::new("iss", LongitudeConvention::Signed180);
        track.push(sample(60)).unwrap();
        let err = track.push(sample(0)).unwrap_err();

        assert_eq!(err.last, sample(60).timestamp);
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn empty_track_has_no_latest() {
        let track = Track::new("iss", LongitudeConvention::Positive360);
        assert!(track.is_empty());
        assert!(track.latest().is_none());
    }
}
