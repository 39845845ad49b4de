use chrono::{DateTime, Duration, Utc};

use super::model::position_at;
use super::params::CatalogEntry;
use crate::geo::LongitudeConvention;
use crate::store::{PositionSample, Track};

/// Samples the catalog model from `start` to `end` (inclusive) every `step`.
///
/// The model's time offset is measured from `epoch`. A non-positive step
/// yields only the sample at `start`.
pub fn synthesize_track(
    entry: &CatalogEntry,
    epoch: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
    convention: LongitudeConvention,
) -> Track {
    let params = &entry.params;
    let mut track = Track::new(&params.id, convention);
    let mut cursor = start;

    while cursor <= end {
        let offset_seconds = (cursor - epoch).num_milliseconds() as f64 / 1000.0;
        let position = position_at(params, offset_seconds);
        let geodetic = position.to_geodetic(convention);

        let pushed = track.push(PositionSample {
            satellite_id: params.id.clone(),
            timestamp: cursor,
            latitude_deg: geodetic.latitude_deg,
            longitude_deg: geodetic.longitude_deg,
            altitude_km: geodetic.altitude_km,
            cartesian_km: Some(position),
        });
        if let Err(e) = pushed {
            log::warn!("{}: {}", params.id, e);
            break;
        }

        if step <= Duration::zero() {
            break;
        }
        match cursor.checked_add_signed(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    track
}

/// Instant `offset_seconds` after `epoch`, or `None` when that falls outside
/// the representable calendar.
pub fn model_time(epoch: DateTime<Utc>, offset_seconds: f64) -> Option<DateTime<Utc>> {
    let millis = (offset_seconds * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(Duration::try_milliseconds(millis as i64)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn samples_window_inclusively() {
        let catalog = Catalog::builtin().unwrap();
        let iss = catalog.get("ISS").unwrap();
        let track = synthesize_track(
            iss,
            epoch(),
            epoch(),
            epoch() + Duration::hours(1),
            Duration::seconds(60),
            LongitudeConvention::Signed180,
        );

        assert_eq!(track.len(), 61);
        assert_eq!(track.satellite_id(), "ISS");
        for sample in track.samples() {
            assert!((sample.altitude_km - 408.0).abs() < 1e-6);
            assert!((-90.0..=90.0).contains(&sample.latitude_deg));
            assert!((-180.0..180.0).contains(&sample.longitude_deg));
        }
    }

    #[test]
    fn first_sample_matches_model_at_epoch() {
        let catalog = Catalog::builtin().unwrap();
        let iss = catalog.get("ISS").unwrap();
        let track = synthesize_track(
            iss,
            epoch(),
            epoch(),
            epoch(),
            Duration::seconds(60),
            LongitudeConvention::Signed180,
        );

        let sample = &track.samples()[0];
        assert_eq!(sample.cartesian_km, Some(position_at(&iss.params, 0.0)));
        // y = 0 at phase 0, so the sample sits on the prime meridian at the
        // inclination latitude
        assert!(sample.longitude_deg.abs() < 1e-9);
        assert!((sample.latitude_deg - 51.6).abs() < 1e-9);
    }

    #[test]
    fn geostationary_track_is_constant() {
        let catalog = Catalog::builtin().unwrap();
        let goes = catalog.get("goes16").unwrap();
        let track = synthesize_track(
            goes,
            epoch(),
            epoch(),
            epoch() + Duration::minutes(30),
            Duration::minutes(10),
            LongitudeConvention::Positive360,
        );

        assert_eq!(track.len(), 4);
        for sample in track.samples() {
            assert!((sample.longitude_deg - 285.0).abs() < 1e-9);
            assert!(sample.latitude_deg.abs() < 1e-9);
            assert!((sample.altitude_km - 35_786.0).abs() < 1e-6);
        }
    }

    #[test]
    fn stops_at_end_of_calendar() {
        let catalog = Catalog::builtin().unwrap();
        let end = DateTime::<Utc>::MAX_UTC;
        let track = synthesize_track(
            catalog.get("ISS").unwrap(),
            epoch(),
            end - Duration::minutes(1),
            end,
            Duration::seconds(45),
            LongitudeConvention::Signed180,
        );
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn model_time_bounds() {
        assert_eq!(
            model_time(epoch(), 90.5),
            Some(epoch() + Duration::milliseconds(90_500))
        );
        assert_eq!(
            model_time(epoch(), -60.0),
            Some(epoch() - Duration::minutes(1))
        );
        assert_eq!(model_time(epoch(), 1.0e16), None);
        assert_eq!(model_time(epoch(), f64::NAN), None);
        assert_eq!(model_time(epoch(), f64::INFINITY), None);
    }

    #[test]
    fn zero_step_yields_single_sample() {
        let catalog = Catalog::builtin().unwrap();
        let track = synthesize_track(
            catalog.get("HUBBLE").unwrap(),
            epoch(),
            epoch(),
            epoch() + Duration::hours(1),
            Duration::zero(),
            LongitudeConvention::Signed180,
        );
        assert_eq!(track.len(), 1);
    }
}
