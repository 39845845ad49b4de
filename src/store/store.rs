use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use super::sample::PositionSample;
use super::track::Track;

/// Latest track per satellite, shared between the refresh path and readers.
///
/// Tracks are installed whole behind an `Arc`: a reader holding the previous
/// track keeps a complete copy while a refresh swaps in the next one. Ids are
/// matched case-insensitively.
#[derive(Debug, Default)]
pub struct PositionStore {
    tracks: RwLock<HashMap<String, Arc<Track>>>,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole track for `id`, returning the one it displaced.
    pub fn replace_track(&self, id: &str, track: Track) -> Option<Arc<Track>> {
        let mut tracks = self.tracks.write().unwrap_or_else(PoisonError::into_inner);
        tracks.insert(key(id), Arc::new(track))
    }

    pub fn track(&self, id: &str) -> Option<Arc<Track>> {
        let tracks = self.tracks.read().unwrap_or_else(PoisonError::into_inner);
        tracks.get(&key(id)).cloned()
    }

    pub fn latest(&self, id: &str) -> Option<PositionSample> {
        self.track(id).and_then(|t| t.latest().cloned())
    }

    pub fn all_ids(&self) -> BTreeSet<String> {
        let tracks = self.tracks.read().unwrap_or_else(PoisonError::into_inner);
        tracks.keys().cloned().collect()
    }

    /// Every installed track, ordered by id.
    pub fn snapshot(&self) -> Vec<Arc<Track>> {
        let tracks = self.tracks.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<_> = tracks.iter().collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all.into_iter().map(|(_, t)| t.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tracks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn key(id: &str) -> String {
    id.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LongitudeConvention;
    use chrono::{TimeZone, Utc};

    fn track(id: &str, altitudes: &[f64]) -> Track {
        let mut track = Track::new(id, LongitudeConvention::Signed180);
        for (i, alt) in altitudes.iter().enumerate() {
            track
                .push(PositionSample {
                    satellite_id: id.to_string(),
                    timestamp: Utc.timestamp_opt(1_700_000_000 + 60 * i as i64, 0).unwrap(),
                    latitude_deg: 10.0,
                    longitude_deg: 20.0,
                    altitude_km: *alt,
                    cartesian_km: None,
                })
                .unwrap();
        }
        track
    }

    #[test]
    fn latest_is_last_sample() {
        let store = PositionStore::new();
        store.replace_track("iss", track("iss", &[400.0, 405.0, 410.0]));
        assert_eq!(store.latest("iss").unwrap().altitude_km, 410.0);
        assert!(store.latest("hubble").is_none());
    }

    #[test]
    fn replacement_is_wholesale() {
        let store = PositionStore::new();
        store.replace_track("iss", track("iss", &[400.0, 405.0, 410.0]));
        let previous = store.replace_track("iss", track("iss", &[500.0])).unwrap();

        assert_eq!(previous.len(), 3);
        assert_eq!(store.track("iss").unwrap().len(), 1);
        assert_eq!(store.latest("iss").unwrap().altitude_km, 500.0);
    }

    #[test]
    fn reader_keeps_its_track_across_refresh() {
        let store = PositionStore::new();
        store.replace_track("iss", track("iss", &[400.0, 405.0]));
        let held = store.track("iss").unwrap();

        store.replace_track("iss", track("iss", &[900.0]));

        assert_eq!(held.len(), 2);
        assert_eq!(held.latest().unwrap().altitude_km, 405.0);
    }

    #[test]
    fn ids_are_case_insensitive() {
        let store = PositionStore::new();
        store.replace_track("ISS", track("ISS", &[400.0]));
        store.replace_track("ace", track("ace", &[1.5e6]));

        assert!(store.track("iss").is_some());
        assert_eq!(
            store.all_ids().into_iter().collect::<Vec<_>>(),
            vec!["ace".to_string(), "iss".to_string()]
        );
        assert_eq!(store.snapshot()[0].satellite_id(), "ace");
    }

    #[test]
    fn concurrent_readers_see_whole_tracks() {
        let store = Arc::new(PositionStore::new());
        store.replace_track("iss", track("iss", &[1.0; 10]));

        let reader = {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    let len = store.track("iss").unwrap().len();
                    assert!(len == 10 || len == 20);
                }
            })
        };
        for _ in 0..100 {
            store.replace_track("iss", track("iss", &[2.0; 20]));
            store.replace_track("iss", track("iss", &[1.0; 10]));
        }
        reader.join().unwrap();
    }
}
