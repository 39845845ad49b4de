use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::CatalogError;
use super::OrbitBand;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrbitClass {
    Circular {
        inclination_deg: f64,
        phase_rad: f64,
        period_seconds: f64,
    },
    Geostationary {
        longitude_deg: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrbitalParameters {
    pub id: String,
    pub altitude_km: f64,
    pub orbit_class: OrbitClass,
}

impl OrbitalParameters {
    pub fn circular(
        id: &str,
        altitude_km: f64,
        inclination_deg: f64,
        phase_rad: f64,
        period_seconds: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            altitude_km,
            orbit_class: OrbitClass::Circular {
                inclination_deg,
                phase_rad,
                period_seconds,
            },
        }
    }

    pub fn geostationary(id: &str, altitude_km: f64, longitude_deg: f64) -> Self {
        Self {
            id: id.to_string(),
            altitude_km,
            orbit_class: OrbitClass::Geostationary { longitude_deg },
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if !(self.altitude_km.is_finite() && self.altitude_km > 0.0) {
            return Err(CatalogError::InvalidAltitude {
                id: self.id.clone(),
                altitude_km: self.altitude_km,
            });
        }

        match self.orbit_class {
            OrbitClass::Circular {
                inclination_deg,
                phase_rad,
                period_seconds,
            } => {
                if !(period_seconds.is_finite() && period_seconds > 0.0) {
                    return Err(CatalogError::InvalidPeriod {
                        id: self.id.clone(),
                        period_seconds,
                    });
                }
                if !(inclination_deg.is_finite() && phase_rad.is_finite()) {
                    return Err(CatalogError::InvalidInclination {
                        id: self.id.clone(),
                    });
                }
            }
            OrbitClass::Geostationary { longitude_deg } => {
                if !longitude_deg.is_finite() {
                    return Err(CatalogError::InvalidLongitude {
                        id: self.id.clone(),
                        longitude_deg,
                    });
                }
            }
        }

        Ok(())
    }
}

/// How a renderer should draw a catalog satellite.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayStyle {
    pub color: String,
    pub marker_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CatalogEntry {
    pub params: OrbitalParameters,
    pub display: DisplayStyle,
}

/// Validated, immutable set of catalog entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        for (i, entry) in entries.iter().enumerate() {
            entry.params.validate()?;

            let duplicate = entries[..i]
                .iter()
                .any(|other| other.params.id.eq_ignore_ascii_case(&entry.params.id));
            if duplicate {
                return Err(CatalogError::DuplicateId(entry.params.id.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Case-insensitive lookup.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.params.id.eq_ignore_ascii_case(id))
    }

    pub fn in_band(&self, band: OrbitBand) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(move |e| band.contains(e.params.altitude_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(params: OrbitalParameters) -> CatalogEntry {
        CatalogEntry {
            params,
            display: DisplayStyle {
                color: "#FFFFFF".into(),
                marker_size: 10,
            },
        }
    }

    #[test]
    fn rejects_negative_altitude() {
        let err = Catalog::new(vec![entry(OrbitalParameters::circular(
            "bad", -10.0, 51.6, 0.0, 5550.0,
        ))])
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAltitude { .. }));
    }

    #[test]
    fn rejects_non_positive_period() {
        let err = Catalog::new(vec![entry(OrbitalParameters::circular(
            "bad", 408.0, 51.6, 0.0, 0.0,
        ))])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidPeriod {
                id: "bad".into(),
                period_seconds: 0.0
            }
        );
    }

    #[test]
    fn rejects_non_finite_longitude() {
        let err = Catalog::new(vec![entry(OrbitalParameters::geostationary(
            "bad",
            35786.0,
            f64::NAN,
        ))])
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidLongitude { .. }));
    }

    #[test]
    fn rejects_duplicate_ids_ignoring_case() {
        let err = Catalog::new(vec![
            entry(OrbitalParameters::geostationary("goes16", 35786.0, -75.0)),
            entry(OrbitalParameters::geostationary("GOES16", 35786.0, -75.0)),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("GOES16".into()));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = Catalog::new(vec![entry(OrbitalParameters::circular(
            "ISS", 408.0, 51.6, 0.0, 5550.0,
        ))])
        .unwrap();
        assert!(catalog.get("iss").is_some());
        assert!(catalog.get("Iss").is_some());
        assert!(catalog.get("hubble").is_none());
    }
}
