use std::f64::consts::TAU;

use super::params::{OrbitClass, OrbitalParameters};
use crate::constants::EARTH_RADIUS_KM;
use crate::geo::CartesianPosition;

pub fn orbit_radius_km(params: &OrbitalParameters) -> f64 {
    EARTH_RADIUS_KM + params.altitude_km
}

/// Position of a catalog satellite `time_offset_seconds` after the model epoch.
///
/// Circular orbits are tilted by the inclination about the Y axis only. The
/// phase is not reduced modulo 2π.
pub fn position_at(params: &OrbitalParameters, time_offset_seconds: f64) -> CartesianPosition {
    let radius = orbit_radius_km(params);

    match params.orbit_class {
        OrbitClass::Geostationary { longitude_deg } => {
            let longitude = longitude_deg.to_radians();
            CartesianPosition::new(radius * longitude.cos(), radius * longitude.sin(), 0.0)
        }
        OrbitClass::Circular {
            inclination_deg,
            phase_rad,
            period_seconds,
        } => {
            let orbital_phase = TAU * time_offset_seconds / period_seconds + phase_rad;
            circular_position(radius, orbital_phase, inclination_deg.to_radians())
        }
    }
}

/// Geometric orbit shape for drawing: `points` angles evenly spaced over
/// `[0, 2π)` past the phase offset, independent of the period. The first point
/// is where the satellite sits at the epoch. A geostationary orbit is a single
/// point.
pub fn trail(params: &OrbitalParameters, points: usize) -> Vec<CartesianPosition> {
    let radius = orbit_radius_km(params);

    match params.orbit_class {
        OrbitClass::Geostationary { .. } => vec![position_at(params, 0.0)],
        OrbitClass::Circular {
            inclination_deg,
            phase_rad,
            ..
        } => {
            let inclination = inclination_deg.to_radians();
            (0..points)
                .map(|i| {
                    let angle = TAU * i as f64 / points as f64;
                    circular_position(radius, angle + phase_rad, inclination)
                })
                .collect()
        }
    }
}

fn circular_position(radius: f64, orbital_phase: f64, inclination_rad: f64) -> CartesianPosition {
    let (sin_phase, cos_phase) = orbital_phase.sin_cos();
    CartesianPosition::new(
        radius * cos_phase * inclination_rad.cos(),
        radius * sin_phase,
        radius * cos_phase * inclination_rad.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    fn iss() -> OrbitalParameters {
        OrbitalParameters::circular("ISS", 408.0, 51.6, 0.0, 5550.0)
    }

    fn goes16() -> OrbitalParameters {
        OrbitalParameters::geostationary("GOES16", 35786.0, -75.0)
    }

    fn close(a: CartesianPosition, b: CartesianPosition) -> bool {
        (a.x - b.x).abs() < TOL && (a.y - b.y).abs() < TOL && (a.z - b.z).abs() < TOL
    }

    #[test]
    fn iss_at_epoch() {
        let pos = position_at(&iss(), 0.0);
        let radius = EARTH_RADIUS_KM + 408.0;
        let incl = 51.6_f64.to_radians();

        assert!((pos.magnitude() - 6786.16).abs() < TOL);
        assert!((pos.x - radius * incl.cos()).abs() < TOL);
        assert!(pos.y.abs() < TOL);
        assert!((pos.z - radius * incl.sin()).abs() < TOL);
    }

    #[test]
    fn geostationary_position() {
        let radius = EARTH_RADIUS_KM + 35786.0;
        let lon = (-75.0_f64).to_radians();
        let expected = CartesianPosition::new(radius * lon.cos(), radius * lon.sin(), 0.0);

        assert_eq!(position_at(&goes16(), 0.0), expected);
        assert_eq!(position_at(&goes16(), 12_345.6), expected);
    }

    #[test]
    fn geostationary_is_time_invariant() {
        let params = goes16();
        let first = position_at(&params, -3600.0);
        for t in [0.0, 1.5, 86_400.0, 1.0e9] {
            assert_eq!(position_at(&params, t), first);
        }
    }

    #[test]
    fn circular_orbit_is_periodic() {
        let params = OrbitalParameters::circular("GPS1", 20200.0, 55.0, 0.5, 43200.0);
        for t in [0.0, 1234.5, 40_000.0, -900.0] {
            let a = position_at(&params, t);
            let b = position_at(&params, t + 43200.0);
            assert!(close(a, b), "{a:?} != {b:?} at t={t}");
        }
    }

    #[test]
    fn non_monotonic_sampling_is_deterministic() {
        let params = iss();
        let forward = position_at(&params, 700.0);
        let _ = position_at(&params, 5000.0);
        let _ = position_at(&params, -20.0);
        assert_eq!(position_at(&params, 700.0), forward);
    }

    #[test]
    fn radius_grows_with_altitude() {
        let low = OrbitalParameters::circular("low", 540.0, 28.5, 1.0, 5724.0);
        let high = OrbitalParameters::circular("high", 705.0, 28.5, 1.0, 5724.0);
        for t in [0.0, 100.0, 2000.0] {
            assert!(position_at(&low, t).magnitude() < position_at(&high, t).magnitude());
        }
    }

    #[test]
    fn trail_follows_the_orbit_shape() {
        let params = OrbitalParameters::circular("HUBBLE", 540.0, 28.5, 0.3, 5724.0);
        let points = trail(&params, 100);
        assert_eq!(points.len(), 100);

        let radius = EARTH_RADIUS_KM + 540.0;
        assert!(points.iter().all(|p| (p.magnitude() - radius).abs() < TOL));

        // the marker walks along the trail points
        assert!(close(points[0], position_at(&params, 0.0)));
        assert!(close(points[25], position_at(&params, 5724.0 / 4.0)));
    }

    #[test]
    fn every_trail_starts_at_its_satellite() {
        let catalog = crate::catalog::Catalog::builtin().unwrap();
        for entry in catalog.in_band(crate::catalog::OrbitBand::All) {
            let first = trail(&entry.params, 10)[0];
            let at_epoch = position_at(&entry.params, 0.0);
            let tol = 1e-9 * orbit_radius_km(&entry.params);
            assert!(
                (first.x - at_epoch.x).abs() < tol
                    && (first.y - at_epoch.y).abs() < tol
                    && (first.z - at_epoch.z).abs() < tol,
                "{}",
                entry.params.id
            );
        }
    }

    #[test]
    fn geostationary_trail_is_a_point() {
        let points = trail(&goes16(), 100);
        assert_eq!(points, vec![position_at(&goes16(), 0.0)]);
    }
}
