use crate::catalog::{Catalog, OrbitBand, OrbitClass};
use crate::feed::{Observatory, RefreshReport};
use crate::store::{PositionSample, PositionStore};

const RULE_WIDTH: usize = 80;

pub fn print_observatories(observatories: &[Observatory]) {
    println!("{}", "=".repeat(60));
    println!("{:<15} {:<40}", "ID", "Name");
    println!("{}", "-".repeat(60));
    for obs in observatories {
        println!("{:<15} {:<40}", obs.id, obs.name);
    }
    println!("\nTotal satellites available: {}", observatories.len());
}

pub fn print_catalog(catalog: &Catalog, band: OrbitBand) {
    let entries: Vec<_> = catalog.in_band(band).collect();
    println!("{} ({} satellites)", band.label(), entries.len());
    println!("{}", "-".repeat(RULE_WIDTH));

    for entry in entries {
        let p = &entry.params;
        let orbit = match p.orbit_class {
            OrbitClass::Circular {
                inclination_deg,
                period_seconds,
                ..
            } => format!(
                "incl {:>5.1}°  period {}",
                inclination_deg,
                format_period(period_seconds)
            ),
            OrbitClass::Geostationary { longitude_deg } => {
                format!("fixed at {:.1}°", longitude_deg)
            }
        };
        println!("{:<12} {:>12.0} km  {}", p.id, p.altitude_km, orbit);
    }
}

pub fn print_latest(store: &PositionStore) {
    println!("{}", "=".repeat(RULE_WIDTH));
    if store.len() == 0 {
        println!("No satellite data available.");
    }
    for track in store.snapshot() {
        println!("\nSatellite: {}", track.satellite_id().to_uppercase());
        println!("{}", "-".repeat(40));
        if track.is_empty() {
            println!("No position data available");
            continue;
        }
        let samples = track.samples();
        if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
            println!("{}", format_sample(last));
            println!(
                "Samples:      {} since {}",
                samples.len(),
                first.timestamp.format("%Y-%m-%d %H:%M:%S")
            );
            println!("Longitudes:   {}", track.convention().label());
        }
    }
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn print_refresh(report: &RefreshReport) {
    println!(
        "Updated {} satellites at {} UTC",
        report.installed.len(),
        chrono::Utc::now().format("%H:%M:%S")
    );
    for failure in &report.failures {
        println!("  {}: {}", failure.satellite, failure.error);
    }
    if !report.missing.is_empty() {
        println!("  no data: {}", report.missing.join(", "));
    }
    if report.skipped_samples > 0 {
        println!("  {} malformed samples skipped", report.skipped_samples);
    }
}

pub fn format_sample(sample: &PositionSample) -> String {
    format!(
        "Timestamp:    {}\nLatitude:     {:.3}°\nLongitude:    {:.3}°\nAltitude:     {:.2} km",
        sample.timestamp.format("%Y-%m-%d %H:%M:%S"),
        sample.latitude_deg,
        sample.longitude_deg,
        sample.altitude_km
    )
}

fn format_period(seconds: f64) -> String {
    if seconds < 2.0 * 3600.0 {
        format!("{:.1} min", seconds / 60.0)
    } else if seconds < 86_400.0 * 30.0 {
        format!("{:.1} h", seconds / 3600.0)
    } else {
        format!("{:.1} d", seconds / 86_400.0)
    }
}
