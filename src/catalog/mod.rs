mod band;
mod builtin;
mod error;
mod model;
mod params;
mod synth;

pub use band::{scene_range, OrbitBand};
pub use model::{position_at, trail};
pub use params::{Catalog, CatalogEntry, DisplayStyle, OrbitClass, OrbitalParameters};
pub use synth::{model_time, synthesize_track};
