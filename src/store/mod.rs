mod sample;
mod store;
mod track;

pub use sample::PositionSample;
pub use store::PositionStore;
pub use track::Track;
