mod error;
mod normalizer;
mod provider;
mod refresh;
mod types;

pub use error::FeedError;
pub use normalizer::{CartesianUnits, Normalizer};
pub use provider::{AnyProvider, FileProvider, HttpProvider, PositionProvider};
pub use refresh::{
    refresh_once, resolve_satellites, window_start, FeedJob, Poller, RefreshReport,
    DEFAULT_SATELLITES,
};
pub use types::{active_observatories, Observatory};
