use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeedError {
    #[error("{satellite}: coordinate system '{requested}' not in provider response")]
    UnsupportedCoordinateSystem { satellite: String, requested: String },
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("poller already running")]
    AlreadyRunning,
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::InvalidResponse(err.to_string())
        } else {
            FeedError::ProviderUnavailable(err.to_string())
        }
    }
}
