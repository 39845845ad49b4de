use std::sync::Arc;

use crate::catalog::Catalog;
use crate::geo::LongitudeConvention;
use crate::store::PositionStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<PositionStore>,
    /// Convention for positions computed on request.
    pub convention: LongitudeConvention,
}
