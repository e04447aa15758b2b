use std::sync::Arc;

use crate::catalog::Catalog;
use crate::services::{MetadataProvider, Recommender};

/// Shared application state
///
/// Everything in here is read-only after startup, so handlers share it
/// through cheap clones without locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            recommender: Recommender::new(catalog, provider),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.recommender.catalog()
    }
}
