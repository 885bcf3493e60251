//! Reference data for filters

use super::{ResourceStream, fetch};
use crate::messages;
use gatepass_api::ApiClient;
use gatepass_api::types::{Category, Location};

/// Categories and locations
#[derive(Clone, Debug)]
pub struct CatalogRepository {
    api: ApiClient,
}

impl CatalogRepository {
    /// Create a repository over `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All event categories
    #[must_use]
    pub fn categories(&self) -> ResourceStream<Vec<Category>> {
        let api = self.api.clone();
        fetch("categories", messages::CATEGORIES_FAILED, async move {
            api.categories().await
        })
    }

    /// All locations
    #[must_use]
    pub fn locations(&self) -> ResourceStream<Vec<Location>> {
        let api = self.api.clone();
        fetch("locations", messages::LOCATIONS_FAILED, async move {
            api.locations().await
        })
    }
}
