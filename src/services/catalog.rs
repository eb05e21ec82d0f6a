//! Catalog browsing

use std::sync::Arc;

use crate::{
    error::ClientResult,
    gateway::LibraryApi,
    models::item::{ItemDetails, ItemPage},
};

pub struct CatalogService {
    api: Arc<dyn LibraryApi>,
}

impl CatalogService {
    pub(crate) fn new(api: Arc<dyn LibraryApi>) -> Self {
        Self { api }
    }

    pub async fn list_items(&self) -> ClientResult<ItemPage> {
        self.api.list_items().await
    }

    /// Fetch the details projection for one catalog view.
    ///
    /// Fetched fresh per view; the result is not cached.
    pub async fn item_details(&self, item_id: i32) -> ClientResult<ItemDetails> {
        self.api.item_details(item_id).await
    }
}
