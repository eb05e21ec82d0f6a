//! Catalog endpoints

use super::Http;
use crate::{
    error::ClientResult,
    models::item::{ItemDetails, ItemPage},
};

#[derive(Clone)]
pub struct ItemsGateway {
    http: Http,
}

impl ItemsGateway {
    pub(crate) fn new(http: Http) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<ItemPage> {
        self.http.get("/items").await
    }

    pub async fn details(&self, item_id: i32) -> ClientResult<ItemDetails> {
        self.http.get(&format!("/items/{}", item_id)).await
    }

    /// Raw file contents of a digital item
    pub async fn download(&self, item_id: i32) -> ClientResult<Vec<u8>> {
        self.http
            .get_bytes(&format!("/items/{}/file", item_id))
            .await
    }
}
