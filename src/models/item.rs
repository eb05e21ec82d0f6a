//! Item (catalog entry) model and related types

use serde::{Deserialize, Serialize};

/// How an item is lent out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Physical copies, borrowed and returned
    Physical,
    /// Digital file, downloaded on demand
    Digital,
}

/// Full item details for a single catalog view.
///
/// A read-only projection: fetched per page view, never cached across views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub id: i32,
    pub title: String,
    pub authors: Vec<String>,
    pub isbn: Option<String>,
    pub summary: Option<String>,
    pub media_kind: MediaKind,
    pub copies_total: i32,
    pub copies_available: i32,
    /// File name served for digital items
    pub file_name: Option<String>,
    pub published_year: Option<i16>,
}

impl ItemDetails {
    pub fn is_digital(&self) -> bool {
        self.media_kind == MediaKind::Digital
    }

    pub fn has_available_copy(&self) -> bool {
        self.media_kind == MediaKind::Physical && self.copies_available > 0
    }
}

/// Short item representation for lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: i32,
    pub title: String,
    pub authors: Vec<String>,
    pub media_kind: MediaKind,
    pub copies_available: i32,
}

/// Paginated item listing as returned by the server
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPage {
    pub items: Vec<ItemSummary>,
    pub total: i64,
}
