//! Pagination utilities shared by the service and HTTP layers
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

use serde::Deserialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `(page_index, per_page)`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// Optional paging taken from a query string; absent on both fields means "everything".
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn into_pagination(self) -> Option<Pagination> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        let d = Pagination::default();
        Some(Pagination {
            page: self.page.unwrap_or(d.page),
            per_page: self.per_page.unwrap_or(d.per_page),
        })
    }
}
