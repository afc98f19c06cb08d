use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, Record};

/// Outbound parameters for `GET /games`. Unset filters are left out of the
/// query string entirely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct GamesQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Restricts the list to entries flagged as featured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl GamesQuery {
    /// First page of everything inside `range`, with no other filters.
    pub fn for_window(range: DateRange, per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            start_date: Some(range.start),
            end_date: Some(range.end),
            ..Self::default()
        }
    }

    /// First page of the whole catalog at `per_page` entries.
    pub fn snapshot(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl Pagination {
    pub fn empty() -> Self {
        Self {
            total_items: 0,
            total_pages: 1,
            current_page: 1,
        }
    }

    /// Zero items always means one page, positioned on page one.
    pub fn normalized(self) -> Self {
        if self.total_items == 0 {
            return Self::empty();
        }
        let total_pages = self.total_pages.max(1);
        Self {
            total_items: self.total_items,
            total_pages,
            current_page: self.current_page.clamp(1, total_pages),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty()
    }
}

/// Body of `GET /games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesResponse {
    #[serde(default)]
    pub games: Vec<Record>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageResult {
    pub records: Vec<Record>,
    pub pagination: Pagination,
}

impl PageResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<GamesResponse> for PageResult {
    fn from(value: GamesResponse) -> Self {
        Self {
            records: value.games,
            pagination: value.pagination.normalized(),
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
