//! Filter and pagination state for the paginated list view.

use shared::{
    domain::DateRange,
    protocol::{GamesQuery, Pagination},
};

pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Convenience publisher option offered in the UI. The server only knows the
/// canonical names, so the alias is expanded before it leaves the client.
pub const MAJOR_PUBLISHERS_ALIAS: &str = "三大厂";
pub const MAJOR_PUBLISHERS: [&str; 3] = ["腾讯", "网易", "米哈游"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Search,
    Status,
    Source,
    Publisher,
    Platform,
}

/// Current selection of the three option-backed filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub status: String,
    pub source: String,
    pub publisher: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub status: String,
    pub source: String,
    pub publisher: String,
    pub platform: String,
    pub featured_only: bool,
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone)]
pub struct QueryStateStore {
    state: QueryState,
    total_pages: u32,
}

impl Default for QueryStateStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryStateStore {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: QueryState {
                page: 1,
                page_size: page_size.max(1),
                search: String::new(),
                status: String::new(),
                source: String::new(),
                publisher: String::new(),
                platform: String::new(),
                featured_only: false,
                date_range: None,
            },
            total_pages: 1,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn page(&self) -> u32 {
        self.state.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn filter(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.state.search,
            FilterField::Status => &self.state.status,
            FilterField::Source => &self.state.source,
            FilterField::Publisher => &self.state.publisher,
            FilterField::Platform => &self.state.platform,
        }
    }

    pub fn set_filter(&mut self, field: FilterField, value: &str) {
        let value = value.trim().to_string();
        match field {
            FilterField::Search => self.state.search = value,
            FilterField::Status => self.state.status = value,
            FilterField::Source => self.state.source = value,
            FilterField::Publisher => self.state.publisher = value,
            FilterField::Platform => self.state.platform = value,
        }
    }

    pub fn set_featured_only(&mut self, featured_only: bool) {
        self.state.featured_only = featured_only;
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.state.date_range = range;
    }

    /// Clears the text, option and featured filters. Date range and page are
    /// kept.
    pub fn reset_filters(&mut self) {
        self.state.search.clear();
        self.state.status.clear();
        self.state.source.clear();
        self.state.publisher.clear();
        self.state.platform.clear();
        self.state.featured_only = false;
    }

    /// Returns `false` and leaves the page untouched when `page` is outside
    /// the range reported by the last fetch.
    pub fn set_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.state.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.state.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.state.page.saturating_sub(1))
    }

    /// Moves the cursor without the range guard, for a first fetch whose page
    /// count is not known yet. The server clamps the page and
    /// `apply_pagination` then reflects where it landed.
    pub fn seek(&mut self, page: u32) {
        self.state.page = page.max(1);
    }

    /// Filter submission always restarts from the first page.
    pub fn rewind(&mut self) {
        self.state.page = 1;
    }

    pub fn apply_pagination(&mut self, pagination: &Pagination) {
        let pagination = pagination.normalized();
        self.total_pages = pagination.total_pages;
        self.state.page = pagination.current_page;
    }

    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            status: self.state.status.clone(),
            source: self.state.source.clone(),
            publisher: self.state.publisher.clone(),
        }
    }

    pub fn apply_selection(&mut self, selection: FilterSelection) {
        self.state.status = selection.status;
        self.state.source = selection.source;
        self.state.publisher = selection.publisher;
    }

    pub fn to_query_params(&self) -> GamesQuery {
        let state = &self.state;
        GamesQuery {
            page: state.page.max(1),
            per_page: state.page_size,
            search: non_empty(&state.search),
            status: non_empty(&state.status),
            source: non_empty(&state.source),
            publisher: non_empty(&state.publisher).map(|value| expand_publisher(&value)),
            platform: non_empty(&state.platform),
            featured: state.featured_only.then_some(true),
            start_date: state.date_range.map(|range| range.start),
            end_date: state.date_range.map(|range| range.end),
        }
    }
}

pub fn is_publisher_alias(value: &str) -> bool {
    value.trim() == MAJOR_PUBLISHERS_ALIAS
}

pub fn expand_publisher(value: &str) -> String {
    if is_publisher_alias(value) {
        MAJOR_PUBLISHERS.join(",")
    } else {
        value.to_string()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
