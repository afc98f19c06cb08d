//! Presentation-ready values for records and pagination.

use shared::{
    domain::{Record, RecordKey, UNKNOWN_PLACEHOLDER},
    protocol::Pagination,
};

use crate::{
    fetcher::proxied_icon_url,
    status::{classify, StatusTag},
};

pub const EMPTY_LIST_MESSAGE: &str = "No matching games found.";
pub const EMPTY_FEATURED_MESSAGE: &str = "No featured games yet.";
pub const LIST_DESCRIPTION_LIMIT: usize = 100;
pub const CARD_DESCRIPTION_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub key: RecordKey,
    pub name: String,
    pub status: String,
    pub status_tag: StatusTag,
    pub date: String,
    pub platform: String,
    pub publisher: String,
    pub source: String,
    pub category: String,
    pub description: String,
    pub rating: String,
    pub icon_url: Option<String>,
    pub link: Option<String>,
}

pub fn or_unknown(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => UNKNOWN_PLACEHOLDER.to_string(),
    }
}

/// Cuts `text` to `max_chars` characters and appends an ellipsis when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn record_row(record: &Record, api_base_url: &str, description_limit: usize) -> RecordRow {
    let description = or_unknown(record.description.as_deref());
    let description = if description == UNKNOWN_PLACEHOLDER {
        description
    } else {
        truncate_text(&description, description_limit)
    };

    RecordRow {
        key: record.key(),
        name: or_unknown(record.name.as_deref()),
        status: or_unknown(record.status.as_deref()),
        status_tag: classify(record.status.as_deref()),
        date: or_unknown(record.date.as_deref()),
        platform: or_unknown(record.platform.as_deref()),
        publisher: or_unknown(record.publisher.as_deref()),
        source: or_unknown(record.source.as_deref()),
        category: or_unknown(record.category.as_deref()),
        description,
        rating: record
            .rating
            .map(|rating| format!("{rating:.1}"))
            .unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string()),
        icon_url: record
            .icon_url
            .as_deref()
            .and_then(|icon| proxied_icon_url(api_base_url, icon)),
        link: record
            .link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(str::to_string),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub label: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub visible: bool,
}

impl From<&Pagination> for PaginationControls {
    fn from(pagination: &Pagination) -> Self {
        let pagination = pagination.normalized();
        if pagination.total_items == 0 {
            return Self {
                label: "No data".to_string(),
                prev_enabled: false,
                next_enabled: false,
                visible: false,
            };
        }
        Self {
            label: format!(
                "Page {} / {}",
                pagination.current_page, pagination.total_pages
            ),
            prev_enabled: pagination.current_page > 1,
            next_enabled: pagination.current_page < pagination.total_pages,
            visible: true,
        }
    }
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
