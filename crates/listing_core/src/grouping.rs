//! Date-keyed buckets for the today and week views.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::domain::{Record, UNKNOWN_PLACEHOLDER};

use crate::week::ISO_DATE_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    #[default]
    ByDate,
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateBucket {
    pub date: String,
    pub records: Vec<Record>,
}

impl DateBucket {
    pub fn is_unknown(&self) -> bool {
        self.date == UNKNOWN_PLACEHOLDER
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TodayLayout {
    Flat(Vec<Record>),
    Grouped(Vec<DateBucket>),
}

/// Key a record is bucketed under. Timestamps such as
/// `2024-05-01 00:00:00` collapse onto their calendar day.
pub fn date_key(record: &Record) -> String {
    let Some(raw) = record.date.as_deref().map(str::trim) else {
        return UNKNOWN_PLACEHOLDER.to_string();
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case(UNKNOWN_PLACEHOLDER) {
        return UNKNOWN_PLACEHOLDER.to_string();
    }
    match raw.get(..10) {
        Some(prefix) if NaiveDate::parse_from_str(prefix, ISO_DATE_FORMAT).is_ok() => {
            prefix.to_string()
        }
        _ => raw.to_string(),
    }
}

/// Stable partition by date, ascending, with the unknown bucket last.
pub fn group_by_date(records: &[Record]) -> Vec<DateBucket> {
    let mut dated: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    let mut unknown = Vec::new();

    for record in records {
        let key = date_key(record);
        if key == UNKNOWN_PLACEHOLDER {
            unknown.push(record.clone());
        } else {
            dated.entry(key).or_default().push(record.clone());
        }
    }

    let mut buckets: Vec<DateBucket> = dated
        .into_iter()
        .map(|(date, records)| DateBucket { date, records })
        .collect();
    if !unknown.is_empty() {
        buckets.push(DateBucket {
            date: UNKNOWN_PLACEHOLDER.to_string(),
            records: unknown,
        });
    }
    buckets
}

pub fn present_today(records: &[Record], mode: GroupingMode) -> TodayLayout {
    match mode {
        GroupingMode::Flat => TodayLayout::Flat(records.to_vec()),
        GroupingMode::ByDate => TodayLayout::Grouped(group_by_date(records)),
    }
}

#[cfg(test)]
#[path = "tests/grouping_tests.rs"]
mod tests;
