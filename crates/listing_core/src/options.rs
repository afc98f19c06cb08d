//! Distinct filter values derived from a full catalog snapshot.

use std::{cmp::Ordering, collections::BTreeSet};

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use shared::domain::Record;
use tracing::warn;

use crate::query::{is_publisher_alias, FilterSelection, MAJOR_PUBLISHERS_ALIAS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptionSet {
    pub statuses: Vec<String>,
    pub sources: Vec<String>,
    pub publishers: Vec<String>,
}

impl FilterOptionSet {
    /// Publisher choices as offered to the user, alias first.
    pub fn publisher_choices(&self) -> Vec<String> {
        std::iter::once(MAJOR_PUBLISHERS_ALIAS.to_string())
            .chain(self.publishers.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedOptions {
    pub options: FilterOptionSet,
    pub selection: FilterSelection,
}

pub fn derive_filter_options(snapshot: &[Record], previous: &FilterSelection) -> DerivedOptions {
    let statuses = sorted_distinct(snapshot, |record| record.status.as_deref(), Ord::cmp);
    let sources = sorted_distinct(snapshot, |record| record.source.as_deref(), Ord::cmp);
    let collation = PublisherCollation::new();
    let publishers = sorted_distinct(
        snapshot,
        |record| record.publisher.as_deref(),
        |a, b| collation.compare(a, b),
    );

    let selection = FilterSelection {
        status: retain_if_present(&previous.status, &statuses),
        source: retain_if_present(&previous.source, &sources),
        publisher: if is_publisher_alias(&previous.publisher) {
            MAJOR_PUBLISHERS_ALIAS.to_string()
        } else {
            retain_if_present(&previous.publisher, &publishers)
        },
    };

    DerivedOptions {
        options: FilterOptionSet {
            statuses,
            sources,
            publishers,
        },
        selection,
    }
}

/// Publisher order under Chinese collation, which sorts Han names by pinyin.
/// Ties fall back to byte order so the result is total.
pub struct PublisherCollation {
    collator: Option<Collator>,
}

impl PublisherCollation {
    pub fn new() -> Self {
        let collator = match Collator::try_new(&locale!("zh").into(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!(error = %err, "zh collation unavailable, using case-folded order");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let order = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        order.then_with(|| a.cmp(b))
    }
}

impl Default for PublisherCollation {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_distinct<F, C>(snapshot: &[Record], field: F, compare: C) -> Vec<String>
where
    F: Fn(&Record) -> Option<&str>,
    C: FnMut(&String, &String) -> Ordering,
{
    let distinct: BTreeSet<String> = snapshot
        .iter()
        .filter_map(|record| field(record))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    let mut values: Vec<String> = distinct.into_iter().collect();
    values.sort_by(compare);
    values
}

fn retain_if_present(previous: &str, values: &[String]) -> String {
    let previous = previous.trim();
    if values.iter().any(|value| value == previous) {
        previous.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod tests;
