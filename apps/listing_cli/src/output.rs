//! Plain-text rendering of the catalog views.

use listing_core::{
    display::{record_row, RecordRow, CARD_DESCRIPTION_LIMIT, LIST_DESCRIPTION_LIMIT},
    grouping::{DateBucket, TodayLayout},
    options::FilterOptionSet,
    FeaturedPanel, ListPage, ViewState, WeekView,
};
use shared::domain::Record;

pub fn print_view<T>(title: &str, view: &ViewState<T>, render: impl FnOnce(&T)) {
    println!("== {title} ==");
    match view {
        ViewState::Idle => println!("(not loaded)"),
        ViewState::Loading => println!("loading..."),
        ViewState::Failed(err) => println!("! {err}"),
        ViewState::Loaded(value) => render(value),
    }
    println!();
}

pub fn print_list(page: &ListPage, base_url: &str) {
    if let Some(placeholder) = page.placeholder {
        println!("{placeholder}");
    }
    for record in &page.records {
        print_row(&record_row(record, base_url, LIST_DESCRIPTION_LIMIT));
    }
    if page.controls.visible {
        let prev = if page.controls.prev_enabled { "<" } else { " " };
        let next = if page.controls.next_enabled { ">" } else { " " };
        println!(
            "{prev} {} {next}  ({} games)",
            page.controls.label, page.pagination.total_items
        );
    }
}

pub fn print_featured(panel: &FeaturedPanel, base_url: &str) {
    if let Some(placeholder) = panel.placeholder {
        println!("{placeholder}");
    }
    for record in &panel.records {
        let row = record_row(record, base_url, CARD_DESCRIPTION_LIMIT);
        println!("* {} [{}] {}", row.name, row.status_tag.label(), row.date);
        println!("    {}", row.description);
        for milestone in &record.milestones {
            println!(
                "    - {} {}",
                milestone.date.as_deref().unwrap_or("unknown"),
                milestone.status.as_deref().unwrap_or("unknown")
            );
        }
    }
}

pub fn print_options(options: &FilterOptionSet) {
    println!("statuses:   {}", options.statuses.join(", "));
    println!("sources:    {}", options.sources.join(", "));
    println!("publishers: {}", options.publisher_choices().join(", "));
}

pub fn print_today(layout: &TodayLayout, base_url: &str) {
    match layout {
        TodayLayout::Flat(records) if records.is_empty() => println!("Nothing scheduled today."),
        TodayLayout::Flat(records) => print_records(records, base_url),
        TodayLayout::Grouped(buckets) if buckets.is_empty() => {
            println!("Nothing scheduled today.")
        }
        TodayLayout::Grouped(buckets) => print_buckets(buckets, base_url),
    }
}

pub fn print_week(week: &WeekView, base_url: &str) {
    println!(
        "week {:+}: {} .. {}",
        week.offset,
        week.window.start_iso(),
        week.window.end_iso()
    );
    if week.buckets.is_empty() {
        println!("Nothing scheduled this week.");
    }
    print_buckets(&week.buckets, base_url);
}

fn print_buckets(buckets: &[DateBucket], base_url: &str) {
    for bucket in buckets {
        println!("[{}] {} game(s)", bucket.date, bucket.records.len());
        print_records(&bucket.records, base_url);
    }
}

fn print_records(records: &[Record], base_url: &str) {
    for record in records {
        print_row(&record_row(record, base_url, CARD_DESCRIPTION_LIMIT));
    }
}

fn print_row(row: &RecordRow) {
    println!(
        "- {} | {} ({}) | {} | {} | {} | {} | rating {}",
        row.name,
        row.status,
        row.status_tag.css_class(),
        row.date,
        row.platform,
        row.publisher,
        row.source,
        row.rating
    );
    if row.description != shared::domain::UNKNOWN_PLACEHOLDER {
        println!("    {}", row.description);
    }
    if let Some(link) = &row.link {
        println!("    {link}");
    }
}
