use super::*;

#[test]
fn absent_fields_render_as_unknown() {
    let row = record_row(&Record::default(), "http://h/api", LIST_DESCRIPTION_LIMIT);
    assert_eq!(row.name, "unknown");
    assert_eq!(row.status, "unknown");
    assert_eq!(row.status_tag, StatusTag::Unknown);
    assert_eq!(row.date, "unknown");
    assert_eq!(row.publisher, "unknown");
    assert_eq!(row.description, "unknown");
    assert_eq!(row.rating, "unknown");
    assert_eq!(row.icon_url, None);
    assert_eq!(row.link, None);
}

#[test]
fn populated_record_is_classified_and_proxied() {
    let record = Record {
        name: Some("Starfall".to_string()),
        status: Some("测试招募".to_string()),
        rating: Some(8.0),
        icon_url: Some("https://img.tapimg.com/icon.png".to_string()),
        link: Some(" https://www.taptap.cn/app/1 ".to_string()),
        description: Some("一二三四五六".to_string()),
        ..Record::default()
    };
    let row = record_row(&record, "http://h/api", 4);
    assert_eq!(row.status_tag, StatusTag::Recruitment);
    assert_eq!(row.rating, "8.0");
    assert_eq!(row.description, "一二三四...");
    assert_eq!(
        row.icon_url.as_deref(),
        Some("http://h/api/image?url=https%3A%2F%2Fimg.tapimg.com%2Ficon.png")
    );
    assert_eq!(row.link.as_deref(), Some("https://www.taptap.cn/app/1"));
}

#[test]
fn truncation_counts_characters() {
    assert_eq!(truncate_text("short", 10), "short");
    assert_eq!(truncate_text("exactly", 7), "exactly");
    assert_eq!(truncate_text("abcdef", 3), "abc...");
    assert_eq!(truncate_text("游戏简介很长", 2), "游戏...");
}

#[test]
fn empty_pagination_hides_controls() {
    let controls = PaginationControls::from(&Pagination::empty());
    assert!(!controls.visible);
    assert!(!controls.prev_enabled);
    assert!(!controls.next_enabled);
    assert_eq!(controls.label, "No data");
}

#[test]
fn middle_page_enables_both_directions() {
    let controls = PaginationControls::from(&Pagination {
        total_items: 40,
        total_pages: 3,
        current_page: 2,
    });
    assert!(controls.visible);
    assert!(controls.prev_enabled);
    assert!(controls.next_enabled);
    assert_eq!(controls.label, "Page 2 / 3");

    let last = PaginationControls::from(&Pagination {
        total_items: 40,
        total_pages: 3,
        current_page: 3,
    });
    assert!(!last.next_enabled);
}
