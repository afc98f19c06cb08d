use super::*;
use serde_json::json;

#[test]
fn zero_items_normalize_to_single_first_page() {
    let response: GamesResponse = serde_json::from_value(json!({
        "games": [],
        "pagination": { "total_items": 0, "total_pages": 0, "current_page": 4, "per_page": 15 }
    }))
    .expect("response");

    let page = PageResult::from(response);
    assert!(page.is_empty());
    assert_eq!(page.pagination, Pagination::empty());
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.pagination.current_page, 1);
}

#[test]
fn current_page_is_clamped_into_reported_range() {
    let pagination = Pagination {
        total_items: 31,
        total_pages: 3,
        current_page: 9,
    }
    .normalized();
    assert_eq!(pagination.current_page, 3);

    let pagination = Pagination {
        total_items: 5,
        total_pages: 0,
        current_page: 0,
    }
    .normalized();
    assert_eq!(pagination.total_pages, 1);
    assert_eq!(pagination.current_page, 1);
}

#[test]
fn unset_filters_are_left_out_of_the_query() {
    let query = GamesQuery {
        page: 2,
        per_page: 15,
        status: Some("公测".to_string()),
        ..GamesQuery::default()
    };
    let value = serde_json::to_value(&query).expect("serialize");
    let object = value.as_object().expect("object");

    assert_eq!(object.len(), 3);
    assert_eq!(object["status"], json!("公测"));
    assert!(!object.contains_key("search"));
    assert!(!object.contains_key("start_date"));
    assert!(!object.contains_key("featured"));
}

#[test]
fn window_query_carries_iso_dates() {
    let start = NaiveDate::from_ymd_opt(2024, 4, 29).expect("date");
    let end = NaiveDate::from_ymd_opt(2024, 5, 5).expect("date");
    let query = GamesQuery::for_window(DateRange::new(start, end), 500);

    let value = serde_json::to_value(&query).expect("serialize");
    assert_eq!(value["start_date"], json!("2024-04-29"));
    assert_eq!(value["end_date"], json!("2024-05-05"));
    assert_eq!(value["page"], json!(1));
}
