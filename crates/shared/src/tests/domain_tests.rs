use super::*;
use serde_json::json;

#[test]
fn accepts_numeric_ids_and_spreadsheet_scalars() {
    let record: Record = serde_json::from_value(json!({
        "id": 42,
        "name": 2048,
        "status": "公测",
        "date": null,
        "score": "8.5",
        "is_featured": true
    }))
    .expect("record");

    assert_eq!(record.id, Some(RecordId("42".to_string())));
    assert_eq!(record.name.as_deref(), Some("2048"));
    assert_eq!(record.date, None);
    assert_eq!(record.rating, Some(8.5));
    assert!(record.is_featured);
}

#[test]
fn keeps_unknown_server_fields_verbatim() {
    let record: Record = serde_json::from_value(json!({
        "name": "Starfall",
        "approval_number": "ISBN 978-7-498-12345-6",
        "manual_checked": false
    }))
    .expect("record");

    assert_eq!(
        record.extra.get("approval_number"),
        Some(&json!("ISBN 978-7-498-12345-6"))
    );
    let round_trip = serde_json::to_value(&record).expect("serialize");
    assert_eq!(round_trip["manual_checked"], json!(false));
}

#[test]
fn unparseable_rating_becomes_absent() {
    let record: Record =
        serde_json::from_value(json!({ "rating": "暂无评分" })).expect("record");
    assert_eq!(record.rating, None);
}

#[test]
fn milestones_pass_through() {
    let record: Record = serde_json::from_value(json!({
        "name": "Starfall",
        "milestones": [
            { "date": "2024-05-01", "status": "首曝" },
            { "date": "2024-06-01", "status": null }
        ]
    }))
    .expect("record");

    assert_eq!(record.milestones.len(), 2);
    assert_eq!(record.milestones[0].status.as_deref(), Some("首曝"));
    assert_eq!(record.milestones[1].status, None);
}

#[test]
fn null_flag_and_milestones_fall_back_to_defaults() {
    let record: Record = serde_json::from_str(r#"{"name":"x","milestones":null}"#)
        .expect("null milestones");
    assert!(record.milestones.is_empty());
    assert_eq!(record.name.as_deref(), Some("x"));

    let record: Record =
        serde_json::from_str(r#"{"name":"x","is_featured":null}"#).expect("null flag");
    assert!(!record.is_featured);

    let records: Vec<Record> = serde_json::from_value(json!([
        { "name": "Starfall", "is_featured": null, "milestones": null },
        { "name": "Moonrise", "is_featured": true }
    ]))
    .expect("featured list");
    assert_eq!(records.len(), 2);
    assert!(records[1].is_featured);
}

#[test]
fn derived_key_is_flagged_as_not_unique() {
    let record = Record {
        name: Some("Starfall".to_string()),
        publisher: Some("网易".to_string()),
        ..Record::default()
    };
    let key = record.key();
    assert_eq!(key, RecordKey::Derived("Starfall网易".to_string()));
    assert!(!key.is_unique());

    let with_id = Record {
        id: Some(RecordId("7".to_string())),
        ..record
    };
    assert_eq!(with_id.key(), RecordKey::Id("7".to_string()));
    assert!(with_id.key().is_unique());
}

#[test]
fn date_range_orders_its_bounds() {
    let early = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
    let late = NaiveDate::from_ymd_opt(2024, 5, 7).expect("date");
    let range = DateRange::new(late, early);
    assert_eq!(range.start, early);
    assert_eq!(range.end, late);
    assert!(range.contains(NaiveDate::from_ymd_opt(2024, 5, 3).expect("date")));
    assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 5, 8).expect("date")));
}
