use super::*;

fn record(status: &str, source: &str, publisher: &str) -> Record {
    let field = |value: &str| (!value.is_empty()).then(|| value.to_string());
    Record {
        status: field(status),
        source: field(source),
        publisher: field(publisher),
        ..Record::default()
    }
}

fn selection(status: &str, source: &str, publisher: &str) -> FilterSelection {
    FilterSelection {
        status: status.to_string(),
        source: source.to_string(),
        publisher: publisher.to_string(),
    }
}

#[test]
fn collects_distinct_trimmed_sorted_values() {
    let snapshot = vec![
        record("B", " TapTap ", "网易"),
        record(" A", "Bilibili", "腾讯"),
        record("B", "TapTap", "  "),
        record("", "", "网易"),
        Record::default(),
    ];

    let derived = derive_filter_options(&snapshot, &FilterSelection::default());
    assert_eq!(derived.options.statuses, vec!["A", "B"]);
    assert_eq!(derived.options.sources, vec!["Bilibili", "TapTap"]);
    assert_eq!(derived.options.publishers, vec!["腾讯", "网易"]);
}

#[test]
fn stale_selection_resets_to_all() {
    let snapshot = vec![record("A", "", ""), record("B", "", "")];
    let derived = derive_filter_options(&snapshot, &selection("C", "", ""));
    assert_eq!(derived.selection.status, "");
}

#[test]
fn present_selection_is_retained() {
    let snapshot = vec![record("A", "TapTap", "网易"), record("B", "", "")];
    let derived = derive_filter_options(&snapshot, &selection("A", "TapTap", "网易"));
    assert_eq!(derived.selection, selection("A", "TapTap", "网易"));
}

#[test]
fn fields_are_reconciled_independently() {
    let snapshot = vec![record("A", "TapTap", "网易")];
    let derived = derive_filter_options(&snapshot, &selection("A", "Gone", "莉莉丝"));
    assert_eq!(derived.selection, selection("A", "", ""));
}

#[test]
fn publisher_alias_survives_refresh() {
    let snapshot = vec![record("A", "", "网易")];
    let derived = derive_filter_options(&snapshot, &selection("", "", MAJOR_PUBLISHERS_ALIAS));
    assert_eq!(derived.selection.publisher, MAJOR_PUBLISHERS_ALIAS);
    assert_eq!(
        derived.options.publisher_choices(),
        vec![MAJOR_PUBLISHERS_ALIAS.to_string(), "网易".to_string()]
    );
}

#[test]
fn chinese_publishers_sort_by_pinyin() {
    let snapshot: Vec<Record> = ["腾讯", "网易", "米哈游", "莉莉丝", "阿里"]
        .into_iter()
        .map(|publisher| record("", "", publisher))
        .collect();
    let derived = derive_filter_options(&snapshot, &FilterSelection::default());
    assert_eq!(
        derived.options.publishers,
        vec!["阿里", "莉莉丝", "米哈游", "腾讯", "网易"]
    );
}

#[test]
fn publishers_collate_case_insensitively() {
    let snapshot = vec![
        record("", "", "zeta"),
        record("", "", "Alpha"),
        record("", "", "beta"),
        record("", "", "alpha"),
    ];
    let derived = derive_filter_options(&snapshot, &FilterSelection::default());
    assert_eq!(derived.options.publishers, vec!["alpha", "Alpha", "beta", "zeta"]);
}

#[test]
fn empty_snapshot_yields_empty_options() {
    let derived = derive_filter_options(&[], &selection("A", "B", "C"));
    assert_eq!(derived.options, FilterOptionSet::default());
    assert_eq!(derived.selection, FilterSelection::default());
}
