use kit::guard::{is_empty, is_nil, is_non_empty_string};
use kit::{bubble_by, merge_all, omit, quick_by};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[test]
fn test_layered_config_merge() {
    // Defaults, then a file, then an override; later layers win per key
    let defaults = json!({"keys": {"id": "id", "pid": "pid", "children": "children"}});
    let file = json!({"keys": {"pid": "parent"}, "name": "menu"});
    let overrides = json!({"keys": {"children": "items"}});

    let merged = merge_all([&defaults, &file, &overrides]);

    assert_eq!(
        merged,
        json!({
            "keys": {"id": "id", "pid": "parent", "children": "items"},
            "name": "menu"
        })
    );
}

#[test]
fn test_omit_then_check_fields() {
    let record = json!({"id": 1, "pid": null, "title": "  ", "tags": []});

    let trimmed = omit(&record, &["tags"]);

    assert!(is_nil(trimmed.get("pid")));
    assert!(is_nil(trimmed.get("tags")));
    assert!(is_empty(&trimmed["title"]));
    assert!(!is_non_empty_string(&trimmed["title"]));
}

#[test]
fn test_sort_records_by_field() {
    let records = vec![
        json!({"id": 3, "rank": 2}),
        json!({"id": 1, "rank": 1}),
        json!({"id": 2, "rank": 2}),
    ];
    let rank = |value: &Value| value["rank"].as_i64().unwrap_or_default();

    let bubbled: Vec<_> = bubble_by(&records, |a, b| rank(a).cmp(&rank(b)))
        .iter()
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(bubbled, vec![json!(1), json!(3), json!(2)]);

    let quicked: Vec<_> = quick_by(&records, |pivot, item| rank(item) < rank(pivot))
        .iter()
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(quicked, vec![json!(1), json!(3), json!(2)]);
}
