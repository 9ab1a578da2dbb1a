//! End-to-end PATCH flow: parse a payload once, extract the dirty-field
//! set, and merge exactly those fields onto a persisted entity.

use std::collections::HashMap;

use fieldpatch_extract::{DocumentSlot, form_dirty_fields, parse_patch, tree_dirty_fields};
use fieldpatch_merge::{EntityMerger, PropertyAccess};
use fieldpatch_types::PathRef;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Contact {
    name: String,
    nickname: Option<String>,
    age: i64,
    tags: Vec<String>,
    address: Option<Address>,
    meta: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Address {
    street: Option<String>,
    city: String,
}

fn persisted() -> Contact {
    Contact {
        name: "Alice".to_string(),
        nickname: Some("Al".to_string()),
        age: 40,
        tags: vec!["friend".to_string()],
        address: Some(Address {
            street: Some("Main St 1".to_string()),
            city: "Copenhagen".to_string(),
        }),
        meta: HashMap::from([("size".to_string(), "xl".to_string())]),
    }
}

#[test]
fn json_patch_updates_exactly_the_supplied_fields() {
    let body = r#"{"nickname":"Kit","address":{"city":"Aarhus"},"tags":["a","b"]}"#;
    let patch = parse_patch::<Contact>(body).unwrap();
    assert_eq!(patch.dirty_fields, vec!["nickname", "address.city", "tags"]);

    let mut existing = persisted();
    EntityMerger::new()
        .merge_typed(&mut existing, &patch.entity, &patch.dirty_fields)
        .unwrap();

    assert_eq!(existing.nickname.as_deref(), Some("Kit"));
    assert_eq!(existing.tags, vec!["a", "b"]);
    let address = existing.address.as_ref().unwrap();
    assert_eq!(address.city, "Aarhus");
    // Fields absent from the payload keep their persisted values.
    assert_eq!(address.street.as_deref(), Some("Main St 1"));
    assert_eq!(existing.name, "Alice");
    assert_eq!(existing.age, 40);
}

#[test]
fn slot_capture_feeds_the_same_parse_to_both_views() {
    let mut slot = DocumentSlot::new();
    let patch: Contact = slot.capture(r#"{"age":41,"nickname":null}"#).unwrap();
    let dirty = slot.dirty_fields();
    assert_eq!(dirty, vec!["age", "nickname"]);

    let mut existing = persisted();
    EntityMerger::new().merge_typed(&mut existing, &patch, &dirty).unwrap();

    assert_eq!(existing.age, 41);
    // An explicit null is dirty and clears the field.
    assert_eq!(existing.nickname, None);
    assert_eq!(existing.name, "Alice");
}

#[test]
fn form_patch_reaches_map_entries() {
    let form: HashMap<String, Vec<String>> = HashMap::from([
        ("nickname".to_string(), vec!["Kit".to_string()]),
        ("meta[color]".to_string(), vec!["red".to_string()]),
    ]);
    let mut dirty = form_dirty_fields(&form);
    dirty.sort();
    assert_eq!(dirty, vec!["meta(color)", "nickname"]);

    let patch = Contact {
        nickname: Some("Kit".to_string()),
        meta: HashMap::from([("color".to_string(), "red".to_string())]),
        ..Contact::default()
    };
    let mut existing = persisted();
    EntityMerger::new().merge_typed(&mut existing, &patch, &dirty).unwrap();

    assert_eq!(existing.nickname.as_deref(), Some("Kit"));
    assert_eq!(existing.meta.get("color").map(String::as_str), Some("red"));
    assert_eq!(existing.meta.get("size").map(String::as_str), Some("xl"));
}

#[test]
fn extracted_fields_reproduce_every_payload_leaf() {
    let payload = json!({
        "text": "new",
        "flags": [true, false],
        "child": {"number": 7, "tags": ["x"]},
    });
    let mut existing = json!({
        "text": "old",
        "flags": [false],
        "untouched": "keep",
        "child": {"number": 1, "tags": [], "untouched": "keep"},
    });

    let dirty = tree_dirty_fields(&payload);
    EntityMerger::new().merge(&mut existing, &payload, &dirty).unwrap();

    for field in &dirty {
        let path = PathRef::parse(field).unwrap();
        assert_eq!(
            existing.get_path(&path).unwrap(),
            payload.get_path(&path).unwrap(),
            "leaf '{field}' was not reproduced"
        );
    }
    assert_eq!(existing["untouched"], json!("keep"));
    assert_eq!(existing["child"]["untouched"], json!("keep"));
}
