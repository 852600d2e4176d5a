//! Changed-fields diff between two record snapshots
//!
//! Used when approving a proposed edit: the approver sees exactly which
//! fields changed between the original snapshot and the updated draft.
//! Comparison is field-by-field with strict inequality; arrays are compared
//! by length first, then element-wise. An `items[i]` entry is emitted only
//! if at least one field of that item differs.

use serde_json::{json, Map, Value};

/// Map of changed field name to its change description
pub type RecordDiff = Map<String, Value>;

/// Compute the changed-fields diff between two snapshots.
///
/// Each changed scalar field maps to `{"from": old, "to": new}`; nested
/// objects recurse; equal-length arrays of objects map to
/// `[{"index": i, "changes": {...}}]` entries for the items that differ.
pub fn diff_records(original: &Value, updated: &Value) -> RecordDiff {
    let mut out = Map::new();
    match (original.as_object(), updated.as_object()) {
        (Some(orig), Some(upd)) => {
            let mut keys: Vec<&String> = orig.keys().collect();
            for key in upd.keys() {
                if !orig.contains_key(key) {
                    keys.push(key);
                }
            }
            for key in keys {
                match (orig.get(key), upd.get(key)) {
                    (Some(a), Some(b)) => {
                        if let Some(change) = diff_value(a, b) {
                            out.insert(key.clone(), change);
                        }
                    }
                    (Some(a), None) => {
                        out.insert(key.clone(), json!({"from": a, "to": Value::Null}));
                    }
                    (None, Some(b)) => {
                        out.insert(key.clone(), json!({"from": Value::Null, "to": b}));
                    }
                    (None, None) => {}
                }
            }
        }
        _ => {
            if original != updated {
                out.insert(
                    "value".to_string(),
                    json!({"from": original, "to": updated}),
                );
            }
        }
    }
    out
}

fn diff_value(a: &Value, b: &Value) -> Option<Value> {
    if a == b {
        return None;
    }
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                return Some(json!({"from": a, "to": b}));
            }
            let entries: Vec<Value> = xs
                .iter()
                .zip(ys.iter())
                .enumerate()
                .filter_map(|(index, (x, y))| {
                    element_changes(x, y).map(|changes| json!({"index": index, "changes": changes}))
                })
                .collect();
            Some(Value::Array(entries))
        }
        (Value::Object(_), Value::Object(_)) => {
            let nested = diff_records(a, b);
            if nested.is_empty() {
                None
            } else {
                Some(Value::Object(nested))
            }
        }
        _ => Some(json!({"from": a, "to": b})),
    }
}

fn element_changes(x: &Value, y: &Value) -> Option<Value> {
    match (x, y) {
        (Value::Object(_), Value::Object(_)) => {
            let changes = diff_records(x, y);
            if changes.is_empty() {
                None
            } else {
                Some(Value::Object(changes))
            }
        }
        _ => {
            if x != y {
                Some(json!({"from": x, "to": y}))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Value {
        json!({
            "supplier_name": "A",
            "bill_no": "B-100",
            "items": [
                {"item_name": "Pen", "quantity_received": 10, "unit_price": 5.0},
                {"item_name": "Chair", "quantity_received": 2, "unit_price": 900.0}
            ]
        })
    }

    #[test]
    fn test_diff_identity_is_empty() {
        let record = sample_record();
        assert!(diff_records(&record, &record).is_empty());
    }

    #[test]
    fn test_diff_scalar_field() {
        let original = sample_record();
        let mut updated = sample_record();
        updated["supplier_name"] = json!("B");

        let diff = diff_records(&original, &updated);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff["supplier_name"], json!({"from": "A", "to": "B"}));
    }

    #[test]
    fn test_diff_items_only_changed_item_emitted() {
        let original = sample_record();
        let mut updated = sample_record();
        updated["items"][1]["quantity_received"] = json!(3);

        let diff = diff_records(&original, &updated);
        let items = diff["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["index"], json!(1));
        assert_eq!(
            items[0]["changes"]["quantity_received"],
            json!({"from": 2, "to": 3})
        );
    }

    #[test]
    fn test_diff_items_unchanged_item_absent() {
        let original = sample_record();
        let mut updated = sample_record();
        updated["items"][0]["unit_price"] = json!(6.0);

        let diff = diff_records(&original, &updated);
        let items = diff["items"].as_array().unwrap();
        // Item 1 is untouched, so it must not appear
        assert!(items.iter().all(|e| e["index"] != json!(1)));
    }

    #[test]
    fn test_diff_array_length_change_reports_whole_array() {
        let original = json!({"items": [{"item_name": "Pen"}]});
        let updated = json!({"items": [{"item_name": "Pen"}, {"item_name": "Ink"}]});

        let diff = diff_records(&original, &updated);
        assert!(diff["items"].get("from").is_some());
        assert!(diff["items"].get("to").is_some());
    }

    #[test]
    fn test_diff_added_and_removed_fields() {
        let original = json!({"a": 1, "b": 2});
        let updated = json!({"b": 2, "c": 3});

        let diff = diff_records(&original, &updated);
        assert_eq!(diff["a"], json!({"from": 1, "to": null}));
        assert_eq!(diff["c"], json!({"from": null, "to": 3}));
        assert!(!diff.contains_key("b"));
    }

    #[test]
    fn test_diff_nested_object_recurses() {
        let original = json!({"meta": {"x": 1, "y": 2}});
        let updated = json!({"meta": {"x": 1, "y": 5}});

        let diff = diff_records(&original, &updated);
        assert_eq!(diff["meta"]["y"], json!({"from": 2, "to": 5}));
        assert!(diff["meta"].get("x").is_none());
    }

    #[test]
    fn test_diff_scalar_array_element() {
        let original = json!({"item_ids": ["A1", "A2"]});
        let updated = json!({"item_ids": ["A1", "A9"]});

        let diff = diff_records(&original, &updated);
        let entries = diff["item_ids"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["index"], json!(1));
        assert_eq!(entries[0]["changes"], json!({"from": "A2", "to": "A9"}));
    }

    #[test]
    fn test_diff_strict_inequality_on_numbers() {
        // 10 and 10.0 are different JSON values under strict comparison
        let original = json!({"quantity": 10});
        let updated = json!({"quantity": 10.0});
        let diff = diff_records(&original, &updated);
        assert!(diff.contains_key("quantity"));
    }
}
