//! In-memory identifier index. Maps identifier values to record positions.
//!
//! Stores only keys and positions, not records. The records themselves stay
//! in the caller's slice and are looked up by position on demand.

use std::collections::HashMap;

use serde_json::Value;

use crate::record::{FieldKey, Record};

/// Identifier index over one record sequence.
#[derive(Debug, Clone)]
pub struct IdIndex {
    /// Field the keys were read from.
    id_field: String,
    /// identifier key -> earliest position holding it
    positions: HashMap<FieldKey, usize>,
}

impl IdIndex {
    /// Index `records` by the value of `id_field`.
    ///
    /// When several records share an identifier the earliest one is kept.
    /// Records without the field, or with an unkeyable value, are skipped.
    pub fn build(records: &[Record], id_field: &str) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if let Some(key) = record.get(id_field).and_then(FieldKey::from_value) {
                positions.entry(key).or_insert(pos);
            }
        }
        Self {
            id_field: id_field.to_string(),
            positions,
        }
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Position of the first record whose identifier equals `key`.
    pub fn lookup(&self, key: &FieldKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Position of the first record whose identifier strictly equals `value`.
    pub fn position_of(&self, value: &Value) -> Option<usize> {
        FieldKey::from_value(value).and_then(|key| self.lookup(&key))
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.position_of(value).is_some()
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::records_from_json;
    use serde_json::json;

    #[test]
    fn test_empty_index() {
        let index = IdIndex::build(&[], "id");
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.id_field(), "id");
        assert_eq!(index.position_of(&json!("x")), None);
    }

    #[test]
    fn test_positions() {
        let records = records_from_json(json!([
            { "foo": "bar" },
            { "foo": "foo", "parent": "bar" },
            { "foo": 3 }
        ]))
        .unwrap();
        let index = IdIndex::build(&records, "foo");

        assert_eq!(index.len(), 3);
        assert_eq!(index.position_of(&json!("bar")), Some(0));
        assert_eq!(index.position_of(&json!("foo")), Some(1));
        assert_eq!(index.position_of(&json!(3.0)), Some(2));
        assert!(!index.contains(&json!("baz")));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let records = records_from_json(json!([
            { "id": "a", "n": 0 },
            { "id": "b", "n": 1 },
            { "id": "a", "n": 2 }
        ]))
        .unwrap();
        let index = IdIndex::build(&records, "id");

        assert_eq!(index.len(), 2);
        assert_eq!(index.position_of(&json!("a")), Some(0));
    }

    #[test]
    fn test_skips_missing_and_unkeyable() {
        let records = records_from_json(json!([
            { "other": "a" },
            { "id": null },
            { "id": [1, 2] },
            { "id": { "nested": true } },
            { "id": "kept" }
        ]))
        .unwrap();
        let index = IdIndex::build(&records, "id");

        assert_eq!(index.len(), 1);
        assert_eq!(index.position_of(&json!("kept")), Some(4));
        assert_eq!(index.position_of(&Value::Null), None);
        assert_eq!(index.position_of(&json!([1, 2])), None);
    }

    #[test]
    fn test_large_index() {
        let records: Vec<Record> = (0..10_000)
            .map(|i| Record::from([("id".to_string(), json!(format!("n{i:05}")))]))
            .collect();
        let index = IdIndex::build(&records, "id");
        assert_eq!(index.len(), 10_000);
        assert_eq!(index.position_of(&json!("n09999")), Some(9_999));
    }
}
