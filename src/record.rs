//! Records: one row of a flat tree, plus the strict-equality key used to
//! match parent references against identifiers.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::Result;

/// A heterogeneous field bag. BTreeMap keeps field order stable for
/// comparisons and debug output.
pub type Record = BTreeMap<String, Value>;

/// Build a record from `(field, value)` pairs.
pub fn record_from_pairs<K, I>(pairs: I) -> Record
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Decode a JSON array of objects into records.
pub fn records_from_json(value: Value) -> Result<Vec<Record>> {
    Ok(serde_json::from_value(value)?)
}

/// Parent reference held by `record` under `field`.
///
/// An absent field and an explicit `null` both mean "no parent".
pub fn parent_reference<'a>(record: &'a Record, field: &str) -> Option<&'a Value> {
    match record.get(field) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

// i64 covers [-2^63, 2^63); u64 covers [0, 2^64).
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

/// Hashable projection of a scalar field value.
///
/// Two values project to the same key exactly when they are strictly
/// equal: strings by content, booleans by value, numbers by numeric value
/// regardless of integer/float representation. `null`, `NaN`, arrays and
/// objects have no key and never match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Non-integral float, stored as raw bits.
    Float(u64),
    String(String),
}

impl FieldKey {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Self::UInt(u))
                } else {
                    n.as_f64().and_then(Self::from_f64)
                }
            }
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn from_f64(f: f64) -> Option<Self> {
        if f.is_nan() {
            return None;
        }
        if f.fract() == 0.0 {
            if (I64_LOWER..I64_UPPER).contains(&f) {
                return Some(Self::Int(f as i64));
            }
            if (0.0..U64_UPPER).contains(&f) {
                return Some(Self::UInt(f as u64));
            }
        }
        Some(Self::Float(f.to_bits()))
    }
}
