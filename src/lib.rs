//! flat-tree: ancestor lookups over flat trees.
//!
//! A flat tree is an ordered sequence of records where each record names
//! its parent by value. [`get_parents`] climbs those references from one
//! record and returns its ancestors, root first.
//!
//! With the `python` feature the crate also builds a PyO3 extension module
//! exposing the same lookup over lists of dicts.

pub mod errors;
pub mod index;
pub mod record;
pub mod resolver;

pub use errors::{FlatTreeError, Result};
pub use index::IdIndex;
pub use record::{parent_reference, record_from_pairs, records_from_json, FieldKey, Record};
pub use resolver::{get_parents, AncestorResolver, ParentsOptions};

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;
    use pyo3::types::{PyDict, PyList};

    use crate::record::Record;
    use crate::resolver::{AncestorResolver, ParentsOptions, DEFAULT_PARENT_FIELD};

    // ─── PyO3 Bindings ────────────────────────────────────────────────────

    /// Ancestors of `records[index]`, root first. Returns a list of dicts.
    #[pyfunction]
    #[pyo3(signature = (records, index, id_field=None, parent_field=DEFAULT_PARENT_FIELD.to_string()))]
    fn get_parents(
        py: Python<'_>,
        records: Vec<Bound<'_, PyDict>>,
        index: usize,
        id_field: Option<String>,
        parent_field: String,
    ) -> PyResult<PyObject> {
        let rows = records
            .iter()
            .map(dict_to_record)
            .collect::<PyResult<Vec<_>>>()?;

        let mut options = ParentsOptions::new(index).with_parent_field(parent_field);
        if let Some(field) = id_field {
            options = options.with_id_field(field);
        }
        let positions = AncestorResolver::new(options).resolve_positions(&rows)?;

        // Hand back the caller's own dicts rather than rebuilt copies.
        let out = PyList::empty(py);
        for pos in positions {
            out.append(&records[pos])?;
        }
        Ok(out.into())
    }

    // ─── Helper conversions ───────────────────────────────────────────────

    /// Convert a Python value to serde_json::Value, preserving types.
    fn python_to_json_value(obj: &Bound<'_, PyAny>) -> PyResult<serde_json::Value> {
        if obj.is_none() {
            return Ok(serde_json::Value::Null);
        }
        // bool first: Python bool is a subclass of int
        if let Ok(b) = obj.extract::<bool>() {
            return Ok(serde_json::Value::Bool(b));
        }
        if let Ok(i) = obj.extract::<i64>() {
            return Ok(serde_json::json!(i));
        }
        if let Ok(f) = obj.extract::<f64>() {
            return Ok(serde_json::json!(f));
        }
        if let Ok(s) = obj.extract::<String>() {
            return Ok(serde_json::Value::String(s));
        }
        // Containers and other objects compare by identity, so they never
        // serve as identifiers. An empty object keeps the field present.
        Ok(serde_json::Value::Object(serde_json::Map::new()))
    }

    fn dict_to_record(dict: &Bound<'_, PyDict>) -> PyResult<Record> {
        let mut record = Record::new();
        for (k, v) in dict.iter() {
            let key: String = k.str()?.to_string();
            record.insert(key, python_to_json_value(&v)?);
        }
        Ok(record)
    }

    /// Ancestor lookups over flat trees.
    #[pymodule]
    fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(get_parents, m)?)?;
        Ok(())
    }
}
