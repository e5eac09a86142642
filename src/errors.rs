//! Error types for flat-tree.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlatTreeError {
    #[error("Cyclic ancestry: record {position} was reached twice while climbing from {index}")]
    CyclicAncestry { index: usize, position: usize },

    #[error("Index built for id field {actual:?}, resolver expects {expected:?}")]
    IndexFieldMismatch { expected: String, actual: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlatTreeError>;

#[cfg(feature = "python")]
impl From<FlatTreeError> for pyo3::PyErr {
    fn from(err: FlatTreeError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
