//! Ancestor resolution over a flat tree.
//!
//! A flat tree is a sequence of records where each record names its parent
//! by value (the parent field) instead of nesting children. Resolving the
//! ancestors of one record climbs those references until a record has no
//! parent or its parent cannot be found, then returns the chain root-first.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::errors::{FlatTreeError, Result};
use crate::index::IdIndex;
use crate::record::{parent_reference, Record};

pub const DEFAULT_ID_FIELD: &str = "id";
pub const DEFAULT_PARENT_FIELD: &str = "parent";

/// Lookup parameters for one ancestor resolution.
///
/// Deserializes from camelCase JSON (`index`, `idField`, `parentField`,
/// `maxDepth`); every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentsOptions {
    /// Position of the target record.
    pub index: usize,
    /// Field on candidate parents matched against parent references.
    /// Defaults to `"id"`.
    pub id_field: String,
    /// Field on each record holding its parent's identifier.
    /// Defaults to `"parent"`.
    pub parent_field: String,
    /// Maximum number of links to climb. `None` climbs to the root.
    pub max_depth: Option<usize>,
}

impl Default for ParentsOptions {
    fn default() -> Self {
        Self {
            index: 0,
            id_field: DEFAULT_ID_FIELD.to_string(),
            parent_field: DEFAULT_PARENT_FIELD.to_string(),
            max_depth: None,
        }
    }
}

impl ParentsOptions {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    pub fn with_parent_field(mut self, field: impl Into<String>) -> Self {
        self.parent_field = field.into();
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A configured resolver, reusable across record sequences.
#[derive(Debug, Clone)]
pub struct AncestorResolver {
    options: ParentsOptions,
}

impl AncestorResolver {
    pub fn new(options: ParentsOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParentsOptions {
        &self.options
    }

    /// Ancestors of the target record, root first.
    ///
    /// Returns an empty chain when the sequence is empty, the index is out
    /// of range, or the target has no resolvable parent.
    pub fn resolve<'a>(&self, records: &'a [Record]) -> Result<Vec<&'a Record>> {
        let index = IdIndex::build(records, &self.options.id_field);
        self.resolve_with_index(records, &index)
    }

    /// Same as [`resolve`](Self::resolve), reusing an index the caller built
    /// over the same `records` with the same id field.
    pub fn resolve_with_index<'a>(
        &self,
        records: &'a [Record],
        index: &IdIndex,
    ) -> Result<Vec<&'a Record>> {
        let positions = self.climb(records, index)?;
        Ok(positions.into_iter().map(|pos| &records[pos]).collect())
    }

    /// Positions of the ancestors of the target record, root first.
    pub fn resolve_positions(&self, records: &[Record]) -> Result<Vec<usize>> {
        let index = IdIndex::build(records, &self.options.id_field);
        self.climb(records, &index)
    }

    fn climb(&self, records: &[Record], index: &IdIndex) -> Result<Vec<usize>> {
        if index.id_field() != self.options.id_field {
            return Err(FlatTreeError::IndexFieldMismatch {
                expected: self.options.id_field.clone(),
                actual: index.id_field().to_string(),
            });
        }

        let start = self.options.index;
        let Some(mut current) = records.get(start) else {
            trace!(start, len = records.len(), "target out of range");
            return Ok(Vec::new());
        };

        let limit = self.options.max_depth.unwrap_or(usize::MAX);
        let mut visited = HashSet::from([start]);
        let mut chain = Vec::new();

        while chain.len() < limit {
            let Some(reference) = parent_reference(current, &self.options.parent_field) else {
                trace!(start, depth = chain.len(), "reached root");
                break;
            };
            let Some((pos, parent)) = index
                .position_of(reference)
                .and_then(|pos| records.get(pos).map(|r| (pos, r)))
            else {
                debug!(start, depth = chain.len(), %reference, "parent not found");
                break;
            };
            if !visited.insert(pos) {
                warn!(start, position = pos, "cyclic ancestry");
                return Err(FlatTreeError::CyclicAncestry {
                    index: start,
                    position: pos,
                });
            }
            chain.push(pos);
            current = parent;
        }

        chain.reverse();
        Ok(chain)
    }
}

/// Owned ancestor chain of `records[options.index]`, root first.
pub fn get_parents(options: &ParentsOptions, records: &[Record]) -> Result<Vec<Record>> {
    let resolver = AncestorResolver::new(options.clone());
    Ok(resolver
        .resolve(records)?
        .into_iter()
        .cloned()
        .collect())
}
