//! Record model: opaque-id documents with schema-less nested contents

pub mod extract;
pub mod value;

pub use value::Value;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque unique identifier assigned by the external record store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

/// One clinical-study record: an opaque id plus a nested value tree.
/// Immutable once loaded; discarded after the pipeline run.
#[derive(Debug, Clone)]
pub struct Record {
    id: RecordId,
    root: Value,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, root: Value) -> Self {
        Record {
            id: id.into(),
            root,
        }
    }

    /// Ingest a record from the store's JSON representation
    pub fn from_json(id: impl Into<RecordId>, json: serde_json::Value) -> Self {
        Record::new(id, Value::from(json))
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}
