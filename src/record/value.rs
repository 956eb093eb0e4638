//! Value type for schema-less record trees
//!
//! Records arrive from the document store as arbitrarily nested key/value
//! trees with no enforced schema. `Value` models them as a small recursive
//! sum type so traversal is total and never panics on unexpected shapes.

use indexmap::IndexMap;
use std::fmt;

/// A node in a record tree
///
/// Supports:
/// - String
/// - Integer (i64)
/// - Float (f64)
/// - Boolean
/// - Null
/// - Sequence (Vec<Value>)
/// - Mapping (IndexMap<String, Value>, insertion-ordered)
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

impl Value {
    /// Get string value if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get sequence elements if this is a sequence
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get the mapping if this is a mapping
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render a scalar as a plain string; `None` for sequences, mappings,
    /// and nulls
    pub fn scalar_to_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the whole tree in a JSON-like form. This is the textual
    /// serialization scanned for URL-shaped substrings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            Value::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", key, val)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_shape() {
        let value = Value::from(json!({
            "title": "Study",
            "year": 2021,
            "tags": ["a", "b"],
            "nested": {"inner": null}
        }));

        let map = value.as_mapping().unwrap();
        assert_eq!(map.get("title").unwrap().as_str(), Some("Study"));
        assert_eq!(map.get("year"), Some(&Value::Integer(2021)));
        assert_eq!(map.get("tags").unwrap().as_sequence().unwrap().len(), 2);
        assert!(map.get("nested").unwrap().as_mapping().unwrap()["inner"].is_null());
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(Value::from("x").scalar_to_string(), Some("x".to_string()));
        assert_eq!(Value::from(7i64).scalar_to_string(), Some("7".to_string()));
        assert_eq!(Value::from(true).scalar_to_string(), Some("true".to_string()));
        assert_eq!(Value::Null.scalar_to_string(), None);
        assert_eq!(Value::Sequence(vec![]).scalar_to_string(), None);
    }

    #[test]
    fn test_display_renders_whole_tree() {
        let value = Value::from(json!({"url": "https://example.com/x", "n": [1, 2]}));
        let rendered = value.to_string();
        assert!(rendered.contains("https://example.com/x"));
        assert!(rendered.contains("[1, 2]"));
    }
}
