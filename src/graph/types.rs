//! Core type definitions for the output graph artifact

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a graph node.
///
/// Record nodes carry the opaque record id assigned by the record store;
/// cluster-label nodes carry their generated label string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

/// What a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A clinical-study record
    Record,
    /// A synthetic cluster-label annotation
    ClusterLabel,
}

/// Edge category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Two records sharing at least one attribute value
    Similarity,
    /// Hidden binding between a cluster-label node and a member record
    Membership,
}

/// A 2-D position assigned by the external layout step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new("64f1a2");
        assert_eq!(id.as_str(), "64f1a2");
        assert_eq!(format!("{}", id), "64f1a2");

        let id2: NodeId = "abc".into();
        assert_eq!(id2.as_str(), "abc");
    }

    #[test]
    fn test_node_id_ordering() {
        let a = NodeId::new("a");
        let b = NodeId::new("b");
        assert!(a < b);
    }

    #[test]
    fn test_position() {
        let p = Position::new(1.5, -2.0);
        assert_eq!(format!("{}", p), "(1.5, -2)");
    }
}
