//! Node implementation for the output graph artifact

use super::types::{NodeId, NodeKind, Position};
use serde::{Deserialize, Serialize};

/// Display size of every cluster-label node
pub const CLUSTER_LABEL_SIZE: f64 = 50.0;

/// A vertex of the output graph.
///
/// Either a record node (one per input record, sized by how frequent its
/// organizing attribute is across the corpus) or a synthetic cluster-label
/// node placed at the centroid of its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier (record id, or generated label string)
    pub id: NodeId,

    /// Display label
    pub label: String,

    /// Hover/metadata text; records only
    pub hover: Option<String>,

    /// Display size
    pub size: f64,

    /// Position assigned by the external layout step
    pub position: Option<Position>,

    /// What this node represents
    pub kind: NodeKind,
}

impl Node {
    /// Create a record node. Position is left unset; the external layout
    /// step assigns it before annotation runs.
    pub fn record(id: NodeId, label: impl Into<String>, hover: impl Into<String>, size: f64) -> Self {
        Node {
            id,
            label: label.into(),
            hover: Some(hover.into()),
            size,
            position: None,
            kind: NodeKind::Record,
        }
    }

    /// Create a cluster-label node anchored at a centroid. The label text
    /// doubles as hover text.
    pub fn cluster_label(id: NodeId, label: impl Into<String>, position: Position) -> Self {
        let label = label.into();
        Node {
            id,
            hover: Some(label.clone()),
            label,
            size: CLUSTER_LABEL_SIZE,
            position: Some(position),
            kind: NodeKind::ClusterLabel,
        }
    }

    /// Is this a record node?
    pub fn is_record(&self) -> bool {
        self.kind == NodeKind::Record
    }

    /// Does this node have a layout position?
    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}
