//! Edge implementation for the output graph artifact

use super::types::{EdgeKind, NodeId};
use serde::{Deserialize, Serialize};

/// An unordered pair of node ids plus a label.
///
/// Similarity edges connect two records that share at least one attribute
/// value; the label is the sorted, comma-joined intersection and the weight
/// is its cardinality. Membership edges bind a cluster-label node to a
/// member record; they are hidden and carry zero weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint
    pub source: NodeId,

    /// Second endpoint
    pub target: NodeId,

    /// Display/hover label
    pub label: String,

    /// Edge category
    pub kind: EdgeKind,

    /// Edge weight (similarity: shared-attribute count; membership: 0)
    pub weight: f64,

    /// Hidden edges exist only to bind label nodes near their members
    pub hidden: bool,
}

impl Edge {
    /// Create a similarity edge between two record nodes.
    ///
    /// `shared` is the attribute intersection; it is sorted here so the
    /// label is stable regardless of extraction order.
    pub fn similarity(source: NodeId, target: NodeId, mut shared: Vec<String>) -> Self {
        shared.sort_unstable();
        let weight = shared.len() as f64;
        Edge {
            source,
            target,
            label: shared.join(", "),
            kind: EdgeKind::Similarity,
            weight,
            hidden: false,
        }
    }

    /// Create a hidden membership edge from a cluster-label node to a member.
    pub fn membership(label_node: NodeId, member: NodeId) -> Self {
        Edge {
            source: label_node,
            target: member,
            label: String::new(),
            kind: EdgeKind::Membership,
            weight: 0.0,
            hidden: true,
        }
    }

    pub fn is_similarity(&self) -> bool {
        self.kind == EdgeKind::Similarity
    }

    /// Does this edge touch the given node?
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint
    pub fn other_endpoint(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_edge_sorts_label() {
        let edge = Edge::similarity(
            NodeId::new("r1"),
            NodeId::new("r2"),
            vec!["Diabetes".to_string(), "Asthma".to_string()],
        );
        assert_eq!(edge.label, "Asthma, Diabetes");
        assert_eq!(edge.weight, 2.0);
        assert!(!edge.hidden);
        assert!(edge.is_similarity());
    }

    #[test]
    fn test_membership_edge_is_hidden() {
        let edge = Edge::membership(NodeId::new("Asthma"), NodeId::new("r1"));
        assert!(edge.hidden);
        assert_eq!(edge.weight, 0.0);
        assert_eq!(edge.kind, EdgeKind::Membership);
    }

    #[test]
    fn test_touches_and_other_endpoint() {
        let edge = Edge::similarity(NodeId::new("a"), NodeId::new("b"), vec!["X".to_string()]);
        assert!(edge.touches(&NodeId::new("a")));
        assert!(edge.touches(&NodeId::new("b")));
        assert!(!edge.touches(&NodeId::new("c")));
        assert_eq!(edge.other_endpoint(&NodeId::new("a")), Some(&NodeId::new("b")));
        assert_eq!(edge.other_endpoint(&NodeId::new("c")), None);
    }
}
