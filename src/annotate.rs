//! Cluster annotation
//!
//! For each community: derive a label from the similarity-edge labels
//! touching its members, wrap it, anchor a cluster-label node at the member
//! centroid, and bind it to every member with hidden membership edges.
//! Annotation runs after the external layout step has assigned positions to
//! record nodes.

use crate::community::Partition;
use crate::graph::{Edge, GraphError, Node, NodeId, Position, StudyGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised during cluster annotation
#[derive(Error, Debug)]
pub enum AnnotateError {
    /// A member node has no layout position; annotation cannot place the
    /// label node and silently defaulting would corrupt downstream layout.
    #[error("node {0} has no position; run the layout step before annotation")]
    PlacementUnavailable(NodeId),

    #[error("partition references node {0} which is not in the graph")]
    UnknownMember(NodeId),

    #[error("cluster has no members")]
    EmptyCluster,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Strategy for deriving a cluster's label from the similarity-edge labels
/// touching its members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelPolicy {
    /// Union of every touching edge label (default)
    #[default]
    AllConditions,
    /// The k most frequent labels across members' touching edges
    TopK { k: usize },
    /// Only labels present on edges of every member
    Shared,
}

impl LabelPolicy {
    /// The top-k policy with its conventional depth
    pub fn top_k() -> Self {
        LabelPolicy::TopK { k: 3 }
    }
}

/// Edge labels touching one member, as a set
fn touching_labels(graph: &StudyGraph, member: &NodeId) -> BTreeSet<String> {
    graph
        .similarity_edges_touching(member)
        .map(|e| e.label.clone())
        .collect()
}

/// Compute the label values for a cluster under the given policy, sorted
/// lexicographically (top-k: by descending frequency, then lexicographic).
pub fn cluster_label_values(
    graph: &StudyGraph,
    members: &[NodeId],
    policy: &LabelPolicy,
) -> Vec<String> {
    match policy {
        LabelPolicy::AllConditions => {
            let mut union = BTreeSet::new();
            for member in members {
                union.extend(touching_labels(graph, member));
            }
            union.into_iter().collect()
        }
        LabelPolicy::TopK { k } => {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for member in members {
                for edge in graph.similarity_edges_touching(member) {
                    *counts.entry(edge.label.clone()).or_insert(0) += 1;
                }
            }
            let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.into_iter().take(*k).map(|(label, _)| label).collect()
        }
        LabelPolicy::Shared => {
            let mut shared: Option<BTreeSet<String>> = None;
            for member in members {
                let labels = touching_labels(graph, member);
                shared = Some(match shared {
                    None => labels,
                    Some(current) => current.intersection(&labels).cloned().collect(),
                });
            }
            shared.unwrap_or_default().into_iter().collect()
        }
    }
}

/// Insert line breaks after every `every` characters, preferring to break at
/// the nearest preceding space or tab within the window. A window with no
/// whitespace is split hard at the window edge, so no output line exceeds
/// `every` characters. Each line is trimmed.
pub fn insert_line_breaks(text: &str, every: usize) -> String {
    if every == 0 {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = start + every;
        if end < chars.len() {
            while end > start && chars[end] != ' ' && chars[end] != '\t' {
                end -= 1;
            }
            if end == start {
                // No whitespace in the window
                end = start + every;
            }
        } else {
            end = chars.len();
        }
        let line: String = chars[start..end].iter().collect();
        lines.push(line.trim().to_string());
        start = end;
    }
    lines.join("\n")
}

/// Arithmetic mean position of the members.
///
/// Every member must exist and carry a position assigned by the external
/// layout step.
pub fn centroid(graph: &StudyGraph, members: &[NodeId]) -> Result<Position, AnnotateError> {
    if members.is_empty() {
        return Err(AnnotateError::EmptyCluster);
    }
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for id in members {
        let node = graph
            .get_node(id)
            .ok_or_else(|| AnnotateError::UnknownMember(id.clone()))?;
        let position = node
            .position
            .ok_or_else(|| AnnotateError::PlacementUnavailable(id.clone()))?;
        sum_x += position.x;
        sum_y += position.y;
    }
    let n = members.len() as f64;
    Ok(Position::new(sum_x / n, sum_y / n))
}

/// Annotate every cluster of the partition: one cluster-label node at the
/// member centroid plus hidden membership edges. Clusters whose computed
/// label is empty fall back to the synthetic `Cluster N` name and produce no
/// label node at all. Returns the number of label nodes created.
pub fn annotate_clusters(
    graph: &mut StudyGraph,
    partition: &Partition,
    policy: &LabelPolicy,
    wrap_width: usize,
) -> Result<usize, AnnotateError> {
    let clusters = partition.clusters(graph);
    let mut created = 0;

    for (idx, members) in clusters.iter().enumerate() {
        if members.is_empty() {
            continue;
        }

        let values = cluster_label_values(graph, members, policy);
        let formatted = insert_line_breaks(&values.join(", "), wrap_width);
        if formatted.is_empty() {
            // Synthetic fallback name; members stay visually ungrouped
            debug!(cluster = idx + 1, "no shared attributes, skipping label node");
            continue;
        }

        let anchor = centroid(graph, members)?;
        let label_id = unique_label_id(graph, &formatted);
        graph.add_node(Node::cluster_label(label_id.clone(), formatted, anchor))?;
        for member in members {
            graph.add_edge(Edge::membership(label_id.clone(), member.clone()))?;
        }
        created += 1;
    }

    info!(
        clusters = clusters.len(),
        label_nodes = created,
        "cluster annotation done"
    );
    Ok(created)
}

/// Label node ids are content-derived; two clusters computing identical
/// label text get distinct ids via a numeric suffix.
fn unique_label_id(graph: &StudyGraph, label: &str) -> NodeId {
    let base = NodeId::new(label);
    if !graph.contains_node(&base) {
        return base;
    }
    let mut ordinal = 2;
    loop {
        let candidate = NodeId::new(format!("{} #{}", label, ordinal));
        if !graph.contains_node(&candidate) {
            warn!(label, ordinal, "duplicate cluster label text, uniquifying id");
            return candidate;
        }
        ordinal += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::{detect_communities, EdgeWeighting, LouvainDetector};
    use crate::graph::NodeKind;

    fn positioned_record(id: &str, x: f64, y: f64) -> Node {
        let mut node = Node::record(NodeId::new(id), "Org", "hover", 1.0);
        node.position = Some(Position::new(x, y));
        node
    }

    fn triangle_graph() -> StudyGraph {
        // r1-r2 "A", r2-r3 "A", r1-r3 "B"
        let mut graph = StudyGraph::new();
        graph.add_node(positioned_record("r1", 0.0, 0.0)).unwrap();
        graph.add_node(positioned_record("r2", 2.0, 0.0)).unwrap();
        graph.add_node(positioned_record("r3", 1.0, 3.0)).unwrap();
        graph
            .add_edge(Edge::similarity(NodeId::new("r1"), NodeId::new("r2"), vec!["A".into()]))
            .unwrap();
        graph
            .add_edge(Edge::similarity(NodeId::new("r2"), NodeId::new("r3"), vec!["A".into()]))
            .unwrap();
        graph
            .add_edge(Edge::similarity(NodeId::new("r1"), NodeId::new("r3"), vec!["B".into()]))
            .unwrap();
        graph
    }

    fn members() -> Vec<NodeId> {
        vec![NodeId::new("r1"), NodeId::new("r2"), NodeId::new("r3")]
    }

    #[test]
    fn test_all_conditions_union() {
        let graph = triangle_graph();
        let values = cluster_label_values(&graph, &members(), &LabelPolicy::AllConditions);
        assert_eq!(values, vec!["A", "B"]);
    }

    #[test]
    fn test_top_k_by_frequency() {
        let graph = triangle_graph();
        // "A" touches r1, r2 (twice), r3 -> 4; "B" touches r1, r3 -> 2
        let values = cluster_label_values(&graph, &members(), &LabelPolicy::TopK { k: 1 });
        assert_eq!(values, vec!["A"]);

        let both = cluster_label_values(&graph, &members(), &LabelPolicy::top_k());
        assert_eq!(both, vec!["A", "B"]);
    }

    #[test]
    fn test_shared_intersection() {
        let graph = triangle_graph();
        let values = cluster_label_values(&graph, &members(), &LabelPolicy::Shared);
        assert_eq!(values, vec!["A"]);
    }

    #[test]
    fn test_line_breaks_bound() {
        let text = "a very long string of words that keeps going and going until it wraps";
        let wrapped = insert_line_breaks(text, 50);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 50, "line too long: {:?}", line);
        }
        // All words survive
        let rejoined = wrapped.replace('\n', " ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn test_line_breaks_prefers_whitespace() {
        let wrapped = insert_line_breaks("alpha beta gamma", 10);
        assert_eq!(wrapped, "alpha beta\ngamma");
    }

    #[test]
    fn test_line_breaks_hard_splits_long_token() {
        let token = "x".repeat(120);
        let wrapped = insert_line_breaks(&token, 50);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 50);
        assert_eq!(lines[2].len(), 20);
    }

    #[test]
    fn test_line_breaks_short_input_unchanged() {
        assert_eq!(insert_line_breaks("short", 50), "short");
        assert_eq!(insert_line_breaks("", 50), "");
    }

    #[test]
    fn test_centroid() {
        let graph = triangle_graph();
        let anchor = centroid(&graph, &members()).unwrap();
        assert_eq!(anchor, Position::new(1.0, 1.0));
    }

    #[test]
    fn test_centroid_requires_positions() {
        let mut graph = triangle_graph();
        graph.get_node_mut(&NodeId::new("r2")).unwrap().position = None;

        let result = centroid(&graph, &members());
        assert!(matches!(
            result,
            Err(AnnotateError::PlacementUnavailable(id)) if id.as_str() == "r2"
        ));
    }

    #[test]
    fn test_annotate_creates_label_and_membership_edges() {
        let mut graph = triangle_graph();
        let partition =
            detect_communities(&graph, EdgeWeighting::Unit, &LouvainDetector::default());

        let created =
            annotate_clusters(&mut graph, &partition, &LabelPolicy::AllConditions, 50).unwrap();
        assert_eq!(created, 1);

        let label_node = graph.get_node(&NodeId::new("A, B")).unwrap();
        assert_eq!(label_node.kind, NodeKind::ClusterLabel);
        assert_eq!(label_node.position, Some(Position::new(1.0, 1.0)));
        assert_eq!(label_node.hover.as_deref(), Some("A, B"));

        let memberships: Vec<_> = graph.edges().filter(|e| e.hidden).collect();
        assert_eq!(memberships.len(), 3);
        assert!(memberships.iter().all(|e| e.weight == 0.0));
    }

    #[test]
    fn test_annotate_skips_cluster_without_edges() {
        let mut graph = StudyGraph::new();
        graph.add_node(positioned_record("lonely", 0.0, 0.0)).unwrap();
        let partition =
            detect_communities(&graph, EdgeWeighting::Unit, &LouvainDetector::default());

        let created =
            annotate_clusters(&mut graph, &partition, &LabelPolicy::AllConditions, 50).unwrap();
        assert_eq!(created, 0);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_annotate_fails_without_positions() {
        let mut graph = triangle_graph();
        graph.get_node_mut(&NodeId::new("r1")).unwrap().position = None;
        let partition =
            detect_communities(&graph, EdgeWeighting::Unit, &LouvainDetector::default());

        let result = annotate_clusters(&mut graph, &partition, &LabelPolicy::AllConditions, 50);
        assert!(matches!(result, Err(AnnotateError::PlacementUnavailable(_))));
    }

    #[test]
    fn test_duplicate_label_text_gets_unique_id() {
        let mut graph = triangle_graph();
        // Pre-existing node with the label text the annotator will derive
        graph
            .add_node(positioned_record("A, B", 9.0, 9.0))
            .unwrap();
        let partition =
            detect_communities(&graph, EdgeWeighting::Unit, &LouvainDetector::default());

        annotate_clusters(&mut graph, &partition, &LabelPolicy::AllConditions, 50).unwrap();
        assert!(graph.contains_node(&NodeId::new("A, B #2")));
    }
}
