//! Community detection over the similarity graph
//!
//! This module is the adapter layer: it lowers the domain graph (record
//! nodes + similarity edges only) to a dense integer-indexed view, runs a
//! modularity-maximizing partitioner, and maps the result back to node ids.
//! The algorithm itself lives in `trialgraph-algorithms`.

use crate::graph::{NodeId, StudyGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;
use trialgraph_algorithms::{louvain, modularity, GraphView, LouvainConfig};

/// Weight handed to the partitioner per similarity edge.
///
/// The reference behavior treats edges as unweighted; intersection
/// cardinality is the documented alternative, not a bug fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeWeighting {
    /// Weight 1.0 per similarity edge (default)
    #[default]
    Unit,
    /// Weight = number of shared attribute values
    IntersectionSize,
}

/// A total mapping from every record-node id to a community id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partition {
    assignments: HashMap<NodeId, usize>,
    community_count: usize,
    modularity: f64,
}

impl Partition {
    pub fn community_of(&self, id: &NodeId) -> Option<usize> {
        self.assignments.get(id).copied()
    }

    pub fn community_count(&self) -> usize {
        self.community_count
    }

    pub fn modularity(&self) -> f64 {
        self.modularity
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, usize)> {
        self.assignments.iter().map(|(id, &c)| (id, c))
    }

    /// Member node ids per community, indexed by community id. Members keep
    /// the graph's node insertion order.
    pub fn clusters(&self, graph: &StudyGraph) -> Vec<Vec<NodeId>> {
        let mut clusters = vec![Vec::new(); self.community_count];
        for node in graph.record_nodes() {
            if let Some(community) = self.community_of(&node.id) {
                clusters[community].push(node.id.clone());
            }
        }
        clusters
    }
}

/// Pluggable community-detection strategy.
///
/// Implementations must assign every node index in the view to exactly one
/// community and must terminate on any valid graph, including edgeless ones.
pub trait CommunityDetector {
    /// Partition the view; returns one dense community id per node index
    fn detect(&self, view: &GraphView) -> Vec<usize>;
}

/// Default detector: the Louvain multilevel modularity maximizer
#[derive(Debug, Clone, Default)]
pub struct LouvainDetector {
    pub config: LouvainConfig,
}

impl CommunityDetector for LouvainDetector {
    fn detect(&self, view: &GraphView) -> Vec<usize> {
        louvain(view, &self.config).communities
    }
}

/// Lower the domain graph to a dense view over record nodes and similarity
/// edges. Cluster-label nodes and membership edges, if present, are ignored.
/// Returns the view plus the node id for each dense index.
pub fn build_view(graph: &StudyGraph, weighting: EdgeWeighting) -> (GraphView, Vec<NodeId>) {
    let index_to_node: Vec<NodeId> = graph.record_nodes().map(|n| n.id.clone()).collect();
    let node_to_index: HashMap<&NodeId, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, id)| (id, idx))
        .collect();

    let mut edges = Vec::new();
    for edge in graph.similarity_edges() {
        let (Some(&u), Some(&v)) = (
            node_to_index.get(&edge.source),
            node_to_index.get(&edge.target),
        ) else {
            continue;
        };
        let weight = match weighting {
            EdgeWeighting::Unit => 1.0,
            EdgeWeighting::IntersectionSize => edge.weight,
        };
        edges.push((u, v, weight));
    }

    (
        GraphView::from_edges(index_to_node.len(), &edges),
        index_to_node,
    )
}

/// Detect communities on the similarity graph and return a total partition
/// over its record nodes.
pub fn detect_communities(
    graph: &StudyGraph,
    weighting: EdgeWeighting,
    detector: &dyn CommunityDetector,
) -> Partition {
    let (view, index_to_node) = build_view(graph, weighting);
    let communities = detector.detect(&view);
    debug_assert_eq!(communities.len(), index_to_node.len());

    let quality = modularity(&view, &communities);
    let community_count = communities.iter().copied().max().map_or(0, |c| c + 1);
    let assignments: HashMap<NodeId, usize> = index_to_node
        .into_iter()
        .zip(communities.iter().copied())
        .collect();

    info!(
        communities = community_count,
        nodes = assignments.len(),
        modularity = quality,
        "community detection done"
    );

    Partition {
        assignments,
        community_count,
        modularity: quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn graph_with_pair_and_isolate() -> StudyGraph {
        let mut graph = StudyGraph::new();
        for id in ["r1", "r2", "r3"] {
            graph
                .add_node(Node::record(NodeId::new(id), "Org", "hover", 1.0))
                .unwrap();
        }
        graph
            .add_edge(Edge::similarity(
                NodeId::new("r1"),
                NodeId::new("r2"),
                vec!["B".to_string()],
            ))
            .unwrap();
        graph
    }

    #[test]
    fn test_partition_is_total() {
        let graph = graph_with_pair_and_isolate();
        let partition =
            detect_communities(&graph, EdgeWeighting::Unit, &LouvainDetector::default());

        assert_eq!(partition.len(), 3);
        assert_eq!(
            partition.community_of(&NodeId::new("r1")),
            partition.community_of(&NodeId::new("r2"))
        );
        assert_ne!(
            partition.community_of(&NodeId::new("r1")),
            partition.community_of(&NodeId::new("r3"))
        );
    }

    #[test]
    fn test_edgeless_graph_is_singletons() {
        let mut graph = StudyGraph::new();
        for id in ["a", "b", "c"] {
            graph
                .add_node(Node::record(NodeId::new(id), "Org", "hover", 1.0))
                .unwrap();
        }
        let partition =
            detect_communities(&graph, EdgeWeighting::Unit, &LouvainDetector::default());

        assert_eq!(partition.community_count(), 3);
        assert_eq!(partition.modularity(), 0.0);
    }

    #[test]
    fn test_clusters_group_members() {
        let graph = graph_with_pair_and_isolate();
        let partition =
            detect_communities(&graph, EdgeWeighting::Unit, &LouvainDetector::default());

        let clusters = partition.clusters(&graph);
        assert_eq!(clusters.len(), 2);
        let sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
        assert!(sizes.contains(&2));
        assert!(sizes.contains(&1));
    }

    #[test]
    fn test_view_ignores_membership_edges() {
        let mut graph = graph_with_pair_and_isolate();
        graph
            .add_node(Node::cluster_label(
                NodeId::new("B"),
                "B",
                crate::graph::Position::new(0.0, 0.0),
            ))
            .unwrap();
        graph
            .add_edge(Edge::membership(NodeId::new("B"), NodeId::new("r1")))
            .unwrap();

        let (view, ids) = build_view(&graph, EdgeWeighting::Unit);
        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 1);
        assert!(ids.iter().all(|id| id.as_str() != "B"));
    }

    #[test]
    fn test_intersection_size_weighting() {
        let mut graph = StudyGraph::new();
        for id in ["r1", "r2"] {
            graph
                .add_node(Node::record(NodeId::new(id), "Org", "hover", 1.0))
                .unwrap();
        }
        graph
            .add_edge(Edge::similarity(
                NodeId::new("r1"),
                NodeId::new("r2"),
                vec!["A".to_string(), "B".to_string()],
            ))
            .unwrap();

        let (view, _) = build_view(&graph, EdgeWeighting::IntersectionSize);
        assert_eq!(view.total_weight(), 2.0);

        let (unit_view, _) = build_view(&graph, EdgeWeighting::Unit);
        assert_eq!(unit_view.total_weight(), 1.0);
    }
}
