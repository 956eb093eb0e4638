//! In-memory storage for the output graph artifact

use super::edge::Edge;
use super::node::Node;
use super::types::{NodeId, NodeKind, Position};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during graph construction
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// The neutral graph artifact handed to the external renderer.
///
/// Nodes are kept in insertion order so downstream output is stable across
/// runs. Edges are a flat list; similarity edges always precede membership
/// edges because annotation runs after graph construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyGraph {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
}

impl StudyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        StudyGraph::default()
    }

    /// Add a node; fails if the id is already present
    pub fn add_node(&mut self, node: Node) -> GraphResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::NodeAlreadyExists(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Add an edge; both endpoints must already exist
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(GraphError::InvalidEdgeSource(edge.source));
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(GraphError::InvalidEdgeTarget(edge.target));
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Assign a layout position to a node
    pub fn set_position(&mut self, id: &NodeId, position: Position) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        node.position = Some(position);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Record nodes only, in insertion order
    pub fn record_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.kind == NodeKind::Record)
    }

    /// All edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Similarity edges only
    pub fn similarity_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.is_similarity())
    }

    /// Similarity edges touching the given node
    pub fn similarity_edges_touching<'a>(
        &'a self,
        id: &'a NodeId,
    ) -> impl Iterator<Item = &'a Edge> {
        self.similarity_edges().filter(move |e| e.touches(id))
    }
}
