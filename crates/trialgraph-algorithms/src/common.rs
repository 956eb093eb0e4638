//! Shared utilities for graph algorithms
//!
//! Provides a read-only, integer-indexed view of an undirected graph
//! topology for algorithm execution.

/// A dense, integer-indexed view of an undirected graph using Compressed
/// Sparse Row (CSR) adjacency.
///
/// Nodes are identified by their dense index `0..node_count`. Every
/// undirected edge appears in the neighbor row of both endpoints. Self-loops
/// are not representable; callers filter them out before lowering.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
    /// Edge weights aligned with `targets`; `None` means unit weights
    pub weights: Option<Vec<f64>>,
}

impl GraphView {
    /// Build a view from an undirected edge list `(u, v, weight)`.
    ///
    /// Each pair is expected at most once with `u != v`; both orientations
    /// are materialized internally.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize, f64)]) -> Self {
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];
        for &(u, v, w) in edges {
            adjacency[u].push((v, w));
            adjacency[v].push((u, w));
        }
        Self::from_adjacency(adjacency)
    }

    /// Build a view from per-node adjacency rows (both orientations present).
    pub fn from_adjacency(adjacency: Vec<Vec<(usize, f64)>>) -> Self {
        let node_count = adjacency.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();
        let mut weights = Vec::new();

        offsets.push(0);
        for row in adjacency {
            for (neighbor, weight) in row {
                targets.push(neighbor);
                weights.push(weight);
            }
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            offsets,
            targets,
            weights: Some(weights),
        }
    }

    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get the neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Get the weights aligned with `neighbors(idx)`, if weighted
    pub fn neighbor_weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.offsets[idx];
            let end = self.offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Weighted degree of a node; unit weights when the view is unweighted
    pub fn weighted_degree(&self, idx: usize) -> f64 {
        match self.neighbor_weights(idx) {
            Some(ws) => ws.iter().sum(),
            None => self.degree(idx) as f64,
        }
    }

    /// Total edge weight of the graph (each undirected edge counted once)
    pub fn total_weight(&self) -> f64 {
        let twice: f64 = match &self.weights {
            Some(ws) => ws.iter().sum(),
            None => self.targets.len() as f64,
        };
        twice / 2.0
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }
}
