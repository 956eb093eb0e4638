//! Similarity graph construction
//!
//! One node per record; one similarity edge per unordered record pair whose
//! attribute sets intersect. The pairwise scan is O(N²) in the number of
//! records and dominates runtime for large corpora; pair evaluation is
//! independent, so it can fan out over rayon when configured.

use crate::config::PipelineConfig;
use crate::graph::{Edge, GraphResult, Node, NodeId, StudyGraph};
use crate::hover;
use crate::record::{extract, Record};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::HashMap;
use tracing::{debug, info};

/// Count occurrences of the organizing attribute across the corpus.
///
/// Built once and passed explicitly; node sizes are looked up here rather
/// than recounted per record.
pub fn organizing_frequencies(
    records: &[Record],
    config: &PipelineConfig,
) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for record in records {
        let label = organizing_label(record, config);
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Resolve the organizing attribute for one record, with the usual fallback
pub fn organizing_label(record: &Record, config: &PipelineConfig) -> String {
    extract::lookup_path(record.root(), &config.organizing_path)
        .and_then(|v| v.scalar_to_string())
        .unwrap_or_else(|| hover::NOT_AVAILABLE.to_string())
}

/// Build the similarity graph over the full record sequence.
///
/// Every record becomes a node even when it ends up with no edges. For each
/// unordered pair with a non-empty attribute intersection, one edge is added
/// with the sorted, comma-joined intersection as label.
pub fn build_similarity_graph(
    records: &[Record],
    config: &PipelineConfig,
) -> GraphResult<StudyGraph> {
    let frequencies = organizing_frequencies(records, config);
    let mut graph = StudyGraph::new();

    for record in records {
        let label = organizing_label(record, config);
        let size = frequencies.get(&label).copied().unwrap_or(1) as f64;
        let hover_text = hover::hover_text(record, config);
        graph.add_node(Node::record(
            NodeId::new(record.id().as_str()),
            label,
            hover_text,
            size,
        ))?;
    }

    let attribute_sets: Vec<Vec<String>> = records
        .iter()
        .map(|r| extract::attribute_values(r.root(), &config.attribute_key))
        .collect();

    let edges = if config.parallel {
        scan_pairs_parallel(records, &attribute_sets)
    } else {
        scan_pairs(records, &attribute_sets)
    };

    let edge_count = edges.len();
    for edge in edges {
        graph.add_edge(edge)?;
    }

    info!(
        records = records.len(),
        nodes = graph.node_count(),
        edges = edge_count,
        "similarity graph built"
    );
    Ok(graph)
}

fn shared_attributes(left: &[String], right: &[String]) -> Vec<String> {
    if left.is_empty() || right.is_empty() {
        return Vec::new();
    }
    let lookup: FxHashSet<&str> = left.iter().map(String::as_str).collect();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    right
        .iter()
        .filter(|value| lookup.contains(value.as_str()) && seen.insert(value.as_str()))
        .cloned()
        .collect()
}

fn pair_edge(
    records: &[Record],
    attribute_sets: &[Vec<String>],
    i: usize,
    j: usize,
) -> Option<Edge> {
    let shared = shared_attributes(&attribute_sets[i], &attribute_sets[j]);
    if shared.is_empty() {
        return None;
    }
    Some(Edge::similarity(
        NodeId::new(records[i].id().as_str()),
        NodeId::new(records[j].id().as_str()),
        shared,
    ))
}

fn scan_pairs(records: &[Record], attribute_sets: &[Vec<String>]) -> Vec<Edge> {
    let n = records.len();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(edge) = pair_edge(records, attribute_sets, i, j) {
                edges.push(edge);
            }
        }
    }
    edges
}

/// Parallel pair scan. Rows are evaluated independently and concatenated in
/// row order, so the edge list is identical to the sequential scan.
fn scan_pairs_parallel(records: &[Record], attribute_sets: &[Vec<String>]) -> Vec<Edge> {
    let n = records.len();
    let edges: Vec<Edge> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let row: Vec<Edge> = ((i + 1)..n)
                .filter_map(|j| pair_edge(records, attribute_sets, i, j))
                .collect();
            row
        })
        .collect();
    debug!(pairs = n * n.saturating_sub(1) / 2, "parallel pair scan done");
    edges
}
