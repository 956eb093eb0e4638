//! Trialgraph
//!
//! Builds a similarity graph over a corpus of clinical-study records,
//! partitions it into topical communities, and annotates each community
//! with a human-readable label derived from shared attributes.
//!
//! The record store (document database) and the renderer (layout, colors,
//! HTML) are external collaborators: records arrive as nested key/value
//! trees, and the pipeline emits a neutral graph artifact of nodes and
//! edges for downstream rendering.
//!
//! # Example
//!
//! ```rust
//! use trialgraph::{Pipeline, PipelineConfig, Position, Record};
//! use serde_json::json;
//!
//! let records = vec![
//!     Record::from_json("r1", json!({"Condition": ["Asthma"]})),
//!     Record::from_json("r2", json!({"Condition": ["Asthma", "Flu"]})),
//! ];
//!
//! let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
//! let (graph, partition) = pipeline
//!     .run_with_layout(&records, |graph| {
//!         // stand-in for the external layout step
//!         let ids: Vec<_> = graph.record_nodes().map(|n| n.id.clone()).collect();
//!         for (i, id) in ids.iter().enumerate() {
//!             graph.set_position(id, Position::new(i as f64, 0.0)).unwrap();
//!         }
//!     })
//!     .unwrap();
//!
//! assert_eq!(partition.len(), 2);
//! assert!(graph.contains_node(&"Asthma".into()));
//! ```

#![warn(clippy::all)]

pub mod annotate;
pub mod community;
pub mod config;
pub mod graph;
pub mod hover;
pub mod pipeline;
pub mod record;
pub mod similarity;

// Re-export main types for convenience
pub use annotate::{annotate_clusters, insert_line_breaks, AnnotateError, LabelPolicy};
pub use community::{
    build_view, detect_communities, CommunityDetector, EdgeWeighting, LouvainDetector, Partition,
};
pub use config::{ConfigError, PipelineConfig};
pub use graph::{Edge, EdgeKind, GraphError, GraphResult, Node, NodeId, NodeKind, Position, StudyGraph};
pub use hover::hover_text;
pub use pipeline::{Pipeline, PipelineError};
pub use record::{Record, RecordId, Value};
pub use similarity::build_similarity_graph;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
