//! Pipeline orchestration
//!
//! Batch driver over the core stages: build the similarity graph, partition
//! it into communities, and annotate the clusters. Annotation consumes the
//! positions an external layout step assigned between stages.

use crate::annotate::{annotate_clusters, AnnotateError};
use crate::community::{detect_communities, CommunityDetector, LouvainDetector, Partition};
use crate::config::{ConfigError, PipelineConfig};
use crate::graph::{GraphError, StudyGraph};
use crate::record::Record;
use crate::similarity::build_similarity_graph;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by pipeline runs
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}

/// The clustering-and-annotation pipeline.
///
/// Runs to completion synchronously; an empty record sequence yields an
/// empty graph rather than an error.
pub struct Pipeline {
    config: PipelineConfig,
    detector: Box<dyn CommunityDetector>,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration up front
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Pipeline {
            config,
            detector: Box::new(LouvainDetector::default()),
        })
    }

    /// Swap in a different community-detection strategy
    pub fn with_detector(mut self, detector: Box<dyn CommunityDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Stage 1: nodes, similarity edges, and hover text
    pub fn build_graph(&self, records: &[Record]) -> Result<StudyGraph, PipelineError> {
        info!(records = records.len(), "building similarity graph");
        Ok(build_similarity_graph(records, &self.config)?)
    }

    /// Stage 2: community detection over record nodes and similarity edges
    pub fn detect(&self, graph: &StudyGraph) -> Partition {
        detect_communities(graph, self.config.weighting, self.detector.as_ref())
    }

    /// Stage 3: cluster-label synthesis. Record nodes must have positions.
    pub fn annotate(
        &self,
        graph: &mut StudyGraph,
        partition: &Partition,
    ) -> Result<usize, PipelineError> {
        Ok(annotate_clusters(
            graph,
            partition,
            &self.config.label_policy,
            self.config.wrap_width,
        )?)
    }

    /// Run all stages, invoking `layout` between detection and annotation so
    /// the caller can assign positions to record nodes.
    pub fn run_with_layout<F>(
        &self,
        records: &[Record],
        layout: F,
    ) -> Result<(StudyGraph, Partition), PipelineError>
    where
        F: FnOnce(&mut StudyGraph),
    {
        let mut graph = self.build_graph(records)?;
        let partition = self.detect(&graph);
        layout(&mut graph);
        self.annotate(&mut graph, &partition)?;
        Ok((graph, partition))
    }
}
