//! Pipeline configuration

use crate::annotate::LabelPolicy;
use crate::community::EdgeWeighting;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("wrap width must be positive")]
    ZeroWrapWidth,
}

/// Pipeline configuration
///
/// Defaults follow the clinical-registry document schema
/// (`FullStudy/Study/...`); callers with differently shaped records override
/// the paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Key deep-searched for the similarity attribute (e.g. "Condition")
    pub attribute_key: String,

    /// Fixed path to the organizing attribute used for node labels and sizes
    pub organizing_path: Vec<String>,

    /// Fixed path to the last-update date for hover text
    pub last_update_path: Vec<String>,

    /// Fixed path to the brief title for hover text
    pub title_path: Vec<String>,

    /// Fixed path to the brief summary for hover text
    pub summary_path: Vec<String>,

    /// Soft line-wrap window for cluster labels, in characters
    pub wrap_width: usize,

    /// Cluster label strategy
    pub label_policy: LabelPolicy,

    /// Edge weighting handed to the community partitioner
    pub weighting: EdgeWeighting,

    /// Evaluate the pairwise similarity scan on the rayon thread pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let path = |keys: &[&str]| keys.iter().map(|k| k.to_string()).collect();
        Self {
            attribute_key: "Condition".to_string(),
            organizing_path: path(&[
                "FullStudy",
                "Study",
                "ProtocolSection",
                "IdentificationModule",
                "Organization",
                "OrgFullName",
            ]),
            last_update_path: path(&[
                "FullStudy",
                "Study",
                "StatusModule",
                "LastUpdatePostDateStruct",
                "LastUpdatePostDate",
            ]),
            title_path: path(&[
                "FullStudy",
                "Study",
                "ProtocolSection",
                "IdentificationModule",
                "BriefTitle",
            ]),
            summary_path: path(&["FullStudy", "Study", "DescriptionModule", "BriefSummary"]),
            wrap_width: 50,
            label_policy: LabelPolicy::default(),
            weighting: EdgeWeighting::default(),
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attribute_key.trim().is_empty() {
            return Err(ConfigError::EmptyField("attribute_key"));
        }
        if self.organizing_path.is_empty() {
            return Err(ConfigError::EmptyField("organizing_path"));
        }
        if self.last_update_path.is_empty() {
            return Err(ConfigError::EmptyField("last_update_path"));
        }
        if self.title_path.is_empty() {
            return Err(ConfigError::EmptyField("title_path"));
        }
        if self.summary_path.is_empty() {
            return Err(ConfigError::EmptyField("summary_path"));
        }
        if self.wrap_width == 0 {
            return Err(ConfigError::ZeroWrapWidth);
        }
        if let LabelPolicy::TopK { k: 0 } = self.label_policy {
            return Err(ConfigError::EmptyField("label_policy.k"));
        }
        Ok(())
    }
}
