//! Error types for teamscfg-core.

use crate::types::ClusteringScheme;
use std::path::PathBuf;

/// A teams configuration document, or one of its clusters, could not be
/// validated.
///
/// The first three variants are document-level: the whole configuration is
/// unusable. The cluster variants are item-level: the loader drops the item
/// and keeps going, so callers of [`TeamsConfig::from_document`] only see
/// them through diagnostics. The cluster-list variants come from building
/// an [`EnabledTeams`] out of explicit clusters.
///
/// [`TeamsConfig::from_document`]: crate::TeamsConfig::from_document
/// [`EnabledTeams`]: crate::EnabledTeams
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("data to build TeamConfig must be a dict; is {found}")]
    InvalidConfigShape { found: &'static str },

    #[error("Only one of (teams, topics) may be specified.")]
    ConflictingClusterSchemes,

    #[error("topics/teamsets must be list; is {found}")]
    InvalidClusterListShape { found: &'static str },

    #[error("cluster data must be dict; is {found}")]
    InvalidClusterShape { found: &'static str },

    #[error("cluster id must be string matching {pattern}; is {found}")]
    InvalidClusterId {
        pattern: &'static str,
        found: String,
    },

    #[error("Cluster '{0}' does not exist.")]
    UnknownCluster(String),

    #[error("an enabled teams configuration needs at least one cluster")]
    EmptyClusterList,

    #[error("cluster '{cluster_id}' is one of the {found}, not one of the {expected}")]
    ClusterSchemeMismatch {
        cluster_id: String,
        expected: ClusteringScheme,
        found: ClusteringScheme,
    },

    #[error("Duplicated cluster ID: {0}")]
    DuplicateClusterId(String),
}

impl ValidationError {
    /// Whether this error invalidates a whole document rather than one item.
    pub fn is_document_level(&self) -> bool {
        matches!(
            self,
            ValidationError::InvalidConfigShape { .. }
                | ValidationError::ConflictingClusterSchemes
                | ValidationError::InvalidClusterListShape { .. }
        )
    }
}

/// A configuration document could not be read from disk.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Format {
        path: PathBuf,
        source: config::ConfigError,
    },

    #[error("unsupported document format for {path} (expected .json, .toml, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },
}
