//! Test builders — shorthand constructors for clusters and configurations.
//!
//! These panic on invalid input rather than returning `Result`: a bad id, an
//! empty cluster list, a cluster of the wrong scheme, or a repeated id.

use serde_json::Value;
use teamscfg_core::{Cluster, ClusterBuilder, TeamsConfig};

/// Build a cluster, panicking if the id is invalid.
pub fn cluster(builder: ClusterBuilder) -> Cluster {
    builder.build().expect("test cluster must have a valid id")
}

/// A topics configuration from explicit clusters.
pub fn topics_config(clusters: Vec<Cluster>, max_team_size: Option<u64>) -> TeamsConfig {
    TeamsConfig::with_topics(clusters, max_team_size)
        .unwrap_or_else(|err| panic!("test topics must form a valid configuration: {err}"))
}

/// A teamsets configuration from explicit clusters.
pub fn teamsets_config(clusters: Vec<Cluster>, max_team_size: Option<u64>) -> TeamsConfig {
    TeamsConfig::with_teamsets(clusters, max_team_size)
        .unwrap_or_else(|err| panic!("test teamsets must form a valid configuration: {err}"))
}

/// Parse a document, panicking on document-level errors.
pub fn parse(document: &Value) -> TeamsConfig {
    TeamsConfig::from_document(Some(document))
        .unwrap_or_else(|err| panic!("document should parse: {err}\n{document:#}"))
}
