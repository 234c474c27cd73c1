//! Normalizer — turns a loosely typed teams document into a [`TeamsConfig`].
//!
//! Problems are handled at three levels:
//!
//! 1. **Document** — the top level is not a mapping, both `topics` and
//!    `teamsets` are given, or the cluster list is not a list. The parse
//!    fails with a [`ValidationError`].
//! 2. **Item** — a cluster has a bad id or repeats an earlier id. The item is
//!    logged, recorded as a [`Diagnostic`], and dropped.
//! 3. **Field** — a cluster field has the wrong type or an unknown tag. It
//!    silently takes its fallback value (see [`Cluster`]).

use crate::cluster::Cluster;
use crate::error::ValidationError;
use crate::types::{
    clean_max_team_size, is_truthy, type_name, ClusteringScheme, Scheme, Teamsets, Topics,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

/// The raw document a configuration was parsed from.
///
/// Kept for debugging only. Its `PartialEq` always holds, so it never takes
/// part in configuration equality.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument(Option<Value>);

impl SourceDocument {
    pub fn new(value: Option<Value>) -> Self {
        Self(value)
    }

    pub fn get(&self) -> Option<&Value> {
        self.0.as_ref()
    }
}

impl PartialEq for SourceDocument {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// The clusters and limits of a course with teams turned on.
///
/// `S` fixes the clustering scheme, so topics and teamsets cannot be mixed
/// up. A value always holds at least one cluster, all of scheme `S`, with
/// unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct EnabledTeams<S: Scheme> {
    clusters: Vec<Cluster>,
    max_team_size: Option<u64>,
    source: SourceDocument,
    scheme: PhantomData<S>,
}

impl<S: Scheme> EnabledTeams<S> {
    /// Bundle explicit clusters with a course-level size limit.
    ///
    /// Fails on an empty list, on a cluster of the other scheme, and on a
    /// repeated id.
    pub fn new(
        clusters: Vec<Cluster>,
        max_team_size: Option<u64>,
    ) -> Result<Self, ValidationError> {
        if clusters.is_empty() {
            return Err(ValidationError::EmptyClusterList);
        }
        let mut seen = HashSet::new();
        for cluster in &clusters {
            if cluster.scheme() != S::SCHEME {
                return Err(ValidationError::ClusterSchemeMismatch {
                    cluster_id: cluster.id().to_string(),
                    expected: S::SCHEME,
                    found: cluster.scheme(),
                });
            }
            if !seen.insert(cluster.id()) {
                return Err(ValidationError::DuplicateClusterId(cluster.id().to_string()));
            }
        }
        Ok(Self {
            clusters,
            max_team_size,
            source: SourceDocument::default(),
            scheme: PhantomData,
        })
    }

    pub fn with_source(mut self, source: Value) -> Self {
        self.source = SourceDocument::new(Some(source));
        self
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn max_team_size(&self) -> Option<u64> {
        self.max_team_size
    }

    fn to_document(&self) -> Value {
        let clusters: Vec<Value> = self.clusters.iter().map(Cluster::to_document).collect();
        json!({
            S::SCHEME.as_str(): clusters,
            "max_team_size": self.max_team_size,
        })
    }
}

/// Teams configuration for a course.
///
/// Equality compares effective values only: the variant, the clusters in
/// order, and the course-level `max_team_size`. The source document is
/// ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum TeamsConfig {
    Disabled(SourceDocument),
    EnabledWithTopics(EnabledTeams<Topics>),
    EnabledWithTeamsets(EnabledTeams<Teamsets>),
}

/// Why the loader dropped a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    Invalid(ValidationError),
    Duplicate,
}

/// One cluster item dropped while loading a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position of the item in the input list.
    pub index: usize,
    /// The item's id, when it had a usable one.
    pub cluster_id: Option<String>,
    pub reason: DropReason,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.reason, &self.cluster_id) {
            (DropReason::Invalid(err), _) => write!(f, "item {}: {err}", self.index),
            (DropReason::Duplicate, Some(id)) => {
                write!(f, "item {}: duplicated cluster id {id:?}", self.index)
            }
            (DropReason::Duplicate, None) => {
                write!(f, "item {}: duplicated cluster id", self.index)
            }
        }
    }
}

impl TeamsConfig {
    /// Teams turned off, with no source document.
    pub fn disabled() -> Self {
        TeamsConfig::Disabled(SourceDocument::default())
    }

    /// Topics configuration from explicit clusters. See [`EnabledTeams::new`].
    pub fn with_topics(
        clusters: Vec<Cluster>,
        max_team_size: Option<u64>,
    ) -> Result<Self, ValidationError> {
        EnabledTeams::new(clusters, max_team_size)
            .map(TeamsConfig::EnabledWithTopics)
    }

    /// Teamsets configuration from explicit clusters. See [`EnabledTeams::new`].
    pub fn with_teamsets(
        clusters: Vec<Cluster>,
        max_team_size: Option<u64>,
    ) -> Result<Self, ValidationError> {
        EnabledTeams::new(clusters, max_team_size)
            .map(TeamsConfig::EnabledWithTeamsets)
    }

    /// Build a configuration from an optional document.
    ///
    /// `None` and JSON `null` both mean "no configuration". Malformed cluster
    /// items are dropped; only document-level problems are errors.
    pub fn from_document(data: Option<&Value>) -> Result<Self, ValidationError> {
        Self::from_document_with_diagnostics(data).map(|(config, _)| config)
    }

    /// Like [`from_document`](Self::from_document), also returning every
    /// cluster item that was dropped.
    pub fn from_document_with_diagnostics(
        data: Option<&Value>,
    ) -> Result<(Self, Vec<Diagnostic>), ValidationError> {
        let mut diagnostics = Vec::new();
        let (source, map) = match data {
            None | Some(Value::Null) => return Ok((Self::disabled(), diagnostics)),
            Some(source @ Value::Object(map)) => (source, map),
            Some(other) => {
                return Err(ValidationError::InvalidConfigShape {
                    found: type_name(other),
                })
            }
        };

        let max_team_size = clean_max_team_size(map.get("max_team_size"));
        let topics = specified(map, ClusteringScheme::Topics);
        let teamsets = specified(map, ClusteringScheme::Teamsets);

        let (scheme, clusters_data) = match (topics, teamsets) {
            (Some(_), Some(_)) => return Err(ValidationError::ConflictingClusterSchemes),
            (Some(data), None) => (ClusteringScheme::Topics, data),
            (None, Some(data)) => (ClusteringScheme::Teamsets, data),
            (None, None) => {
                tracing::debug!("no clusters specified; teams disabled");
                return Ok((Self::source_disabled(source), diagnostics));
            }
        };

        let clusters = load_clusters(scheme, clusters_data, &mut diagnostics)?;
        if clusters.is_empty() {
            tracing::debug!(scheme = %scheme, "no valid clusters; teams disabled");
            return Ok((Self::source_disabled(source), diagnostics));
        }

        tracing::debug!(scheme = %scheme, clusters = clusters.len(), "teams enabled");
        let config = match scheme {
            ClusteringScheme::Topics => TeamsConfig::EnabledWithTopics(
                EnabledTeams::<Topics>::new(clusters, max_team_size)?
                    .with_source(source.clone()),
            ),
            ClusteringScheme::Teamsets => TeamsConfig::EnabledWithTeamsets(
                EnabledTeams::<Teamsets>::new(clusters, max_team_size)?
                    .with_source(source.clone()),
            ),
        };
        Ok((config, diagnostics))
    }

    fn source_disabled(source: &Value) -> Self {
        TeamsConfig::Disabled(SourceDocument::new(Some(source.clone())))
    }

    /// Parse a JSON string; an empty or `null` document is disabled.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::disabled());
        }
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_document(Some(&value))?)
    }

    /// Whether the teams feature is on for the course.
    ///
    /// Teamsets are not supported by the rest of the platform yet, so a
    /// teamset configuration reports `false` even though it parsed.
    pub fn is_enabled(&self) -> bool {
        match self {
            TeamsConfig::EnabledWithTopics(_) => true,
            TeamsConfig::Disabled(_) | TeamsConfig::EnabledWithTeamsets(_) => false,
        }
    }

    pub fn clustering_scheme(&self) -> Option<ClusteringScheme> {
        match self {
            TeamsConfig::Disabled(_) => None,
            TeamsConfig::EnabledWithTopics(_) => Some(Topics::SCHEME),
            TeamsConfig::EnabledWithTeamsets(_) => Some(Teamsets::SCHEME),
        }
    }

    /// Clusters in document order; empty when disabled.
    pub fn clusters(&self) -> &[Cluster] {
        match self {
            TeamsConfig::Disabled(_) => &[],
            TeamsConfig::EnabledWithTopics(teams) => teams.clusters(),
            TeamsConfig::EnabledWithTeamsets(teams) => teams.clusters(),
        }
    }

    pub fn clusters_by_id(&self) -> HashMap<&str, &Cluster> {
        self.clusters().iter().map(|c| (c.id(), c)).collect()
    }

    pub fn cluster(&self, cluster_id: &str) -> Option<&Cluster> {
        self.clusters().iter().find(|c| c.id() == cluster_id)
    }

    /// Course-level team size limit, used by clusters without their own.
    pub fn max_team_size(&self) -> Option<u64> {
        match self {
            TeamsConfig::Disabled(_) => None,
            TeamsConfig::EnabledWithTopics(teams) => teams.max_team_size(),
            TeamsConfig::EnabledWithTeamsets(teams) => teams.max_team_size(),
        }
    }

    /// Effective team size limit for one cluster, or `None` for no limit.
    ///
    /// Instructor-managed clusters have no limit. Otherwise the cluster's own
    /// limit wins (zero included), then the course-level one.
    pub fn get_max_team_size_for_cluster(
        &self,
        cluster_id: &str,
    ) -> Result<Option<u64>, ValidationError> {
        let cluster = self
            .cluster(cluster_id)
            .ok_or_else(|| ValidationError::UnknownCluster(cluster_id.to_string()))?;
        if !cluster.team_management().team_size_limit_enabled() {
            return Ok(None);
        }
        Ok(cluster.max_team_size().or(self.max_team_size()))
    }

    /// The document this configuration was parsed from, if any.
    pub fn source_document(&self) -> Option<&Value> {
        match self {
            TeamsConfig::Disabled(source) => source.get(),
            TeamsConfig::EnabledWithTopics(teams) => teams.source.get(),
            TeamsConfig::EnabledWithTeamsets(teams) => teams.source.get(),
        }
    }

    /// Serialize the effective configuration. `from_document` on the result
    /// gives back an equal configuration.
    pub fn to_document(&self) -> Value {
        match self {
            TeamsConfig::Disabled(_) => Value::Object(Map::new()),
            TeamsConfig::EnabledWithTopics(teams) => teams.to_document(),
            TeamsConfig::EnabledWithTeamsets(teams) => teams.to_document(),
        }
    }
}

impl Default for TeamsConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Serialize for TeamsConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TeamsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        TeamsConfig::from_document(Some(&value)).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Cluster loading
// ---------------------------------------------------------------------------

fn specified(map: &Map<String, Value>, scheme: ClusteringScheme) -> Option<&Value> {
    map.get(scheme.as_str()).filter(|v| is_truthy(v))
}

/// Load an ordered, duplicate-free list of clusters, dropping bad items.
fn load_clusters(
    scheme: ClusteringScheme,
    data: &Value,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Cluster>, ValidationError> {
    let Value::Array(items) = data else {
        return Err(ValidationError::InvalidClusterListShape {
            found: type_name(data),
        });
    };

    let mut clusters = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        let cluster = match Cluster::from_document(scheme, item) {
            Ok(cluster) => cluster,
            Err(err) => {
                tracing::warn!(
                    index,
                    error = %err,
                    "error while parsing team cluster; skipping cluster"
                );
                diagnostics.push(Diagnostic {
                    index,
                    cluster_id: item
                        .get("id")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    reason: DropReason::Invalid(err),
                });
                continue;
            }
        };
        if !seen.insert(cluster.id().to_string()) {
            tracing::error!(
                index,
                cluster_id = %cluster.id(),
                "duplicated cluster id; ignoring all clusters except first with id"
            );
            diagnostics.push(Diagnostic {
                index,
                cluster_id: Some(cluster.id().to_string()),
                reason: DropReason::Duplicate,
            });
            continue;
        }
        clusters.push(cluster);
    }
    Ok(clusters)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
