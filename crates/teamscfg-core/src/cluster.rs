//! Clusters — the topics or teamsets a course's teams are grouped into.
//!
//! A [`Cluster`] is built either from an untrusted document mapping with
//! [`Cluster::from_document`] or from explicit values with
//! [`Cluster::builder`]. Both paths apply the same fallback rules once, at
//! construction, so two clusters compare equal exactly when their effective
//! values match, however they were spelled on input.

use crate::error::ValidationError;
use crate::types::{
    clean_enum, clean_max_team_size, type_name, ClusteringScheme, TeamManagement, TeamVisibility,
};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;

/// Characters allowed in a cluster id, which doubles as a URL slug.
pub const CLUSTER_ID_PATTERN: &str = "[A-Za-z0-9_-]+";

static CLUSTER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{CLUSTER_ID_PATTERN}$")).expect("valid id pattern"));

/// Check that `id` fully matches [`CLUSTER_ID_PATTERN`].
pub fn validate_cluster_id(id: &str) -> Result<(), ValidationError> {
    if CLUSTER_ID_RE.is_match(id) {
        Ok(())
    } else {
        Err(invalid_id(id))
    }
}

fn invalid_id(found: impl std::fmt::Display) -> ValidationError {
    ValidationError::InvalidClusterId {
        pattern: CLUSTER_ID_PATTERN,
        found: found.to_string(),
    }
}

/// A set of teams within a course, with the constraints on those teams.
///
/// Every field holds its effective value:
///
/// - `name` falls back to the id,
/// - `description` falls back to `""`,
/// - `max_team_size` is `None` when absent, invalid, or when teams are
///   instructor-managed,
/// - `team_management` and `team_visibility` fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    scheme: ClusteringScheme,
    id: String,
    name: String,
    description: String,
    max_team_size: Option<u64>,
    team_management: TeamManagement,
    team_visibility: TeamVisibility,
}

impl Cluster {
    /// Start a topic with the given id.
    pub fn topic(id: impl Into<String>) -> ClusterBuilder {
        Self::builder(ClusteringScheme::Topics, id)
    }

    /// Start a teamset with the given id.
    pub fn teamset(id: impl Into<String>) -> ClusterBuilder {
        Self::builder(ClusteringScheme::Teamsets, id)
    }

    pub fn builder(scheme: ClusteringScheme, id: impl Into<String>) -> ClusterBuilder {
        ClusterBuilder {
            scheme,
            id: id.into(),
            name: None,
            description: None,
            max_team_size: None,
            team_management: None,
            team_visibility: None,
        }
    }

    /// Parse a cluster of the given scheme from a document mapping.
    ///
    /// Unknown keys are ignored and malformed optional fields fall back to
    /// their defaults. Only a non-mapping item or a bad id is an error.
    pub fn from_document(scheme: ClusteringScheme, data: &Value) -> Result<Self, ValidationError> {
        let Value::Object(map) = data else {
            return Err(ValidationError::InvalidClusterShape {
                found: type_name(data),
            });
        };

        let id = match map.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(other) => return Err(invalid_id(other)),
            None => return Err(invalid_id("missing")),
        };

        let mut builder = Self::builder(scheme, id);
        builder.name = map.get("name").and_then(Value::as_str).map(str::to_string);
        builder.description = map.get("description").and_then(Value::as_str).map(str::to_string);
        builder.max_team_size = clean_max_team_size(map.get("max_team_size"));
        builder.team_management = Some(clean_enum(map.get("team_management")));
        builder.team_visibility = Some(clean_enum(map.get("team_visibility")));
        builder.build()
    }

    /// Serialize the effective values back to a document mapping.
    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "max_team_size": self.max_team_size,
            "team_management": self.team_management.as_str(),
            "team_visibility": self.team_visibility.as_str(),
        })
    }

    pub fn scheme(&self) -> ClusteringScheme {
        self.scheme
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cluster-level team size limit. Always `None` for instructor-managed
    /// teams.
    pub fn max_team_size(&self) -> Option<u64> {
        self.max_team_size
    }

    pub fn team_management(&self) -> TeamManagement {
        self.team_management
    }

    pub fn team_visibility(&self) -> TeamVisibility {
        self.team_visibility
    }

    pub fn are_team_discussions_private(&self) -> bool {
        self.team_visibility == TeamVisibility::Private
    }
}

/// Explicit-value constructor for [`Cluster`]. Unset fields take the same
/// fallbacks as a document that omits them.
#[derive(Debug, Clone)]
pub struct ClusterBuilder {
    scheme: ClusteringScheme,
    id: String,
    name: Option<String>,
    description: Option<String>,
    max_team_size: Option<u64>,
    team_management: Option<TeamManagement>,
    team_visibility: Option<TeamVisibility>,
}

impl ClusterBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn max_team_size(mut self, max_team_size: u64) -> Self {
        self.max_team_size = Some(max_team_size);
        self
    }

    pub fn team_management(mut self, team_management: TeamManagement) -> Self {
        self.team_management = Some(team_management);
        self
    }

    pub fn team_visibility(mut self, team_visibility: TeamVisibility) -> Self {
        self.team_visibility = Some(team_visibility);
        self
    }

    /// Validate the id and resolve every field to its effective value.
    pub fn build(self) -> Result<Cluster, ValidationError> {
        validate_cluster_id(&self.id)?;

        let team_management = self.team_management.unwrap_or_default();
        let max_team_size = if team_management.team_size_limit_enabled() {
            self.max_team_size
        } else {
            None
        };
        let name = self.name.filter(|n| !n.is_empty()).unwrap_or_else(|| self.id.clone());

        Ok(Cluster {
            scheme: self.scheme,
            id: self.id,
            name,
            description: self.description.unwrap_or_default(),
            max_team_size,
            team_management,
            team_visibility: self.team_visibility.unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
