//! Core enums for teamscfg-core.
//!
//! This module defines the small closed value sets a teams configuration is
//! built from: the [`ClusteringScheme`] a course uses, and the per-cluster
//! [`TeamManagement`] and [`TeamVisibility`] modes. Each enum serializes to a
//! lowercase string tag and has a default used when a document carries an
//! unrecognized value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// The scheme with which a course's teams are divided into clusters.
///
/// Under `Topics`, each cluster is a topic: teams formed to discuss some
/// subject, and a student may join one team per course. Under `Teamsets`,
/// each cluster is a teamset: teams formed to complete a set of assignments,
/// and a student may join one team per teamset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusteringScheme {
    #[default]
    Topics,
    Teamsets,
}

impl ClusteringScheme {
    /// String tag, also used as the document key holding the cluster list.
    pub fn as_str(self) -> &'static str {
        match self {
            ClusteringScheme::Topics => "topics",
            ClusteringScheme::Teamsets => "teamsets",
        }
    }
}

/// Type-level clustering scheme, fixing which clusters an
/// [`EnabledTeams`](crate::EnabledTeams) may hold.
pub trait Scheme: sealed::Sealed + std::fmt::Debug + Clone + PartialEq {
    const SCHEME: ClusteringScheme;
}

mod sealed {
    pub trait Sealed {}
}

/// Marker for [`ClusteringScheme::Topics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topics {}

/// Marker for [`ClusteringScheme::Teamsets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teamsets {}

impl sealed::Sealed for Topics {}
impl sealed::Sealed for Teamsets {}

impl Scheme for Topics {
    const SCHEME: ClusteringScheme = ClusteringScheme::Topics;
}

impl Scheme for Teamsets {
    const SCHEME: ClusteringScheme = ClusteringScheme::Teamsets;
}

/// Who manages team membership within a cluster.
///
/// Under `Instructor`, only course staff create teams and assign members.
/// Under `Student`, learners freely create, join, and leave teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamManagement {
    Instructor,
    #[default]
    Student,
}

impl TeamManagement {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamManagement::Instructor => "instructor",
            TeamManagement::Student => "student",
        }
    }

    /// Team size limits only apply to student-managed teams.
    pub fn team_size_limit_enabled(self) -> bool {
        self == TeamManagement::Student
    }
}

/// Who can see team details and discussions within a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamVisibility {
    /// Any enrolled learner.
    #[default]
    Public,
    /// Team members and course staff only.
    Private,
}

impl TeamVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamVisibility::Public => "public",
            TeamVisibility::Private => "private",
        }
    }
}

impl std::fmt::Display for ClusteringScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for TeamManagement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for TeamVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by the `FromStr` impls when a tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} tag: {tag:?}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub tag: String,
}

impl FromStr for ClusteringScheme {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topics" => Ok(ClusteringScheme::Topics),
            "teamsets" => Ok(ClusteringScheme::Teamsets),
            _ => Err(UnknownTag {
                kind: "clustering scheme",
                tag: s.to_string(),
            }),
        }
    }
}

impl FromStr for TeamManagement {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instructor" => Ok(TeamManagement::Instructor),
            "student" => Ok(TeamManagement::Student),
            _ => Err(UnknownTag {
                kind: "team management",
                tag: s.to_string(),
            }),
        }
    }
}

impl FromStr for TeamVisibility {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(TeamVisibility::Public),
            "private" => Ok(TeamVisibility::Private),
            _ => Err(UnknownTag {
                kind: "team visibility",
                tag: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Field cleaning
// ---------------------------------------------------------------------------

/// Parse a raw document value into `T`, or fall back to `T::default()`.
///
/// Anything that is not a string holding a recognized tag falls back.
pub(crate) fn clean_enum<T>(value: Option<&Value>) -> T
where
    T: FromStr + Default,
{
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Return `value` if it is a non-negative integer, otherwise `None`.
///
/// Booleans and floats are not integers here, even when they look like one.
pub(crate) fn clean_max_team_size(value: Option<&Value>) -> Option<u64> {
    value.and_then(Value::as_u64)
}

/// Short type name of a document value, for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Whether a value counts as "specified" in a document: not null, not false,
/// not zero, and not an empty string, list, or mapping.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
