//! teamscfg-core — course teams configuration.
//!
//! A course's teams feature is described by a small document listing either
//! *topics* or *teamsets* (collectively, clusters) plus an optional
//! course-wide team size limit. This crate parses such documents into a
//! validated [`TeamsConfig`], and serializes them back in normalized form.
//!
//! # Pipeline
//!
//! ```text
//! document::load ──► TeamsConfig::from_document ──► TeamsConfig::to_document
//!  (json/toml/yaml)        │
//!                          └──► Cluster::from_document (per item)
//! ```
//!
//! Everything here is pure and synchronous; configurations are immutable
//! values.

pub mod cluster;
pub mod config;
pub mod document;
pub mod error;
pub mod normalizer;
pub mod types;

pub use cluster::{Cluster, ClusterBuilder, CLUSTER_ID_PATTERN};
pub use error::{DocumentError, ValidationError};
pub use normalizer::{Diagnostic, DropReason, EnabledTeams, SourceDocument, TeamsConfig};
pub use types::{ClusteringScheme, Scheme, TeamManagement, TeamVisibility, Teamsets, Topics};
