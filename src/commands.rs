//! `normalize` and `check` commands.

use anyhow::Context;
use std::io::Write;
use std::path::Path;
use teamscfg_core::config::Settings;
use teamscfg_core::{document, Diagnostic, TeamsConfig};

/// Outcome of `check`, mapped to the process exit status by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    /// Cluster items were dropped and `check.deny_dropped` is set.
    DroppedItems,
}

/// Print the normalized form of the document at `path`.
pub fn normalize(path: &Path, settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(path)?.0;
    let normalized = config.to_document();
    let rendered = if settings.output.pretty {
        serde_json::to_string_pretty(&normalized)?
    } else {
        serde_json::to_string(&normalized)?
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}

/// Print a summary of the document at `path`, including dropped items.
pub fn check(
    path: &Path,
    settings: &Settings,
    out: &mut impl Write,
) -> anyhow::Result<CheckStatus> {
    let (config, diagnostics) = load_config(path)?;

    writeln!(out, "{}", path.display())?;
    match config.clustering_scheme() {
        Some(scheme) => writeln!(
            out,
            "  scheme: {scheme}, clusters: {}, enabled: {}",
            config.clusters().len(),
            config.is_enabled()
        )?,
        None => writeln!(out, "  teams disabled")?,
    }
    if let Some(max) = config.max_team_size() {
        writeln!(out, "  course max team size: {max}")?;
    }
    for cluster in config.clusters() {
        let limit = config
            .get_max_team_size_for_cluster(cluster.id())?
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string());
        writeln!(
            out,
            "  - {} ({}, {}, {}, max team size: {limit})",
            cluster.id(),
            cluster.name(),
            cluster.team_management(),
            cluster.team_visibility(),
        )?;
    }
    for diagnostic in &diagnostics {
        writeln!(out, "  dropped {diagnostic}")?;
    }

    if settings.check.deny_dropped && !diagnostics.is_empty() {
        tracing::warn!(dropped = diagnostics.len(), "check failed: cluster items were dropped");
        return Ok(CheckStatus::DroppedItems);
    }
    Ok(CheckStatus::Passed)
}

fn load_config(path: &Path) -> anyhow::Result<(TeamsConfig, Vec<Diagnostic>)> {
    let value = document::load(path)?;
    TeamsConfig::from_document_with_diagnostics(Some(&value))
        .with_context(|| format!("invalid teams configuration in {}", path.display()))
}
