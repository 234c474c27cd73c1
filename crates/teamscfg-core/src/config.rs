//! Settings for the teamscfg tool.
//!
//! [`Settings::load`] reads `~/.config/teamscfg/config.toml` (or an explicit
//! path) layered on top of the built-in defaults. [`Settings::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_SETTINGS: &str = r#"
[output]
pretty = true

[logging]
filter = "warn"

[check]
deny_dropped = false
"#;

// ---------------------------------------------------------------------------
// Public settings types
// ---------------------------------------------------------------------------

/// Top-level tool settings, loaded from `~/.config/teamscfg/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub check: CheckSettings,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print normalized documents instead of one compact line.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool { true }

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String { "warn".to_string() }

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// `[check]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckSettings {
    /// Treat dropped cluster items as a failed check.
    #[serde(default)]
    pub deny_dropped: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Settings {
    /// Load settings layered on top of the built-in defaults.
    ///
    /// An explicit `path` must exist. Without one, the user file is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let user_file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(settings_path().as_path()).required(false),
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .add_source(user_file)
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .build()
            .expect("built-in default settings must be valid TOML")
            .try_deserialize()
            .expect("built-in default settings must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn settings_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("teamscfg")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
