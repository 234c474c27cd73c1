//! Reading teams documents from disk.
//!
//! JSON goes straight through `serde_json` so integers and `null` survive
//! untouched. TOML and YAML are read with the `config` crate and converted to
//! a [`serde_json::Value`], giving the normalizer one input type regardless
//! of format.

use crate::error::DocumentError;
use config::{Config, File, FileFormat};
use serde_json::Value;
use std::path::Path;

/// Read the document at `path`, choosing the format from its extension.
///
/// TOML and YAML roots must be mappings. A YAML list or scalar root fails
/// here with [`DocumentError::Format`], so only JSON documents reach the
/// normalizer's own "must be a dict" check.
///
/// YAML integers above `i64::MAX` come back as floats, which the normalizer
/// does not accept as a team size limit, so such a `max_team_size` is dropped.
pub fn load(path: &Path) -> Result<Value, DocumentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let format = match extension.as_deref() {
        Some("json") => return load_json(path),
        Some("toml") => FileFormat::Toml,
        Some("yaml" | "yml") => FileFormat::Yaml,
        _ => {
            return Err(DocumentError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let text = read(path)?;
    Config::builder()
        .add_source(File::from_str(&text, format))
        .build()
        .and_then(|config| config.try_deserialize::<Value>())
        .map_err(|source| DocumentError::Format {
            path: path.to_path_buf(),
            source,
        })
}

fn load_json(path: &Path) -> Result<Value, DocumentError> {
    let text = read(path)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|source| DocumentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, DocumentError> {
    std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
