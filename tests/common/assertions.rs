//! Domain-specific assertion macros for teamscfg harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! normalizer rule was violated.

/// Assert that a configuration serializes to the expected document.
///
/// ```rust
/// assert_document!(config, json!({}));
/// ```
#[macro_export]
macro_rules! assert_document {
    ($config:expr, $expected:expr) => {{
        let config: &teamscfg_core::TeamsConfig = &$config;
        let expected: serde_json::Value = $expected;
        pretty_assertions::assert_eq!(
            config.to_document(),
            expected,
            "normalized document mismatch"
        );
    }};
}

/// Assert that parsing a document fails with a message containing a snippet.
///
/// ```rust
/// assert_rejected!(json!("not-a-dict"), "must be a dict");
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($document:expr, $snippet:expr) => {{
        let document: serde_json::Value = $document;
        let snippet: &str = $snippet;
        match teamscfg_core::TeamsConfig::from_document(Some(&document)) {
            Err(err) if err.to_string().contains(snippet) => {
                assert!(err.is_document_level(), "expected a document-level error, got {err:?}");
            }
            Err(err) => panic!(
                "assert_rejected! failed:\n  expected message containing: {:?}\n  actual: {}",
                snippet, err
            ),
            Ok(config) => panic!(
                "assert_rejected! failed: document was accepted.\n  document: {}\n  parsed: {:?}",
                document, config
            ),
        }
    }};
}

/// Assert that a configuration holds exactly the given cluster ids, in order.
#[macro_export]
macro_rules! assert_cluster_ids {
    ($config:expr, [$($id:expr),* $(,)?]) => {{
        let config: &teamscfg_core::TeamsConfig = &$config;
        let actual: Vec<&str> = config.clusters().iter().map(|c| c.id()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "cluster ids mismatch");
    }};
}
