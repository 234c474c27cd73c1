//! Static teams documents used across harnesses.
//!
//! Each `input_*` function has a matching `output_*` holding the document the
//! normalizer must produce for it.

use serde_json::{json, Value};

/// Topics with a course-level limit, an instructor-managed topic, and a
/// duplicated id.
pub fn input_topics() -> Value {
    json!({
        "max_team_size": 5,
        "topics": [
            {
                "id": "bananas",
                "max_team_size": 10,
                "team_management": "student",
                "team_visibility": "private",
            },
            {
                "id": "bokonism",
                "name": "BOKONISM",
                "description": "Busy busy busy",
                "team_management": "instructor",
                // Ignored: instructor-managed.
                "max_team_size": 2,
            },
            {
                // Dropped: duplicate id.
                "id": "bananas",
                "name": "All about Bananas",
                "description": "Not to be confused with bandanas",
            },
        ],
    })
}

pub fn output_topics() -> Value {
    json!({
        "max_team_size": 5,
        "topics": [
            {
                "id": "bananas",
                "name": "bananas",
                "description": "",
                "max_team_size": 10,
                "team_management": "student",
                "team_visibility": "private",
            },
            {
                "id": "bokonism",
                "name": "BOKONISM",
                "description": "Busy busy busy",
                "max_team_size": null,
                "team_management": "instructor",
                "team_visibility": "public",
            },
        ],
    })
}

/// Teamsets where every item but one has a bad id, and the survivor has
/// garbage in every other field.
pub fn input_teamsets() -> Value {
    json!({
        "teamsets": [
            // Dropped: no id.
            { "name": "Assignment about existence" },
            // Dropped: id is not a string.
            { "id": ["not", "a", "string"], "name": "Assignment about strings" },
            // Dropped: id is not a slug.
            { "id": "Not a slug.", "name": "Assignment about slugs" },
            {
                "id": "horses",
                "name": ["assignment", "about", "horses"],
                "description": { "not": "a string" },
                "max_team_size": -1000,
                "team_management": "matrix",
                "team_visibility": "",
                "extra_key": "Should be ignored",
            },
        ],
    })
}

pub fn output_teamsets() -> Value {
    json!({
        "max_team_size": null,
        "teamsets": [
            {
                "id": "horses",
                "name": "horses",
                "description": "",
                "max_team_size": null,
                "team_management": "student",
                "team_visibility": "public",
            },
        ],
    })
}

/// The topics fixture as a TOML document, for file-loading tests.
pub const TOPICS_TOML: &str = r#"
max_team_size = 5

[[topics]]
id = "bananas"
max_team_size = 10
team_management = "student"
team_visibility = "private"

[[topics]]
id = "bokonism"
name = "BOKONISM"
description = "Busy busy busy"
team_management = "instructor"
max_team_size = 2

[[topics]]
id = "bananas"
name = "All about Bananas"
description = "Not to be confused with bandanas"
"#;
