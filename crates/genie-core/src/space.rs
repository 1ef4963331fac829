//! The Genie space record.

use serde::{Deserialize, Serialize};

/// A Genie space as returned by the workspace API.
///
/// Only the fields the pipeline touches are modeled. Everything else the
/// API returns lands in `extra` and round-trips untouched, so extracting
/// the serialized definition, rewriting it, and re-embedding it never
/// alters any other field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<String>,

    /// The opaque serialized definition. The pipeline never parses it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialized_space: Option<String>,

    /// Fields this tool does not understand, passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Space {
    /// A human-readable name for log lines: the title when present,
    /// otherwise the space id.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.space_id.as_deref())
            .unwrap_or("<untitled>")
    }

    /// The title to carry into a newly created space. Some API responses
    /// name the field `display_name` instead of `title`; that form lands
    /// in the pass-through map, so fall back to it.
    pub fn title_or_display_name(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or_else(|| self.extra.get("display_name").and_then(|v| v.as_str()))
    }

    /// Whether the serialized definition is missing or empty.
    pub fn has_empty_definition(&self) -> bool {
        self.serialized_space.as_deref().unwrap_or("").is_empty()
    }
}
