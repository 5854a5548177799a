//! Per-call options for `trackChanges`.

use super::category::Category;
use std::collections::HashMap;

/// Options for one [`super::diff::track_changes`] call. Explicit structure
/// rather than an arbitrary options bag.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TrackChangesOptions {
    pub url: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub custom_field_mappings: HashMap<String, Category>,
    #[serde(default)]
    pub ignore_fields: Vec<String>,
    #[serde(default)]
    pub only_fields: Vec<String>,
}

impl Default for TrackChangesOptions {
    fn default() -> Self {
        Self {
            url: None,
            language: default_language(),
            custom_field_mappings: HashMap::new(),
            ignore_fields: Vec::new(),
            only_fields: Vec::new(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}
