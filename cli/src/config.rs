//! TOML configuration loading for the three store configs.

use anyhow::{Context, Result};
use browse_memory_core::config::{ChangeTrackerConfig, OrchestratorConfig, ProceduralMemoryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The union of all three store configurations as loaded from one TOML
/// file. Each section is optional and falls back to its own `Default`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub memory: ProceduralMemoryConfig,
    pub orchestrator: OrchestratorConfig,
    pub change_tracker: ChangeTrackerConfig,
}

impl AppConfig {
    /// Load from `path` if given, otherwise use all-default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}
