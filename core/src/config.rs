//! Per-store configuration structures.
//!
//! Each store owns one configuration struct with a `Default` matching the
//! documented defaults. Deserialization via `serde` rejects unrecognized
//! keys (`deny_unknown_fields`) instead of silently ignoring typos in a
//! config file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the Procedural Memory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProceduralMemoryConfig {
    /// Embedding vector length; must match the kernel's slot layout (64).
    pub embedding_dim: usize,
    /// Minimum cosine similarity for retrieval consideration.
    pub similarity_threshold: f32,
    /// LRU-score eviction trigger.
    pub max_skills: usize,
    /// Minimum actions in a trajectory to consider learning from it.
    pub min_trajectory_length: usize,
    /// Cosine above which a new trajectory merges into an existing skill.
    pub merge_threshold: f32,
    /// Persistence location for the Memory Store document.
    pub file_path: PathBuf,
    /// Per-skill version ring capacity.
    pub max_versions_per_skill: usize,
    /// Feedback log cap (trimmed at 2x before capping to this value).
    pub max_feedback_log_size: usize,
    /// Success-rate drop that triggers an auto-rollback suggestion.
    pub auto_rollback_threshold: f32,
    /// Days of inactivity after which decay is applied to a skill.
    pub decay_after_days: i64,
    /// Fractional decay applied per week overdue.
    pub decay_rate: f32,
    /// Minimum uses before a skill is eligible for degraded-state pruning.
    pub min_uses: u32,
    /// Minimum success rate before a skill is eligible for pruning.
    pub min_success_rate: f32,
    /// Consecutive trajectory failures before prune is reconsidered.
    pub max_trajectory_buffer: usize,
}

impl Default for ProceduralMemoryConfig {
    fn default() -> Self {
        Self {
            embedding_dim: 64,
            similarity_threshold: 0.70,
            max_skills: 1000,
            min_trajectory_length: 2,
            merge_threshold: 0.90,
            file_path: PathBuf::from("procedural_memory.json"),
            max_versions_per_skill: 10,
            max_feedback_log_size: 500,
            auto_rollback_threshold: 0.30,
            decay_after_days: 30,
            decay_rate: 0.1,
            min_uses: 3,
            min_success_rate: 0.3,
            max_trajectory_buffer: 100,
        }
    }
}

/// Cost-ordered rendering tier. Ordering is the basis for tier-cost
/// monotonicity and for `max_cost_tier` budget enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Intelligence,
    Lightweight,
    Playwright,
}

impl Tier {
    /// All tiers in escalating cost order.
    #[must_use]
    pub fn all() -> [Tier; 3] {
        [Tier::Intelligence, Tier::Lightweight, Tier::Playwright]
    }

    /// Tiers starting at `self`, in escalating cost order.
    #[must_use]
    pub fn from_here(self) -> Vec<Tier> {
        Tier::all().into_iter().filter(|t| *t >= self).collect()
    }

    /// Approximate timeout budget for this tier, used as the default
    /// `tier_timeout` when the caller does not override it.
    #[must_use]
    pub fn default_timeout_ms(self) -> u64 {
        match self {
            Tier::Intelligence => 200,
            Tier::Lightweight => 500,
            Tier::Playwright => 5_000,
        }
    }
}

/// How strict freshness requirements are for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Never return cache; always fetch.
    Realtime,
    /// Prefer cache if present and not stale; otherwise fetch, best effort.
    Cached,
    /// Serve cache if present and not stale, else fetch. Default.
    #[default]
    Any,
}

/// Configuration for the Tiered Fetch Orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OrchestratorConfig {
    /// Minimum content length (chars) for a tier result to validate.
    pub min_content_length: usize,
    /// Default per-tier timeout in milliseconds.
    pub tier_timeout_ms: u64,
    /// Optional overall latency budget in milliseconds.
    pub max_latency_ms: Option<u64>,
    /// Optional cost ceiling; tiers costing more are skipped.
    pub max_cost_tier: Option<Tier>,
    /// Default freshness requirement.
    pub freshness_requirement: Freshness,
    /// Consecutive failures at the preferred tier before promoting to the
    /// next costlier tier.
    pub promote_after_failures: u32,
    /// Persistence location for the Tier Preference Store document.
    pub preferences_file_path: PathBuf,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            min_content_length: 500,
            tier_timeout_ms: 30_000,
            max_latency_ms: None,
            max_cost_tier: None,
            freshness_requirement: Freshness::Any,
            promote_after_failures: 3,
            preferences_file_path: PathBuf::from("tier_preferences.json"),
        }
    }
}

/// Configuration for the Field-Level Change Tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ChangeTrackerConfig {
    /// Default language for category tables and duration parsing.
    pub language: String,
    /// Per-URL history cap; oldest records are dropped once exceeded.
    pub max_history_per_url: usize,
    /// Persistence location for the Change Tracker Store document.
    pub file_path: PathBuf,
}

impl Default for ChangeTrackerConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            max_history_per_url: 50,
            file_path: PathBuf::from("change_history.json"),
        }
    }
}
