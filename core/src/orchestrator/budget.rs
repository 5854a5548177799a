//! Per-fetch options and budgets.

use crate::config::{Freshness, Tier};
use serde::{Deserialize, Serialize};

/// Caller-supplied options for a single [`super::fetch`] call. Every field
/// is optional; absent fields fall back to the orchestrator's configured
/// defaults, never to an ad-hoc options-bag shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Run only this tier; skip the selection/fallback algorithm entirely.
    pub force_tier: Option<Tier>,
    pub min_content_length: Option<usize>,
    pub tier_timeout_ms: Option<u64>,
    pub session_profile: Option<String>,
    pub wait_for: Option<String>,
    pub max_latency_ms: Option<u64>,
    pub max_cost_tier: Option<Tier>,
    pub freshness_requirement: Option<Freshness>,
}

impl FetchOptions {
    #[must_use]
    pub fn forcing(tier: Tier) -> Self {
        Self {
            force_tier: Some(tier),
            ..Self::default()
        }
    }
}
