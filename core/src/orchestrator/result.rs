//! Tiered fetch results.

use crate::config::{Freshness, Tier};
use serde::{Deserialize, Serialize};

/// Why a tier was skipped without being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Cost exceeds the caller's `maxCostTier`.
    OverCostBudget,
    /// `playwright` requested but not available at runtime.
    NoPlaywright,
    /// Accumulated latency already reached `maxLatencyMs`.
    LatencyExceeded,
}

/// Fetched content and the tier that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedContent {
    pub text: String,
    pub tier: Tier,
}

/// The outcome of one tier attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierAttempt {
    pub tier: Tier,
    pub duration_ms: u64,
    pub succeeded: bool,
    /// Present when `succeeded` is `false`.
    pub error_category: Option<String>,
}

/// The full result of a [`super::fetch`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredFetchResult {
    pub success: bool,
    pub content: Option<FetchedContent>,
    pub tiers_attempted: Vec<Tier>,
    pub tiers_skipped: Vec<(Tier, SkipReason)>,
    pub fell_back: bool,
    pub cache_hit: bool,
    pub freshness_requirement: Freshness,
    pub latency_exceeded: bool,
    pub total_duration_ms: u64,
    pub attempts: Vec<TierAttempt>,
    /// Populated only when `success` is `false`: the classified error of the
    /// last tier tried.
    pub failure_category: Option<String>,
    pub last_tier_tried: Option<Tier>,
}

impl TieredFetchResult {
    #[must_use]
    pub fn cache_hit(content: FetchedContent, freshness_requirement: Freshness) -> Self {
        Self {
            success: true,
            content: Some(content),
            tiers_attempted: Vec::new(),
            tiers_skipped: Vec::new(),
            fell_back: false,
            cache_hit: true,
            freshness_requirement,
            latency_exceeded: false,
            total_duration_ms: 0,
            attempts: Vec::new(),
            failure_category: None,
            last_tier_tried: None,
        }
    }
}
