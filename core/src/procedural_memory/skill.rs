//! Skill, preconditions, actions, and metrics: plain serde structs with
//! `#[must_use]` constructors and small classification helper methods, no
//! trait objects.

use crate::kernel::PageType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque skill identifier. Stored as a UUID internally; a 16-hex-char
/// short form is available by formatting it with `simple()`.
pub type SkillId = Uuid;

/// A single step within an action sequence or a recorded trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action_type: ActionType,
    pub selector: Option<String>,
    pub url: Option<String>,
    pub value: Option<String>,
    pub wait_for: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub duration_ms: u64,
}

impl Action {
    #[must_use]
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            selector: None,
            url: None,
            value: None,
            wait_for: None,
            timestamp: Utc::now(),
            success: true,
            duration_ms: 0,
        }
    }
}

/// The kind of browsing action taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Navigate,
    Click,
    Fill,
    Select,
    Scroll,
    Wait,
    Extract,
    DismissBanner,
}

impl ActionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Navigate => "navigate",
            ActionType::Click => "click",
            ActionType::Fill => "fill",
            ActionType::Select => "select",
            ActionType::Scroll => "scroll",
            ActionType::Wait => "wait",
            ActionType::Extract => "extract",
            ActionType::DismissBanner => "dismiss_banner",
        }
    }
}

/// Preconditions under which a skill is believed to apply, extended with
/// `prerequisites` / `fallback_skill_ids` as real typed fields rather
/// than an ad-hoc "extended preconditions" cast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preconditions {
    /// Glob-capable domain patterns, e.g. `"*.example.com"`.
    pub domain_patterns: Vec<String>,
    /// Regex-or-substring URL patterns.
    pub url_patterns: Vec<String>,
    pub page_type: Option<PageType>,
    pub required_selectors: Vec<String>,
    pub content_type_hints: Vec<String>,
    pub language: Option<String>,
    /// Other skills that must exist and form a DAG with this skill (no
    /// cycles); see [`crate::procedural_memory::dependency`].
    pub prerequisites: Vec<SkillId>,
    /// Skills to try, in order, if this one fails.
    pub fallback_skill_ids: Vec<SkillId>,
}

impl Preconditions {
    /// Whether `self` is "fully met" by an observed page: every declared
    /// constraint that is non-empty must match.
    #[must_use]
    pub fn is_met_by(&self, domain: &str, url: &str, page_type: PageType) -> bool {
        let domain_ok = self.domain_patterns.is_empty()
            || self
                .domain_patterns
                .iter()
                .any(|pattern| domain_matches(pattern, domain));
        let url_ok = self.url_patterns.is_empty()
            || self.url_patterns.iter().any(|pattern| url_matches(pattern, url));
        let page_type_ok = self
            .page_type
            .is_none_or(|expected| expected == page_type);
        domain_ok && url_ok && page_type_ok
    }
}

/// Glob-capable domain match: `*` matches any run of characters.
#[must_use]
pub fn domain_matches(pattern: &str, domain: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix('*') {
        domain.ends_with(suffix)
    } else {
        pattern == domain
    }
}

/// URL pattern match: a valid regex is matched as a regex; otherwise the
/// pattern is treated as a plain substring.
#[must_use]
pub fn url_matches(pattern: &str, url: &str) -> bool {
    match regex::Regex::new(pattern) {
        Ok(re) => re.is_match(url),
        Err(_) => url.contains(pattern),
    }
}

/// Running performance metrics for a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMetrics {
    pub success_count: u32,
    pub failure_count: u32,
    pub times_used: u32,
    pub avg_duration_ms: f64,
    pub last_used: Option<DateTime<Utc>>,
}

impl Default for SkillMetrics {
    fn default() -> Self {
        Self {
            success_count: 0,
            failure_count: 0,
            times_used: 0,
            avg_duration_ms: 0.0,
            last_used: None,
        }
    }
}

impl SkillMetrics {
    /// `successCount / timesUsed`, or `0.0` when never used.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.times_used == 0 {
            0.0
        } else {
            f64::from(self.success_count) / f64::from(self.times_used)
        }
    }

    /// Record one more execution: bumps `times_used`, the relevant
    /// success/failure counter, folds `duration_ms` into the running
    /// average, and stamps `last_used`. Shared by merge and
    /// `record_skill_execution` so both go through the identical metric
    /// path.
    pub fn record_execution(&mut self, success: bool, duration_ms: u64) {
        let prior_total = self.avg_duration_ms * f64::from(self.times_used);
        self.times_used += 1;
        if success {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
        self.avg_duration_ms = (prior_total + duration_ms as f64) / f64::from(self.times_used);
        self.last_used = Some(Utc::now());
    }
}

/// A reusable multi-step browsing skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub preconditions: Preconditions,
    pub action_sequence: Vec<Action>,
    /// L2-normalized (or all-zero) embedding; length equals the store's
    /// configured `embedding_dim`.
    pub embedding: Vec<f32>,
    pub metrics: SkillMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source_domain: String,
}

impl Skill {
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        preconditions: Preconditions,
        action_sequence: Vec<Action>,
        embedding: Vec<f32>,
        source_domain: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            preconditions,
            action_sequence,
            embedding,
            metrics: SkillMetrics::default(),
            created_at: now,
            updated_at: now,
            source_domain,
        }
    }

    /// `timesUsed >= successCount + failureCount`.
    /// Metric merges may increase `timesUsed` without recomputing the
    /// success/failure split, so this is `>=`, not `==`.
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        self.metrics.times_used >= self.metrics.success_count + self.metrics.failure_count
    }
}
