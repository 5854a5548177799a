//! Skill lifecycle state classification.

use super::skill::Skill;

/// A skill's lifecycle state, derived from its metrics rather than stored
/// directly — recomputed on every read so it can never drift from the
/// underlying counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillState {
    /// Never used.
    Fresh,
    /// Used, success rate at or above the prune floor.
    Active,
    /// Used enough times to be prune-eligible but not yet evicted.
    Degraded,
    /// No longer present in the store (used for explanations/history only).
    Evicted,
}

/// Classify `skill` given the store's prune thresholds.
#[must_use]
pub fn classify(skill: &Skill, min_uses: u32, min_success_rate: f64) -> SkillState {
    if skill.metrics.times_used == 0 {
        return SkillState::Fresh;
    }
    if super::decay::should_prune(skill, min_uses, min_success_rate) {
        return SkillState::Degraded;
    }
    SkillState::Active
}
