//! Decay, pruning, and LRU-score eviction.

use super::skill::Skill;
use chrono::Utc;

/// Days since `skill.metrics.last_used` (or since `created_at` if never
/// used), used by decay and eviction scoring alike.
#[must_use]
pub fn days_since_used(skill: &Skill) -> f64 {
    let reference = skill.metrics.last_used.unwrap_or(skill.created_at);
    Utc::now()
        .signed_duration_since(reference)
        .num_seconds()
        .max(0) as f64
        / 86_400.0
}

/// Apply decay to `skill.metrics.success_count` in place if it has been
/// unused for longer than `decay_after_days`.
///
/// `factor = max(0.1, 1 - weeksOverdue * decay_rate)`, applied
/// multiplicatively; this never raises the count.
pub fn apply_decay(skill: &mut Skill, decay_after_days: i64, decay_rate: f32) {
    let days = days_since_used(skill);
    if days <= decay_after_days as f64 {
        return;
    }
    let weeks_overdue = (days - decay_after_days as f64) / 7.0;
    let factor = (1.0 - weeks_overdue as f32 * decay_rate).max(0.1);
    let decayed = (f64::from(skill.metrics.success_count) * f64::from(factor)).floor() as u32;
    skill.metrics.success_count = decayed.min(skill.metrics.success_count);
}

/// Whether `skill` should be pruned: used at least `min_uses` times with a
/// success rate below `min_success_rate`.
#[must_use]
pub fn should_prune(skill: &Skill, min_uses: u32, min_success_rate: f64) -> bool {
    skill.metrics.times_used >= min_uses && skill.metrics.success_rate() < min_success_rate
}

/// LRU-by-score eviction key: lower is evicted first.
/// `timesUsed / (1 + daysSinceUsed * 0.1)`.
#[must_use]
pub fn eviction_score(skill: &Skill) -> f64 {
    f64::from(skill.metrics.times_used) / (1.0 + days_since_used(skill) * 0.1)
}

/// Index of the skill with the lowest eviction score, or `None` if `skills`
/// is empty.
#[must_use]
pub fn skill_to_evict(skills: &[Skill]) -> Option<usize> {
    skills
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| eviction_score(a).total_cmp(&eviction_score(b)))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural_memory::skill::Preconditions;
    use chrono::Duration;

    fn aged_skill(days_ago: i64, success_count: u32, times_used: u32) -> Skill {
        let mut skill = Skill::new(
            "s".into(),
            "d".into(),
            Preconditions::default(),
            vec![],
            vec![0.0; 64],
            "example.com".into(),
        );
        skill.metrics.success_count = success_count;
        skill.metrics.times_used = times_used;
        skill.metrics.last_used = Some(Utc::now() - Duration::days(days_ago));
        skill
    }

    #[test]
    fn decay_never_raises_count() {
        let mut skill = aged_skill(100, 10, 10);
        let before = skill.metrics.success_count;
        apply_decay(&mut skill, 30, 0.1);
        assert!(skill.metrics.success_count <= before);
    }

    #[test]
    fn decay_skips_recently_used_skills() {
        let mut skill = aged_skill(1, 10, 10);
        apply_decay(&mut skill, 30, 0.1);
        assert_eq!(skill.metrics.success_count, 10);
    }

    #[test]
    fn prune_flags_low_success_heavily_used_skills() {
        let skill = aged_skill(0, 1, 10);
        assert!(should_prune(&skill, 3, 0.3));
    }

    #[test]
    fn prune_spares_under_used_skills() {
        let skill = aged_skill(0, 0, 1);
        assert!(!should_prune(&skill, 3, 0.3));
    }

    #[test]
    fn eviction_prefers_least_used_and_stalest() {
        let fresh = aged_skill(0, 5, 50);
        let stale = aged_skill(200, 1, 1);
        let skills = vec![fresh, stale];
        assert_eq!(skill_to_evict(&skills), Some(1));
    }
}
