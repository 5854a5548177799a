//! Human-readable skill explanations.

use super::skill::Skill;
use super::state::{classify, SkillState};

/// Render a short natural-language summary of `skill`'s purpose, trigger
/// conditions, and observed performance.
#[must_use]
pub fn generate_skill_explanation(skill: &Skill, min_uses: u32, min_success_rate: f64) -> String {
    let state = classify(skill, min_uses, min_success_rate);
    let state_label = match state {
        SkillState::Fresh => "has not been used yet",
        SkillState::Active => "is performing well",
        SkillState::Degraded => "is underperforming and eligible for pruning",
        SkillState::Evicted => "has been evicted",
    };

    let mut parts = vec![format!(
        "\"{}\" {} on {}.",
        skill.name, state_label, skill.source_domain
    )];

    if !skill.description.is_empty() {
        parts.push(skill.description.clone());
    }

    if skill.metrics.times_used > 0 {
        parts.push(format!(
            "Used {} time(s), {:.0}% success rate, average duration {:.0}ms.",
            skill.metrics.times_used,
            skill.metrics.success_rate() * 100.0,
            skill.metrics.avg_duration_ms
        ));
    }

    if !skill.preconditions.domain_patterns.is_empty() {
        parts.push(format!(
            "Applies to domains matching: {}.",
            skill.preconditions.domain_patterns.join(", ")
        ));
    }

    if !skill.preconditions.fallback_skill_ids.is_empty() {
        parts.push(format!(
            "Has {} fallback skill(s) configured.",
            skill.preconditions.fallback_skill_ids.len()
        ));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural_memory::skill::Preconditions;

    #[test]
    fn mentions_name_domain_and_state() {
        let skill = Skill::new(
            "extract price".into(),
            "Extracts the listed price".into(),
            Preconditions::default(),
            vec![],
            vec![0.0; 64],
            "shop.example.com".into(),
        );
        let text = generate_skill_explanation(&skill, 3, 0.3);
        assert!(text.contains("extract price"));
        assert!(text.contains("shop.example.com"));
        assert!(text.contains("has not been used yet"));
    }

    #[test]
    fn includes_metrics_once_used() {
        let mut skill = Skill::new(
            "s".into(),
            String::new(),
            Preconditions::default(),
            vec![],
            vec![0.0; 64],
            "example.com".into(),
        );
        skill.metrics.record_execution(true, 100);
        let text = generate_skill_explanation(&skill, 3, 0.3);
        assert!(text.contains("Used 1 time(s)"));
    }
}
