//! Skill versioning.

use super::skill::{Action, Skill, SkillMetrics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a version snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    Initial,
    Merge,
    Update,
    Rollback,
}

/// An immutable snapshot of a skill at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillVersion {
    /// Monotonic per-skill version number, starting at 1.
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub action_sequence: Vec<Action>,
    pub embedding: Vec<f32>,
    pub metrics: SkillMetrics,
    /// `successCount / timesUsed` at snapshot time, stored alongside the
    /// raw metrics so historical comparisons don't need to recompute it.
    pub success_rate: f64,
    pub change_reason: ChangeReason,
    pub change_description: Option<String>,
}

impl SkillVersion {
    /// Snapshot `skill`'s current state. Vectors and action arrays are
    /// defensive copies, so later mutation of the live skill can never
    /// retroactively change a stored version.
    #[must_use]
    pub fn snapshot(skill: &Skill, version: u32, reason: ChangeReason, description: Option<String>) -> Self {
        Self {
            version,
            created_at: Utc::now(),
            action_sequence: skill.action_sequence.clone(),
            embedding: skill.embedding.clone(),
            metrics: skill.metrics.clone(),
            success_rate: skill.metrics.success_rate(),
            change_reason: reason,
            change_description: description,
        }
    }
}

/// A per-skill ring of retained versions, capped at `max_versions`
/// (strictly increasing version numbers; oldest dropped FIFO).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionHistory {
    versions: Vec<SkillVersion>,
}

impl VersionHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn versions(&self) -> &[SkillVersion] {
        &self.versions
    }

    #[must_use]
    pub fn next_version_number(&self) -> u32 {
        self.versions.last().map_or(1, |v| v.version + 1)
    }

    /// Push a new version, evicting the oldest if at capacity.
    pub fn push(&mut self, version: SkillVersion, max_versions: usize) {
        self.versions.push(version);
        while self.versions.len() > max_versions {
            self.versions.remove(0);
        }
    }

    #[must_use]
    pub fn get(&self, version: u32) -> Option<&SkillVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    /// The version with the highest `success_rate` on record.
    #[must_use]
    pub fn best(&self) -> Option<&SkillVersion> {
        self.versions
            .iter()
            .max_by(|a, b| a.success_rate.total_cmp(&b.success_rate))
    }

    /// Rollback target: the second-to-last version if at least two
    /// exist, else the only one.
    #[must_use]
    pub fn rollback_target(&self) -> Option<&SkillVersion> {
        if self.versions.len() >= 2 {
            self.versions.get(self.versions.len() - 2)
        } else {
            self.versions.last()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural_memory::skill::Preconditions;

    fn sample_skill() -> Skill {
        Skill::new(
            "test".into(),
            "desc".into(),
            Preconditions::default(),
            vec![],
            vec![0.0; 64],
            "example.com".into(),
        )
    }

    #[test]
    fn retention_caps_at_max_versions() {
        let skill = sample_skill();
        let mut history = VersionHistory::new();
        for _ in 0..15 {
            let v = history.next_version_number();
            history.push(
                SkillVersion::snapshot(&skill, v, ChangeReason::Update, None),
                10,
            );
        }
        assert!(history.versions().len() <= 10);
        let versions: Vec<u32> = history.versions().iter().map(|v| v.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        assert_eq!(versions, sorted);
        for w in versions.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn rollback_target_prefers_second_to_last() {
        let skill = sample_skill();
        let mut history = VersionHistory::new();
        history.push(SkillVersion::snapshot(&skill, 1, ChangeReason::Initial, None), 10);
        history.push(SkillVersion::snapshot(&skill, 2, ChangeReason::Update, None), 10);
        history.push(SkillVersion::snapshot(&skill, 3, ChangeReason::Update, None), 10);
        assert_eq!(history.rollback_target().unwrap().version, 2);
    }

    #[test]
    fn rollback_target_falls_back_to_only_version() {
        let skill = sample_skill();
        let mut history = VersionHistory::new();
        history.push(SkillVersion::snapshot(&skill, 1, ChangeReason::Initial, None), 10);
        assert_eq!(history.rollback_target().unwrap().version, 1);
    }
}
