//! Workflows: ordered compositions of skills.

use super::skill::{Preconditions, SkillId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A transition between two skills in a workflow, gated by a textual
/// condition (interpreted by the caller; this crate does not evaluate it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: SkillId,
    pub to: SkillId,
    pub condition: String,
}

/// Aggregate performance of a workflow as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowMetrics {
    pub success_count: u32,
    pub failure_count: u32,
}

/// An ordered composition of at least two skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub skill_ids: Vec<SkillId>,
    pub transitions: Vec<Transition>,
    /// Copied from the first skill's preconditions at creation time.
    pub preconditions: Preconditions,
    pub metrics: WorkflowMetrics,
    pub created_at: DateTime<Utc>,
}

impl Workflow {
    /// Create a workflow from an already-validated skill id list (the
    /// caller, [`super::store::MemoryStore::create_workflow`], is
    /// responsible for checking that every id exists and that there are at
    /// least two).
    #[must_use]
    pub fn new(
        name: String,
        description: Option<String>,
        skill_ids: Vec<SkillId>,
        preconditions: Preconditions,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            skill_ids,
            transitions: Vec::new(),
            preconditions,
            metrics: WorkflowMetrics::default(),
            created_at: Utc::now(),
        }
    }
}

/// Detect candidate workflows from consecutive skill applications observed
/// across the trajectory buffer: any pair of distinct skill ids that
/// co-occurred, in order, more than once. Purely additive heuristic; never
/// required for correctness.
#[must_use]
pub fn detect_potential_workflows(skill_sequences: &[Vec<SkillId>]) -> Vec<(SkillId, SkillId)> {
    use std::collections::HashMap;
    let mut counts: HashMap<(SkillId, SkillId), u32> = HashMap::new();
    for sequence in skill_sequences {
        for pair in sequence.windows(2) {
            if pair[0] != pair[1] {
                *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
            }
        }
    }
    let mut candidates: Vec<(SkillId, SkillId)> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(pair, _)| pair)
        .collect();
    candidates.sort_by_key(|(a, b)| (*a, *b));
    candidates
}
