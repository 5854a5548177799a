//! The Memory Store facade: owns every procedural-memory entity and ties
//! the smaller modules together behind one API surface.

use super::anti_pattern::{AntiPattern, AntiPatternStore};
use super::decay::{apply_decay, should_prune};
use super::dependency::{execute_with_fallbacks, would_create_cycle, FallbackOutcome};
use super::explanation::generate_skill_explanation;
use super::extraction::{filter_actions, infer_preconditions};
use super::feedback::{Feedback, FeedbackContext, FeedbackLog, Rating};
use super::retrieval::{retrieve_skills, SkillMatch};
use super::skill::{Action, Preconditions, Skill, SkillId};
use super::state::{classify, SkillState};
use super::trajectory::{TrajectoryBuffer, TrajectoryHandle};
use super::version::{ChangeReason, SkillVersion, VersionHistory};
use super::workflow::{detect_potential_workflows, Workflow};
use crate::config::ProceduralMemoryConfig;
use crate::error::{Error, Result};
use crate::kernel::{embed_skill_features, PageContext, SkillFeatures};
use crate::persistence::{load_or_default, save_atomic};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A pre-authored skill used to seed a fresh store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTemplate {
    pub name: String,
    pub description: String,
    pub preconditions: Preconditions,
    pub action_sequence: Vec<Action>,
    pub source_domain: String,
}

/// Coverage of the browsing surface the store has learned about, relative
/// to what it has actually seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub total_skills: usize,
    pub visited_domains: usize,
    pub visited_page_types: usize,
    pub domains_with_skills: usize,
}

/// Aggregate feedback counts for a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub positive: u32,
    pub negative: u32,
}

/// The whole-store document persisted atomically to `file_path`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MemoryStoreDocument {
    skills: Vec<Skill>,
    workflows: Vec<Workflow>,
    trajectory_buffer: TrajectoryBuffer,
    version_histories: HashMap<SkillId, VersionHistory>,
    anti_patterns: AntiPatternStore,
    feedback_log: FeedbackLog,
    visited_domains: HashSet<String>,
    visited_page_types: HashSet<String>,
    recent_skill_executions: Vec<SkillId>,
}

/// Owns the full procedural-memory state for one agent instance.
pub struct MemoryStore {
    config: ProceduralMemoryConfig,
    doc: MemoryStoreDocument,
}

impl MemoryStore {
    /// Load from `config.file_path`, or start empty if the file is missing
    /// or unreadable.
    pub fn initialize(config: ProceduralMemoryConfig) -> Result<Self> {
        let doc = load_or_default(&config.file_path, MemoryStoreDocument::default);
        Ok(Self { config, doc })
    }

    /// Persist the current state to `config.file_path`.
    pub fn save(&self) -> Result<()> {
        save_atomic(&self.config.file_path, &self.doc)
    }

    #[must_use]
    pub fn config(&self) -> &ProceduralMemoryConfig {
        &self.config
    }

    // -- retrieval --------------------------------------------------------

    /// Rank known skills against an observed page context.
    #[must_use]
    pub fn retrieve_skills(&self, context: &PageContext, top_k: usize) -> Vec<SkillMatch> {
        retrieve_skills(
            &self.doc.skills,
            context,
            top_k,
            self.config.embedding_dim,
            self.config.similarity_threshold,
        )
    }

    // -- trajectories & extraction -----------------------------------------

    /// Close `handle` into a [`Trajectory`], push it into the capped
    /// buffer, and run the extraction policy if it is long enough. Returns
    /// the id of a newly created or merged-into skill, if any.
    pub fn record_trajectory(
        &mut self,
        handle: TrajectoryHandle,
        end_url: String,
        success: bool,
        extracted_content_summary: Option<String>,
    ) -> Result<Option<SkillId>> {
        let trajectory = handle.complete(end_url, success, extracted_content_summary);
        self.doc
            .trajectory_buffer
            .push(trajectory.clone(), self.config.max_trajectory_buffer);

        if !success || trajectory.actions.len() < self.config.min_trajectory_length {
            return Ok(None);
        }

        let filtered = filter_actions(&trajectory.actions);
        if filtered.len() < self.config.min_trajectory_length {
            return Ok(None);
        }
        let preconditions = infer_preconditions(&trajectory, &filtered);
        let domain_patterns = preconditions.domain_patterns.clone();
        let url_patterns = preconditions.url_patterns.clone();
        let action_types: Vec<String> = filtered
            .iter()
            .map(|a| a.action_type.as_str().to_string())
            .collect();
        let action_success: Vec<bool> = filtered.iter().map(|a| a.success).collect();
        let features = SkillFeatures {
            domain_patterns: &domain_patterns,
            url_patterns: &url_patterns,
            page_type: preconditions.page_type,
            required_selectors: &preconditions.required_selectors,
            language: preconditions.language.as_deref(),
            action_types: &action_types,
            action_success: &action_success,
        };
        let embedding = embed_skill_features(&features, self.config.embedding_dim);

        if let Some(existing) = self.find_merge_candidate(&embedding, &trajectory.domain) {
            let id = self.doc.skills[existing].id;
            self.merge_trajectory_into_skill(
                existing,
                &trajectory.domain,
                filtered,
                success,
                trajectory.total_duration_ms,
            );
            return Ok(Some(id));
        }

        let mut skill = Skill::new(
            format!("learned-{}", trajectory.domain),
            "Automatically extracted from a successful trajectory.".to_string(),
            preconditions,
            filtered,
            embedding,
            trajectory.domain.clone(),
        );
        skill
            .metrics
            .record_execution(success, trajectory.total_duration_ms);
        let id = skill.id;
        self.insert_skill(skill)?;
        Ok(Some(id))
    }

    fn find_merge_candidate(&self, embedding: &[f32], domain: &str) -> Option<usize> {
        self.doc
            .skills
            .iter()
            .enumerate()
            .filter(|(_, s)| s.source_domain == domain)
            .map(|(idx, s)| {
                (
                    idx,
                    crate::kernel::cosine_similarity(&s.embedding, embedding),
                )
            })
            .filter(|(_, sim)| *sim >= self.config.merge_threshold)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
    }

    /// Merge a newly observed trajectory into `index`: union the domain
    /// pattern, replace the action sequence only when the new one is
    /// strictly shorter (never grow what's stored), and re-embed whenever
    /// the sequence actually changed so the embedding never goes stale
    /// relative to the stored actions.
    fn merge_trajectory_into_skill(
        &mut self,
        index: usize,
        domain: &str,
        filtered_actions: Vec<Action>,
        success: bool,
        duration_ms: u64,
    ) {
        let embedding_dim = self.config.embedding_dim;
        let skill = &mut self.doc.skills[index];

        if !skill.preconditions.domain_patterns.iter().any(|p| p == domain) {
            skill.preconditions.domain_patterns.push(domain.to_string());
        }

        let sequence_changed = filtered_actions.len() < skill.action_sequence.len();
        if sequence_changed {
            skill.action_sequence = filtered_actions;
            let action_types: Vec<String> = skill
                .action_sequence
                .iter()
                .map(|a| a.action_type.as_str().to_string())
                .collect();
            let action_success: Vec<bool> = skill.action_sequence.iter().map(|a| a.success).collect();
            let features = SkillFeatures {
                domain_patterns: &skill.preconditions.domain_patterns,
                url_patterns: &skill.preconditions.url_patterns,
                page_type: skill.preconditions.page_type,
                required_selectors: &skill.preconditions.required_selectors,
                language: skill.preconditions.language.as_deref(),
                action_types: &action_types,
                action_success: &action_success,
            };
            skill.embedding = embed_skill_features(&features, embedding_dim);
        }

        skill.metrics.record_execution(success, duration_ms);
        skill.updated_at = chrono::Utc::now();
        let id = skill.id;
        self.snapshot_version(id, ChangeReason::Merge, Some("merged new trajectory".into()));
    }

    // -- skill execution & metrics ------------------------------------------

    /// Record the outcome of applying an existing skill.
    pub fn record_skill_execution(
        &mut self,
        skill_id: SkillId,
        success: bool,
        duration_ms: u64,
    ) -> Result<()> {
        let skill = self
            .doc
            .skills
            .iter_mut()
            .find(|s| s.id == skill_id)
            .ok_or(Error::NotFound(skill_id))?;
        skill.metrics.record_execution(success, duration_ms);
        skill.updated_at = chrono::Utc::now();
        self.doc.recent_skill_executions.push(skill_id);
        if self.doc.recent_skill_executions.len() > 200 {
            self.doc.recent_skill_executions.remove(0);
        }
        self.snapshot_version(skill_id, ChangeReason::Update, None);
        Ok(())
    }

    fn snapshot_version(&mut self, skill_id: SkillId, reason: ChangeReason, description: Option<String>) {
        let Some(skill) = self.doc.skills.iter().find(|s| s.id == skill_id) else {
            return;
        };
        let history = self.doc.version_histories.entry(skill_id).or_default();
        let version = history.next_version_number();
        history.push(
            SkillVersion::snapshot(skill, version, reason, description),
            self.config.max_versions_per_skill,
        );
    }

    // -- CRUD -----------------------------------------------------------------

    fn insert_skill(&mut self, skill: Skill) -> Result<()> {
        let id = skill.id;
        self.doc.skills.push(skill);
        self.snapshot_version(id, ChangeReason::Initial, None);
        self.evict_if_over_capacity();
        Ok(())
    }

    fn evict_if_over_capacity(&mut self) {
        while self.doc.skills.len() > self.config.max_skills {
            if let Some(idx) = super::decay::skill_to_evict(&self.doc.skills) {
                let evicted = self.doc.skills.remove(idx);
                self.doc.version_histories.remove(&evicted.id);
            } else {
                break;
            }
        }
    }

    /// Add a learned skill directly (bypassing trajectory extraction).
    pub fn add_skill(&mut self, skill: Skill) -> Result<SkillId> {
        let id = skill.id;
        self.insert_skill(skill)?;
        Ok(id)
    }

    /// Add a user-authored skill; functionally identical to [`Self::add_skill`]
    /// but kept as a separate entry point for callers that want to
    /// distinguish manually authored skills from learned ones.
    pub fn add_manual_skill(&mut self, skill: Skill) -> Result<SkillId> {
        self.add_skill(skill)
    }

    pub fn delete_skill(&mut self, skill_id: SkillId) -> Result<()> {
        let before = self.doc.skills.len();
        self.doc.skills.retain(|s| s.id != skill_id);
        if self.doc.skills.len() == before {
            return Err(Error::NotFound(skill_id));
        }
        self.doc.version_histories.remove(&skill_id);
        Ok(())
    }

    #[must_use]
    pub fn get_skill(&self, skill_id: SkillId) -> Option<&Skill> {
        self.doc.skills.iter().find(|s| s.id == skill_id)
    }

    #[must_use]
    pub fn get_all_skills(&self) -> &[Skill] {
        &self.doc.skills
    }

    #[must_use]
    pub fn get_skills_by_domain(&self, domain: &str) -> Vec<&Skill> {
        self.doc
            .skills
            .iter()
            .filter(|s| s.source_domain == domain)
            .collect()
    }

    #[must_use]
    pub fn skill_state(&self, skill_id: SkillId) -> Option<SkillState> {
        self.get_skill(skill_id)
            .map(|s| classify(s, self.config.min_uses, f64::from(self.config.min_success_rate)))
    }

    // -- workflows ------------------------------------------------------------

    /// Create a workflow from at least two existing skill ids.
    pub fn create_workflow(
        &mut self,
        name: String,
        description: Option<String>,
        skill_ids: Vec<SkillId>,
    ) -> Result<Uuid> {
        if skill_ids.len() < 2 {
            return Err(Error::InvalidInput(
                "a workflow requires at least two skills".into(),
            ));
        }
        let first = self
            .get_skill(skill_ids[0])
            .ok_or(Error::NotFound(skill_ids[0]))?;
        let preconditions = first.preconditions.clone();
        for id in &skill_ids {
            if self.get_skill(*id).is_none() {
                return Err(Error::NotFound(*id));
            }
        }
        let workflow = Workflow::new(name, description, skill_ids, preconditions);
        let id = workflow.id;
        self.doc.workflows.push(workflow);
        Ok(id)
    }

    #[must_use]
    pub fn get_workflow(&self, id: Uuid) -> Option<&Workflow> {
        self.doc.workflows.iter().find(|w| w.id == id)
    }

    #[must_use]
    pub fn get_all_workflows(&self) -> &[Workflow] {
        &self.doc.workflows
    }

    /// Candidate skill pairs that co-occur often enough to suggest a
    /// workflow, derived from recently executed skills.
    #[must_use]
    pub fn detect_potential_workflows(&self) -> Vec<(SkillId, SkillId)> {
        detect_potential_workflows(&[self.doc.recent_skill_executions.clone()])
    }

    // -- coverage & visits ------------------------------------------------------

    pub fn track_visit(&mut self, domain: String, page_type: crate::kernel::PageType) {
        self.doc.visited_domains.insert(domain);
        self.doc
            .visited_page_types
            .insert(format!("{page_type:?}"));
    }

    #[must_use]
    pub fn get_coverage_stats(&self) -> CoverageStats {
        let domains_with_skills = self
            .doc
            .skills
            .iter()
            .map(|s| s.source_domain.clone())
            .collect::<HashSet<_>>()
            .len();
        CoverageStats {
            total_skills: self.doc.skills.len(),
            visited_domains: self.doc.visited_domains.len(),
            visited_page_types: self.doc.visited_page_types.len(),
            domains_with_skills,
        }
    }

    // -- decay, prune, reset --------------------------------------------------

    pub fn apply_skill_decay(&mut self) {
        for skill in &mut self.doc.skills {
            apply_decay(skill, self.config.decay_after_days, self.config.decay_rate);
        }
    }

    /// Remove every skill eligible for pruning. Returns the ids removed.
    pub fn prune_failed_skills(&mut self) -> Vec<SkillId> {
        let min_uses = self.config.min_uses;
        let min_success_rate = f64::from(self.config.min_success_rate);
        let to_remove: Vec<SkillId> = self
            .doc
            .skills
            .iter()
            .filter(|s| should_prune(s, min_uses, min_success_rate))
            .map(|s| s.id)
            .collect();
        for id in &to_remove {
            self.doc.skills.retain(|s| s.id != *id);
            self.doc.version_histories.remove(id);
        }
        to_remove
    }

    /// Wipe all learned state, keeping configuration.
    pub fn reset(&mut self) {
        self.doc = MemoryStoreDocument::default();
    }

    // -- versioning -------------------------------------------------------------

    #[must_use]
    pub fn get_version_history(&self, skill_id: SkillId) -> Option<&VersionHistory> {
        self.doc.version_histories.get(&skill_id)
    }

    #[must_use]
    pub fn get_best_version(&self, skill_id: SkillId) -> Option<&SkillVersion> {
        self.doc.version_histories.get(&skill_id)?.best()
    }

    /// Restore `skill_id` to its rollback-target snapshot, recording a
    /// further `Rollback` version.
    pub fn rollback_skill(&mut self, skill_id: SkillId) -> Result<()> {
        let target = self
            .doc
            .version_histories
            .get(&skill_id)
            .and_then(VersionHistory::rollback_target)
            .cloned()
            .ok_or_else(|| Error::InvalidState("no version history to roll back to".into()))?;

        let skill = self
            .doc
            .skills
            .iter_mut()
            .find(|s| s.id == skill_id)
            .ok_or(Error::NotFound(skill_id))?;
        skill.action_sequence = target.action_sequence;
        skill.embedding = target.embedding;
        skill.metrics = target.metrics;
        skill.updated_at = chrono::Utc::now();

        self.snapshot_version(skill_id, ChangeReason::Rollback, Some("auto/manual rollback".into()));
        Ok(())
    }

    /// Whether `skill_id`'s current success rate has dropped by more than
    /// `auto_rollback_threshold` relative to its best recorded version.
    #[must_use]
    pub fn check_for_auto_rollback(&self, skill_id: SkillId) -> bool {
        let Some(skill) = self.get_skill(skill_id) else {
            return false;
        };
        let Some(best) = self.get_best_version(skill_id) else {
            return false;
        };
        let current = skill.metrics.success_rate();
        (best.success_rate - current) as f32 >= self.config.auto_rollback_threshold
    }

    // -- anti-patterns ------------------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub fn record_anti_pattern(
        &mut self,
        name: String,
        description: String,
        source_domain: String,
        source_url: Option<String>,
        action_type: super::skill::ActionType,
        action_selector: Option<String>,
        consequences: Vec<String>,
        alternatives: Option<Vec<String>>,
    ) -> Uuid {
        self.doc.anti_patterns.record(
            name,
            description,
            source_domain,
            source_url,
            action_type,
            action_selector,
            consequences,
            alternatives,
        )
    }

    #[must_use]
    pub fn check_anti_patterns(
        &self,
        domain: &str,
        action_type: super::skill::ActionType,
        selector: Option<&str>,
    ) -> Option<&AntiPattern> {
        self.doc.anti_patterns.check(domain, action_type, selector)
    }

    #[must_use]
    pub fn get_anti_patterns_for_domain<'a>(&'a self, domain: &'a str) -> Vec<&'a AntiPattern> {
        self.doc.anti_patterns.for_domain(domain).collect()
    }

    // -- explanations -------------------------------------------------------------

    pub fn generate_skill_explanation(&self, skill_id: SkillId) -> Result<String> {
        let skill = self.get_skill(skill_id).ok_or(Error::NotFound(skill_id))?;
        Ok(generate_skill_explanation(
            skill,
            self.config.min_uses,
            f64::from(self.config.min_success_rate),
        ))
    }

    // -- feedback -------------------------------------------------------------------

    pub fn record_feedback(
        &mut self,
        skill_id: SkillId,
        rating: Rating,
        url: String,
        domain: String,
        reason: Option<String>,
    ) {
        let feedback = Feedback {
            skill_id,
            rating,
            context: FeedbackContext {
                url,
                domain,
                timestamp: chrono::Utc::now(),
            },
            reason,
            processed: false,
        };
        self.doc
            .feedback_log
            .push(feedback, self.config.max_feedback_log_size);
    }

    #[must_use]
    pub fn get_feedback_summary(&self, skill_id: SkillId) -> FeedbackSummary {
        let mut summary = FeedbackSummary::default();
        for feedback in self.doc.feedback_log.entries_for_skill(skill_id) {
            if feedback.rating.is_success() {
                summary.positive += 1;
            } else {
                summary.negative += 1;
            }
        }
        summary
    }

    // -- dependencies & fallbacks ----------------------------------------------------

    fn prerequisite_edges(&self) -> HashMap<SkillId, Vec<SkillId>> {
        self.doc
            .skills
            .iter()
            .map(|s| (s.id, s.preconditions.prerequisites.clone()))
            .collect()
    }

    /// Add prerequisite edges from `skill_id` to each of `prerequisite_ids`,
    /// rejecting the whole batch if it would create a cycle.
    pub fn add_prerequisites(
        &mut self,
        skill_id: SkillId,
        prerequisite_ids: Vec<SkillId>,
    ) -> Result<()> {
        let edges = self.prerequisite_edges();
        let new_edges: Vec<(SkillId, SkillId)> =
            prerequisite_ids.iter().map(|p| (skill_id, *p)).collect();
        if would_create_cycle(&edges, &new_edges) {
            return Err(Error::CircularDependency);
        }
        let skill = self
            .doc
            .skills
            .iter_mut()
            .find(|s| s.id == skill_id)
            .ok_or(Error::NotFound(skill_id))?;
        skill.preconditions.prerequisites.extend(prerequisite_ids);
        Ok(())
    }

    /// Add fallback skills; unlike prerequisites, these do not participate
    /// in the DAG constraint.
    pub fn add_fallback_skills(&mut self, skill_id: SkillId, fallback_ids: Vec<SkillId>) -> Result<()> {
        let skill = self
            .doc
            .skills
            .iter_mut()
            .find(|s| s.id == skill_id)
            .ok_or(Error::NotFound(skill_id))?;
        skill.preconditions.fallback_skill_ids.extend(fallback_ids);
        Ok(())
    }

    /// Execute `skill_id`, falling through its configured fallback chain on
    /// failure, recording a metric for every attempt.
    pub fn execute_with_fallbacks<F>(&mut self, skill_id: SkillId, executor: F) -> Result<FallbackOutcome>
    where
        F: FnMut(SkillId) -> (bool, u64),
    {
        let skill = self.get_skill(skill_id).ok_or(Error::NotFound(skill_id))?;
        let fallbacks = skill.preconditions.fallback_skill_ids.clone();
        let outcome = execute_with_fallbacks(skill_id, &fallbacks, executor);
        for (id, success, duration_ms) in &outcome.attempts {
            self.record_skill_execution(*id, *success, *duration_ms)?;
        }
        Ok(outcome)
    }

    // -- bootstrap, export/import ----------------------------------------------------

    /// Seed the store with pre-authored templates, skipping any whose
    /// source domain already has a skill with the same name.
    pub fn bootstrap_from_templates(&mut self, templates: Vec<SkillTemplate>) -> Result<Vec<SkillId>> {
        let mut ids = Vec::new();
        for template in templates {
            let already_present = self
                .doc
                .skills
                .iter()
                .any(|s| s.source_domain == template.source_domain && s.name == template.name);
            if already_present {
                continue;
            }
            let action_types: Vec<String> = template
                .action_sequence
                .iter()
                .map(|a| a.action_type.as_str().to_string())
                .collect();
            let action_success: Vec<bool> =
                template.action_sequence.iter().map(|a| a.success).collect();
            let features = SkillFeatures {
                domain_patterns: &template.preconditions.domain_patterns,
                url_patterns: &template.preconditions.url_patterns,
                page_type: template.preconditions.page_type,
                required_selectors: &template.preconditions.required_selectors,
                language: template.preconditions.language.as_deref(),
                action_types: &action_types,
                action_success: &action_success,
            };
            let embedding = embed_skill_features(&features, self.config.embedding_dim);
            let skill = Skill::new(
                template.name,
                template.description,
                template.preconditions,
                template.action_sequence,
                embedding,
                template.source_domain,
            );
            let id = skill.id;
            self.insert_skill(skill)?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Snapshot the entire store as a serializable document.
    #[must_use]
    pub fn export_memory(&self) -> serde_json::Value {
        serde_json::to_value(&self.doc).unwrap_or(serde_json::Value::Null)
    }

    /// Merge `skills` into the store, applying max-skills eviction only
    /// after the whole import completes, so an import is all-or-nothing
    /// against the capacity check rather than evicting mid-batch.
    pub fn import_skills(&mut self, skills: Vec<Skill>) -> Result<usize> {
        let count = skills.len();
        for skill in skills {
            let id = skill.id;
            self.doc.skills.push(skill);
            self.snapshot_version(id, ChangeReason::Initial, Some("imported".into()));
        }
        self.evict_if_over_capacity();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::PageType;

    fn store() -> MemoryStore {
        let mut config = ProceduralMemoryConfig::default();
        config.file_path = std::env::temp_dir().join(format!("bmem-test-{}.json", Uuid::new_v4()));
        MemoryStore::initialize(config).unwrap()
    }

    fn sample_skill(domain: &str) -> Skill {
        Skill::new(
            "s".into(),
            "d".into(),
            Preconditions::default(),
            vec![],
            vec![0.0; 64],
            domain.into(),
        )
    }

    #[test]
    fn add_and_get_skill_round_trips() {
        let mut store = store();
        let id = store.add_skill(sample_skill("example.com")).unwrap();
        assert!(store.get_skill(id).is_some());
        assert_eq!(store.get_all_skills().len(), 1);
    }

    #[test]
    fn delete_missing_skill_errors() {
        let mut store = store();
        assert!(store.delete_skill(Uuid::new_v4()).is_err());
    }

    #[test]
    fn workflow_requires_two_skills() {
        let mut store = store();
        let a = store.add_skill(sample_skill("example.com")).unwrap();
        assert!(store
            .create_workflow("wf".into(), None, vec![a])
            .is_err());
    }

    #[test]
    fn workflow_created_from_two_existing_skills() {
        let mut store = store();
        let a = store.add_skill(sample_skill("example.com")).unwrap();
        let b = store.add_skill(sample_skill("example.com")).unwrap();
        let id = store
            .create_workflow("wf".into(), None, vec![a, b])
            .unwrap();
        assert!(store.get_workflow(id).is_some());
    }

    #[test]
    fn record_execution_tracks_metrics_and_version() {
        let mut store = store();
        let id = store.add_skill(sample_skill("example.com")).unwrap();
        store.record_skill_execution(id, true, 120).unwrap();
        let skill = store.get_skill(id).unwrap();
        assert_eq!(skill.metrics.times_used, 1);
        assert!(store.get_version_history(id).unwrap().versions().len() >= 2);
    }

    #[test]
    fn add_prerequisites_rejects_cycle() {
        let mut store = store();
        let a = store.add_skill(sample_skill("example.com")).unwrap();
        let b = store.add_skill(sample_skill("example.com")).unwrap();
        store.add_prerequisites(a, vec![b]).unwrap();
        assert!(store.add_prerequisites(b, vec![a]).is_err());
    }

    #[test]
    fn prune_removes_low_success_heavily_used_skills() {
        let mut store = store();
        let id = store.add_skill(sample_skill("example.com")).unwrap();
        for _ in 0..10 {
            store.record_skill_execution(id, false, 10).unwrap();
        }
        let removed = store.prune_failed_skills();
        assert_eq!(removed, vec![id]);
        assert!(store.get_skill(id).is_none());
    }

    #[test]
    fn rollback_restores_previous_metrics() {
        let mut store = store();
        let id = store.add_skill(sample_skill("example.com")).unwrap();
        store.record_skill_execution(id, true, 10).unwrap();
        store.record_skill_execution(id, false, 10).unwrap();
        store.rollback_skill(id).unwrap();
        assert!(store.get_skill(id).is_some());
    }

    #[test]
    fn track_visit_increases_coverage_stats() {
        let mut store = store();
        store.track_visit("example.com".into(), PageType::Detail);
        let stats = store.get_coverage_stats();
        assert_eq!(stats.visited_domains, 1);
    }

    #[test]
    fn import_then_evicts_over_capacity() {
        let mut store = store();
        store.config.max_skills = 2;
        let skills = vec![
            sample_skill("a.com"),
            sample_skill("b.com"),
            sample_skill("c.com"),
        ];
        store.import_skills(skills).unwrap();
        assert!(store.get_all_skills().len() <= 2);
    }
}
