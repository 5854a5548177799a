//! Procedural memory: a store of reusable browsing skills learned from
//! trajectories, with versioning, decay, anti-patterns, feedback, and
//! dependency/fallback chains.

mod anti_pattern;
mod decay;
mod dependency;
mod explanation;
mod extraction;
mod feedback;
mod retrieval;
mod skill;
mod state;
mod store;
mod trajectory;
mod version;
mod workflow;

pub use crate::config::ProceduralMemoryConfig;

pub use anti_pattern::{AntiPattern, AntiPatternStore};
pub use decay::{apply_decay, days_since_used, eviction_score, should_prune, skill_to_evict};
pub use dependency::{execute_with_fallbacks, would_create_cycle, FallbackOutcome};
pub use explanation::generate_skill_explanation;
pub use extraction::{filter_actions, generalize_url, infer_page_type, infer_preconditions};
pub use feedback::{Feedback, FeedbackContext, FeedbackLog, Rating};
pub use retrieval::{retrieve_skills, SkillMatch, PRECONDITIONS_MET_BONUS};
pub use skill::{
    domain_matches, url_matches, Action, ActionType, Preconditions, Skill, SkillId, SkillMetrics,
};
pub use state::{classify, SkillState};
pub use store::{CoverageStats, FeedbackSummary, MemoryStore, SkillTemplate};
pub use trajectory::{Trajectory, TrajectoryBuffer, TrajectoryHandle};
pub use version::{ChangeReason, SkillVersion, VersionHistory};
pub use workflow::{detect_potential_workflows, Transition, Workflow, WorkflowMetrics};
