//! User feedback on skill executions.

use super::skill::SkillId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's rating of a skill's last application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Positive,
    Negative,
}

impl Rating {
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Rating::Positive)
    }
}

/// Where feedback was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackContext {
    pub url: String,
    pub domain: String,
    pub timestamp: DateTime<Utc>,
}

/// A single feedback entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub skill_id: SkillId,
    pub rating: Rating,
    pub context: FeedbackContext,
    pub reason: Option<String>,
    pub processed: bool,
}

/// Append-only feedback log, trimmed to `2 * max_size` on write and capped
/// to `max_size` (`maxFeedbackLogSize`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackLog {
    entries: Vec<Feedback>,
}

impl FeedbackLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[Feedback] {
        &self.entries
    }

    pub fn entries_for_skill(&self, skill_id: SkillId) -> impl Iterator<Item = &Feedback> {
        self.entries.iter().filter(move |f| f.skill_id == skill_id)
    }

    /// Append `feedback`, trimming to `max_size` once the log exceeds
    /// `2 * max_size` entries.
    pub fn push(&mut self, feedback: Feedback, max_size: usize) {
        self.entries.push(feedback);
        if self.entries.len() > max_size * 2 {
            let drop_count = self.entries.len() - max_size;
            self.entries.drain(0..drop_count);
        }
    }
}
