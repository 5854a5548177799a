//! Trajectories and the explicit start/record/complete handle that
//! replaces a shared mutable "current trajectory" pointer with an owned
//! value threaded through the caller's own code.

use super::skill::Action;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded browse attempt: an ordered sequence of actions plus outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub id: Uuid,
    pub start_url: String,
    pub end_url: String,
    pub domain: String,
    pub actions: Vec<Action>,
    pub success: bool,
    pub total_duration_ms: u64,
    pub timestamp: DateTime<Utc>,
    pub extracted_content_summary: Option<String>,
}

/// An explicit handle returned by `ProceduralMemory::start_trajectory` and
/// threaded through `record_action` / `complete_trajectory` calls,
/// eliminating any need for hidden global "current trajectory" state.
#[derive(Debug, Clone)]
pub struct TrajectoryHandle {
    id: Uuid,
    start_url: String,
    domain: String,
    actions: Vec<Action>,
}

impl TrajectoryHandle {
    #[must_use]
    pub fn start(start_url: String, domain: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_url,
            domain,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn record_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Close the trajectory, producing the final [`Trajectory`] record.
    /// Total duration is the sum of each recorded action's own duration,
    /// not wall-clock time since `start` — keeps the record reproducible
    /// regardless of how long the caller took between steps.
    #[must_use]
    pub fn complete(
        self,
        end_url: String,
        success: bool,
        extracted_content_summary: Option<String>,
    ) -> Trajectory {
        let total_duration_ms = self.actions.iter().map(|a| a.duration_ms).sum();
        Trajectory {
            id: self.id,
            start_url: self.start_url,
            end_url,
            domain: self.domain,
            actions: self.actions,
            success,
            total_duration_ms,
            timestamp: Utc::now(),
            extracted_content_summary,
        }
    }
}

/// A capped ring buffer of recent trajectories: only the last N are
/// retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrajectoryBuffer {
    items: Vec<Trajectory>,
}

impl TrajectoryBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trajectory: Trajectory, capacity: usize) {
        self.items.push(trajectory);
        while self.items.len() > capacity {
            self.items.remove(0);
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Trajectory] {
        &self.items
    }
}
