//! Field-Level Change Tracker: structured JSON diffing with category and
//! severity classification, and bounded per-URL history.

mod category;
mod diff;
mod duration;
mod format;
mod options;
mod record;
mod severity;
mod value;

pub use category::Category;
pub use diff::{track_changes, ChangeReport, ChangeType, FieldChange};
pub use duration::parse_duration_days;
pub use format::{format_field_name, format_value};
pub use options::TrackChangesOptions;
pub use record::{ChangeHistoryStore, ChangeRecord, ChangeStatistics};
pub use severity::Severity;
pub use value::Value;

use crate::config::ChangeTrackerConfig;
use crate::error::Result;
use crate::persistence::{load_or_default, save_atomic};

/// Owns the tracked-URL history and applies configuration defaults to
/// every `track_changes` call made through it.
pub struct ChangeTracker {
    config: ChangeTrackerConfig,
    store: ChangeHistoryStore,
}

impl ChangeTracker {
    pub fn initialize(config: ChangeTrackerConfig) -> Result<Self> {
        let store = load_or_default(&config.file_path, ChangeHistoryStore::new);
        Ok(Self { config, store })
    }

    pub fn save(&self) -> Result<()> {
        save_atomic(&self.config.file_path, &self.store)
    }

    /// Compare `old` and `new`, applying the tracker's configured language
    /// default when `opts.language` is left empty, and recording to
    /// history when `opts.url` is set.
    pub fn track_changes(
        &mut self,
        old: &Value,
        new: &Value,
        mut opts: TrackChangesOptions,
    ) -> ChangeReport {
        if opts.language.is_empty() {
            opts.language = self.config.language.clone();
        }
        let report = track_changes(old, new, &opts);
        if let Some(url) = &opts.url {
            self.store
                .record(url, report.clone(), self.config.max_history_per_url);
        }
        report
    }

    #[must_use]
    pub fn get_history(&self, url: &str) -> &[ChangeRecord] {
        self.store.get_history(url)
    }

    #[must_use]
    pub fn get_tracked_urls(&self) -> Vec<&String> {
        self.store.get_tracked_urls()
    }

    pub fn clear_history(&mut self, url: &str) {
        self.store.clear_history(url);
    }

    pub fn clear_all_history(&mut self) {
        self.store.clear_all_history();
    }

    #[must_use]
    pub fn get_statistics(&self) -> ChangeStatistics {
        self.store.get_statistics()
    }
}
