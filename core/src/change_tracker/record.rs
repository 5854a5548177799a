//! Per-URL change history, bounded and persisted.

use super::diff::ChangeReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One stored report for a URL, stamped with when it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub report: ChangeReport,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregate statistics across all tracked URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeStatistics {
    pub tracked_urls: usize,
    pub total_reports: usize,
    pub breaking_total: usize,
    pub major_total: usize,
    pub minor_total: usize,
}

/// Per-URL history, each bounded to `max_history_per_url` (oldest entries
/// dropped first). No-change reports are never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeHistoryStore {
    history: HashMap<String, Vec<ChangeRecord>>,
}

impl ChangeHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `report` to `url`'s history if it has changes, trimming the
    /// oldest entry once `max_history_per_url` is exceeded.
    pub fn record(&mut self, url: &str, report: ChangeReport, max_history_per_url: usize) {
        if !report.has_changes {
            return;
        }
        let entries = self.history.entry(url.to_string()).or_default();
        entries.push(ChangeRecord {
            report,
            recorded_at: Utc::now(),
        });
        while entries.len() > max_history_per_url {
            entries.remove(0);
        }
    }

    #[must_use]
    pub fn get_history(&self, url: &str) -> &[ChangeRecord] {
        self.history.get(url).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn get_tracked_urls(&self) -> Vec<&String> {
        self.history.keys().collect()
    }

    pub fn clear_history(&mut self, url: &str) {
        self.history.remove(url);
    }

    pub fn clear_all_history(&mut self) {
        self.history.clear();
    }

    #[must_use]
    pub fn get_statistics(&self) -> ChangeStatistics {
        let mut stats = ChangeStatistics {
            tracked_urls: self.history.len(),
            ..ChangeStatistics::default()
        };
        for records in self.history.values() {
            stats.total_reports += records.len();
            for record in records {
                stats.breaking_total += record.report.breaking_count;
                stats.major_total += record.report.major_count;
                stats.minor_total += record.report.minor_count;
            }
        }
        stats
    }
}
