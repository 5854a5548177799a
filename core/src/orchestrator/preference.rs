//! Per-domain tier preference learning.

use crate::config::Tier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Smoothing factor for the exponential moving average of response time.
const EMA_ALPHA: f64 = 0.3;

/// Consecutive failures at the preferred tier before promotion, when the
/// caller doesn't override it via `OrchestratorConfig::promote_after_failures`.
pub const DEFAULT_PROMOTE_AFTER_FAILURES: u32 = 3;

/// Learned preference for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainPreference {
    pub domain: String,
    pub preferred_tier: Tier,
    pub consecutive_failures: u32,
    pub avg_response_time_ms: f64,
    pub sample_count: u32,
}

impl DomainPreference {
    #[must_use]
    pub fn new(domain: String) -> Self {
        Self {
            domain,
            preferred_tier: Tier::Intelligence,
            consecutive_failures: 0,
            avg_response_time_ms: 0.0,
            sample_count: 0,
        }
    }

    fn record_timing(&mut self, duration_ms: u64) {
        self.sample_count += 1;
        if self.sample_count == 1 {
            self.avg_response_time_ms = duration_ms as f64;
        } else {
            self.avg_response_time_ms = EMA_ALPHA * duration_ms as f64
                + (1.0 - EMA_ALPHA) * self.avg_response_time_ms;
        }
    }

    /// Apply the outcome of one fetch at `tier`. On success at a
    /// cheaper-or-equal tier than preferred,
    /// adopt it; on `promote_after_failures` consecutive failures at the
    /// preferred tier, promote to the next costlier tier.
    pub fn record_outcome(
        &mut self,
        tier: Tier,
        succeeded: bool,
        duration_ms: u64,
        promote_after_failures: u32,
    ) {
        self.record_timing(duration_ms);
        if succeeded {
            self.consecutive_failures = 0;
            if tier < self.preferred_tier {
                self.preferred_tier = tier;
            }
        } else if tier == self.preferred_tier {
            self.consecutive_failures += 1;
            if self.consecutive_failures >= promote_after_failures {
                if let Some(next) = next_costlier(self.preferred_tier) {
                    self.preferred_tier = next;
                }
                self.consecutive_failures = 0;
            }
        }
    }
}

fn next_costlier(tier: Tier) -> Option<Tier> {
    match tier {
        Tier::Intelligence => Some(Tier::Lightweight),
        Tier::Lightweight => Some(Tier::Playwright),
        Tier::Playwright => None,
    }
}

/// Keyed store of [`DomainPreference`]s, persisted as its own document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierPreferenceStore {
    preferences: HashMap<String, DomainPreference>,
}

impl TierPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, domain: &str) -> Option<&DomainPreference> {
        self.preferences.get(domain)
    }

    pub fn set(&mut self, domain: String, tier: Tier) {
        self.preferences
            .entry(domain.clone())
            .and_modify(|p| p.preferred_tier = tier)
            .or_insert_with(|| {
                let mut p = DomainPreference::new(domain);
                p.preferred_tier = tier;
                p
            });
    }

    /// Tier to start selection at for `domain`: the learned preference,
    /// or [`Tier::Intelligence`] if none recorded.
    #[must_use]
    pub fn starting_tier(&self, domain: &str) -> Tier {
        self.preferences
            .get(domain)
            .map_or(Tier::Intelligence, |p| p.preferred_tier)
    }

    pub fn record_outcome(
        &mut self,
        domain: &str,
        tier: Tier,
        succeeded: bool,
        duration_ms: u64,
        promote_after_failures: u32,
    ) {
        let pref = self
            .preferences
            .entry(domain.to_string())
            .or_insert_with(|| DomainPreference::new(domain.to_string()));
        pref.record_outcome(tier, succeeded, duration_ms, promote_after_failures);
    }

    #[must_use]
    pub fn all(&self) -> impl Iterator<Item = &DomainPreference> {
        self.preferences.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_at_cheaper_tier_adopts_it() {
        let mut pref = DomainPreference::new("example.com".into());
        pref.preferred_tier = Tier::Playwright;
        pref.record_outcome(Tier::Intelligence, true, 100, 3);
        assert_eq!(pref.preferred_tier, Tier::Intelligence);
    }

    #[test]
    fn promotes_after_threshold_consecutive_failures() {
        let mut pref = DomainPreference::new("example.com".into());
        for _ in 0..3 {
            pref.record_outcome(Tier::Intelligence, false, 100, 3);
        }
        assert_eq!(pref.preferred_tier, Tier::Lightweight);
        assert_eq!(pref.consecutive_failures, 0);
    }

    #[test]
    fn success_resets_failure_count() {
        let mut pref = DomainPreference::new("example.com".into());
        pref.record_outcome(Tier::Intelligence, false, 100, 3);
        pref.record_outcome(Tier::Intelligence, true, 100, 3);
        assert_eq!(pref.consecutive_failures, 0);
    }

    #[test]
    fn ema_blends_towards_latest_sample() {
        let mut pref = DomainPreference::new("example.com".into());
        pref.record_outcome(Tier::Intelligence, true, 100, 3);
        pref.record_outcome(Tier::Intelligence, true, 300, 3);
        assert!(pref.avg_response_time_ms > 100.0 && pref.avg_response_time_ms < 300.0);
    }

    #[test]
    fn playwright_never_promotes_further() {
        let mut pref = DomainPreference::new("example.com".into());
        pref.preferred_tier = Tier::Playwright;
        for _ in 0..5 {
            pref.record_outcome(Tier::Playwright, false, 100, 3);
        }
        assert_eq!(pref.preferred_tier, Tier::Playwright);
    }
}
