//! Tiered Fetch Orchestrator: cost/latency-bounded escalation across
//! rendering tiers with per-domain tier preference learning.

mod budget;
mod cache;
mod preference;
mod result;
mod state_machine;
mod tier_executor;
mod validator;

pub use budget::FetchOptions;
pub use cache::FetchCache;
pub use preference::{DomainPreference, TierPreferenceStore, DEFAULT_PROMOTE_AFTER_FAILURES};
pub use result::{FetchedContent, SkipReason, TierAttempt, TieredFetchResult};
pub use tier_executor::TierExecutor;
pub use validator::{validate_content, ValidationOutcome};

use crate::config::{Freshness, OrchestratorConfig, Tier};
use crate::error::Result;
use crate::persistence::{load_or_default, save_atomic};

/// Aggregate counters exposed by [`Orchestrator::get_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrchestratorStats {
    pub fetches: u64,
    pub cache_hits: u64,
    pub fallbacks: u64,
    pub failures: u64,
}

/// Owns tier preference learning and orchestrates the tiered fetch loop.
/// Actual network/browser execution and content caching are supplied by
/// the caller via [`TierExecutor`] / [`FetchCache`].
pub struct Orchestrator {
    config: OrchestratorConfig,
    preferences: TierPreferenceStore,
    stats: OrchestratorStats,
}

impl Orchestrator {
    pub fn initialize(config: OrchestratorConfig) -> Result<Self> {
        let preferences =
            load_or_default(&config.preferences_file_path, TierPreferenceStore::new);
        Ok(Self {
            config,
            preferences,
            stats: OrchestratorStats::default(),
        })
    }

    pub fn save(&self) -> Result<()> {
        save_atomic(&self.config.preferences_file_path, &self.preferences)
    }

    /// Run the tiered fetch selection/fallback algorithm for `url`.
    pub async fn fetch(
        &mut self,
        url: &str,
        opts: FetchOptions,
        executor: &dyn TierExecutor,
        cache: Option<&dyn FetchCache>,
    ) -> TieredFetchResult {
        self.stats.fetches += 1;
        let freshness = opts.freshness_requirement.unwrap_or(self.config.freshness_requirement);

        if freshness != Freshness::Realtime {
            if let Some(cache) = cache {
                if let Some(content) = cache.get(url) {
                    if !cache.is_stale(url) {
                        self.stats.cache_hits += 1;
                        return TieredFetchResult::cache_hit(content, freshness);
                    }
                    if freshness == Freshness::Cached {
                        // stale but still usable best-effort at this freshness level
                        self.stats.cache_hits += 1;
                        return TieredFetchResult::cache_hit(content, freshness);
                    }
                }
            }
        }

        let domain = crate::kernel::PageContext::from_url(url)
            .map(|ctx| ctx.domain)
            .unwrap_or_default();
        let starting_tier = self.preferences.starting_tier(&domain);

        let result =
            state_machine::run_fetch_loop(url, &self.config, &opts, starting_tier, executor).await;

        if result.fell_back {
            self.stats.fallbacks += 1;
        }
        if !result.success {
            self.stats.failures += 1;
        }

        if let (Some(tier), Some(cache)) = (result.content.as_ref().map(|c| c.tier), cache) {
            if let Some(content) = &result.content {
                cache.put(url, content.clone());
            }
            self.preferences.record_outcome(
                &domain,
                tier,
                true,
                result.total_duration_ms,
                self.config.promote_after_failures,
            );
        } else if let Some(tier) = result.last_tier_tried {
            self.preferences.record_outcome(
                &domain,
                tier,
                false,
                result.total_duration_ms,
                self.config.promote_after_failures,
            );
        }

        result
    }

    #[must_use]
    pub fn get_domain_preference(&self, domain: &str) -> Option<&DomainPreference> {
        self.preferences.get(domain)
    }

    pub fn set_domain_preference(&mut self, domain: &str, tier: Tier) {
        self.preferences.set(domain.to_string(), tier);
    }

    #[must_use]
    pub fn export_preferences(&self) -> serde_json::Value {
        serde_json::to_value(&self.preferences).unwrap_or(serde_json::Value::Null)
    }

    #[must_use]
    pub fn get_stats(&self) -> OrchestratorStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedExecutor {
        responses: Vec<(Tier, Result<String>)>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TierExecutor for ScriptedExecutor {
        async fn execute(&self, _url: &str, tier: Tier, _timeout_ms: u64) -> Result<String> {
            let idx = self.calls.fetch_add(1, Ordering::SeqCst);
            let (expected_tier, ref result) = self.responses[idx];
            assert_eq!(expected_tier, tier);
            match result {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(match e {
                    crate::error::Error::Auth => crate::error::Error::Auth,
                    _ => crate::error::Error::Timeout,
                }),
            }
        }
    }

    fn orchestrator() -> Orchestrator {
        let mut config = OrchestratorConfig::default();
        config.preferences_file_path =
            std::env::temp_dir().join(format!("bmem-pref-test-{}.json", uuid::Uuid::new_v4()));
        Orchestrator::initialize(config).unwrap()
    }

    #[tokio::test]
    async fn falls_back_to_lightweight_under_cost_budget() {
        let mut orch = orchestrator();
        let executor = ScriptedExecutor {
            responses: vec![
                (Tier::Intelligence, Ok("x".repeat(50))),
                (Tier::Lightweight, Ok("y".repeat(1200))),
            ],
            calls: AtomicUsize::new(0),
        };
        let opts = FetchOptions {
            max_cost_tier: Some(Tier::Lightweight),
            max_latency_ms: Some(1000),
            ..FetchOptions::default()
        };
        let result = orch
            .fetch("https://example.gov/list", opts, &executor, None)
            .await;
        assert!(result.success);
        assert_eq!(result.content.unwrap().tier, Tier::Lightweight);
        assert!(result.fell_back);
        assert!(result
            .tiers_skipped
            .iter()
            .any(|(t, _)| *t == Tier::Playwright));
    }

    #[tokio::test]
    async fn forced_tier_skips_selection() {
        let mut orch = orchestrator();
        let executor = ScriptedExecutor {
            responses: vec![(Tier::Lightweight, Ok("z".repeat(600)))],
            calls: AtomicUsize::new(0),
        };
        let opts = FetchOptions::forcing(Tier::Lightweight);
        let result = orch
            .fetch("https://example.com", opts, &executor, None)
            .await;
        assert!(result.success);
        assert_eq!(result.tiers_attempted, vec![Tier::Lightweight]);
    }
}
