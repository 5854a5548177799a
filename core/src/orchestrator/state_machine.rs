//! The per-request tier selection/fallback loop: `Planning → Trying(tier_i) →
//! Validating(tier_i) → [Retry(tier_{i+1}) | Succeeded | Exhausted |
//! BudgetExceeded]`, expressed as a `Result`-returning loop rather than
//! exceptions.

use super::budget::FetchOptions;
use super::result::{FetchedContent, SkipReason, TierAttempt, TieredFetchResult};
use super::tier_executor::TierExecutor;
use super::validator::{validate_content, ValidationOutcome};
use crate::config::{OrchestratorConfig, Tier};

/// Run the selection/fallback loop starting at `starting_tier`. Does not
/// touch preference learning or caching — those are the facade's job in
/// [`super::fetch`] — this is the pure tier-escalation state machine.
pub async fn run_fetch_loop(
    url: &str,
    config: &OrchestratorConfig,
    opts: &FetchOptions,
    starting_tier: Tier,
    executor: &dyn TierExecutor,
) -> TieredFetchResult {
    let min_content_length = opts.min_content_length.unwrap_or(config.min_content_length);
    let tier_timeout_ms = opts.tier_timeout_ms.unwrap_or(config.tier_timeout_ms);
    let max_latency_ms = opts.max_latency_ms.or(config.max_latency_ms);
    let max_cost_tier = opts.max_cost_tier.or(config.max_cost_tier);
    let freshness_requirement = opts.freshness_requirement.unwrap_or(config.freshness_requirement);

    let candidate_tiers = if let Some(forced) = opts.force_tier {
        vec![forced]
    } else {
        starting_tier.from_here()
    };

    let mut tiers_attempted = Vec::new();
    let mut tiers_skipped = Vec::new();
    let mut attempts = Vec::new();
    let mut total_duration_ms: u64 = 0;
    let mut latency_exceeded = false;
    let mut last_tier_tried = None;
    let mut last_failure_category = None;
    let mut succeeded_content = None;
    let mut examined = 0;

    for &tier in &candidate_tiers {
        examined += 1;

        if let Some(cap) = max_cost_tier {
            if tier > cap {
                tiers_skipped.push((tier, SkipReason::OverCostBudget));
                continue;
            }
        }

        if let Some(budget) = max_latency_ms {
            if total_duration_ms >= budget {
                latency_exceeded = true;
                tiers_skipped.push((tier, SkipReason::LatencyExceeded));
                break;
            }
        }

        if tier == Tier::Playwright && !executor.is_available(tier) {
            tiers_skipped.push((tier, SkipReason::NoPlaywright));
            continue;
        }

        tiers_attempted.push(tier);
        last_tier_tried = Some(tier);
        let outcome = executor.execute(url, tier, tier_timeout_ms).await;

        match outcome {
            Ok(text) => {
                let validation = validate_content(&text, min_content_length);
                let duration_ms = tier.default_timeout_ms().min(tier_timeout_ms);
                total_duration_ms += duration_ms;
                if validation.is_valid() {
                    attempts.push(TierAttempt {
                        tier,
                        duration_ms,
                        succeeded: true,
                        error_category: None,
                    });
                    succeeded_content = Some(FetchedContent { text, tier });
                    break;
                }
                let category = validation_category(validation);
                attempts.push(TierAttempt {
                    tier,
                    duration_ms,
                    succeeded: false,
                    error_category: Some(category.to_string()),
                });
                last_failure_category = Some(category.to_string());
            }
            Err(err) => {
                let duration_ms = tier_timeout_ms.min(tier.default_timeout_ms() * 4);
                total_duration_ms += duration_ms;
                attempts.push(TierAttempt {
                    tier,
                    duration_ms,
                    succeeded: false,
                    error_category: Some(err.category().to_string()),
                });
                last_failure_category = Some(err.category().to_string());
                if !err.is_recoverable() {
                    break;
                }
            }
        }
    }

    // Candidate tiers never reached because the loop exited early (success,
    // an unrecoverable error, or a latency cutoff) still need to show up in
    // `tiers_skipped` if they were over the cost cap — callers rely on this
    // to see the full set of tiers the cost budget ruled out, not just the
    // ones the loop happened to walk past before stopping.
    if let Some(cap) = max_cost_tier {
        for &tier in candidate_tiers.iter().skip(examined) {
            if tier > cap {
                tiers_skipped.push((tier, SkipReason::OverCostBudget));
            }
        }
    }

    if let Some(content) = succeeded_content {
        let fell_back = tiers_attempted.len() > 1;
        return TieredFetchResult {
            success: true,
            content: Some(content),
            tiers_attempted,
            tiers_skipped,
            fell_back,
            cache_hit: false,
            freshness_requirement,
            latency_exceeded,
            total_duration_ms,
            attempts,
            failure_category: None,
            last_tier_tried,
        };
    }

    let fell_back = attempts.len() > 1;
    TieredFetchResult {
        success: false,
        content: None,
        tiers_attempted,
        tiers_skipped,
        fell_back,
        cache_hit: false,
        freshness_requirement,
        latency_exceeded,
        total_duration_ms,
        attempts,
        failure_category: last_failure_category,
        last_tier_tried,
    }
}

fn validation_category(validation: ValidationOutcome) -> &'static str {
    match validation {
        ValidationOutcome::Valid => "unknown",
        ValidationOutcome::TooShort => "validation",
        ValidationOutcome::ErrorPage => "validation",
        ValidationOutcome::BotChallenge => "bot_challenge",
    }
}
