//! `bmem fetch ...` — exercise the tiered fetch orchestrator against a
//! simulated executor. Real network/browser fetching is a collaborator
//! boundary the core crate deliberately does not implement.

use crate::output::OutputFormat;
use anyhow::Result;
use async_trait::async_trait;
use browse_memory_core::config::Tier;
use browse_memory_core::error;
use browse_memory_core::orchestrator::{FetchOptions, Orchestrator, TierExecutor};
use clap::Args;

#[derive(Args)]
pub struct FetchArgs {
    /// URL to fetch.
    pub url: String,
    /// Content the simulated executor returns, standing in for whatever
    /// tier would actually be reached. Defaults to a short stub that
    /// fails the minimum content length check, to exercise fallback.
    #[arg(long)]
    pub content: Option<String>,
    /// Pin a specific tier instead of running tier selection.
    #[arg(long, value_enum)]
    pub force_tier: Option<CliTier>,
    /// Reject tiers costing more than this.
    #[arg(long, value_enum)]
    pub max_cost_tier: Option<CliTier>,
    /// Overall latency budget in milliseconds.
    #[arg(long)]
    pub max_latency_ms: Option<u64>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum CliTier {
    Intelligence,
    Lightweight,
    Playwright,
}

impl From<CliTier> for Tier {
    fn from(value: CliTier) -> Self {
        match value {
            CliTier::Intelligence => Tier::Intelligence,
            CliTier::Lightweight => Tier::Lightweight,
            CliTier::Playwright => Tier::Playwright,
        }
    }
}

/// Always returns the same canned content regardless of tier, since this
/// crate does not perform real fetches.
struct SimulatedExecutor {
    content: String,
}

#[async_trait]
impl TierExecutor for SimulatedExecutor {
    async fn execute(&self, _url: &str, _tier: Tier, _timeout_ms: u64) -> error::Result<String> {
        Ok(self.content.clone())
    }
}

pub async fn handle_fetch_command(
    args: FetchArgs,
    orchestrator: &mut Orchestrator,
    format: OutputFormat,
) -> Result<()> {
    let content = args
        .content
        .unwrap_or_else(|| "stub page content".to_string());
    let executor = SimulatedExecutor { content };

    let opts = FetchOptions {
        force_tier: args.force_tier.map(Into::into),
        max_cost_tier: args.max_cost_tier.map(Into::into),
        max_latency_ms: args.max_latency_ms,
        ..FetchOptions::default()
    };

    let result = orchestrator.fetch(&args.url, opts, &executor, None).await;
    orchestrator.save()?;

    match format {
        OutputFormat::Human => {
            println!("success: {}", result.success);
            println!("tiers attempted: {:?}", result.tiers_attempted);
            if !result.tiers_skipped.is_empty() {
                println!("tiers skipped: {:?}", result.tiers_skipped);
            }
            println!("fell back: {}", result.fell_back);
            println!("total duration: {}ms", result.total_duration_ms);
            if let Some(content) = &result.content {
                println!("served from tier: {:?}", content.tier);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
