//! The collaborator boundary between orchestration policy and actual page
//! fetching. Real browser/network I/O is out of scope for this crate;
//! callers inject an implementation.

use crate::config::Tier;
use crate::error::Result;
use async_trait::async_trait;

/// Runs a single tier attempt against a URL. Implementations perform the
/// actual network/browser work; this crate only decides which tier to try,
/// when to stop, and how to interpret the outcome.
#[async_trait]
pub trait TierExecutor: Send + Sync {
    /// Fetch `url` at `tier`, bounded by `timeout_ms`. Returns the raw text
    /// content on success, or a classified [`crate::error::Error`] the
    /// orchestrator can use to decide whether to fall through.
    async fn execute(&self, url: &str, tier: Tier, timeout_ms: u64) -> Result<String>;

    /// Whether `tier` can be attempted at all in this runtime
    /// (`playwright` may be absent, for example).
    fn is_available(&self, tier: Tier) -> bool {
        let _ = tier;
        true
    }
}
