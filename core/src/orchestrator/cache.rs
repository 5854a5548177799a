//! The cache collaborator boundary consulted by the freshness policy.
//! Actual cache storage is an external concern; this crate only decides
//! when to consult and trust it.

use super::result::FetchedContent;

/// A content cache keyed by URL. Implementations decide storage and
/// staleness; the orchestrator only asks `get`/`is_stale` before deciding
/// whether to fetch.
pub trait FetchCache: Send + Sync {
    fn get(&self, url: &str) -> Option<FetchedContent>;
    fn is_stale(&self, url: &str) -> bool;
    fn put(&self, url: &str, content: FetchedContent);
}
