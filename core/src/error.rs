//! Crate-wide error taxonomy.
//!
//! A single `thiserror` enum with an `is_recoverable` classification
//! helper; the orchestrator's fall-through decision is driven by
//! [`Error::is_recoverable`].

use uuid::Uuid;

/// Result type alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across procedural memory, the tiered orchestrator,
/// and the change tracker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("skill not found: {0}")]
    NotFound(Uuid),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("circular dependency")]
    CircularDependency,

    /// Fetch timed out within its tier budget.
    #[error("tier timeout")]
    Timeout,

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// A required selector was never found on the page.
    #[error("selector not found: {0}")]
    Selector(String),

    /// Content failed validation (too short, error page, etc).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Anomaly heuristics detected a bot-challenge / CAPTCHA page.
    #[error("bot challenge detected")]
    BotChallenge,

    /// Rate-limited by the target service.
    #[error("rate limited")]
    RateLimit,

    /// Requires authentication the caller does not hold; terminal.
    #[error("authentication required")]
    Auth,

    /// Anything that does not fit another category.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl Error {
    /// Whether this error category should cause the orchestrator to fall
    /// through to the next tier (`true`) or stop the request immediately
    /// (`false`). Only [`Error::Auth`] is terminal.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Auth)
    }

    /// Map this error onto the orchestrator's error-category label, used in
    /// [`crate::orchestrator::result::TieredFetchResult`].
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Error::Timeout => "timeout",
            Error::Network(_) => "network",
            Error::Selector(_) => "selector",
            Error::Validation(_) => "validation",
            Error::BotChallenge => "bot_challenge",
            Error::RateLimit => "rate_limit",
            Error::Auth => "auth",
            _ => "unknown",
        }
    }
}
