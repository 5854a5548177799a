//! Tier-result content validation.

/// Whether `text` validates as a usable tier result: at least
/// `min_content_length` characters, and not obviously an error or
/// bot-challenge page.
#[must_use]
pub fn validate_content(text: &str, min_content_length: usize) -> ValidationOutcome {
    if is_bot_challenge(text) {
        return ValidationOutcome::BotChallenge;
    }
    if is_error_page(text) {
        return ValidationOutcome::ErrorPage;
    }
    if text.trim().chars().count() < min_content_length {
        return ValidationOutcome::TooShort;
    }
    ValidationOutcome::Valid
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    TooShort,
    ErrorPage,
    BotChallenge,
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

const BOT_CHALLENGE_MARKERS: [&str; 5] = [
    "captcha",
    "cf-challenge",
    "are you a human",
    "verify you are human",
    "access denied",
];

const ERROR_PAGE_MARKERS: [&str; 4] = [
    "404 not found",
    "500 internal server error",
    "service unavailable",
    "something went wrong",
];

fn is_bot_challenge(text: &str) -> bool {
    let lower = text.to_lowercase();
    BOT_CHALLENGE_MARKERS.iter().any(|m| lower.contains(m))
}

fn is_error_page(text: &str) -> bool {
    let lower = text.to_lowercase();
    ERROR_PAGE_MARKERS.iter().any(|m| lower.contains(m))
}
