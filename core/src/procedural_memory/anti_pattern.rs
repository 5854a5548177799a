//! Anti-patterns: negative skills recorded on failure.

use super::skill::ActionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An action known to fail under given preconditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntiPattern {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub source_domain: String,
    pub source_url: Option<String>,
    pub action_type: ActionType,
    pub action_selector: Option<String>,
    pub avoid_actions: Vec<String>,
    pub occurrence_count: u32,
    pub consequences: Vec<String>,
    pub alternatives: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AntiPattern {
    /// Dedup key: `(sourceDomain, action.type, action.selector)`.
    #[must_use]
    pub fn dedup_key(&self) -> (String, ActionType, Option<String>) {
        (
            self.source_domain.clone(),
            self.action_type,
            self.action_selector.clone(),
        )
    }

    /// Match on lookup: the domain contains the pattern or the pattern
    /// contains the domain, and the action type matches; the selector is
    /// matched only when the anti-pattern specified one.
    #[must_use]
    pub fn matches(&self, domain: &str, action_type: ActionType, selector: Option<&str>) -> bool {
        let domain_match =
            domain.contains(&self.source_domain) || self.source_domain.contains(domain);
        let type_match = self.action_type == action_type;
        let selector_match = match &self.action_selector {
            Some(expected) => selector == Some(expected.as_str()),
            None => true,
        };
        domain_match && type_match && selector_match
    }
}

/// Record keyed by `dedup_key()`. Duplicates increment `occurrence_count`
/// and union `consequences`; `name` and `alternatives` are kept from the
/// first occurrence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AntiPatternStore {
    patterns: Vec<AntiPattern>,
}

impl AntiPatternStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn all(&self) -> &[AntiPattern] {
        &self.patterns
    }

    pub fn for_domain<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = &'a AntiPattern> {
        self.patterns
            .iter()
            .filter(move |p| p.source_domain.contains(domain) || domain.contains(&p.source_domain))
    }

    /// Insert a new observation, merging into an existing anti-pattern with
    /// the same dedup key if one exists.
    pub fn record(
        &mut self,
        name: String,
        description: String,
        source_domain: String,
        source_url: Option<String>,
        action_type: ActionType,
        action_selector: Option<String>,
        consequences: Vec<String>,
        alternatives: Option<Vec<String>>,
    ) -> Uuid {
        let key = (source_domain.clone(), action_type, action_selector.clone());
        if let Some(existing) = self
            .patterns
            .iter_mut()
            .find(|p| p.dedup_key() == key)
        {
            existing.occurrence_count += 1;
            for consequence in consequences {
                if !existing.consequences.contains(&consequence) {
                    existing.consequences.push(consequence);
                }
            }
            existing.updated_at = Utc::now();
            return existing.id;
        }

        let now = Utc::now();
        let pattern = AntiPattern {
            id: Uuid::new_v4(),
            name,
            description,
            source_domain,
            source_url,
            action_type,
            action_selector,
            avoid_actions: Vec::new(),
            occurrence_count: 1,
            consequences,
            alternatives,
            created_at: now,
            updated_at: now,
        };
        let id = pattern.id;
        self.patterns.push(pattern);
        id
    }

    /// Check whether a proposed action is a known anti-pattern for `domain`.
    #[must_use]
    pub fn check(
        &self,
        domain: &str,
        action_type: ActionType,
        selector: Option<&str>,
    ) -> Option<&AntiPattern> {
        self.patterns
            .iter()
            .find(|p| p.matches(domain, action_type, selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_observation_increments_occurrence_and_unions_consequences() {
        let mut store = AntiPatternStore::new();
        store.record(
            "cookie-wall".into(),
            "blocks extraction".into(),
            "example.com".into(),
            None,
            ActionType::Click,
            Some("#accept".into()),
            vec!["blocked".into()],
            None,
        );
        store.record(
            "cookie-wall-2".into(),
            "still blocks extraction".into(),
            "example.com".into(),
            None,
            ActionType::Click,
            Some("#accept".into()),
            vec!["blocked".into(), "slow".into()],
            None,
        );
        assert_eq!(store.all().len(), 1);
        let p = &store.all()[0];
        assert_eq!(p.occurrence_count, 2);
        assert_eq!(p.name, "cookie-wall");
        assert_eq!(p.consequences.len(), 2);
    }

    #[test]
    fn matches_on_substring_domain_and_action_type() {
        let mut store = AntiPatternStore::new();
        store.record(
            "x".into(),
            "y".into(),
            "news.example.com".into(),
            None,
            ActionType::Click,
            None,
            vec![],
            None,
        );
        // `example.com` is a substring of the anti-pattern's source
        // domain, so it matches in the "pattern contains the domain"
        // direction (fuzzy domain match).
        assert!(store.check("example.com", ActionType::Click, None).is_some());
        assert!(store
            .check("news.example.com", ActionType::Click, Some("#anything"))
            .is_some());
        assert!(store
            .check("unrelated.org", ActionType::Click, None)
            .is_none());
    }
}
