//! Skill-extraction policy: how a completed trajectory is turned into a
//! reusable, generalized skill.

use super::skill::{Action, ActionType, Preconditions};
use super::trajectory::Trajectory;
use crate::kernel::PageType;
use std::sync::OnceLock;

fn numeric_re() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"\b\d+\b").unwrap())
}

fn uuid_re() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b")
            .unwrap()
    })
}

/// Step 1 of extraction: drop failed actions, collapse consecutive `wait`s,
/// and retain at most the last 10.
#[must_use]
pub fn filter_actions(actions: &[Action]) -> Vec<Action> {
    let mut filtered: Vec<Action> = Vec::new();
    for action in actions {
        if !action.success {
            continue;
        }
        if action.action_type == ActionType::Wait {
            if let Some(last) = filtered.last() {
                if last.action_type == ActionType::Wait {
                    continue;
                }
            }
        }
        filtered.push(action.clone());
    }
    let len = filtered.len();
    if len > 10 {
        filtered.drain(0..len - 10);
    }
    filtered
}

/// Generalize a concrete URL into a pattern: numeric path segments become
/// `[0-9]+`, UUID segments become `[a-f0-9-]+`.
#[must_use]
pub fn generalize_url(url: &str) -> String {
    let with_uuid = uuid_re().replace_all(url, "[a-f0-9-]+");
    numeric_re().replace_all(&with_uuid, "[0-9]+").into_owned()
}

/// Heuristically infer the page type from the action types observed and
/// any extracted-content summary.
#[must_use]
pub fn infer_page_type(actions: &[Action], extracted_content_summary: Option<&str>) -> PageType {
    let lower_summary = extracted_content_summary.unwrap_or_default().to_lowercase();
    let fill_count = actions
        .iter()
        .filter(|a| a.action_type == ActionType::Fill)
        .count();
    let has_login_selector = actions.iter().any(|a| {
        a.selector
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains("login") || s.to_lowercase().contains("password"))
    });
    let has_search_selector = actions.iter().any(|a| {
        a.selector
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains("search"))
    });
    let has_table_or_list_extract = actions.iter().any(|a| {
        a.action_type == ActionType::Extract
            && a.selector
                .as_deref()
                .is_some_and(|s| {
                    let s = s.to_lowercase();
                    s.contains("table") || s.contains("list") || s.contains("row")
                })
    });

    if has_login_selector || lower_summary.contains("login") {
        PageType::Login
    } else if has_search_selector || lower_summary.contains("search results") {
        PageType::Search
    } else if fill_count >= 2 {
        PageType::Form
    } else if has_table_or_list_extract {
        PageType::List
    } else if actions.iter().any(|a| a.action_type == ActionType::Extract) {
        PageType::Detail
    } else {
        PageType::Unknown
    }
}

/// Required selectors: the first five unique selectors among successful
/// actions, in first-seen order.
#[must_use]
pub fn required_selectors(actions: &[Action]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for action in actions {
        if !action.success {
            continue;
        }
        if let Some(selector) = &action.selector {
            if seen.insert(selector.clone()) {
                out.push(selector.clone());
                if out.len() == 5 {
                    break;
                }
            }
        }
    }
    out
}

/// Build the inferred [`Preconditions`] for a trajectory given its filtered
/// action sequence.
#[must_use]
pub fn infer_preconditions(trajectory: &Trajectory, filtered_actions: &[Action]) -> Preconditions {
    Preconditions {
        domain_patterns: vec![trajectory.domain.clone()],
        url_patterns: vec![generalize_url(&trajectory.start_url)],
        page_type: Some(infer_page_type(
            filtered_actions,
            trajectory.extracted_content_summary.as_deref(),
        )),
        required_selectors: required_selectors(filtered_actions),
        content_type_hints: Vec::new(),
        language: None,
        prerequisites: Vec::new(),
        fallback_skill_ids: Vec::new(),
    }
}
