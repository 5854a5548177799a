//! Slot-assignment embedding.
//!
//! Both [`embed_page_context`] and [`embed_skill_features`] build a raw
//! 64-slot feature vector, then project it onto the caller's configured
//! dimension (truncating or zero-padding) and L2-normalize. An all-zero
//! input yields an all-zero vector, never `NaN`.

use super::hash::{hash_bit_spread, hash_str};
use super::page_context::PageContext;
use super::skill_features::SkillFeatures;
use super::PageType;

const RAW_DIM: usize = 64;

/// Action types in the fixed histogram order used by slots 32..40.
const ACTION_TYPES: [&str; 8] = [
    "navigate",
    "click",
    "fill",
    "select",
    "scroll",
    "wait",
    "extract",
    "dismiss_banner",
];

const GOV_EDU_SUFFIXES: [&str; 4] = [".gov", ".edu", ".mil", ".ac.uk"];

/// Normalize `v` to unit length in place. Leaves an all-zero vector
/// untouched (never produces `NaN`), per P1.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn project(raw: [f32; RAW_DIM], dim: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; dim];
    let n = dim.min(RAW_DIM);
    out[..n].copy_from_slice(&raw[..n]);
    l2_normalize(&mut out);
    out
}

fn second_level_domain(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

fn is_gov_or_edu(domain: &str) -> bool {
    GOV_EDU_SUFFIXES.iter().any(|suffix| domain.ends_with(suffix))
}

fn url_path_and_query(url: &str) -> (String, bool, bool) {
    let without_scheme = url.split("://").nth(1).unwrap_or(url);
    let after_host = without_scheme.splitn(2, '/').nth(1).unwrap_or("");
    let has_fragment = after_host.contains('#');
    let before_fragment = after_host.split('#').next().unwrap_or("");
    let has_query = before_fragment.contains('?');
    let path = before_fragment.split('?').next().unwrap_or("").to_string();
    (path, has_query, has_fragment)
}

fn path_depth(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

fn has_numeric_segment(path: &str) -> bool {
    path.split('/')
        .any(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit()))
}

fn url_structure_features(url: &str, out: &mut [f32; 8]) {
    let (path, has_query, has_fragment) = url_path_and_query(url);
    let lower = url.to_lowercase();
    out[0] = (path_depth(&path) as f32 / 5.0).min(1.0);
    out[1] = f32::from(has_query);
    out[2] = f32::from(has_fragment);
    out[3] = f32::from(lower.contains("search"));
    out[4] = f32::from(lower.contains("login") || lower.contains("signin"));
    out[5] = f32::from(lower.contains("list") || lower.contains("catalog"));
    out[6] = f32::from(lower.contains("form"));
    out[7] = f32::from(has_numeric_segment(&path));
}

fn domain_features(domain: &str, out: &mut [f32; 8]) {
    out[0] = f32::from(is_gov_or_edu(domain));
    let mut spread = [0.0f32; 7];
    hash_bit_spread(second_level_domain(domain), &mut spread);
    out[1..8].copy_from_slice(&spread);
}

fn page_type_onehot(page_type: PageType, out: &mut [f32; 8]) {
    out[page_type.slot_index()] = 1.0;
}

fn selector_fingerprint(selectors: &[String], out: &mut [f32; 8]) {
    if selectors.is_empty() {
        return;
    }
    let mut sorted: Vec<&str> = selectors.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    let joined = sorted.join(",");
    hash_bit_spread(&joined, out);
}

fn language_features(language: Option<&str>, out: &mut [f32; 4]) {
    let Some(lang) = language.filter(|l| !l.is_empty()) else {
        return;
    };
    out[0] = 1.0;
    out[1] = f32::from(lang.eq_ignore_ascii_case("en"));
    let h = hash_str(lang);
    out[2] = if h & 1 == 1 { 1.0 } else { 0.0 };
    out[3] = if (h >> 1) & 1 == 1 { 1.0 } else { 0.0 };
}

/// Embed a [`PageContext`] into `dim` dimensions.
#[must_use]
pub fn embed_page_context(ctx: &PageContext, dim: usize) -> Vec<f32> {
    let mut raw = [0.0f32; RAW_DIM];

    let mut domain = [0.0f32; 8];
    domain_features(&ctx.domain, &mut domain);
    raw[0..8].copy_from_slice(&domain);

    let mut url_struct = [0.0f32; 8];
    url_structure_features(&ctx.url, &mut url_struct);
    raw[8..16].copy_from_slice(&url_struct);

    let mut page_type = [0.0f32; 8];
    page_type_onehot(ctx.page_type, &mut page_type);
    raw[16..24].copy_from_slice(&page_type);

    let content_bucket = (ctx.content_length as f32 / 5000.0).min(1.0);
    let has_any_selector = !ctx.available_selectors.is_empty();
    let has_id_selector = ctx.available_selectors.iter().any(|s| s.starts_with('#'));
    let has_class_selector = ctx.available_selectors.iter().any(|s| s.starts_with('.'));
    raw[24] = f32::from(ctx.has_form);
    raw[25] = f32::from(ctx.has_pagination);
    raw[26] = f32::from(ctx.has_table);
    raw[27] = content_bucket;
    raw[28] = f32::from(has_any_selector);
    raw[29] = f32::from(has_id_selector);
    raw[30] = f32::from(has_class_selector);
    // raw[31] reserved within the page-shape group.

    // Slots 32..47 (action histogram + sequence features) are not
    // applicable to a bare page context; left at zero.

    let mut selectors = [0.0f32; 8];
    selector_fingerprint(&ctx.available_selectors, &mut selectors);
    raw[48..56].copy_from_slice(&selectors);

    let mut lang = [0.0f32; 4];
    language_features(ctx.language.as_deref(), &mut lang);
    raw[56..60].copy_from_slice(&lang);

    project(raw, dim)
}

/// Embed a skill's preconditions and action sequence into `dim` dimensions.
#[must_use]
pub fn embed_skill_features(features: &SkillFeatures<'_>, dim: usize) -> Vec<f32> {
    let mut raw = [0.0f32; RAW_DIM];

    if let Some(domain) = features.domain_patterns.first() {
        let mut domain_slots = [0.0f32; 8];
        domain_features(domain, &mut domain_slots);
        raw[0..8].copy_from_slice(&domain_slots);
    }

    if let Some(url_pattern) = features.url_patterns.first() {
        let mut url_slots = [0.0f32; 8];
        url_structure_features(url_pattern, &mut url_slots);
        raw[8..16].copy_from_slice(&url_slots);
    }

    let mut page_type = [0.0f32; 8];
    page_type_onehot(features.page_type.unwrap_or_default(), &mut page_type);
    raw[16..24].copy_from_slice(&page_type);

    let has_any_selector = !features.required_selectors.is_empty();
    let has_id_selector = features
        .required_selectors
        .iter()
        .any(|s| s.starts_with('#'));
    let has_class_selector = features
        .required_selectors
        .iter()
        .any(|s| s.starts_with('.'));
    raw[28] = f32::from(has_any_selector);
    raw[29] = f32::from(has_id_selector);
    raw[30] = f32::from(has_class_selector);

    if !features.action_types.is_empty() {
        let mut counts = [0usize; 8];
        for action_type in features.action_types {
            if let Some(idx) = ACTION_TYPES.iter().position(|t| t == action_type) {
                counts[idx] += 1;
            }
        }
        let max_count = counts.iter().copied().max().unwrap_or(0).max(1) as f32;
        for (idx, count) in counts.iter().enumerate() {
            raw[32 + idx] = *count as f32 / max_count;
        }

        let total = features.action_types.len() as f32;
        raw[40] = (total / 20.0).min(1.0);
        let successes = features.action_success.iter().filter(|s| **s).count() as f32;
        raw[41] = if features.action_success.is_empty() {
            0.0
        } else {
            successes / features.action_success.len() as f32
        };
        // Ratios per action-type group (slots 42..47): interaction,
        // navigation/waiting, extraction.
        let interaction = counts[1] + counts[2] + counts[3]; // click, fill, select
        let nav_wait = counts[0] + counts[5]; // navigate, wait
        let extraction = counts[6] + counts[7]; // extract, dismiss_banner
        raw[42] = interaction as f32 / total;
        raw[43] = nav_wait as f32 / total;
        raw[44] = extraction as f32 / total;
    }

    let mut selectors = [0.0f32; 8];
    selector_fingerprint(features.required_selectors, &mut selectors);
    raw[48..56].copy_from_slice(&selectors);

    let mut lang = [0.0f32; 4];
    language_features(features.language, &mut lang);
    raw[56..60].copy_from_slice(&lang);

    project(raw, dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::PageContext;

    #[test]
    fn zero_input_yields_zero_vector() {
        let ctx = PageContext::from_url("").unwrap();
        let v = embed_page_context(&ctx, 64);
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn nonzero_input_is_unit_length() {
        let ctx = PageContext::from_url("https://example.gov/search?q=1").unwrap();
        let v = embed_page_context(&ctx, 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn embedding_is_deterministic() {
        let ctx = PageContext::from_url("https://example.com/items/42").unwrap();
        assert_eq!(
            embed_page_context(&ctx, 64),
            embed_page_context(&ctx, 64)
        );
    }

    #[test]
    fn dimension_is_respected() {
        let ctx = PageContext::from_url("https://example.com/x").unwrap();
        assert_eq!(embed_page_context(&ctx, 32).len(), 32);
        assert_eq!(embed_page_context(&ctx, 128).len(), 128);
    }

    #[test]
    fn skill_features_embedding_never_nan() {
        let features = SkillFeatures {
            domain_patterns: &["example.com".to_string()],
            url_patterns: &[],
            page_type: None,
            required_selectors: &[],
            language: None,
            action_types: &[],
            action_success: &[],
        };
        let v = embed_skill_features(&features, 64);
        assert!(v.iter().all(|x| !x.is_nan()));
    }
}
