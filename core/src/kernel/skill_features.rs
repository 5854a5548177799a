//! Skill-side input to [`crate::kernel::embed_skill_features`].

use super::PageType;

/// The subset of a skill's preconditions and action sequence the kernel
/// needs to compute an embedding. Kept separate from
/// [`crate::procedural_memory::skill::Skill`] so the kernel has no
/// dependency on the procedural memory module (leaf-first data flow).
#[derive(Debug, Clone, Default)]
pub struct SkillFeatures<'a> {
    pub domain_patterns: &'a [String],
    pub url_patterns: &'a [String],
    pub page_type: Option<PageType>,
    pub required_selectors: &'a [String],
    pub language: Option<&'a str>,
    /// Action type strings, in sequence order, e.g. `"navigate"`, `"click"`.
    pub action_types: &'a [String],
    /// Parallel to `action_types`: whether that action succeeded.
    pub action_success: &'a [bool],
}
