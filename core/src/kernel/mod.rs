//! Fingerprint / embedding kernel.
//!
//! Produces deterministic fixed-dimension (default 64) unit-length vectors
//! from a [`PageContext`] or a skill definition, and a safe cosine
//! similarity over them. Both embedding functions are pure: the same input
//! always produces the same vector, bit-for-bit, and the hash function
//! never fails (no panics, no `NaN`). The embedding is a hand-rolled
//! deterministic hash rather than a learned model — no training data or
//! inference dependency for something that only needs to be stable and
//! locality-sensitive.

mod embedding;
mod hash;
mod page_context;
mod similarity;
mod skill_features;

pub use embedding::{embed_page_context, embed_skill_features, l2_normalize};
pub use hash::{hash_bit_spread, hash_str};
pub use page_context::PageContext;
pub use similarity::cosine_similarity;
pub use skill_features::SkillFeatures;

/// Page type as detected or declared for a page/skill context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    List,
    Detail,
    Form,
    Search,
    Login,
    Unknown,
}

impl PageType {
    /// The one-hot slot index for this page type within the fixed layout.
    #[must_use]
    pub fn slot_index(self) -> usize {
        match self {
            PageType::List => 0,
            PageType::Detail => 1,
            PageType::Form => 2,
            PageType::Search => 3,
            PageType::Login => 4,
            PageType::Unknown => 5,
        }
    }
}

impl Default for PageType {
    fn default() -> Self {
        PageType::Unknown
    }
}
