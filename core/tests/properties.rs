//! Property tests for embedding stability and cosine-similarity safety.

use browse_memory_core::kernel::{cosine_similarity, embed_page_context, PageContext, PageType};
use proptest::prelude::*;

fn arbitrary_context(url: String, content_length: usize, has_form: bool) -> PageContext {
    PageContext {
        url: url.clone(),
        domain: url,
        page_type: PageType::Unknown,
        has_form,
        has_pagination: false,
        has_table: false,
        content_length,
        available_selectors: Vec::new(),
        language: None,
    }
}

proptest! {
    /// P1: embedding is byte-identical across runs and either zero or unit
    /// length within 1e-6.
    #[test]
    fn embedding_is_stable_and_unit_or_zero(
        url in "[a-z]{1,12}\\.(com|org|gov)(/[a-z0-9]{0,8}){0,3}",
        content_length in 0usize..20_000,
        has_form in any::<bool>(),
    ) {
        let ctx = arbitrary_context(url, content_length, has_form);
        let first = embed_page_context(&ctx, 64);
        let second = embed_page_context(&ctx, 64);
        prop_assert_eq!(&first, &second);

        let norm: f32 = first.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm < 1e-6 || (norm - 1.0).abs() < 1e-6);
    }

    /// P2: cosine of any two equal-length vectors is bounded in [-1, 1]
    /// and never NaN; a zero vector against anything is exactly 0.
    #[test]
    fn cosine_is_bounded_and_never_nan(
        a in prop::collection::vec(-100.0f32..100.0, 1..16),
        b in prop::collection::vec(-100.0f32..100.0, 1..16),
    ) {
        if a.len() == b.len() {
            let sim = cosine_similarity(&a, &b);
            prop_assert!(!sim.is_nan());
            prop_assert!((-1.0..=1.0).contains(&sim));
        }

        let zero = vec![0.0f32; a.len()];
        prop_assert_eq!(cosine_similarity(&zero, &a), 0.0);
    }
}
