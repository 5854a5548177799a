//! Skill retrieval and ranking.

use super::skill::{Skill, SkillId};
use crate::kernel::{cosine_similarity, embed_page_context, PageContext};
use serde::{Deserialize, Serialize};

/// Bonus added to the cosine score when a skill's preconditions are fully
/// met by the observed context.
pub const PRECONDITIONS_MET_BONUS: f32 = 0.2;

/// A ranked retrieval result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill_id: SkillId,
    pub similarity: f32,
    pub preconditions_met: bool,
    /// `cosine + 0.2 * preconditions_met`, the ranking key.
    pub score: f32,
}

/// Rank `skills` against `context`, returning at most `top_k` matches.
///
/// Only skills whose cosine similarity is `>= similarity_threshold` **or**
/// whose preconditions are fully met are considered. Ties break on higher
/// raw similarity.
#[must_use]
pub fn retrieve_skills(
    skills: &[Skill],
    context: &PageContext,
    top_k: usize,
    embedding_dim: usize,
    similarity_threshold: f32,
) -> Vec<SkillMatch> {
    let context_embedding = embed_page_context(context, embedding_dim);
    let page_type = context.page_type;

    let mut matches: Vec<SkillMatch> = skills
        .iter()
        .filter_map(|skill| {
            let similarity = cosine_similarity(&skill.embedding, &context_embedding);
            let preconditions_met =
                skill
                    .preconditions
                    .is_met_by(&context.domain, &context.url, page_type);
            if similarity < similarity_threshold && !preconditions_met {
                return None;
            }
            let bonus = if preconditions_met {
                PRECONDITIONS_MET_BONUS
            } else {
                0.0
            };
            Some(SkillMatch {
                skill_id: skill.id,
                similarity,
                preconditions_met,
                score: similarity + bonus,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.similarity.total_cmp(&a.similarity))
    });
    matches.truncate(top_k);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::PageType;
    use crate::procedural_memory::skill::{Preconditions, Skill};

    fn skill_with_embedding(embedding: Vec<f32>) -> Skill {
        Skill::new(
            "s".into(),
            "d".into(),
            Preconditions::default(),
            vec![],
            embedding,
            "example.com".into(),
        )
    }

    #[test]
    fn monotonic_in_similarity_when_preconditions_tie() {
        let ctx = PageContext {
            url: "https://example.com/a".into(),
            domain: "example.com".into(),
            page_type: PageType::Detail,
            has_form: false,
            has_pagination: false,
            has_table: false,
            content_length: 100,
            available_selectors: vec![],
            language: None,
        };
        let context_embedding = embed_page_context(&ctx, 64);
        let close = skill_with_embedding(context_embedding.clone());
        let mut far = context_embedding.clone();
        far.iter_mut().for_each(|x| *x *= -1.0);
        let far_skill = skill_with_embedding(if far.iter().any(|x| *x != 0.0) {
            far
        } else {
            vec![0.0; 64]
        });
        let skills = vec![far_skill, close];
        let matches = retrieve_skills(&skills, &ctx, 10, 64, 0.0);
        assert!(matches[0].similarity >= matches.last().unwrap().similarity);
    }

    #[test]
    fn respects_top_k() {
        let ctx = PageContext::from_url("https://example.com").unwrap();
        let skills: Vec<Skill> = (0..5)
            .map(|_| skill_with_embedding(vec![1.0; 64]))
            .collect();
        let matches = retrieve_skills(&skills, &ctx, 2, 64, -1.0);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn below_threshold_and_unmet_preconditions_excluded() {
        let ctx = PageContext::from_url("https://example.com").unwrap();
        let skill = skill_with_embedding(vec![0.0; 64]);
        let matches = retrieve_skills(&[skill], &ctx, 10, 64, 0.9);
        assert!(matches.is_empty());
    }
}
