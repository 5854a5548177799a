//! Prerequisite cycle detection and fallback-chain execution.
//!
//! The cycle check is an explicit white/gray/black DFS over the
//! hypothetical graph that includes the proposed new edges, rolling back
//! atomically (the caller never observes a partially-applied edge set) if
//! a cycle is detected.

use super::skill::SkillId;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Returns `true` if adding every edge `from -> to` in `new_edges` to the
/// existing prerequisite graph (`edges: skill -> its prerequisites`) would
/// introduce a cycle.
#[must_use]
pub fn would_create_cycle(
    edges: &HashMap<SkillId, Vec<SkillId>>,
    new_edges: &[(SkillId, SkillId)],
) -> bool {
    let mut hypothetical = edges.clone();
    for (from, to) in new_edges {
        hypothetical.entry(*from).or_default().push(*to);
    }

    let mut colors: HashMap<SkillId, Color> = HashMap::new();
    let nodes: Vec<SkillId> = hypothetical.keys().copied().collect();

    fn visit(
        node: SkillId,
        graph: &HashMap<SkillId, Vec<SkillId>>,
        colors: &mut HashMap<SkillId, Color>,
    ) -> bool {
        match colors.get(&node) {
            Some(Color::Black) => return false,
            Some(Color::Gray) => return true,
            _ => {}
        }
        colors.insert(node, Color::Gray);
        if let Some(neighbors) = graph.get(&node) {
            for neighbor in neighbors {
                if visit(*neighbor, graph, colors) {
                    return true;
                }
            }
        }
        colors.insert(node, Color::Black);
        false
    }

    for node in nodes {
        if colors.get(&node).is_none() && visit(node, &hypothetical, &mut colors) {
            return true;
        }
    }
    false
}

/// Outcome of attempting a skill with its configured fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOutcome {
    pub success: bool,
    pub executed_skill_id: Option<SkillId>,
    /// `(skill_id, success, duration_ms)` for every attempt made, in order.
    pub attempts: Vec<(SkillId, bool, u64)>,
}

/// Try `primary`, then each of `fallbacks` in order, until one succeeds or
/// the chain is exhausted. `executor` is the caller-supplied action runner
/// (actually driving a browser is out of scope for this crate); it returns
/// `(success, duration_ms)` for a given skill id.
pub fn execute_with_fallbacks<F>(
    primary: SkillId,
    fallbacks: &[SkillId],
    mut executor: F,
) -> FallbackOutcome
where
    F: FnMut(SkillId) -> (bool, u64),
{
    let mut attempts = Vec::new();
    for skill_id in std::iter::once(primary).chain(fallbacks.iter().copied()) {
        let (success, duration_ms) = executor(skill_id);
        attempts.push((skill_id, success, duration_ms));
        if success {
            return FallbackOutcome {
                success: true,
                executed_skill_id: Some(skill_id),
                attempts,
            };
        }
    }
    FallbackOutcome {
        success: false,
        executed_skill_id: None,
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn detects_direct_cycle() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut edges = HashMap::new();
        edges.insert(a, vec![b]);
        assert!(would_create_cycle(&edges, &[(b, a)]));
    }

    #[test]
    fn no_cycle_for_dag() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let mut edges = HashMap::new();
        edges.insert(a, vec![b]);
        assert!(!would_create_cycle(&edges, &[(b, c)]));
    }

    #[test]
    fn fallback_chain_stops_at_first_success() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let outcome = execute_with_fallbacks(a, &[b, c], |skill| (skill == b, 10));
        assert!(outcome.success);
        assert_eq!(outcome.executed_skill_id, Some(b));
        assert_eq!(outcome.attempts.len(), 2);
    }

    #[test]
    fn fallback_chain_exhausted_reports_failure() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let outcome = execute_with_fallbacks(a, &[b], |_| (false, 5));
        assert!(!outcome.success);
        assert_eq!(outcome.attempts.len(), 2);
    }
}
