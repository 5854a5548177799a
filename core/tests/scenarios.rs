//! Black-box end-to-end scenarios exercising the three stores together.

use async_trait::async_trait;
use browse_memory_core::change_tracker::{
    Category, ChangeTracker, ChangeType, Severity, TrackChangesOptions, Value,
};
use browse_memory_core::config::{ChangeTrackerConfig, OrchestratorConfig, ProceduralMemoryConfig, Tier};
use browse_memory_core::error;
use browse_memory_core::orchestrator::{FetchOptions, Orchestrator, TierExecutor};
use browse_memory_core::procedural_memory::{
    Action, ActionType, MemoryStore, Preconditions, Skill, TrajectoryHandle,
};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("bmem-scenario-{label}-{}.json", uuid::Uuid::new_v4()))
}

fn memory_store() -> MemoryStore {
    let mut config = ProceduralMemoryConfig::default();
    config.file_path = temp_path("memory");
    MemoryStore::initialize(config).unwrap()
}

fn action(kind: ActionType, selector: Option<&str>, duration_ms: u64) -> Action {
    let mut a = Action::new(kind);
    a.selector = selector.map(str::to_string);
    a.success = true;
    a.duration_ms = duration_ms;
    a
}

/// Scenario 1: skill extraction.
#[test]
fn skill_extraction_produces_generalized_preconditions() {
    let mut store = memory_store();
    let mut handle = TrajectoryHandle::start(
        "https://example.com/items/42".to_string(),
        "example.com".to_string(),
    );
    handle.record_action(action(ActionType::Navigate, None, 400));
    handle.record_action(action(ActionType::Click, Some("#next"), 400));
    handle.record_action(action(ActionType::Extract, Some("table"), 400));

    let skill_id = store
        .record_trajectory(
            handle,
            "https://example.com/items/43".to_string(),
            true,
            None,
        )
        .unwrap()
        .expect("trajectory long enough to learn from");

    let skill = store.get_skill(skill_id).unwrap();
    assert_eq!(skill.preconditions.domain_patterns, vec!["example.com"]);
    assert_eq!(
        skill.preconditions.url_patterns,
        vec!["https://example.com/items/[0-9]+"]
    );
    assert!((2..=3).contains(&skill.action_sequence.len()));
}

/// Scenario 2: merge into existing.
#[test]
fn second_matching_trajectory_merges_into_one_skill() {
    let mut store = memory_store();
    let build_handle = |durations: [u64; 3]| {
        let mut handle = TrajectoryHandle::start(
            "https://example.com/items/42".to_string(),
            "example.com".to_string(),
        );
        handle.record_action(action(ActionType::Navigate, None, durations[0]));
        handle.record_action(action(ActionType::Click, Some("#next"), durations[1]));
        handle.record_action(action(ActionType::Extract, Some("table"), durations[2]));
        handle
    };

    store
        .record_trajectory(
            build_handle([400, 400, 400]),
            "https://example.com/items/43".to_string(),
            true,
            None,
        )
        .unwrap();
    store
        .record_trajectory(
            build_handle([300, 300, 200]),
            "https://example.com/items/43".to_string(),
            true,
            None,
        )
        .unwrap();

    assert_eq!(store.get_all_skills().len(), 1);
    let skill = &store.get_all_skills()[0];
    assert_eq!(skill.metrics.times_used, 2);
    assert_eq!(skill.metrics.success_count, 2);
    assert!((skill.metrics.avg_duration_ms - 1000.0).abs() < 1e-9);
}

/// Scenario 3: auto-rollback.
#[test]
fn degraded_skill_triggers_auto_rollback() {
    let mut store = memory_store();
    let skill = Skill::new(
        "checkout-flow".to_string(),
        "Completes checkout.".to_string(),
        Preconditions::default(),
        vec![action(ActionType::Click, Some("#buy"), 100)],
        vec![0.0; 64],
        "shop.example.com".to_string(),
    );
    let id = store.add_skill(skill).unwrap();

    // Three successful executions build up a high-success-rate version.
    for _ in 0..3 {
        store.record_skill_execution(id, true, 100).unwrap();
    }
    let best_before = store.get_best_version(id).cloned();
    assert!(best_before.is_some());

    // Three failures drag the running success rate down to 0.5.
    for _ in 0..3 {
        store.record_skill_execution(id, false, 100).unwrap();
    }
    let skill = store.get_skill(id).unwrap();
    assert_eq!(skill.metrics.times_used, 6);
    assert!((skill.metrics.success_rate() - 0.5).abs() < 1e-9);

    assert!(store.check_for_auto_rollback(id));
    store.rollback_skill(id).unwrap();
    let rolled_back = store.get_skill(id).unwrap();
    assert!(rolled_back.metrics.success_rate() > 0.5);
}

struct ScriptedExecutor {
    responses: std::sync::Mutex<Vec<(Tier, String)>>,
}

#[async_trait]
impl TierExecutor for ScriptedExecutor {
    async fn execute(&self, _url: &str, tier: Tier, _timeout_ms: u64) -> error::Result<String> {
        let mut responses = self.responses.lock().unwrap();
        let (expected_tier, content) = responses.remove(0);
        assert_eq!(expected_tier, tier);
        Ok(content)
    }
}

/// Scenario 4: tier fallback under budget.
#[tokio::test]
async fn tier_fallback_respects_cost_budget() {
    let mut config = OrchestratorConfig::default();
    config.preferences_file_path = temp_path("prefs");
    let mut orchestrator = Orchestrator::initialize(config).unwrap();

    let executor = ScriptedExecutor {
        responses: std::sync::Mutex::new(vec![
            (Tier::Intelligence, "x".repeat(50)),
            (Tier::Lightweight, "y".repeat(1200)),
        ]),
    };
    let opts = FetchOptions {
        max_cost_tier: Some(Tier::Lightweight),
        max_latency_ms: Some(1000),
        ..FetchOptions::default()
    };

    let result = orchestrator
        .fetch("https://example.gov/list", opts, &executor, None)
        .await;

    assert_eq!(result.content.as_ref().unwrap().tier, Tier::Lightweight);
    assert_eq!(
        result.tiers_attempted,
        vec![Tier::Intelligence, Tier::Lightweight]
    );
    assert!(result.fell_back);
    assert!(result
        .tiers_skipped
        .iter()
        .any(|(t, _)| *t == Tier::Playwright));
}

fn change_tracker() -> ChangeTracker {
    let mut config = ChangeTrackerConfig::default();
    config.file_path = temp_path("changes");
    ChangeTracker::initialize(config).unwrap()
}

fn obj(pairs: &[(&str, Value)]) -> Value {
    Value::Obj(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
}

fn fee(amount: f64, currency: &str) -> Value {
    obj(&[
        ("amount", Value::Num(amount)),
        ("currency", Value::Str(currency.to_string())),
    ])
}

/// Scenario 5: fee increase is breaking.
#[test]
fn fee_increase_is_breaking_with_twenty_five_percent() {
    let mut tracker = change_tracker();
    let old = obj(&[("visaFee", fee(80.0, "EUR"))]);
    let new = obj(&[("visaFee", fee(100.0, "EUR"))]);

    let report = tracker.track_changes(&old, &new, TrackChangesOptions::default());

    assert_eq!(report.changes.len(), 1);
    let change = &report.changes[0];
    assert_eq!(change.category, Category::Fee);
    assert_eq!(change.change_type, ChangeType::Increased);
    assert!((change.percentage_change.unwrap() - 25.0).abs() < 1e-9);
    assert_eq!(change.severity, Severity::Breaking);
}

/// Scenario 6: duration decrease is breaking.
#[test]
fn duration_decrease_is_breaking() {
    let mut tracker = change_tracker();
    let old = obj(&[("deadline", Value::Str("30 days".to_string()))]);
    let new = obj(&[("deadline", Value::Str("10 days".to_string()))]);

    let report = tracker.track_changes(&old, &new, TrackChangesOptions::default());

    assert_eq!(report.changes.len(), 1);
    let change = &report.changes[0];
    assert_eq!(change.category, Category::Deadline);
    assert_eq!(change.change_type, ChangeType::Decreased);
    assert_eq!(change.severity, Severity::Breaking);
}

/// Scenario 7: cycle rejection.
#[test]
fn adding_a_prerequisite_cycle_is_rejected() {
    let mut store = memory_store();
    let a = store
        .add_skill(Skill::new(
            "a".to_string(),
            "skill a".to_string(),
            Preconditions::default(),
            vec![],
            vec![0.0; 64],
            "example.com".to_string(),
        ))
        .unwrap();
    let b = store
        .add_skill(Skill::new(
            "b".to_string(),
            "skill b".to_string(),
            Preconditions::default(),
            vec![],
            vec![0.0; 64],
            "example.com".to_string(),
        ))
        .unwrap();

    store.add_prerequisites(a, vec![b]).unwrap();
    let before = store.get_skill(b).unwrap().preconditions.prerequisites.clone();

    let result = store.add_prerequisites(b, vec![a]);
    assert!(result.is_err());
    assert_eq!(
        store.get_skill(b).unwrap().preconditions.prerequisites,
        before
    );
}
