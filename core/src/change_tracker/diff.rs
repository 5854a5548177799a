//! Structural diffing.

use super::category::{detect_category, Category};
use super::duration::parse_duration_days;
use super::format::{format_field_name, format_value, impact_template};
use super::options::TrackChangesOptions;
use super::severity::{classify_severity, Severity};
use super::value::Value;

/// The kind of change detected at a field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Increased,
    Decreased,
}

/// One detected field-level change.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldChange {
    pub field_path: String,
    pub field_name: String,
    pub change_type: ChangeType,
    pub category: Category,
    pub severity: Severity,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub old_value_formatted: String,
    pub new_value_formatted: String,
    pub percentage_change: Option<f64>,
    pub impact: Option<String>,
}

/// Full result of a `trackChanges` comparison.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChangeReport {
    pub has_changes: bool,
    pub changes: Vec<FieldChange>,
    pub breaking_count: usize,
    pub major_count: usize,
    pub minor_count: usize,
}

impl ChangeReport {
    fn from_changes(changes: Vec<FieldChange>) -> Self {
        let breaking_count = changes
            .iter()
            .filter(|c| c.severity == Severity::Breaking)
            .count();
        let major_count = changes
            .iter()
            .filter(|c| c.severity == Severity::Major)
            .count();
        let minor_count = changes
            .iter()
            .filter(|c| c.severity == Severity::Minor)
            .count();
        Self {
            has_changes: !changes.is_empty(),
            changes,
            breaking_count,
            major_count,
            minor_count,
        }
    }
}

/// Compare `old` and `new`, producing a [`ChangeReport`].
#[must_use]
pub fn track_changes(old: &Value, new: &Value, opts: &TrackChangesOptions) -> ChangeReport {
    let mut changes = Vec::new();
    walk(old, new, "", opts, &mut changes);
    let filtered = filter_changes(changes, opts);
    ChangeReport::from_changes(filtered)
}

fn filter_changes(changes: Vec<FieldChange>, opts: &TrackChangesOptions) -> Vec<FieldChange> {
    changes
        .into_iter()
        .filter(|c| path_allowed(&c.field_path, opts))
        .collect()
}

fn path_allowed(path: &str, opts: &TrackChangesOptions) -> bool {
    let matches_any = |patterns: &[String]| {
        patterns
            .iter()
            .any(|p| path == p || path.starts_with(&format!("{p}.")) || path.starts_with(&format!("{p}[")))
    };
    if matches_any(&opts.ignore_fields) {
        return false;
    }
    if !opts.only_fields.is_empty() {
        return matches_any(&opts.only_fields);
    }
    true
}

fn walk(
    old: &Value,
    new: &Value,
    path: &str,
    opts: &TrackChangesOptions,
    out: &mut Vec<FieldChange>,
) {
    match (old, new) {
        (Value::Arr(old_items), Value::Arr(new_items)) => {
            let max_len = old_items.len().max(new_items.len());
            for idx in 0..max_len {
                let child_path = format!("{path}[{idx}]");
                match (old_items.get(idx), new_items.get(idx)) {
                    (Some(o), Some(n)) => walk(o, n, &child_path, opts, out),
                    (Some(o), None) => emit(Some(o), None, &child_path, opts, out),
                    (None, Some(n)) => emit(None, Some(n), &child_path, opts, out),
                    (None, None) => {}
                }
            }
        }
        (Value::Obj(old_map), Value::Obj(new_map)) => {
            let mut keys: Vec<&String> = old_map.keys().chain(new_map.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match (old_map.get(key), new_map.get(key)) {
                    (Some(o), Some(n)) => walk(o, n, &child_path, opts, out),
                    (Some(o), None) => emit(Some(o), None, &child_path, opts, out),
                    (None, Some(n)) => emit(None, Some(n), &child_path, opts, out),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if old != new {
                emit(Some(old), Some(new), path, opts, out);
            }
        }
    }
}

fn emit(
    old: Option<&Value>,
    new: Option<&Value>,
    path: &str,
    opts: &TrackChangesOptions,
    out: &mut Vec<FieldChange>,
) {
    let field_name = path.rsplit(['.', '[']).next().unwrap_or(path).trim_end_matches(']');

    let (change_type, percentage_change) = classify_change(old, new);

    let category = detect_category(
        field_name,
        old,
        new,
        &opts.custom_field_mappings,
        &opts.language,
    );
    let severity = classify_severity(category, change_type, percentage_change);

    out.push(FieldChange {
        field_path: path.to_string(),
        field_name: format_field_name(field_name),
        change_type,
        category,
        severity,
        old_value: old.cloned(),
        new_value: new.cloned(),
        old_value_formatted: old.map_or_else(|| "null".to_string(), format_value),
        new_value_formatted: new.map_or_else(|| "null".to_string(), format_value),
        percentage_change,
        impact: impact_template(category, change_type),
    });
}

fn classify_change(old: Option<&Value>, new: Option<&Value>) -> (ChangeType, Option<f64>) {
    match (old, new) {
        (None, Some(_)) => (ChangeType::Added, None),
        (Some(_), None) => (ChangeType::Removed, None),
        (Some(o), Some(n)) => {
            if let (Some(a), Some(b)) = (o.as_num(), n.as_num()) {
                return (direction(a, b), percentage(a, b));
            }
            if let (Some(a), Some(b)) = (
                o.as_str().and_then(parse_duration_days),
                n.as_str().and_then(parse_duration_days),
            ) {
                return (direction(a, b), percentage(a, b));
            }
            (ChangeType::Modified, None)
        }
        (None, None) => (ChangeType::Modified, None),
    }
}

fn direction(old: f64, new: f64) -> ChangeType {
    if new > old {
        ChangeType::Increased
    } else if new < old {
        ChangeType::Decreased
    } else {
        ChangeType::Modified
    }
}

fn percentage(old: f64, new: f64) -> Option<f64> {
    if old.abs() > 0.0 {
        Some(((new - old) / old.abs()) * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(pairs: &[(&str, Value)]) -> Value {
        Value::Obj(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    fn fee(amount: f64, currency: &str) -> Value {
        obj(&[
            ("amount", Value::Num(amount)),
            ("currency", Value::Str(currency.to_string())),
        ])
    }

    #[test]
    fn identical_objects_report_no_changes() {
        let a = obj(&[("x", Value::Num(1.0))]);
        let report = track_changes(&a, &a, &TrackChangesOptions::default());
        assert!(!report.has_changes);
        assert!(report.changes.is_empty());
    }

    #[test]
    fn fee_increase_is_breaking_with_percentage() {
        let old = obj(&[("visaFee", fee(80.0, "EUR"))]);
        let new = obj(&[("visaFee", fee(100.0, "EUR"))]);
        let report = track_changes(&old, &new, &TrackChangesOptions::default());
        assert_eq!(report.changes.len(), 1);
        let change = &report.changes[0];
        assert_eq!(change.category, Category::Fee);
        assert_eq!(change.change_type, ChangeType::Increased);
        assert_eq!(change.severity, Severity::Breaking);
        assert!((change.percentage_change.unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn duration_decrease_is_breaking() {
        let old = obj(&[("deadline", Value::Str("30 days".into()))]);
        let new = obj(&[("deadline", Value::Str("10 days".into()))]);
        let report = track_changes(&old, &new, &TrackChangesOptions::default());
        assert_eq!(report.changes.len(), 1);
        let change = &report.changes[0];
        assert_eq!(change.category, Category::Deadline);
        assert_eq!(change.change_type, ChangeType::Decreased);
        assert_eq!(change.severity, Severity::Breaking);
    }

    #[test]
    fn ignore_fields_drops_matching_paths() {
        let old = obj(&[("a", Value::Num(1.0)), ("b", Value::Num(1.0))]);
        let new = obj(&[("a", Value::Num(2.0)), ("b", Value::Num(2.0))]);
        let opts = TrackChangesOptions {
            ignore_fields: vec!["a".to_string()],
            ..TrackChangesOptions::default()
        };
        let report = track_changes(&old, &new, &opts);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].field_path, "b");
    }

    #[test]
    fn array_element_additions_and_removals() {
        let old = Value::Arr(vec![Value::Num(1.0)]);
        let new = Value::Arr(vec![Value::Num(1.0), Value::Num(2.0)]);
        let report = track_changes(&old, &new, &TrackChangesOptions::default());
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].change_type, ChangeType::Added);
        assert_eq!(report.changes[0].field_path, "[1]");
    }
}
