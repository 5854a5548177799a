//! Severity classification.

use super::category::Category;
use super::diff::ChangeType;

/// How consequential a detected change is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Breaking,
    Major,
    Minor,
}

/// Percentage increase in a deadline/timeline above which it counts as
/// "significantly" increased rather than a routine minor extension.
const SIGNIFICANT_TIMELINE_INCREASE_PCT: f64 = 50.0;

/// Classify the severity of a change given its category, direction, and
/// (when numeric/duration) its percentage change.
#[must_use]
pub fn classify_severity(
    category: Category,
    change_type: ChangeType,
    percentage_change: Option<f64>,
) -> Severity {
    match (category, change_type) {
        (Category::Fee, ChangeType::Increased) => Severity::Breaking,
        (Category::Deadline, ChangeType::Decreased) => Severity::Breaking,
        (Category::Document | Category::Requirement, ChangeType::Added) => Severity::Breaking,

        (Category::Eligibility, _) => Severity::Major,
        (Category::Deadline, ChangeType::Increased)
            if percentage_change.is_some_and(|pct| pct >= SIGNIFICANT_TIMELINE_INCREASE_PCT) =>
        {
            Severity::Major
        }

        (Category::Fee, ChangeType::Decreased) => Severity::Minor,
        (Category::Deadline, ChangeType::Increased) => Severity::Minor,
        (Category::Contact | Category::OfficeHours, _) => Severity::Minor,

        _ => Severity::Minor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_increase_is_breaking() {
        assert_eq!(
            classify_severity(Category::Fee, ChangeType::Increased, Some(25.0)),
            Severity::Breaking
        );
    }

    #[test]
    fn deadline_decrease_is_breaking() {
        assert_eq!(
            classify_severity(Category::Deadline, ChangeType::Decreased, None),
            Severity::Breaking
        );
    }

    #[test]
    fn new_required_document_is_breaking() {
        assert_eq!(
            classify_severity(Category::Document, ChangeType::Added, None),
            Severity::Breaking
        );
    }

    #[test]
    fn eligibility_change_is_major() {
        assert_eq!(
            classify_severity(Category::Eligibility, ChangeType::Modified, None),
            Severity::Major
        );
    }

    #[test]
    fn fee_decrease_is_minor() {
        assert_eq!(
            classify_severity(Category::Fee, ChangeType::Decreased, Some(-10.0)),
            Severity::Minor
        );
    }

    #[test]
    fn significant_timeline_increase_is_major() {
        assert_eq!(
            classify_severity(Category::Deadline, ChangeType::Increased, Some(60.0)),
            Severity::Major
        );
    }

    #[test]
    fn modest_timeline_increase_is_minor() {
        assert_eq!(
            classify_severity(Category::Deadline, ChangeType::Increased, Some(10.0)),
            Severity::Minor
        );
    }
}
