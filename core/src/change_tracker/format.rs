//! Value formatting and field-name humanization.

use super::category::Category;
use super::diff::ChangeType;
use super::value::Value;

/// Render a value as a human-readable string. Monetary shapes
/// (`{amount, currency}`) render as `"<amount> <currency>"`; `null`
/// renders literally as `"null"`.
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Num(n) => format_number(*n),
        Value::Str(s) => s.clone(),
        Value::Arr(items) => {
            let rendered: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Obj(map) => {
            if let (Some(amount), Some(currency)) = (
                map.get("amount").and_then(Value::as_num),
                map.get("currency").and_then(Value::as_str),
            ) {
                return format!("{} {}", format_number(amount), currency);
            }
            let rendered: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{k}: {}", format_value(v)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// Humanize a leaf field name: split `camelCase`/`snake_case` into words
/// and capitalize each.
#[must_use]
pub fn format_field_name(field_name: &str) -> String {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in field_name.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A short human-readable note on the consequence of a change, keyed by
/// `(category, changeType)`. Returns `None` for
/// combinations with no notable impact.
#[must_use]
pub fn impact_template(category: Category, change_type: ChangeType) -> Option<String> {
    match (category, change_type) {
        (Category::Fee, ChangeType::Increased) => {
            Some("This fee increase may invalidate prior budget estimates.".to_string())
        }
        (Category::Fee, ChangeType::Decreased) => {
            Some("This fee decrease may reduce prior budget estimates.".to_string())
        }
        (Category::Deadline, ChangeType::Decreased) => {
            Some("This deadline is now sooner; prior planning may no longer be valid.".to_string())
        }
        (Category::Deadline, ChangeType::Increased) => {
            Some("This deadline has been extended.".to_string())
        }
        (Category::Document | Category::Requirement, ChangeType::Added) => {
            Some("A new requirement was introduced; prior submissions may be incomplete.".to_string())
        }
        (Category::Eligibility, _) => {
            Some("Eligibility criteria changed; prior qualification may no longer hold.".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_monetary_shape() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("amount".to_string(), Value::Num(100.0));
        map.insert("currency".to_string(), Value::Str("EUR".into()));
        assert_eq!(format_value(&Value::Obj(map)), "100 EUR");
    }

    #[test]
    fn formats_null_literally() {
        assert_eq!(format_value(&Value::Null), "null");
    }

    #[test]
    fn humanizes_camel_case() {
        assert_eq!(format_field_name("visaFee"), "Visa Fee");
    }

    #[test]
    fn humanizes_snake_case() {
        assert_eq!(format_field_name("office_hours"), "Office Hours");
    }
}
