//! Multi-language duration parsing, normalized to days.

/// `(language, unit_words, days_per_unit)` table. Each unit word is matched
/// as a whole word after lowercasing, singular and plural both listed.
const UNIT_TABLE: &[(&str, &[&str], f64)] = &[
    ("day", &["day", "days", "dia", "dias", "giorno", "giorni"], 1.0),
    (
        "week",
        &["week", "weeks", "semana", "semanas", "woche", "wochen", "semaine", "semaines"],
        7.0,
    ),
    (
        "month",
        &["month", "months", "mes", "meses", "mois", "monat", "monate", "mese", "mesi"],
        30.0,
    ),
    (
        "year",
        &["year", "years", "ano", "anos", "año", "años", "an", "ans", "jahr", "jahre", "anno", "anni"],
        365.0,
    ),
];

/// Parse a duration string like `"30 days"` / `"2 semanas"` into a number of
/// days. Returns `None` if no leading number and recognized unit word are
/// found (unparseable sides fall back to `modified`).
#[must_use]
pub fn parse_duration_days(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let split_at = trimmed.find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')?;
    let (number_part, rest) = trimmed.split_at(split_at);
    let amount: f64 = number_part.trim().parse().ok()?;
    let unit_word = rest.trim().split_whitespace().next()?.to_lowercase();
    let unit_word = unit_word.trim_end_matches(|c: char| !c.is_alphanumeric());

    for (_, words, days_per_unit) in UNIT_TABLE {
        if words.iter().any(|w| *w == unit_word) {
            return Some(amount * days_per_unit);
        }
    }
    None
}
