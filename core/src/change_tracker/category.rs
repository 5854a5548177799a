//! Field category detection: custom mappings, then a language-specific
//! name-pattern table, then a value-content fallback.

use super::value::Value;
use std::collections::HashMap;

/// The semantic category of a changed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fee,
    Deadline,
    Requirement,
    Document,
    Contact,
    Appointment,
    Eligibility,
    OfficeHours,
    Location,
    Link,
    Other,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Fee => "fee",
            Category::Deadline => "deadline",
            Category::Requirement => "requirement",
            Category::Document => "document",
            Category::Contact => "contact",
            Category::Appointment => "appointment",
            Category::Eligibility => "eligibility",
            Category::OfficeHours => "office_hours",
            Category::Location => "location",
            Category::Link => "link",
            Category::Other => "other",
        }
    }
}

/// `(category, substrings)` name-pattern table for one language. Substrings
/// are matched case-insensitively against the leaf field name.
fn patterns_for(language: &str) -> &'static [(Category, &'static [&'static str])] {
    match language {
        "es" => &[
            (Category::Fee, &["tarifa", "costo", "precio", "fee"]),
            (Category::Deadline, &["plazo", "fecha_limite", "vencimiento"]),
            (Category::Requirement, &["requisito", "requirement"]),
            (Category::Document, &["documento", "document"]),
            (Category::Contact, &["contacto", "contact"]),
            (Category::Appointment, &["cita", "appointment"]),
            (Category::Eligibility, &["elegibilidad", "eligibility"]),
            (Category::OfficeHours, &["horario", "office_hours"]),
            (Category::Location, &["ubicacion", "location", "direccion"]),
            (Category::Link, &["enlace", "link", "url"]),
        ],
        "pt" => &[
            (Category::Fee, &["taxa", "tarifa", "preco", "fee"]),
            (Category::Deadline, &["prazo", "data_limite"]),
            (Category::Requirement, &["requisito", "requirement"]),
            (Category::Document, &["documento", "document"]),
            (Category::Contact, &["contato", "contact"]),
            (Category::Appointment, &["compromisso", "appointment"]),
            (Category::Eligibility, &["elegibilidade", "eligibility"]),
            (Category::OfficeHours, &["horario", "office_hours"]),
            (Category::Location, &["localizacao", "location", "endereco"]),
            (Category::Link, &["link", "url"]),
        ],
        "fr" => &[
            (Category::Fee, &["frais", "tarif", "prix", "fee"]),
            (Category::Deadline, &["delai", "date_limite", "echeance"]),
            (Category::Requirement, &["exigence", "requirement"]),
            (Category::Document, &["document"]),
            (Category::Contact, &["contact"]),
            (Category::Appointment, &["rendez_vous", "appointment"]),
            (Category::Eligibility, &["eligibilite", "eligibility"]),
            (Category::OfficeHours, &["horaires", "office_hours"]),
            (Category::Location, &["emplacement", "location", "adresse"]),
            (Category::Link, &["lien", "link", "url"]),
        ],
        "it" => &[
            (Category::Fee, &["tariffa", "costo", "prezzo", "fee"]),
            (Category::Deadline, &["scadenza", "termine"]),
            (Category::Requirement, &["requisito", "requirement"]),
            (Category::Document, &["documento", "document"]),
            (Category::Contact, &["contatto", "contact"]),
            (Category::Appointment, &["appuntamento", "appointment"]),
            (Category::Eligibility, &["idoneita", "eligibility"]),
            (Category::OfficeHours, &["orario", "office_hours"]),
            (Category::Location, &["posizione", "location", "indirizzo"]),
            (Category::Link, &["link", "url"]),
        ],
        "de" => &[
            (Category::Fee, &["gebuhr", "gebuehr", "preis", "fee"]),
            (Category::Deadline, &["frist", "termin_ablauf"]),
            (Category::Requirement, &["anforderung", "requirement"]),
            (Category::Document, &["dokument", "document"]),
            (Category::Contact, &["kontakt", "contact"]),
            (Category::Appointment, &["termin", "appointment"]),
            (Category::Eligibility, &["berechtigung", "eligibility"]),
            (Category::OfficeHours, &["oeffnungszeiten", "office_hours"]),
            (Category::Location, &["standort", "location", "adresse"]),
            (Category::Link, &["link", "url"]),
        ],
        _ => &[
            (Category::Fee, &["fee", "price", "cost", "amount"]),
            (Category::Deadline, &["deadline", "due_date", "expiry", "expires"]),
            (Category::Requirement, &["requirement", "required"]),
            (Category::Document, &["document", "attachment", "upload"]),
            (Category::Contact, &["contact", "email", "phone"]),
            (Category::Appointment, &["appointment", "booking", "slot"]),
            (Category::Eligibility, &["eligibility", "eligible"]),
            (Category::OfficeHours, &["office_hours", "hours", "opening_hours"]),
            (Category::Location, &["location", "address", "venue"]),
            (Category::Link, &["link", "url", "href"]),
        ],
    }
}

/// Detect the category of a changed leaf field. Precedence: custom
/// mappings, then language table, then value-content fallback, then
/// `other`.
#[must_use]
pub fn detect_category(
    field_name: &str,
    old_value: Option<&Value>,
    new_value: Option<&Value>,
    custom_field_mappings: &HashMap<String, Category>,
    language: &str,
) -> Category {
    if let Some(category) = custom_field_mappings.get(field_name) {
        return *category;
    }

    let lower = field_name.to_lowercase();
    for (category, substrings) in patterns_for(language) {
        if substrings.iter().any(|s| lower.contains(s)) {
            return *category;
        }
    }

    for value in [old_value, new_value].into_iter().flatten() {
        if looks_like_fee(value) {
            return Category::Fee;
        }
    }

    Category::Other
}

fn looks_like_fee(value: &Value) -> bool {
    value.as_obj().is_some_and(|obj| {
        obj.get("amount").is_some_and(|v| v.as_num().is_some())
            && obj.get("currency").is_some_and(|v| v.as_str().is_some())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_mapping_takes_precedence() {
        let mut mappings = HashMap::new();
        mappings.insert("weirdName".to_string(), Category::Eligibility);
        let category = detect_category("weirdName", None, None, &mappings, "en");
        assert_eq!(category, Category::Eligibility);
    }

    #[test]
    fn english_name_pattern_matches_fee() {
        let category = detect_category("visaFee", None, None, &HashMap::new(), "en");
        assert_eq!(category, Category::Fee);
    }

    #[test]
    fn spanish_name_pattern_matches_deadline() {
        let category = detect_category("plazo_solicitud", None, None, &HashMap::new(), "es");
        assert_eq!(category, Category::Deadline);
    }

    #[test]
    fn value_content_fallback_detects_fee_shape() {
        let mut obj = std::collections::BTreeMap::new();
        obj.insert("amount".to_string(), Value::Num(100.0));
        obj.insert("currency".to_string(), Value::Str("EUR".into()));
        let value = Value::Obj(obj);
        let category = detect_category("unrelatedName", Some(&value), None, &HashMap::new(), "en");
        assert_eq!(category, Category::Fee);
    }

    #[test]
    fn unmatched_field_is_other() {
        let category = detect_category("randomThing", None, None, &HashMap::new(), "en");
        assert_eq!(category, Category::Other);
    }
}
