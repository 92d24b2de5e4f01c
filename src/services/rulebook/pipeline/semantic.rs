//! Final semantic gate: a resolved value that contradicts its field is
//! cleared, whatever it scored.

use log::debug;

use crate::services::rulebook::analysis::keywords::KeywordIndex;
use crate::services::rulebook::analysis::normalizer;
use crate::services::rulebook::models::types::{CanonicalField, DetectedRecord};

const PERSON_LIKE_COMPANY_MAX_WORDS: usize = 3;
const PERSON_LIKE_COMPANY_MAX_CHARS: usize = 25;

/// A value in `field` is rejected when `rejects` holds.
pub struct SemanticRule {
    pub name: &'static str,
    pub field: CanonicalField,
    rejects: fn(&str, &DetectedRecord, &KeywordIndex) -> bool,
}

pub const SEMANTIC_RULES: &[SemanticRule] = &[
    SemanticRule {
        name: "name_has_field_vocabulary",
        field: CanonicalField::Name,
        rejects: |name, _, index| {
            let folded = normalizer::fold(name);
            index.status.matches(&folded)
                || index.position.matches(&folded)
                || index.org.matches(&folded)
        },
    },
    SemanticRule {
        name: "company_is_person_name",
        field: CanonicalField::Company,
        rejects: company_is_person_name,
    },
    SemanticRule {
        name: "status_has_city",
        field: CanonicalField::Status,
        rejects: |status, _, index| index.city.matches(&normalizer::fold(status)),
    },
    SemanticRule {
        name: "position_has_status",
        field: CanonicalField::Position,
        rejects: |position, _, index| index.status.matches(&normalizer::fold(position)),
    },
];

/// Clear every field a semantic rule rejects. Returns the filtered record and
/// the names of the rules that fired.
pub fn reject_contradictions(
    record: DetectedRecord,
    index: &KeywordIndex,
) -> (DetectedRecord, Vec<&'static str>) {
    let mut record = record;
    let mut fired = Vec::new();

    for rule in SEMANTIC_RULES {
        let rejected = record
            .text(rule.field)
            .is_some_and(|value| (rule.rejects)(value, &record, index));
        if rejected {
            if let Some(value) = record.clear(rule.field) {
                debug!("Semantic rule {} cleared {}: \"{}\"", rule.name, rule.field, value);
            }
            fired.push(rule.name);
        }
    }

    (record, fired)
}

/// Short letters-only text with no org marker is a person's name in
/// disguise. A column headed "Company" is trusted.
fn company_is_person_name(company: &str, record: &DetectedRecord, index: &KeywordIndex) -> bool {
    let labelled = record
        .sources
        .get(&CanonicalField::Company)
        .is_some_and(|header| index.header_hints(header, CanonicalField::Company));
    if labelled {
        return false;
    }

    let trimmed = company.trim();
    let words = trimmed.split_whitespace().count();
    trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace())
        && (1..=PERSON_LIKE_COMPANY_MAX_WORDS).contains(&words)
        && trimmed.chars().count() <= PERSON_LIKE_COMPANY_MAX_CHARS
        && !index.org.matches(&normalizer::fold(trimmed))
}

#[cfg(test)]
#[path = "tests/semantic_tests.rs"]
mod tests;
