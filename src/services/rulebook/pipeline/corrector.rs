//! Cross-field misclassification fixes, run once after resolution.
//!
//! Rules are evaluated in order against the record as left by the previous
//! rule. Each rule only moves or swaps values; nothing is dropped here.

use log::debug;

use crate::services::rulebook::analysis::keywords::KeywordIndex;
use crate::services::rulebook::analysis::normalizer;
use crate::services::rulebook::models::types::{CanonicalField, DetectedRecord};

/// Company values shorter than this (in characters) are suspicious.
const SHORT_COMPANY_CHARS: usize = 4;

/// One `{ predicate, action }` pair.
pub struct CorrectionRule {
    pub name: &'static str,
    applies: fn(&DetectedRecord, &KeywordIndex) -> bool,
    apply: fn(&mut DetectedRecord),
}

impl CorrectionRule {
    pub fn applies(&self, record: &DetectedRecord, index: &KeywordIndex) -> bool {
        (self.applies)(record, index)
    }
}

pub const CORRECTION_RULES: &[CorrectionRule] = &[
    CorrectionRule {
        name: "name_is_position",
        applies: name_is_position,
        apply: |record| record.move_field(CanonicalField::Name, CanonicalField::Position),
    },
    CorrectionRule {
        name: "position_is_company",
        applies: position_is_company,
        apply: |record| record.move_field(CanonicalField::Position, CanonicalField::Company),
    },
    CorrectionRule {
        name: "short_company_is_spoc",
        applies: short_company_is_spoc,
        apply: |record| record.move_field(CanonicalField::Company, CanonicalField::Spoc),
    },
    CorrectionRule {
        name: "finance_company_is_client",
        applies: finance_company_is_client,
        apply: |record| record.swap_fields(CanonicalField::Company, CanonicalField::Client),
    },
];

/// Apply every correction rule in order. Returns the corrected record and the
/// names of the rules that fired.
pub fn correct(
    record: DetectedRecord,
    index: &KeywordIndex,
) -> (DetectedRecord, Vec<&'static str>) {
    let mut record = record;
    let mut applied = Vec::new();

    for rule in CORRECTION_RULES {
        if rule.applies(&record, index) {
            (rule.apply)(&mut record);
            debug!("Correction rule fired: {}", rule.name);
            applied.push(rule.name);
        }
    }

    (record, applied)
}

fn folded(record: &DetectedRecord, field: CanonicalField) -> Option<String> {
    record.text(field).map(normalizer::fold)
}

fn name_is_position(record: &DetectedRecord, index: &KeywordIndex) -> bool {
    !record.has(CanonicalField::Position)
        && folded(record, CanonicalField::Name).is_some_and(|name| index.position.matches(&name))
}

fn position_is_company(record: &DetectedRecord, index: &KeywordIndex) -> bool {
    !record.has(CanonicalField::Company)
        && folded(record, CanonicalField::Position)
            .is_some_and(|position| index.org.matches(&position))
}

/// Initials like "RK" in an unlabelled column are a recruiter, not an
/// employer. A column explicitly headed "Company" is trusted.
fn short_company_is_spoc(record: &DetectedRecord, index: &KeywordIndex) -> bool {
    if record.has(CanonicalField::Spoc) {
        return false;
    }
    let Some(company) = record.text(CanonicalField::Company) else {
        return false;
    };
    let labelled = record
        .sources
        .get(&CanonicalField::Company)
        .is_some_and(|header| index.header_hints(header, CanonicalField::Company));

    company.trim().chars().count() < SHORT_COMPANY_CHARS
        && !index.org.matches(&normalizer::fold(company))
        && !labelled
}

/// The finance-flavored organization belongs in `client`.
fn finance_company_is_client(record: &DetectedRecord, index: &KeywordIndex) -> bool {
    match (
        folded(record, CanonicalField::Company),
        folded(record, CanonicalField::Client),
    ) {
        (Some(company), Some(client)) => {
            index.finance.matches(&company) && !index.finance.matches(&client)
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/corrector_tests.rs"]
mod tests;
