//! Format normalization. Never rejects a value; every actual change is logged.

use unicode_segmentation::UnicodeSegmentation;

use crate::services::rulebook::analysis::{normalizer, parsers};
use crate::services::rulebook::models::types::{
    CanonicalField, DetectedRecord, FieldValue, FixedRecord,
};

const PHONE_DIGITS: usize = 10;

/// Normalize every field of `record`. Returns the fixed record and a
/// human-readable change log (`field: "old" → "new"`).
///
/// Running it on its own output changes nothing.
pub fn auto_fix(record: DetectedRecord) -> (FixedRecord, Vec<String>) {
    let mut record = record;
    let mut changes = Vec::new();

    for field in CanonicalField::ALL {
        let Some(old) = record.get(field).cloned() else {
            continue;
        };
        let new = normalize(field, &old);
        if new != old {
            changes.push(format!("{field}: \"{old}\" → \"{new}\""));
            record.set(field, new);
        }
    }

    (FixedRecord { record }, changes)
}

fn normalize(field: CanonicalField, value: &FieldValue) -> FieldValue {
    match field {
        CanonicalField::Experience => coerce_number(value, parsers::parse_experience_hinted),
        CanonicalField::Ctc | CanonicalField::ExpectedSalary => {
            coerce_number(value, parsers::parse_salary)
        }
        CanonicalField::NoticePeriod => coerce_days(value),
        CanonicalField::Phone => normalize_phone(value),
        _ => match value {
            FieldValue::Text(text) => FieldValue::Text(normalize_text(field, text)),
            FieldValue::Number(_) => value.clone(),
        },
    }
}

fn normalize_text(field: CanonicalField, text: &str) -> String {
    let collapsed = normalizer::collapse_whitespace(text);
    match field {
        CanonicalField::Name | CanonicalField::Spoc => title_case(&collapsed),
        CanonicalField::Email | CanonicalField::Status | CanonicalField::SourceOfCv => {
            collapsed.to_lowercase()
        }
        _ => collapsed,
    }
}

/// Capitalize the first letter of every word, lowercase the rest.
pub fn title_case(text: &str) -> String {
    text.split_word_bounds()
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                _ => segment.to_string(),
            }
        })
        .collect()
}

/// Numbers are rounded to two decimals; text is read as a plain number first,
/// then with the field's own parser. Unreadable text is left for validation.
fn coerce_number(value: &FieldValue, parse: fn(&str) -> Option<f64>) -> FieldValue {
    match value {
        FieldValue::Number(n) => FieldValue::Number(parsers::round2(*n)),
        FieldValue::Text(text) => {
            let lower = normalizer::collapse_whitespace(text).to_lowercase();
            match lower.parse::<f64>().ok().or_else(|| parse(&lower)) {
                Some(n) if n.is_finite() => FieldValue::Number(parsers::round2(n)),
                _ => FieldValue::Text(normalizer::collapse_whitespace(text)),
            }
        }
    }
}

fn coerce_days(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Number(n) => FieldValue::Number(n.round()),
        FieldValue::Text(text) => {
            let lower = normalizer::collapse_whitespace(text).to_lowercase();
            let days = lower
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(f64::round)
                .or_else(|| parsers::parse_notice_period(&lower).map(f64::from));
            match days {
                Some(days) => FieldValue::Number(days),
                None => FieldValue::Text(normalizer::collapse_whitespace(text)),
            }
        }
    }
}

/// Digits only, last ten kept.
fn normalize_phone(value: &FieldValue) -> FieldValue {
    let digits: String = value.to_string().chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return value.clone();
    }
    let start = digits.len().saturating_sub(PHONE_DIGITS);
    FieldValue::Text(digits[start..].to_string())
}

#[cfg(test)]
#[path = "tests/auto_fix_tests.rs"]
mod tests;
