//! Candidate collection: every cell is tested against every field.
//!
//! A cell may land in several candidate lists; resolution happens later.
//! Numeric cells stop at the first numeric parser that accepts them, so a
//! bare "7" never becomes notice period, experience and salary at once.

use std::collections::BTreeSet;

use log::debug;

use crate::services::rulebook::analysis::keywords::KeywordIndex;
use crate::services::rulebook::analysis::{normalizer, parsers, scorer};
use crate::services::rulebook::models::types::{
    CandidateMap, CanonicalField, FieldCandidate, FieldValue, Row,
};

/// Added to a candidate whose column header points at the same field.
pub const HEADER_HINT_BONUS: f32 = 25.0;
/// Candidate scores are capped here after the header bonus.
const MAX_CANDIDATE_SCORE: f32 = 100.0;
/// A malformed email under an email header stays a (weak) candidate so
/// validation can report it instead of it silently vanishing.
const MALFORMED_EMAIL_SCORE: f32 = 40.0;
/// Base score for free text under a header that names the field, when no
/// vocabulary recognizes the value ("Andheri" under "Location").
const HINTED_TEXT_FLOOR: f32 = 10.0;
/// A unitless number under an experience header ("5" in "Total Exp").
const LABELLED_BARE_EXPERIENCE_SCORE: f32 = 60.0;
/// A number its labelled parser rejects ("400" under "Notice Period") is
/// kept for that field so validation can flag the range.
const LABELLED_RAW_NUMBER_SCORE: f32 = 30.0;

/// Text fields in evaluation order.
const TEXT_FIELDS: [CanonicalField; 8] = [
    CanonicalField::Position,
    CanonicalField::Name,
    CanonicalField::Spoc,
    CanonicalField::Location,
    CanonicalField::Status,
    CanonicalField::SourceOfCv,
    CanonicalField::Company,
    CanonicalField::Client,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericParser {
    Notice,
    Experience,
    Salary,
}

/// Build the per-row candidate map. Cells are visited in column order.
pub fn collect_candidates(row: &Row, index: &KeywordIndex) -> CandidateMap {
    let mut candidates = CandidateMap::new();

    for (header, cell) in row.iter() {
        let Some(text) = cell.as_text() else {
            continue;
        };
        if index.is_placeholder(&text) || index.is_ignored_header(header) {
            continue;
        }

        let hinted = index.hinted_fields(header);
        collect_cell(header, &text, &hinted, index, &mut candidates);
    }

    debug!(
        "Collected {} candidates from {} cells",
        candidates.total(),
        row.len()
    );
    candidates
}

fn collect_cell(
    header: &str,
    text: &str,
    hinted: &BTreeSet<CanonicalField>,
    index: &KeywordIndex,
    candidates: &mut CandidateMap,
) {
    let push = |candidates: &mut CandidateMap, field: CanonicalField, value: FieldValue, base: f32| {
        candidates.push(
            field,
            FieldCandidate {
                value,
                score: (base + hint_bonus(hinted, field)).min(MAX_CANDIDATE_SCORE),
                source_header: header.to_string(),
            },
        );
    };

    // Contact details are unambiguous and end the cell's evaluation.
    if parsers::is_email(text) {
        let base = scorer::score(index, CanonicalField::Email, text);
        push(candidates, CanonicalField::Email, FieldValue::text(text), base);
        return;
    }
    if text.contains('@') {
        if hinted.contains(&CanonicalField::Email) {
            push(
                candidates,
                CanonicalField::Email,
                FieldValue::text(text),
                MALFORMED_EMAIL_SCORE,
            );
        }
        return;
    }
    if parsers::parse_phone(text).is_some() {
        let base = scorer::score(index, CanonicalField::Phone, text);
        push(candidates, CanonicalField::Phone, FieldValue::text(text), base);
        return;
    }

    let lower = text.to_lowercase();
    match labelled_numeric(hinted) {
        // A column labelled for one numeric field never feeds another one.
        Some(parser) => {
            let parsed = parse_numeric(parser, hinted, &lower, index).or_else(|| {
                let raw = lower.parse::<f64>().ok().filter(|n| n.is_finite())?;
                Some((FieldValue::Number(raw), LABELLED_RAW_NUMBER_SCORE))
            });
            if let Some((value, base)) = parsed {
                for field in parser_fields(parser, hinted) {
                    push(candidates, field, value.clone(), base);
                }
                return;
            }
        }
        None => {
            for parser in numeric_order(hinted) {
                if let Some((value, base)) = parse_numeric(parser, hinted, &lower, index) {
                    for field in parser_fields(parser, hinted) {
                        push(candidates, field, value.clone(), base);
                    }
                    return;
                }
            }
        }
    }

    if normalizer::is_numeric_only(text) {
        return;
    }

    let folded = normalizer::fold(text);
    for field in TEXT_FIELDS {
        if field == CanonicalField::Name
            && hinted.contains(&CanonicalField::Name)
            && rejected_by_name_header(&folded, index)
        {
            continue;
        }
        if labelled_for_rival(field, hinted) {
            continue;
        }

        let mut base = scorer::score(index, field, text);
        if hinted.contains(&field) && base < HINTED_TEXT_FLOOR && is_free_text(text) {
            base = HINTED_TEXT_FLOOR;
        }
        if base > 0.0 && base + hint_bonus(hinted, field) >= scorer::MIN_CANDIDATE_SCORE {
            push(candidates, field, FieldValue::text(text), base);
        }
    }
}

/// Parse order for cells not committed to one numeric field. A header
/// naming several numeric fields ("Exp CTC") tries salary first; an
/// unlabelled cell goes notice period, experience, then salary.
fn numeric_order(hinted: &BTreeSet<CanonicalField>) -> [NumericParser; 3] {
    if hinted.contains(&CanonicalField::Ctc) || hinted.contains(&CanonicalField::ExpectedSalary) {
        [
            NumericParser::Salary,
            NumericParser::Notice,
            NumericParser::Experience,
        ]
    } else if hinted.contains(&CanonicalField::NoticePeriod) {
        [
            NumericParser::Notice,
            NumericParser::Experience,
            NumericParser::Salary,
        ]
    } else if hinted.contains(&CanonicalField::Experience) {
        [
            NumericParser::Experience,
            NumericParser::Notice,
            NumericParser::Salary,
        ]
    } else {
        [
            NumericParser::Notice,
            NumericParser::Experience,
            NumericParser::Salary,
        ]
    }
}

/// The numeric parser a header commits to, when it names exactly one
/// numeric field family.
fn labelled_numeric(hinted: &BTreeSet<CanonicalField>) -> Option<NumericParser> {
    let salary = hinted.contains(&CanonicalField::Ctc)
        || hinted.contains(&CanonicalField::ExpectedSalary);
    let notice = hinted.contains(&CanonicalField::NoticePeriod);
    let experience = hinted.contains(&CanonicalField::Experience);
    match (salary, notice, experience) {
        (true, false, false) => Some(NumericParser::Salary),
        (false, true, false) => Some(NumericParser::Notice),
        (false, false, true) => Some(NumericParser::Experience),
        _ => None,
    }
}

/// Parsed value and base score, `None` when the parser rejects the text.
fn parse_numeric(
    parser: NumericParser,
    hinted: &BTreeSet<CanonicalField>,
    lower: &str,
    index: &KeywordIndex,
) -> Option<(FieldValue, f32)> {
    match parser {
        NumericParser::Notice => {
            let days = parsers::parse_notice_period(lower)?;
            let base = scorer::score(index, CanonicalField::NoticePeriod, lower);
            Some((FieldValue::Number(f64::from(days)), base))
        }
        NumericParser::Experience => {
            let years = if hinted.contains(&CanonicalField::Experience) {
                parsers::parse_experience_hinted(lower)
            } else {
                parsers::parse_experience(lower)
            }?;
            let base = match scorer::score(index, CanonicalField::Experience, lower) {
                score if score > 0.0 => score,
                _ => LABELLED_BARE_EXPERIENCE_SCORE,
            };
            Some((FieldValue::Number(years), base))
        }
        NumericParser::Salary => {
            let lpa = parsers::parse_salary(lower)?;
            let base = scorer::score(index, CanonicalField::Ctc, lower);
            Some((FieldValue::Number(lpa), base))
        }
    }
}

/// Fields a parsed number is proposed for. A salary under a "CTC" or
/// "Expected" header only feeds that field; an unlabelled one feeds both.
fn parser_fields(parser: NumericParser, hinted: &BTreeSet<CanonicalField>) -> Vec<CanonicalField> {
    match parser {
        NumericParser::Notice => vec![CanonicalField::NoticePeriod],
        NumericParser::Experience => vec![CanonicalField::Experience],
        NumericParser::Salary => {
            let labelled: Vec<CanonicalField> =
                [CanonicalField::Ctc, CanonicalField::ExpectedSalary]
                    .into_iter()
                    .filter(|field| hinted.contains(field))
                    .collect();
            if labelled.is_empty() {
                vec![CanonicalField::Ctc, CanonicalField::ExpectedSalary]
            } else {
                labelled
            }
        }
    }
}

fn hint_bonus(hinted: &BTreeSet<CanonicalField>, field: CanonicalField) -> f32 {
    if hinted.contains(&field) {
        HEADER_HINT_BONUS
    } else {
        0.0
    }
}

/// A "name" column never yields status, job-title or notice phrases.
fn rejected_by_name_header(folded: &str, index: &KeywordIndex) -> bool {
    index.status.matches(folded) || index.position.matches(folded) || index.notice.matches(folded)
}

/// Paired fields share value shapes, so a column labelled for one never
/// yields the other: candidate name vs. recruiter, employer vs. client.
fn labelled_for_rival(field: CanonicalField, hinted: &BTreeSet<CanonicalField>) -> bool {
    let rival = match field {
        CanonicalField::Name => CanonicalField::Spoc,
        CanonicalField::Spoc => CanonicalField::Name,
        CanonicalField::Company => CanonicalField::Client,
        CanonicalField::Client => CanonicalField::Company,
        _ => return false,
    };
    hinted.contains(&rival) && !hinted.contains(&field)
}

fn is_free_text(text: &str) -> bool {
    text.chars().filter(|c| c.is_alphabetic()).count() >= 2 && !text.contains('@')
}

#[cfg(test)]
#[path = "tests/collector_tests.rs"]
mod tests;
