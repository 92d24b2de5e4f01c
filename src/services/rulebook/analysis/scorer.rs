//! Field plausibility scoring.
//!
//! [`score`] never fails: an unmatched pair scores `0.0`. Scores
//! live in `0.0..=100.0`; the collector keeps a candidate only at or above
//! [`MIN_CANDIDATE_SCORE`].

use crate::services::rulebook::analysis::keywords::{KeywordIndex, KeywordSet};
use crate::services::rulebook::analysis::normalizer;
use crate::services::rulebook::analysis::parsers;
use crate::services::rulebook::models::types::CanonicalField;

const SCORE_MIN: f32 = 0.0;
const SCORE_MAX: f32 = 100.0;

pub const MIN_CANDIDATE_SCORE: f32 = 30.0;

const EMAIL_SCORE: f32 = 100.0;
const PHONE_SCORE: f32 = 95.0;
const NOTICE_SCORE: f32 = 85.0;
const EXPERIENCE_SCORE: f32 = 85.0;
const SALARY_WITH_UNIT_SCORE: f32 = 80.0;
const SALARY_BARE_SCORE: f32 = 55.0;

const NAME_BASE: f32 = 50.0;
const NAME_TWO_TO_THREE_WORDS: f32 = 15.0;
const NAME_CAPITALIZED: f32 = 5.0;
const NAME_DIGIT_PENALTY: f32 = 25.0;
const NAME_PER_DIGIT_PENALTY: f32 = 5.0;
const NAME_SYMBOL_PENALTY: f32 = 15.0;
const NAME_MAX_WORDS: usize = 4;

const ORG_KEYWORD_BASE: f32 = 45.0;
const ORG_PER_KEYWORD: f32 = 15.0;
const ORG_KEYWORD_CAP: f32 = 90.0;
/// Unlabelled single tokens and acronyms ("Wipro", "TCS").
const ORG_WEAK: f32 = 30.0;
/// Multi-word title-case text without an org keyword reads like a person.
const ORG_PERSON_SHAPED: f32 = 20.0;

const KEYWORD_EXACT: f32 = 90.0;
const KEYWORD_CONTAINED: f32 = 65.0;

// Person (name, spoc) vocabulary penalties.
const PERSON_STATUS_PENALTY: f32 = 40.0;
const PERSON_POSITION_PENALTY: f32 = 35.0;
const PERSON_ORG_PENALTY: f32 = 35.0;
const PERSON_SOURCE_PENALTY: f32 = 40.0;
const PERSON_CITY_PENALTY: f32 = 30.0;
const PERSON_NOTICE_PENALTY: f32 = 40.0;

const POSITION_BASE: f32 = 50.0;
const POSITION_PER_EXTRA_KEYWORD: f32 = 10.0;
const POSITION_KEYWORD_CAP: f32 = 75.0;
const POSITION_MAX_SHORT_WORDS: usize = 6;
/// Added for a short title, subtracted for a long one.
const POSITION_LENGTH_ADJUST: f32 = 10.0;
const POSITION_DIGIT_PENALTY: f32 = 15.0;
const POSITION_STATUS_PENALTY: f32 = 30.0;
const POSITION_ORG_PENALTY: f32 = 10.0;
const POSITION_AT_SIGN_PENALTY: f32 = 50.0;

const ORG_MAX_WORDS: usize = 8;
const ORG_DIGIT_PENALTY: f32 = 15.0;
const ORG_POSITION_PENALTY: f32 = 20.0;
/// Status, source, exact city or notice vocabulary in an org name.
const ORG_FOREIGN_VOCABULARY_PENALTY: f32 = 30.0;

const LOCATION_CONTAINED: f32 = 60.0;
const LOCATION_MAX_WORDS: usize = 6;
const LOCATION_DIGIT_PENALTY: f32 = 10.0;
const LOCATION_LONG_PENALTY: f32 = 20.0;
const LOCATION_FOREIGN_VOCABULARY_PENALTY: f32 = 30.0;

const VOCABULARY_MAX_WORDS: usize = 5;
const VOCABULARY_LONG_PENALTY: f32 = 20.0;

/// Plausibility that `value` (original casing, trimmed) belongs to `field`.
pub fn score(index: &KeywordIndex, field: CanonicalField, value: &str) -> f32 {
    let value = value.trim();
    if value.is_empty() {
        return SCORE_MIN;
    }

    let raw = match field {
        CanonicalField::Name | CanonicalField::Spoc => score_person(index, value),
        CanonicalField::Email => {
            if parsers::is_email(value) {
                EMAIL_SCORE
            } else {
                SCORE_MIN
            }
        }
        CanonicalField::Phone => {
            if parsers::parse_phone(value).is_some() {
                PHONE_SCORE
            } else {
                SCORE_MIN
            }
        }
        CanonicalField::Position => score_position(index, value),
        CanonicalField::Company | CanonicalField::Client => score_org(index, value),
        CanonicalField::Location => score_location(index, value),
        CanonicalField::Status => score_vocabulary(&index.status, value),
        CanonicalField::SourceOfCv => score_vocabulary(&index.source, value),
        CanonicalField::NoticePeriod => {
            if parsers::parse_notice_period(&value.to_lowercase()).is_some() {
                NOTICE_SCORE
            } else {
                SCORE_MIN
            }
        }
        CanonicalField::Experience => {
            if parsers::parse_experience(&value.to_lowercase()).is_some() {
                EXPERIENCE_SCORE
            } else {
                SCORE_MIN
            }
        }
        CanonicalField::Ctc | CanonicalField::ExpectedSalary => score_salary(value),
    };

    raw.clamp(SCORE_MIN, SCORE_MAX)
}

/// Whether the text has the shape of a person's name: 1 to 4 words of
/// letters, hyphens and apostrophes only.
pub fn is_name_shaped(value: &str) -> bool {
    let words: Vec<&str> = value.split_whitespace().collect();
    !words.is_empty()
        && words.len() <= NAME_MAX_WORDS
        && words.iter().all(|word| {
            word.chars().any(char::is_alphabetic)
                && word
                    .chars()
                    .all(|c| c.is_alphabetic() || c == '-' || c == '\'' || c == '’')
        })
}

fn score_person(index: &KeywordIndex, value: &str) -> f32 {
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.is_empty() || words.len() > NAME_MAX_WORDS {
        return SCORE_MIN;
    }
    let letters = value.chars().filter(|c| c.is_alphabetic()).count();
    if letters < 2 || value.contains('@') {
        return SCORE_MIN;
    }

    let mut score = NAME_BASE;
    if (2..=3).contains(&words.len()) {
        score += NAME_TWO_TO_THREE_WORDS;
    }
    if words
        .iter()
        .all(|word| word.chars().next().is_some_and(char::is_uppercase))
    {
        score += NAME_CAPITALIZED;
    }

    let digits = normalizer::digit_count(value);
    if digits > 0 {
        score -= NAME_DIGIT_PENALTY + NAME_PER_DIGIT_PENALTY * digits as f32;
    }
    let symbols = value
        .chars()
        .filter(|c| {
            !(c.is_alphabetic()
                || c.is_whitespace()
                || c.is_ascii_digit()
                || *c == '-'
                || *c == '\''
                || *c == '’')
        })
        .count();
    score -= NAME_SYMBOL_PENALTY * symbols as f32;

    let folded = normalizer::fold(value);
    if index.status.matches(&folded) {
        score -= PERSON_STATUS_PENALTY;
    }
    if index.position.matches(&folded) {
        score -= PERSON_POSITION_PENALTY;
    }
    if index.org.matches(&folded) {
        score -= PERSON_ORG_PENALTY;
    }
    if index.source.matches(&folded) {
        score -= PERSON_SOURCE_PENALTY;
    }
    if index.city.is_exact(&folded) {
        score -= PERSON_CITY_PENALTY;
    }
    if index.notice.matches(&folded) {
        score -= PERSON_NOTICE_PENALTY;
    }

    score
}

fn score_position(index: &KeywordIndex, value: &str) -> f32 {
    let folded = normalizer::fold(value);
    let hits = index.position.hits(&folded);
    if hits == 0 {
        return SCORE_MIN;
    }

    let mut score = (POSITION_BASE + POSITION_PER_EXTRA_KEYWORD * (hits as f32 - 1.0))
        .min(POSITION_KEYWORD_CAP);
    if value.split_whitespace().count() <= POSITION_MAX_SHORT_WORDS {
        score += POSITION_LENGTH_ADJUST;
    } else {
        score -= POSITION_LENGTH_ADJUST;
    }
    if normalizer::digit_count(value) > 0 {
        score -= POSITION_DIGIT_PENALTY;
    }
    if index.status.matches(&folded) {
        score -= POSITION_STATUS_PENALTY;
    }
    if index.org.matches(&folded) {
        score -= POSITION_ORG_PENALTY;
    }
    if value.contains('@') {
        score -= POSITION_AT_SIGN_PENALTY;
    }

    score
}

fn score_org(index: &KeywordIndex, value: &str) -> f32 {
    if value.contains('@') || !value.chars().any(char::is_alphabetic) {
        return SCORE_MIN;
    }
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.len() > ORG_MAX_WORDS {
        return SCORE_MIN;
    }

    let folded = normalizer::fold(value);
    let hits = index.org.hits(&folded);
    let mut score = if hits > 0 {
        (ORG_KEYWORD_BASE + ORG_PER_KEYWORD * hits as f32).min(ORG_KEYWORD_CAP)
    } else if words.len() == 1 || is_acronym(value) {
        ORG_WEAK
    } else if is_name_shaped(value) {
        ORG_PERSON_SHAPED
    } else {
        ORG_WEAK
    };

    if normalizer::digit_count(value) > 0 {
        score -= ORG_DIGIT_PENALTY;
    }
    if index.position.matches(&folded) {
        score -= ORG_POSITION_PENALTY;
    }
    if index.status.matches(&folded) {
        score -= ORG_FOREIGN_VOCABULARY_PENALTY;
    }
    if index.source.matches(&folded) {
        score -= ORG_FOREIGN_VOCABULARY_PENALTY;
    }
    if index.city.is_exact(&folded) {
        score -= ORG_FOREIGN_VOCABULARY_PENALTY;
    }
    if index.notice.matches(&folded) {
        score -= ORG_FOREIGN_VOCABULARY_PENALTY;
    }

    score
}

fn score_location(index: &KeywordIndex, value: &str) -> f32 {
    let folded = normalizer::fold(value);
    let head = folded
        .split(',')
        .next()
        .map(str::trim)
        .unwrap_or_default();

    let mut score = if index.city.is_exact(&folded) || index.city.is_exact(head) {
        KEYWORD_EXACT
    } else if index.city.matches(&folded) {
        LOCATION_CONTAINED
    } else {
        return SCORE_MIN;
    };

    if normalizer::digit_count(value) > 0 {
        score -= LOCATION_DIGIT_PENALTY;
    }
    if value.split_whitespace().count() > LOCATION_MAX_WORDS {
        score -= LOCATION_LONG_PENALTY;
    }
    if index.status.matches(&folded) || index.org.matches(&folded) {
        score -= LOCATION_FOREIGN_VOCABULARY_PENALTY;
    }

    score
}

fn score_vocabulary(set: &KeywordSet, value: &str) -> f32 {
    let folded = normalizer::fold(value);
    let mut score = if set.is_exact(&folded) {
        KEYWORD_EXACT
    } else if set.matches(&folded) {
        KEYWORD_CONTAINED
    } else {
        return SCORE_MIN;
    };
    if value.split_whitespace().count() > VOCABULARY_MAX_WORDS {
        score -= VOCABULARY_LONG_PENALTY;
    }
    score
}

fn score_salary(value: &str) -> f32 {
    let lower = value.to_lowercase();
    if parsers::parse_salary(&lower).is_none() {
        return SCORE_MIN;
    }
    if parsers::salary_has_unit(&lower) {
        SALARY_WITH_UNIT_SCORE
    } else {
        SALARY_BARE_SCORE
    }
}

fn is_acronym(value: &str) -> bool {
    let letters: Vec<char> = value.chars().filter(|c| c.is_alphabetic()).collect();
    (2..=6).contains(&letters.len()) && letters.iter().all(|c| c.is_uppercase())
}

#[cfg(test)]
#[path = "tests/scorer_tests.rs"]
mod tests;
