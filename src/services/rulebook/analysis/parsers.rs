//! Primitive parsers: interpret one raw string as a typed value.
//!
//! Each parser expects a trimmed, lower-cased string and returns `None` when
//! the value does not fit. Bare numbers are ambiguous between the numeric
//! parsers; the collector tries them in a fixed order and keeps the first hit.
//! The experience parser needs a unit unless the column is labelled, and the
//! salary parser refuses bare values below [`MIN_BARE_SALARY_LPA`].

use regex::Regex;
use std::sync::LazyLock;

/// Bare numbers below this are never read as salary (LPA).
pub const MIN_BARE_SALARY_LPA: f64 = 1.5;
/// Bare numbers above this are rupees, not lakhs.
pub const RUPEES_THRESHOLD: f64 = 100_000.0;
/// Longest notice period accepted, in days.
pub const MAX_BARE_NOTICE_DAYS: u32 = 365;
pub const MAX_EXPERIENCE_YEARS: f64 = 70.0;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("Invalid regex")
});

static RE_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$").expect("Invalid regex"));

static RE_SALARY_LPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:lpa|l\.p\.a\.?|lakhs? per annum|lacs? per annum)$")
        .expect("Invalid regex")
});

static RE_SALARY_LAKH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:l|lakhs?|lacs?|lakh)$").expect("Invalid regex")
});

static RE_SALARY_K: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*k$").expect("Invalid regex"));

/// Indian (`1,50,000`) or western (`150,000`) digit grouping.
static RE_SALARY_GROUPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,2}(?:,\d{2})*,\d{3}|\d{1,3}(?:,\d{3})+)(?:\.\d+)?$")
        .expect("Invalid regex")
});

static RE_BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("Invalid regex"));

static RE_BARE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("Invalid regex"));

static RE_NOTICE_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(days?|d|weeks?|wks?|w|months?|mons?|mos?|m)\b")
        .expect("Invalid regex")
});

static RE_EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+(?:\.\d+)?)\s*\+?\s*(?:yrs?|years?|y)\.?(?:\s*(\d+(?:\.\d+)?)\s*(?:months?|mos?|m))?$",
    )
    .expect("Invalid regex")
});

static RE_EXPERIENCE_MONTHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:months?|mos?)$").expect("Invalid regex")
});

/// Currency decorations stripped before salary parsing.
const SALARY_PREFIXES: &[&str] = &["rs.", "rs", "inr", "₹"];
const SALARY_SUFFIXES: &[&str] = &["/-", "p.a.", "p.a", "pa", "per annum"];

pub fn is_email(value: &str) -> bool {
    RE_EMAIL.is_match(value.trim())
}

/// Salary in lakhs per annum.
pub fn parse_salary(value: &str) -> Option<f64> {
    let cleaned = strip_currency(value);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(lpa) = capture_number(&RE_SALARY_LPA, &cleaned)
        .or_else(|| capture_number(&RE_SALARY_LAKH, &cleaned))
    {
        return Some(round2(lpa));
    }

    if let Some(thousands) = capture_number(&RE_SALARY_K, &cleaned) {
        return Some(round2(thousands * 1_000.0 / RUPEES_THRESHOLD));
    }

    if RE_SALARY_GROUPED.is_match(&cleaned) {
        let rupees: f64 = cleaned.replace(',', "").parse().ok()?;
        return Some(round2(rupees / RUPEES_THRESHOLD));
    }

    if RE_BARE_NUMBER.is_match(&cleaned) {
        let n: f64 = cleaned.parse().ok()?;
        if n < MIN_BARE_SALARY_LPA {
            return None;
        }
        if n > RUPEES_THRESHOLD {
            return Some(round2(n / RUPEES_THRESHOLD));
        }
        return Some(round2(n));
    }

    None
}

/// Whether the salary carries an explicit unit or grouping (stronger evidence
/// than a bare number).
pub fn salary_has_unit(value: &str) -> bool {
    let cleaned = strip_currency(value);
    RE_SALARY_LPA.is_match(&cleaned)
        || RE_SALARY_LAKH.is_match(&cleaned)
        || RE_SALARY_K.is_match(&cleaned)
        || RE_SALARY_GROUPED.is_match(&cleaned)
}

/// Already-normalized ten-digit Indian mobile number.
pub fn is_mobile(value: &str) -> bool {
    RE_MOBILE.is_match(value)
}

/// Ten-digit Indian mobile number, country code and trunk prefix removed.
pub fn parse_phone(value: &str) -> Option<String> {
    let mut digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 12 && digits.starts_with("91") {
        digits = digits[2..].to_string();
    } else if digits.len() == 11 && digits.starts_with('0') {
        digits = digits[1..].to_string();
    }

    if RE_MOBILE.is_match(&digits) {
        return Some(digits);
    }

    if digits.len() > 10 {
        let tail = &digits[digits.len() - 10..];
        if RE_MOBILE.is_match(tail) {
            return Some(tail.to_string());
        }
    }

    None
}

/// Notice period in days.
pub fn parse_notice_period(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.starts_with("immediate") || value == "0" {
        return Some(0);
    }

    if let Some(caps) = RE_NOTICE_UNIT.captures(value) {
        let n: f64 = caps.get(1)?.as_str().parse().ok()?;
        let unit = caps.get(2)?.as_str();
        let days = if unit.starts_with('w') {
            n * 7.0
        } else if unit.starts_with('m') {
            n * 30.0
        } else {
            n
        };
        let days = days.round();
        return (days <= MAX_BARE_NOTICE_DAYS as f64).then_some(days as u32);
    }

    if RE_BARE_INTEGER.is_match(value) {
        let days: u32 = value.parse().ok()?;
        if days <= MAX_BARE_NOTICE_DAYS {
            return Some(days);
        }
    }

    None
}

/// Experience in years; a unit suffix is required.
pub fn parse_experience(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.contains("fresher") || value.starts_with("entry") || value == "0" {
        return Some(0.0);
    }

    let years = if let Some(caps) = RE_EXPERIENCE.captures(value) {
        let whole: f64 = caps.get(1)?.as_str().parse().ok()?;
        let months: f64 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0);
        whole + months / 12.0
    } else if let Some(months) = capture_number(&RE_EXPERIENCE_MONTHS, value) {
        months / 12.0
    } else {
        return None;
    };

    in_experience_range(round2(years))
}

/// Experience from a column whose header already says "experience": a bare
/// number is read as years.
pub fn parse_experience_hinted(value: &str) -> Option<f64> {
    parse_experience(value).or_else(|| {
        let value = value.trim();
        if RE_BARE_NUMBER.is_match(value) {
            value.parse().ok().map(round2).and_then(in_experience_range)
        } else {
            None
        }
    })
}

fn in_experience_range(years: f64) -> Option<f64> {
    (0.0..=MAX_EXPERIENCE_YEARS)
        .contains(&years)
        .then_some(years)
}

fn strip_currency(value: &str) -> String {
    let mut cleaned = value.trim().to_string();
    for prefix in SALARY_PREFIXES {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.trim_start().to_string();
            break;
        }
    }
    for suffix in SALARY_SUFFIXES {
        if let Some(rest) = cleaned.strip_suffix(suffix) {
            cleaned = rest.trim_end().to_string();
            break;
        }
    }
    cleaned
}

fn capture_number(re: &Regex, value: &str) -> Option<f64> {
    re.captures(value)?.get(1)?.as_str().parse().ok()
}

pub(crate) fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "tests/parsers_tests.rs"]
mod tests;
