//! Validation and confidence scoring.
//!
//! Confidence starts at 100 and loses a fixed penalty per finding. Errors
//! always block; warnings only lower confidence. Every [`Issue`] carries the
//! points it actually cost, so the total is auditable.

use crate::services::config::SalaryComparisonPolicy;
use crate::services::rulebook::analysis::parsers;
use crate::services::rulebook::models::types::{
    CanonicalField, FieldValue, FixedRecord, ImportCategory, Issue, Severity, ValidationResult,
};

// ==================== THRESHOLDS & PENALTIES ====================

pub const READY_THRESHOLD: u8 = 80;
pub const BLOCKED_THRESHOLD: u8 = 50;

/// Missing or invalid name/phone, malformed email.
pub const PENALTY_BLOCKING: u8 = 50;
pub const PENALTY_MISSING_EMAIL: u8 = 10;
pub const PENALTY_MISSING_OPTIONAL: u8 = 5;
pub const PENALTY_MISSING_POSITION: u8 = 10;
/// Upper bound on the sum of all missing-optional-field penalties.
pub const OPTIONAL_MISSING_PENALTY_CAP: u8 = 35;
pub const PENALTY_SALARY_INVERSION: u8 = 15;
pub const PENALTY_DUPLICATE: u8 = 5;
pub const PENALTY_RANGE_WARNING: u8 = 5;
pub const PENALTY_EXPERIENCE_RANGE: u8 = 20;

pub const MAX_EXPERIENCE_YEARS: f64 = 70.0;
pub const HIGH_EXPERIENCE_YEARS: f64 = 50.0;
pub const MAX_NOTICE_DAYS: f64 = 365.0;
pub const MAX_SALARY_LPA: f64 = 100.0;

/// Fields that only warn when missing, in reporting order.
const OPTIONAL_FIELDS: [CanonicalField; 11] = [
    CanonicalField::Position,
    CanonicalField::Location,
    CanonicalField::Experience,
    CanonicalField::Ctc,
    CanonicalField::ExpectedSalary,
    CanonicalField::NoticePeriod,
    CanonicalField::Company,
    CanonicalField::Client,
    CanonicalField::Spoc,
    CanonicalField::Status,
    CanonicalField::SourceOfCv,
];

#[derive(Debug, Default)]
struct Findings {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Findings {
    fn error(&mut self, field: CanonicalField, message: impl Into<String>, penalty: u8) {
        self.errors.push(issue(field, None, message, Severity::Error, penalty));
    }

    fn warning(&mut self, field: CanonicalField, message: impl Into<String>, penalty: u8) {
        self.warnings
            .push(issue(field, None, message, Severity::Warning, penalty));
    }

    fn cross_warning(
        &mut self,
        field: CanonicalField,
        related: CanonicalField,
        message: impl Into<String>,
        penalty: u8,
    ) {
        self.warnings.push(issue(
            field,
            Some(related),
            message,
            Severity::Warning,
            penalty,
        ));
    }

    fn total_penalty(&self) -> u32 {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .map(|issue| u32::from(issue.penalty))
            .sum()
    }
}

fn issue(
    field: CanonicalField,
    related: Option<CanonicalField>,
    message: impl Into<String>,
    severity: Severity,
    penalty: u8,
) -> Issue {
    Issue {
        field,
        related,
        message: message.into(),
        severity,
        penalty,
    }
}

/// Validate a normalized record and compute its import decision.
pub fn validate(record: &FixedRecord, policy: SalaryComparisonPolicy) -> ValidationResult {
    let mut findings = Findings::default();

    check_required(record, &mut findings);
    check_optional_presence(record, &mut findings);
    check_ranges(record, &mut findings);
    check_salary_pair(record, policy, &mut findings);
    check_duplicates(record, &mut findings);

    let confidence = 100u32.saturating_sub(findings.total_penalty()).min(100) as u8;
    let category = categorize(findings.errors.is_empty(), confidence);

    ValidationResult {
        errors: findings.errors,
        warnings: findings.warnings,
        confidence,
        category,
    }
}

/// `blocked` on any error or low confidence, `ready` when confident,
/// `review` in between.
pub fn categorize(no_errors: bool, confidence: u8) -> ImportCategory {
    if !no_errors || confidence < BLOCKED_THRESHOLD {
        ImportCategory::Blocked
    } else if confidence >= READY_THRESHOLD {
        ImportCategory::Ready
    } else {
        ImportCategory::Review
    }
}

// ==================== RULES ====================

fn check_required(record: &FixedRecord, findings: &mut Findings) {
    match record.get(CanonicalField::Name) {
        None => findings.error(CanonicalField::Name, "Name is missing", PENALTY_BLOCKING),
        Some(value) if !value.to_string().chars().any(char::is_alphabetic) => findings.error(
            CanonicalField::Name,
            format!("Name \"{value}\" contains no letters"),
            PENALTY_BLOCKING,
        ),
        Some(_) => {}
    }

    match record.get(CanonicalField::Phone) {
        None => findings.error(CanonicalField::Phone, "Phone is missing", PENALTY_BLOCKING),
        Some(value) if !parsers::is_mobile(&value.to_string()) => findings.error(
            CanonicalField::Phone,
            format!("Phone \"{value}\" is not a valid 10-digit mobile number"),
            PENALTY_BLOCKING,
        ),
        Some(_) => {}
    }

    match record.get(CanonicalField::Email) {
        None => findings.warning(
            CanonicalField::Email,
            "Email is missing",
            PENALTY_MISSING_EMAIL,
        ),
        Some(value) if !parsers::is_email(&value.to_string()) => findings.error(
            CanonicalField::Email,
            format!("Email \"{value}\" is malformed"),
            PENALTY_BLOCKING,
        ),
        Some(_) => {}
    }
}

fn check_optional_presence(record: &FixedRecord, findings: &mut Findings) {
    let mut budget = OPTIONAL_MISSING_PENALTY_CAP;
    for field in OPTIONAL_FIELDS {
        if record.get(field).is_some() {
            continue;
        }
        let wanted = if field == CanonicalField::Position {
            PENALTY_MISSING_POSITION
        } else {
            PENALTY_MISSING_OPTIONAL
        };
        let penalty = wanted.min(budget);
        budget -= penalty;
        findings.warning(field, format!("{field} is missing"), penalty);
    }
}

fn check_ranges(record: &FixedRecord, findings: &mut Findings) {
    match record.get(CanonicalField::Experience) {
        Some(FieldValue::Number(years)) => {
            if !(0.0..=MAX_EXPERIENCE_YEARS).contains(years) {
                findings.error(
                    CanonicalField::Experience,
                    format!("Experience {years} years is outside 0-{MAX_EXPERIENCE_YEARS}"),
                    PENALTY_EXPERIENCE_RANGE,
                );
            } else if *years > HIGH_EXPERIENCE_YEARS {
                findings.warning(
                    CanonicalField::Experience,
                    format!("Experience {years} years is unusually high"),
                    PENALTY_RANGE_WARNING,
                );
            }
        }
        Some(FieldValue::Text(text)) => findings.warning(
            CanonicalField::Experience,
            format!("Experience \"{text}\" is not a number"),
            PENALTY_RANGE_WARNING,
        ),
        None => {}
    }

    match record.get(CanonicalField::NoticePeriod) {
        Some(FieldValue::Number(days)) if !(0.0..=MAX_NOTICE_DAYS).contains(days) => findings
            .warning(
                CanonicalField::NoticePeriod,
                format!("Notice period {days} days is outside 0-{MAX_NOTICE_DAYS}"),
                PENALTY_RANGE_WARNING,
            ),
        Some(FieldValue::Text(text)) => findings.warning(
            CanonicalField::NoticePeriod,
            format!("Notice period \"{text}\" is not a number of days"),
            PENALTY_RANGE_WARNING,
        ),
        _ => {}
    }

    for field in [CanonicalField::Ctc, CanonicalField::ExpectedSalary] {
        match record.get(field) {
            Some(FieldValue::Number(lpa)) if !(0.0..=MAX_SALARY_LPA).contains(lpa) => findings
                .warning(
                    field,
                    format!("{field} {lpa} LPA is outside 0-{MAX_SALARY_LPA}"),
                    PENALTY_RANGE_WARNING,
                ),
            Some(FieldValue::Text(text)) => findings.warning(
                field,
                format!("{field} \"{text}\" is not a number"),
                PENALTY_RANGE_WARNING,
            ),
            _ => {}
        }
    }
}

fn check_salary_pair(
    record: &FixedRecord,
    policy: SalaryComparisonPolicy,
    findings: &mut Findings,
) {
    let ctc = record.number(CanonicalField::Ctc);
    let expected = record.number(CanonicalField::ExpectedSalary);

    match (ctc, expected) {
        (Some(ctc), Some(expected)) if ctc > expected => findings.cross_warning(
            CanonicalField::Ctc,
            CanonicalField::ExpectedSalary,
            format!("ctc {ctc} LPA is higher than expectedSalary {expected} LPA"),
            PENALTY_SALARY_INVERSION,
        ),
        (None, Some(_))
            if policy == SalaryComparisonPolicy::FlagIncomplete
                && !record.record.has(CanonicalField::Ctc) =>
        {
            findings.cross_warning(
                CanonicalField::Ctc,
                CanonicalField::ExpectedSalary,
                "expectedSalary given without ctc to compare against",
                PENALTY_RANGE_WARNING,
            )
        }
        _ => {}
    }
}

fn check_duplicates(record: &FixedRecord, findings: &mut Findings) {
    for (field, values) in &record.record.duplicates {
        if values.is_empty() {
            continue;
        }
        let listed: Vec<String> = values.iter().map(ToString::to_string).collect();
        findings.warning(
            *field,
            format!(
                "{field} has {} other candidate value(s): {}",
                values.len(),
                listed.join(", ")
            ),
            PENALTY_DUPLICATE,
        );
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
