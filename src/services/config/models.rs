use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::services::rulebook::models::types::CanonicalField;

/// Header keywords that point a column at one canonical field.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HeaderHint {
    pub keywords: Vec<String>,
    /// A header containing any of these never hints the field
    /// (e.g. "Expected CTC" is not a current-CTC column).
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl HeaderHint {
    fn new(keywords: &[&str], exclude: &[&str]) -> Self {
        Self {
            keywords: to_strings(keywords),
            exclude: to_strings(exclude),
        }
    }
}

/// How the CTC vs. expected-salary comparison treats an incomplete pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SalaryComparisonPolicy {
    /// Compare only when both figures are present.
    #[default]
    SkipWhenIncomplete,
    /// Warn when an expected salary has no current CTC to compare with.
    FlagIncomplete,
}

/// Every vocabulary and knob the detection engine reads.
///
/// All fields default individually, so a JSON override only needs the keys
/// it changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RulebookConfig {
    /// Values that never count as data ("N/A", "TBD", ...).
    pub placeholders: Vec<String>,
    /// Columns whose header contains one of these never contribute.
    pub ignored_header_keywords: Vec<String>,
    pub header_hints: BTreeMap<CanonicalField, HeaderHint>,
    /// Header markers of recruiter-process name columns that win name ties.
    pub authoritative_name_headers: Vec<String>,
    pub position_keywords: Vec<String>,
    pub org_keywords: Vec<String>,
    pub finance_keywords: Vec<String>,
    pub city_keywords: Vec<String>,
    pub status_keywords: Vec<String>,
    pub source_keywords: Vec<String>,
    /// Phrases that mark a notice-period value ("serving notice", ...).
    pub notice_keywords: Vec<String>,
    /// Deduplication order: earlier fields keep a shared value.
    pub field_priority: Vec<CanonicalField>,
    pub salary_comparison: SalaryComparisonPolicy,
}

impl Default for RulebookConfig {
    fn default() -> Self {
        Self {
            placeholders: to_strings(&[
                "n/a", "na", "n.a", "n.a.", "nil", "none", "null", "nan", "undefined", "-", "--",
                "---", ".", "?", "tbd", "tba", "tbc", "not available", "not applicable",
                "not mentioned", "not disclosed", "negotiable", "as per company norms",
                "as per norms", "no", "xx", "xxx", "#n/a",
            ]),
            ignored_header_keywords: to_strings(&[
                "date", "timestamp", "time", "id", "sr", "sno", "s.no", "serial", "remarks",
                "remark", "comment", "comments", "feedback", "notes", "note", "link", "url",
                "resume", "cv link", "attachment",
            ]),
            header_hints: default_header_hints(),
            authoritative_name_headers: to_strings(&["fls", "non-fls", "non fls", "nonfls"]),
            position_keywords: to_strings(&[
                "developer", "engineer", "manager", "analyst", "consultant", "lead", "architect",
                "designer", "executive", "intern", "tester", "qa", "administrator", "admin",
                "specialist", "associate", "director", "officer", "coordinator", "programmer",
                "scientist", "head", "trainee", "accountant", "devops", "fullstack",
                "full stack", "frontend", "front end", "backend", "back end", "sde", "vp",
                "technician", "operator", "supervisor", "assistant", "representative",
                "recruiter", "sales", "support", "hr", "java", "python", ".net", "dotnet",
                "react", "angular", "android", "ios", "salesforce", "sap", "tally",
            ]),
            org_keywords: to_strings(&[
                "pvt", "pvt.", "private", "ltd", "ltd.", "limited", "inc", "inc.", "llp", "llc",
                "corp", "corporation", "technologies", "technology", "tech", "solutions",
                "services", "systems", "software", "consulting", "consultancy", "infotech",
                "group", "industries", "enterprises", "labs", "bank", "finance", "financial",
                "insurance", "global", "international", "company", "digital", "networks",
                "ventures", "capital", "healthcare", "pharma", "motors", "retail", "logistics",
                "infra", "securities", "telecom",
            ]),
            finance_keywords: to_strings(&[
                "bank", "banking", "finance", "financial", "finserv", "capital", "insurance",
                "securities", "credit", "investment", "investments", "fintech", "nbfc", "hdfc",
                "icici", "axis", "kotak", "sbi", "bajaj", "lending", "loans", "wealth",
            ]),
            city_keywords: to_strings(&[
                "mumbai", "navi mumbai", "thane", "delhi", "new delhi", "ncr", "noida",
                "greater noida", "gurgaon", "gurugram", "faridabad", "ghaziabad", "bangalore",
                "bengaluru", "hyderabad", "secunderabad", "chennai", "pune", "kolkata",
                "ahmedabad", "gandhinagar", "jaipur", "lucknow", "chandigarh", "mohali",
                "indore", "bhopal", "kochi", "cochin", "coimbatore", "nagpur", "surat",
                "vadodara", "mysore", "mysuru", "trivandrum", "thiruvananthapuram",
                "visakhapatnam", "vizag", "bhubaneswar", "patna", "ranchi", "goa", "nashik",
                "aurangabad", "kanpur", "varanasi", "dehradun", "mangalore", "madurai",
                "vijayawada", "raipur", "guwahati", "remote", "dubai", "singapore", "london",
            ]),
            status_keywords: to_strings(&[
                "selected", "rejected", "shortlisted", "on hold", "hold", "pending",
                "interview scheduled", "scheduled", "joined", "offered", "offer accepted",
                "offer declined", "screening", "screened", "in process", "in progress",
                "backout", "backed out", "dropped", "not interested", "interested", "no show",
                "cleared", "declined", "submitted", "screen reject", "duplicate",
                "not reachable", "callback", "call back", "waiting", "awaiting feedback",
                "l1 cleared", "l2 cleared", "hr round", "client round", "final round",
            ]),
            source_keywords: to_strings(&[
                "naukri", "linkedin", "indeed", "monster", "referral", "reference", "shine",
                "timesjobs", "foundit", "instahyre", "hirist", "iimjobs", "glassdoor",
                "job portal", "portal", "walk-in", "walkin", "walk in", "website", "campus",
                "social media", "facebook", "internal database", "database", "cutshort",
                "wellfound", "angellist", "apna", "headhunting", "direct",
            ]),
            notice_keywords: to_strings(&[
                "immediate", "immediately", "serving", "notice", "days", "weeks", "months",
            ]),
            field_priority: vec![
                CanonicalField::Name,
                CanonicalField::Email,
                CanonicalField::Phone,
                CanonicalField::Position,
                CanonicalField::Spoc,
                CanonicalField::Company,
                CanonicalField::Client,
                CanonicalField::Status,
                CanonicalField::SourceOfCv,
                CanonicalField::Location,
                CanonicalField::NoticePeriod,
                CanonicalField::Experience,
                CanonicalField::Ctc,
                CanonicalField::ExpectedSalary,
            ],
            salary_comparison: SalaryComparisonPolicy::default(),
        }
    }
}

fn default_header_hints() -> BTreeMap<CanonicalField, HeaderHint> {
    BTreeMap::from([
        (
            CanonicalField::Name,
            HeaderHint::new(
                &["name", "candidate", "fls", "non-fls", "applicant"],
                &["spoc", "recruiter", "company", "client", "file", "user"],
            ),
        ),
        (
            CanonicalField::Phone,
            HeaderHint::new(
                &["phone", "mobile", "contact", "cell", "whatsapp", "mob"],
                &["email", "mail"],
            ),
        ),
        (CanonicalField::Email, HeaderHint::new(&["email", "mail", "e-mail"], &[])),
        (
            CanonicalField::Location,
            HeaderHint::new(&["location", "city", "place", "loc", "based"], &["preferred"]),
        ),
        (
            CanonicalField::Position,
            HeaderHint::new(
                &["position", "role", "designation", "title", "profile", "job", "skill"],
                &[],
            ),
        ),
        (
            CanonicalField::Experience,
            HeaderHint::new(&["experience", "exp", "yrs", "years", "yoe"], &[]),
        ),
        (
            CanonicalField::Ctc,
            HeaderHint::new(
                &["ctc", "cctc", "salary", "package"],
                &["expected", "ectc", "exp ctc"],
            ),
        ),
        (
            CanonicalField::ExpectedSalary,
            HeaderHint::new(&["expected", "ectc", "exp ctc", "expectation"], &[]),
        ),
        (
            CanonicalField::NoticePeriod,
            HeaderHint::new(&["notice", "np", "joining", "availability"], &[]),
        ),
        (
            CanonicalField::Company,
            HeaderHint::new(
                &["company", "organisation", "organization", "employer", "org"],
                &["client"],
            ),
        ),
        (CanonicalField::Client, HeaderHint::new(&["client", "account", "customer"], &[])),
        (
            CanonicalField::Spoc,
            HeaderHint::new(&["spoc", "recruiter", "poc", "owner"], &[]),
        ),
        (CanonicalField::Status, HeaderHint::new(&["status", "stage"], &[])),
        (
            CanonicalField::SourceOfCv,
            HeaderHint::new(&["source", "portal", "sourced", "channel"], &[]),
        ),
    ])
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
