//! Domain types for the row detection pipeline.
//!
//! Contains: CanonicalField, CellValue, Row, FieldValue, FieldCandidate,
//! CandidateMap, DetectedRecord, FixedRecord, Issue, Severity,
//! ValidationResult, ImportCategory, RowResult, BatchStats, BatchResult.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ==================== CANONICAL FIELDS ====================

/// One of the 14 target candidate attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    Name,
    Phone,
    Email,
    Location,
    Position,
    Experience,
    Ctc,
    ExpectedSalary,
    NoticePeriod,
    Company,
    Client,
    Spoc,
    Status,
    #[serde(rename = "sourceOfCV")]
    SourceOfCv,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 14] = [
        CanonicalField::Name,
        CanonicalField::Phone,
        CanonicalField::Email,
        CanonicalField::Location,
        CanonicalField::Position,
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

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalField::Name => "name",
            CanonicalField::Phone => "phone",
            CanonicalField::Email => "email",
            CanonicalField::Location => "location",
            CanonicalField::Position => "position",
            CanonicalField::Experience => "experience",
            CanonicalField::Ctc => "ctc",
            CanonicalField::ExpectedSalary => "expectedSalary",
            CanonicalField::NoticePeriod => "noticePeriod",
            CanonicalField::Company => "company",
            CanonicalField::Client => "client",
            CanonicalField::Spoc => "spoc",
            CanonicalField::Status => "status",
            CanonicalField::SourceOfCv => "sourceOfCV",
        }
    }

    /// Fields holding numbers after normalization.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            CanonicalField::Experience
                | CanonicalField::Ctc
                | CanonicalField::ExpectedSalary
                | CanonicalField::NoticePeriod
        )
    }

    /// Person-like fields prefer the shorter string on a tie.
    pub fn is_person_like(self) -> bool {
        matches!(
            self,
            CanonicalField::Name | CanonicalField::Position | CanonicalField::Spoc
        )
    }

    /// Organization-like fields prefer the longer string on a tie.
    pub fn is_org_like(self) -> bool {
        matches!(self, CanonicalField::Company | CanonicalField::Client)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== INPUT ROWS ====================

/// A raw spreadsheet cell as handed over by the upload/parse layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Trimmed textual form, `None` when the cell carries nothing.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Empty => return None,
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Ordered header → value mapping for one spreadsheet row.
///
/// Deserializes from a JSON object while keeping the column order; `null`
/// and booleans become [`CellValue::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated header replaces the earlier value.
    pub fn with(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(header, value);
        self
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        let header = header.into();
        let value = value.into();
        if let Some(slot) = self.cells.iter_mut().find(|(h, _)| *h == header) {
            slot.1 = value;
        } else {
            self.cells.push((header, value));
        }
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, value)| value)
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.cells.iter().map(|(h, v)| (h, v)))
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping column headers to cell values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Row, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut row = Row::new();
                while let Some((header, raw)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    let value = match raw {
                        serde_json::Value::Number(n) => {
                            n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty)
                        }
                        serde_json::Value::String(s) => CellValue::Text(s),
                        _ => CellValue::Empty,
                    };
                    row.insert(header, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

// ==================== FIELD VALUES ====================

/// A resolved field value: raw/normalized text or a coerced number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Case-insensitive identity used by deduplication.
    pub fn dedup_key(&self) -> String {
        self.to_string().trim().to_lowercase()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => f.write_str(&format_number(*n)),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Render integral floats without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

// ==================== DETECTION ====================

/// An unresolved hypothesis that a cell belongs to a canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCandidate {
    pub value: FieldValue,
    pub score: f32,
    pub source_header: String,
}

/// Per-row candidate lists keyed by field. Built fresh for every row.
#[derive(Debug, Clone, Default)]
pub struct CandidateMap {
    lists: BTreeMap<CanonicalField, Vec<FieldCandidate>>,
}

impl CandidateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: CanonicalField, candidate: FieldCandidate) {
        self.lists.entry(field).or_default().push(candidate);
    }

    pub fn get(&self, field: CanonicalField) -> &[FieldCandidate] {
        self.lists.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// The 14 canonical fields resolved to at most one value each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedRecord {
    pub fields: BTreeMap<CanonicalField, FieldValue>,
    /// Winning source header per field (absent for hand-edited records).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sources: BTreeMap<CanonicalField, String>,
    /// Demoted alternatives per field, kept for warnings.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub duplicates: BTreeMap<CanonicalField, Vec<FieldValue>>,
}

impl DetectedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: CanonicalField) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Text of a field; numbers are not reported as text.
    pub fn text(&self, field: CanonicalField) -> Option<&str> {
        self.fields.get(&field).and_then(FieldValue::as_text)
    }

    pub fn number(&self, field: CanonicalField) -> Option<f64> {
        self.fields.get(&field).and_then(FieldValue::as_number)
    }

    pub fn has(&self, field: CanonicalField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn set(&mut self, field: CanonicalField, value: FieldValue) {
        self.fields.insert(field, value);
    }

    /// Builder-style text setter, mostly for callers assembling records by hand.
    pub fn with_text(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        self.set(field, FieldValue::Text(value.into()));
        self
    }

    pub fn with_number(mut self, field: CanonicalField, value: f64) -> Self {
        self.set(field, FieldValue::Number(value));
        self
    }

    /// Remove a field value together with its provenance.
    pub fn clear(&mut self, field: CanonicalField) -> Option<FieldValue> {
        self.sources.remove(&field);
        self.fields.remove(&field)
    }

    /// Move a value, its provenance and its demoted alternatives from one
    /// field to another.
    pub fn move_field(&mut self, from: CanonicalField, to: CanonicalField) {
        let source = self.sources.remove(&from);
        let duplicates = self.duplicates.remove(&from);
        if let Some(value) = self.fields.remove(&from) {
            self.fields.insert(to, value);
            replace_entry(&mut self.sources, to, source);
            replace_entry(&mut self.duplicates, to, duplicates);
        }
    }

    /// Exchange two fields' values, provenance and demoted alternatives.
    pub fn swap_fields(&mut self, a: CanonicalField, b: CanonicalField) {
        swap_entries(&mut self.fields, a, b);
        swap_entries(&mut self.sources, a, b);
        swap_entries(&mut self.duplicates, a, b);
    }
}

fn replace_entry<V>(map: &mut BTreeMap<CanonicalField, V>, key: CanonicalField, value: Option<V>) {
    match value {
        Some(value) => {
            map.insert(key, value);
        }
        None => {
            map.remove(&key);
        }
    }
}

fn swap_entries<V>(map: &mut BTreeMap<CanonicalField, V>, a: CanonicalField, b: CanonicalField) {
    let value_a = map.remove(&a);
    let value_b = map.remove(&b);
    replace_entry(map, a, value_b);
    replace_entry(map, b, value_a);
}

/// A detected record after normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedRecord {
    #[serde(flatten)]
    pub record: DetectedRecord,
}

impl FixedRecord {
    pub fn get(&self, field: CanonicalField) -> Option<&FieldValue> {
        self.record.get(field)
    }

    pub fn text(&self, field: CanonicalField) -> Option<&str> {
        self.record.text(field)
    }

    pub fn number(&self, field: CanonicalField) -> Option<f64> {
        self.record.number(field)
    }

    pub fn into_detected(self) -> DetectedRecord {
        self.record
    }
}

// ==================== VALIDATION ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One itemized validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub field: CanonicalField,
    /// Second field involved in a cross-field finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<CanonicalField>,
    pub message: String,
    pub severity: Severity,
    /// Confidence points deducted for this finding.
    pub penalty: u8,
}

impl Issue {
    pub fn involves(&self, field: CanonicalField) -> bool {
        self.field == field || self.related == Some(field)
    }
}

/// Three-way import decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportCategory {
    /// No errors and high confidence; safe to import as-is.
    Ready,
    /// No errors but a human should look first.
    Review,
    /// Blocking errors or too little confidence.
    Blocked,
}

impl fmt::Display for ImportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportCategory::Ready => write!(f, "ready"),
            ImportCategory::Review => write!(f, "review"),
            ImportCategory::Blocked => write!(f, "blocked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// Always within 0..=100.
    pub confidence: u8,
    pub category: ImportCategory,
}

impl ValidationResult {
    pub fn has_error_for(&self, field: CanonicalField) -> bool {
        self.errors.iter().any(|issue| issue.involves(field))
    }

    pub fn has_warning_for(&self, field: CanonicalField) -> bool {
        self.warnings.iter().any(|issue| issue.involves(field))
    }
}

// ==================== RESULTS ====================

/// Output of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowResult {
    pub fixed: FixedRecord,
    pub auto_fix_changes: Vec<String>,
    pub validation: ValidationResult,
    /// Names of correction / semantic rules that fired.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corrections: Vec<String>,
    /// blake3 of the row's non-empty cells; empty for re-validated records.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub ready: usize,
    pub review: usize,
    pub blocked: usize,
    pub total: usize,
}

impl BatchStats {
    pub fn record(&mut self, category: ImportCategory) {
        self.total += 1;
        match category {
            ImportCategory::Ready => self.ready += 1,
            ImportCategory::Review => self.review += 1,
            ImportCategory::Blocked => self.blocked += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<RowResult>,
    pub stats: BatchStats,
}

impl BatchResult {
    /// Fixed records the import layer may take without human review.
    pub fn importable(&self) -> impl Iterator<Item = &FixedRecord> {
        self.results
            .iter()
            .filter(|result| result.validation.category == ImportCategory::Ready)
            .map(|result| &result.fixed)
    }
}

// ==================== DETERMINISTIC ORDERING ====================

/// Sort candidates by score, highest first; equal scores keep column order.
pub fn sort_candidates_by_score(candidates: &mut [FieldCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
