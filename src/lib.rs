//! Candidate Field Rulebook.
//!
//! Infers a canonical 14-field candidate record from a spreadsheet row whose
//! headers and column order are unknown, then normalizes it and decides
//! whether it can be imported (`ready`), needs a human (`review`) or must
//! not be imported (`blocked`).

pub mod commands;
pub mod services;
pub mod types;

pub use services::config::{RulebookConfig, SalaryComparisonPolicy};
pub use services::rulebook::{
    BatchResult, BatchStats, CanonicalField, CellValue, DetectedRecord, FieldValue, FixedRecord,
    ImportCategory, Issue, Row, RowResult, Rulebook, Severity, ValidationResult,
};
pub use types::errors::{CommandResult, RulebookError};
