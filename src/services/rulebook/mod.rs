//! Candidate Field Rulebook: schema-less inference of a canonical candidate
//! record from one arbitrary spreadsheet row.
//!
//! Per row: collect scored candidates from every cell, resolve one winner per
//! field, apply cross-field corrections and the semantic gate, normalize
//! formats, then validate into a `ready` / `review` / `blocked` decision.
pub mod analysis;
pub mod models;
pub mod pipeline;

// Public types used by commands and embedding hosts
pub use models::types::{
    BatchResult, BatchStats, CanonicalField, CellValue, DetectedRecord, FieldValue, FixedRecord,
    ImportCategory, Issue, Row, RowResult, Severity, ValidationResult,
};
pub use pipeline::row_pipeline::Rulebook;

#[cfg(test)]
#[path = "tests/scenario_tests.rs"]
mod scenario_tests;
