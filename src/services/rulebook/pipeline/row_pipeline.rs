//! Row pipeline: collect → resolve → correct → semantic gate → auto-fix →
//! validate.
//!
//! Every row gets fresh intermediate state; nothing is shared between rows
//! except the immutable [`RulebookConfig`] and its [`KeywordIndex`].

use log::{debug, info};

use crate::services::config::RulebookConfig;
use crate::services::rulebook::analysis::keywords::KeywordIndex;
use crate::services::rulebook::models::types::{
    BatchResult, BatchStats, DetectedRecord, Row, RowResult,
};
use crate::services::rulebook::pipeline::{
    auto_fix, collector, corrector, resolver, semantic, validation,
};

/// Detection engine bound to one configuration.
#[derive(Debug, Clone)]
pub struct Rulebook {
    config: RulebookConfig,
    index: KeywordIndex,
}

impl Default for Rulebook {
    fn default() -> Self {
        Self::new(RulebookConfig::default())
    }
}

impl Rulebook {
    pub fn new(config: RulebookConfig) -> Self {
        let index = KeywordIndex::build(&config);
        Self { config, index }
    }

    pub fn config(&self) -> &RulebookConfig {
        &self.config
    }

    pub fn index(&self) -> &KeywordIndex {
        &self.index
    }

    /// Detection only: the record before auto-fix, plus the names of the
    /// correction and semantic rules that fired.
    pub fn detect(&self, row: &Row) -> (DetectedRecord, Vec<&'static str>) {
        let candidates = collector::collect_candidates(row, &self.index);
        let resolved = resolver::resolve(&candidates, &self.index, &self.config.field_priority);
        let (corrected, mut fired) = corrector::correct(resolved, &self.index);
        let (checked, rejected) = semantic::reject_contradictions(corrected, &self.index);
        fired.extend(rejected);
        (checked, fired)
    }

    /// Run one row through the whole pipeline.
    ///
    /// `headers` gives the column order; cells whose header it omits are
    /// still considered, after the listed ones. An empty slice keeps the
    /// row's own order.
    pub fn process_row(&self, row: &Row, headers: &[String]) -> RowResult {
        let ordered = order_row(row, headers);
        let (detected, fired) = self.detect(&ordered);
        let mut result = self.finish(detected);
        result.corrections = fired.into_iter().map(str::to_string).collect();
        result.fingerprint = fingerprint(&ordered);
        debug!(
            "Row {} -> {} ({}%)",
            result.fingerprint,
            result.validation.category,
            result.validation.confidence
        );
        result
    }

    /// Process rows in order. A blocked row never stops the batch.
    pub fn process_batch(&self, rows: &[Row]) -> BatchResult {
        let headers = union_headers(rows);
        let mut stats = BatchStats::default();
        let results: Vec<RowResult> = rows
            .iter()
            .map(|row| {
                let result = self.process_row(row, &headers);
                stats.record(result.validation.category);
                result
            })
            .collect();

        info!(
            "Processed {} rows: {} ready, {} review, {} blocked",
            stats.total, stats.ready, stats.review, stats.blocked
        );
        BatchResult { results, stats }
    }

    /// Re-run auto-fix and validation on a (hand-edited) record without
    /// detection.
    pub fn revalidate(&self, record: DetectedRecord) -> RowResult {
        self.finish(record)
    }

    fn finish(&self, detected: DetectedRecord) -> RowResult {
        let (fixed, auto_fix_changes) = auto_fix::auto_fix(detected);
        let validation = validation::validate(&fixed, self.config.salary_comparison);
        RowResult {
            fixed,
            auto_fix_changes,
            validation,
            corrections: Vec::new(),
            fingerprint: String::new(),
        }
    }
}

/// Stable identity of a row's content: blake3 over its non-empty cells in
/// column order.
pub fn fingerprint(row: &Row) -> String {
    let mut hasher = blake3::Hasher::new();
    for (header, cell) in row.iter() {
        if let Some(text) = cell.as_text() {
            hasher.update(header.trim().as_bytes());
            hasher.update(b"\x1f");
            hasher.update(text.as_bytes());
            hasher.update(b"\x1e");
        }
    }
    hasher.finalize().to_hex().to_string()
}

fn order_row(row: &Row, headers: &[String]) -> Row {
    if headers.is_empty() {
        return row.clone();
    }
    let mut ordered = Row::new();
    for header in headers {
        if let Some(value) = row.get(header) {
            ordered.insert(header.clone(), value.clone());
        }
    }
    for (header, value) in row.iter() {
        if ordered.get(header).is_none() {
            ordered.insert(header, value.clone());
        }
    }
    ordered
}

/// Headers of all rows, first-seen order.
fn union_headers(rows: &[Row]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for header in rows.iter().flat_map(Row::headers) {
        if !headers.iter().any(|h| h == header) {
            headers.push(header.to_string());
        }
    }
    headers
}

#[cfg(test)]
#[path = "tests/row_pipeline_tests.rs"]
mod tests;
