//! Conflict resolution: one winner per field, the rest kept as duplicates.

use std::cmp::Ordering;
use std::collections::HashSet;

use log::debug;

use crate::services::rulebook::analysis::keywords::KeywordIndex;
use crate::services::rulebook::models::types::{
    sort_candidates_by_score, CandidateMap, CanonicalField, DetectedRecord, FieldCandidate,
    FieldValue,
};

/// Scores closer than this are a tie.
const SCORE_EPSILON: f32 = 1e-3;

/// Resolve every field's candidate list into a [`DetectedRecord`].
///
/// Fields are visited in `priority` order (fields missing from it come
/// last, in canonical order). A text field whose winner's source cell or
/// literal value was already claimed by an earlier field is dropped and
/// stays empty. A numeric field only competes over unclaimed cells.
pub fn resolve(
    candidates: &CandidateMap,
    index: &KeywordIndex,
    priority: &[CanonicalField],
) -> DetectedRecord {
    let mut record = DetectedRecord::new();
    let mut claimed_sources: HashSet<String> = HashSet::new();
    let mut claimed_values: HashSet<String> = HashSet::new();

    for field in visit_order(priority) {
        let mut ranked: Vec<FieldCandidate> = candidates.get(field).to_vec();
        sort_candidates_by_score(&mut ranked);
        // Equal numbers in different cells are legitimate, so a numeric
        // field falls back to the best cell nobody has taken yet.
        let refs: Vec<&FieldCandidate> = ranked
            .iter()
            .filter(|c| !field.is_numeric() || !claimed_sources.contains(&c.source_header))
            .collect();
        let Some(winner) = pick_winner(field, &refs, index) else {
            continue;
        };

        let key = winner.value.dedup_key();
        if claimed_sources.contains(&winner.source_header)
            || (!field.is_numeric() && claimed_values.contains(&key))
        {
            debug!("{field}: \"{}\" already claimed by an earlier field", winner.value);
            continue;
        }

        claimed_sources.insert(winner.source_header.clone());
        if !field.is_numeric() {
            claimed_values.insert(key);
        }
        record.set(field, winner.value.clone());
        record
            .sources
            .insert(field, winner.source_header.clone());
    }

    for field in CanonicalField::ALL {
        let Some(winner) = record.get(field) else {
            continue;
        };
        let duplicates = demoted_values(candidates.get(field), winner, &claimed_sources);
        if !duplicates.is_empty() {
            record.duplicates.insert(field, duplicates);
        }
    }

    record
}

/// Best candidate after tie-breaking. `ranked` must be sorted by score.
pub fn pick_winner<'a>(
    field: CanonicalField,
    ranked: &[&'a FieldCandidate],
    index: &KeywordIndex,
) -> Option<&'a FieldCandidate> {
    let top = ranked.first()?.score;
    let tied: Vec<&'a FieldCandidate> = ranked
        .iter()
        .copied()
        .take_while(|c| (top - c.score).abs() < SCORE_EPSILON)
        .collect();
    let winner = tied
        .iter()
        .copied()
        .min_by(|a, b| compare_tied(field, a, b, index))?;
    if tied.len() > 1 {
        debug!(
            "{field}: {} candidates tied at {top}, \"{}\" from {} wins",
            tied.len(),
            winner.value,
            winner.source_header
        );
    }
    Some(winner)
}

/// `Less` means `a` should win.
fn compare_tied(
    field: CanonicalField,
    a: &FieldCandidate,
    b: &FieldCandidate,
    index: &KeywordIndex,
) -> Ordering {
    let mut ordering = Ordering::Equal;

    if field == CanonicalField::Name {
        ordering = index
            .is_authoritative_name_header(&b.source_header)
            .cmp(&index.is_authoritative_name_header(&a.source_header));
    }

    ordering
        .then_with(|| {
            index
                .header_hints(&b.source_header, field)
                .cmp(&index.header_hints(&a.source_header, field))
        })
        .then_with(|| {
            let len_a = a.value.to_string().chars().count();
            let len_b = b.value.to_string().chars().count();
            if field.is_person_like() {
                len_a.cmp(&len_b)
            } else if field.is_org_like() {
                len_b.cmp(&len_a)
            } else {
                Ordering::Equal
            }
        })
}

/// Distinct losing values whose cell did not end up in any field.
fn demoted_values(
    candidates: &[FieldCandidate],
    winner: &FieldValue,
    claimed_sources: &HashSet<String>,
) -> Vec<FieldValue> {
    let mut seen: HashSet<String> = HashSet::from([winner.dedup_key()]);
    candidates
        .iter()
        .filter(|c| !claimed_sources.contains(&c.source_header))
        .filter(|c| seen.insert(c.value.dedup_key()))
        .map(|c| c.value.clone())
        .collect()
}

fn visit_order(priority: &[CanonicalField]) -> Vec<CanonicalField> {
    let mut order: Vec<CanonicalField> = Vec::with_capacity(CanonicalField::ALL.len());
    for field in priority.iter().chain(CanonicalField::ALL.iter()) {
        if !order.contains(field) {
            order.push(*field);
        }
    }
    order
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
