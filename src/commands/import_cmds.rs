//! JSON-in / JSON-out entry points over the rulebook engine.
//!
//! These are what the CLI and any embedding host call. They own all I/O and
//! input-shape checking so the engine itself stays infallible.

use std::path::Path;

use serde_json::Value;

use crate::services::config::RulebookConfig;
use crate::services::rulebook::{
    BatchResult, CanonicalField, DetectedRecord, FieldValue, Row, RowResult, Rulebook,
};
use crate::types::errors::{CommandResult, RulebookError};

/// Build the engine from an optional config file (defaults when `None`).
pub fn load_rulebook(config_path: Option<&Path>) -> CommandResult<Rulebook> {
    let config = match config_path {
        Some(path) => RulebookConfig::load(path)?,
        None => RulebookConfig::default(),
    };
    Ok(Rulebook::new(config))
}

/// Accepts either a bare array of row objects or `{ "rows": [...] }`.
pub fn parse_rows(json: &str) -> CommandResult<Vec<Row>> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("rows") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(RulebookError::InvalidInput(
                    "expected an array of rows or an object with a \"rows\" array".to_string(),
                ))
            }
        },
        _ => {
            return Err(RulebookError::InvalidInput(
                "expected an array of rows".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(RulebookError::InvalidInput(format!(
                    "row {i} is not an object"
                )));
            }
            Ok(serde_json::from_value::<Row>(item)?)
        })
        .collect()
}

pub fn process_rows_json(rulebook: &Rulebook, json: &str) -> CommandResult<BatchResult> {
    let rows = parse_rows(json)?;
    Ok(rulebook.process_batch(&rows))
}

pub fn process_rows_file(rulebook: &Rulebook, path: &Path) -> CommandResult<BatchResult> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        log::warn!("Cannot read rows from {}: {}", path.display(), e);
        RulebookError::Io(format!("{}: {}", path.display(), e))
    })?;
    process_rows_json(rulebook, &contents)
}

/// Parse a hand-edited record: either a serialized [`DetectedRecord`]
/// (`{ "fields": {...} }`) or a flat `{ "name": ..., "phone": ... }` map.
/// `null` values in the flat form mean "not set".
pub fn parse_record(json: &str) -> CommandResult<DetectedRecord> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(object) = value else {
        return Err(RulebookError::InvalidInput(
            "expected a record object".to_string(),
        ));
    };

    if object.contains_key("fields") {
        return Ok(serde_json::from_value(Value::Object(object))?);
    }

    let mut record = DetectedRecord::new();
    for (key, raw) in object {
        if raw.is_null() {
            continue;
        }
        let field: CanonicalField = serde_json::from_value(Value::String(key.clone()))
            .map_err(|_| RulebookError::InvalidInput(format!("unknown field \"{key}\"")))?;
        let value: FieldValue = serde_json::from_value(raw).map_err(|_| {
            RulebookError::InvalidInput(format!("{field} must be a string or a number"))
        })?;
        record.set(field, value);
    }
    Ok(record)
}

pub fn revalidate_json(rulebook: &Rulebook, json: &str) -> CommandResult<RowResult> {
    let record = parse_record(json)?;
    Ok(rulebook.revalidate(record))
}

#[cfg(test)]
#[path = "tests/import_cmds_tests.rs"]
mod tests;
