//! Rulebook configuration: built-in defaults plus partial JSON overrides.
pub mod models;

pub use models::*;

use std::collections::HashSet;
use std::path::Path;

use crate::types::errors::{CommandResult, RulebookError};

impl RulebookConfig {
    /// Parse a (possibly partial) JSON override. Keys left out keep their
    /// built-in defaults.
    pub fn from_json_str(json: &str) -> CommandResult<Self> {
        let config: RulebookConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Load a config file. A missing file falls back to the defaults; an
    /// unreadable or malformed one is an error.
    pub fn load(path: &Path) -> CommandResult<Self> {
        if !path.exists() {
            log::warn!(
                "Rulebook config not found at {}. Using built-in defaults.",
                path.display()
            );
            return Ok(Self::default());
        }

        log::info!("Loading rulebook config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents).map_err(|e| {
            RulebookError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// Reject overrides the pipeline cannot run with.
    fn check(&self) -> CommandResult<()> {
        let mut seen = HashSet::new();
        if let Some(repeated) = self.field_priority.iter().find(|f| !seen.insert(**f)) {
            return Err(RulebookError::Config(format!(
                "field_priority lists {repeated} more than once"
            )));
        }
        if let Some((field, _)) = self
            .header_hints
            .iter()
            .find(|(_, hint)| hint.keywords.iter().all(|k| k.trim().is_empty()))
        {
            return Err(RulebookError::Config(format!(
                "header hint for {field} has no keywords"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
