//! Precompiled vocabularies built once from a [`RulebookConfig`].

use std::collections::{BTreeSet, HashSet};

use strsim::normalized_levenshtein;

use crate::services::config::RulebookConfig;
use crate::services::rulebook::analysis::normalizer;
use crate::services::rulebook::models::types::CanonicalField;

/// Header tokens at least this long may match a hint keyword with one typo.
const FUZZY_MIN_LEN: usize = 5;
const FUZZY_MIN_SIMILARITY: f64 = 0.8;

/// Keyword list split into single words (token match) and phrases
/// (bounded substring match).
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    words: HashSet<String>,
    phrases: Vec<String>,
}

impl KeywordSet {
    pub fn build(keywords: &[String]) -> Self {
        let mut set = Self::default();
        for keyword in keywords {
            let folded = normalizer::fold(keyword);
            if folded.is_empty() {
                continue;
            }
            if folded.chars().all(char::is_alphanumeric) {
                set.words.insert(folded);
            } else if !set.phrases.contains(&folded) {
                set.phrases.push(folded);
            }
        }
        set
    }

    /// Number of distinct keywords found in already-folded text.
    pub fn hits(&self, folded: &str) -> usize {
        let tokens: BTreeSet<String> = normalizer::tokens(folded).into_iter().collect();
        let word_hits = tokens.iter().filter(|t| self.words.contains(*t)).count();
        let phrase_hits = self
            .phrases
            .iter()
            .filter(|phrase| normalizer::contains_bounded(folded, phrase))
            .count();
        word_hits + phrase_hits
    }

    pub fn matches(&self, folded: &str) -> bool {
        self.hits(folded) > 0
    }

    /// Whole-value equality with one keyword.
    pub fn is_exact(&self, folded: &str) -> bool {
        self.words.contains(folded) || self.phrases.iter().any(|p| p == folded)
    }

    /// Token or bounded-phrase match, tolerating one typo in long tokens.
    fn matches_fuzzy(&self, folded: &str) -> bool {
        if self.matches(folded) {
            return true;
        }
        normalizer::tokens(folded)
            .iter()
            .filter(|token| token.len() >= FUZZY_MIN_LEN)
            .any(|token| {
                self.words.iter().any(|word| {
                    word.len() >= FUZZY_MIN_LEN
                        && normalized_levenshtein(token, word) >= FUZZY_MIN_SIMILARITY
                })
            })
    }
}

#[derive(Debug, Clone)]
struct HintMatcher {
    field: CanonicalField,
    keywords: KeywordSet,
    exclude: KeywordSet,
}

/// All vocabularies used by the scorer, collector and correction rules.
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    pub placeholders: HashSet<String>,
    pub ignored_headers: KeywordSet,
    pub authoritative_name_headers: KeywordSet,
    pub position: KeywordSet,
    pub org: KeywordSet,
    pub finance: KeywordSet,
    pub city: KeywordSet,
    pub status: KeywordSet,
    pub source: KeywordSet,
    pub notice: KeywordSet,
    hints: Vec<HintMatcher>,
}

impl KeywordIndex {
    pub fn build(config: &RulebookConfig) -> Self {
        let hints = config
            .header_hints
            .iter()
            .map(|(field, hint)| HintMatcher {
                field: *field,
                keywords: KeywordSet::build(&hint.keywords),
                exclude: KeywordSet::build(&hint.exclude),
            })
            .collect();

        Self {
            placeholders: config
                .placeholders
                .iter()
                .map(|p| normalizer::fold(p))
                .filter(|p| !p.is_empty())
                .collect(),
            ignored_headers: KeywordSet::build(&config.ignored_header_keywords),
            authoritative_name_headers: KeywordSet::build(&config.authoritative_name_headers),
            position: KeywordSet::build(&config.position_keywords),
            org: KeywordSet::build(&config.org_keywords),
            finance: KeywordSet::build(&config.finance_keywords),
            city: KeywordSet::build(&config.city_keywords),
            status: KeywordSet::build(&config.status_keywords),
            source: KeywordSet::build(&config.source_keywords),
            notice: KeywordSet::build(&config.notice_keywords),
            hints,
        }
    }

    /// Placeholder values never contribute to detection.
    pub fn is_placeholder(&self, value: &str) -> bool {
        let folded = normalizer::fold(value);
        folded.is_empty()
            || self.placeholders.contains(&folded)
            || !folded.chars().any(char::is_alphanumeric)
    }

    /// Canonical fields a header points at.
    pub fn hinted_fields(&self, header: &str) -> BTreeSet<CanonicalField> {
        let folded = normalizer::fold(header);
        self.hints
            .iter()
            .filter(|hint| hint.keywords.matches_fuzzy(&folded) && !hint.exclude.matches(&folded))
            .map(|hint| hint.field)
            .collect()
    }

    pub fn header_hints(&self, header: &str, field: CanonicalField) -> bool {
        self.hinted_fields(header).contains(&field)
    }

    pub fn is_authoritative_name_header(&self, header: &str) -> bool {
        self.authoritative_name_headers
            .matches(&normalizer::fold(header))
    }

    /// Blocklisted headers are skipped unless they also point at a field
    /// ("Email ID" stays, "Interview Date" goes).
    pub fn is_ignored_header(&self, header: &str) -> bool {
        let folded = normalizer::fold(header);
        self.ignored_headers.matches(&folded) && self.hinted_fields(header).is_empty()
    }
}

#[cfg(test)]
#[path = "tests/keywords_tests.rs"]
mod tests;
