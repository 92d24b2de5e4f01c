//! Text analysis: folding, parsing, keyword vocabularies and field scoring.
pub mod keywords;
pub mod normalizer;
pub mod parsers;
pub mod scorer;
