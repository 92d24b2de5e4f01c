pub mod config;
pub mod rulebook;
