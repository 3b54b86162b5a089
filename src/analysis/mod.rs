// file: src/analysis/mod.rs
// description: actor targeting analysis module exports
// reference: internal module structure

pub mod analyzer;
pub mod dedup;
pub mod matcher;

pub use analyzer::TargetingAnalyzer;
pub use dedup::Deduplicator;
pub use matcher::ProfileMatcher;
