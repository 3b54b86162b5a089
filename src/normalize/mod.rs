// file: src/normalize/mod.rs
// description: raw record normalization helpers shared by feed sources
// reference: internal module structure

pub mod datetime;
pub mod patterns;
pub mod sanitize;

pub use datetime::{parse_iso_datetime, parse_rfc2822_datetime};
pub use sanitize::{clean_html, extract_rss_actor};
