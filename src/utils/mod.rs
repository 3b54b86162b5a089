// file: src/utils/mod.rs
// description: shared utilities module exports
// reference: internal module structure

pub mod logging;

pub use logging::{format_error, format_success, format_warning};
