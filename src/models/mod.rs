// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod actor;
pub mod incident;

pub use actor::{ActorProfile, ActorStats, CountryHit};
pub use incident::{IncidentRecord, RecordSource};
