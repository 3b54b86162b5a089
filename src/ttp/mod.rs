// file: src/ttp/mod.rs
// description: technique knowledge-base capability interface
// reference: MITRE ATT&CK enterprise dataset

pub mod attack;
pub mod cache;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

pub use attack::AttackStixClient;
pub use cache::TtpCache;

/// Mapping from technique identifier (e.g. T1486) to display name.
pub type TechniqueMap = BTreeMap<String, String>;

/// Lookup capability keyed by threat-group name or alias.
///
/// Two implementations exist: [`AttackStixClient`] queries the MITRE
/// ATT&CK STIX bundle, and [`DisabledLookup`] always returns an empty
/// mapping. Downstream code depends only on this trait, selected at
/// startup; there is no availability flag.
#[async_trait]
pub trait TechniqueLookup: Send {
    fn name(&self) -> &'static str;

    /// Techniques attributed to `actor` by exact name or alias match.
    /// An unrecognized group is an empty mapping, not an error.
    async fn techniques_for_group(&mut self, actor: &str) -> Result<TechniqueMap>;
}

/// No-op lookup used when technique enrichment is disabled.
#[derive(Debug, Default)]
pub struct DisabledLookup;

#[async_trait]
impl TechniqueLookup for DisabledLookup {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn techniques_for_group(&mut self, _actor: &str) -> Result<TechniqueMap> {
        Ok(TechniqueMap::new())
    }
}
