// file: src/ttp/cache.rs
// description: per-run memoization of technique lookups by actor name
// reference: process-lifetime cache, single-threaded access

use crate::models::incident::UNKNOWN_ACTOR;
use crate::ttp::{TechniqueLookup, TechniqueMap};
use std::collections::HashMap;
use tracing::{info, warn};

/// Memoizes technique lookups per actor for the lifetime of one
/// analysis run. Keys are lowercased so "LockBit" and "lockbit" share
/// an entry and the underlying capability is queried at most once per
/// distinct name. Failed and empty lookups are cached too; a failure
/// is logged and degrades to an empty mapping, never an abort.
pub struct TtpCache {
    lookup: Box<dyn TechniqueLookup>,
    entries: HashMap<String, TechniqueMap>,
    upstream_queries: u64,
}

impl TtpCache {
    pub fn new(lookup: Box<dyn TechniqueLookup>) -> Self {
        Self {
            lookup,
            entries: HashMap::new(),
            upstream_queries: 0,
        }
    }

    pub async fn techniques_for(&mut self, actor: &str) -> TechniqueMap {
        if actor.is_empty() || actor == UNKNOWN_ACTOR {
            return TechniqueMap::new();
        }

        let key = actor.to_lowercase();
        if let Some(cached) = self.entries.get(&key) {
            return cached.clone();
        }

        self.upstream_queries += 1;
        let techniques = match self.lookup.techniques_for_group(actor).await {
            Ok(techniques) => {
                if techniques.is_empty() {
                    info!("No technique match for '{}'", actor);
                } else {
                    info!("Found {} techniques for '{}'", techniques.len(), actor);
                }
                techniques
            }
            Err(e) => {
                warn!("Technique lookup failed for '{}': {}", actor, e);
                TechniqueMap::new()
            }
        };

        self.entries.insert(key, techniques.clone());
        techniques
    }

    /// Number of calls that reached the underlying capability.
    pub fn upstream_queries(&self) -> u64 {
        self.upstream_queries
    }
}
