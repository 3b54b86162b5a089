// file: src/models/actor.rs
// description: per-actor aggregate statistics built during targeting analysis
// reference: threat actor relevance scoring

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;

/// One record that matched the selected country keywords and carries
/// both a timestamp and a link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryHit {
    pub date: DateTime<Utc>,
    pub victim: String,
    pub link: String,
}

/// Aggregate targeting statistics for a single known actor.
///
/// Created lazily on the first record attributed to the actor, mutated
/// incrementally while iterating the deduplicated set newest-first, and
/// finalized (score computed) only after the full pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorProfile {
    pub name: String,
    pub total_hits: u32,
    pub industry_hits: u32,
    pub country_hits: u32,
    /// Newest-first, matching the analyzer's iteration order.
    pub country_hit_details: Vec<CountryHit>,
    /// Insertion-ordered counter of matched country keywords. Kept as a
    /// vec so count ties break by first-seen order when sorted.
    pub country_keyword_counts: Vec<(String, u32)>,
    pub score: u32,
    /// Technique id -> technique name, fetched once per actor per run.
    pub techniques: BTreeMap<String, String>,
}

impl ActorProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn record_country_keyword(&mut self, keyword: &str) {
        if let Some(entry) = self
            .country_keyword_counts
            .iter_mut()
            .find(|(kw, _)| kw == keyword)
        {
            entry.1 += 1;
        } else {
            self.country_keyword_counts.push((keyword.to_string(), 1));
        }
    }

    /// Country keyword counts sorted by descending count; ties keep
    /// first-seen order.
    pub fn country_breakdown(&self) -> Vec<(String, u32)> {
        let mut counts = self.country_keyword_counts.clone();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Actor name -> profile mapping that preserves first-seen order, so
/// downstream stable sorts break remaining ties by encounter order.
#[derive(Debug, Default)]
pub struct ActorStats {
    index: HashMap<String, usize>,
    profiles: Vec<ActorProfile>,
}

impl ActorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the profile for `actor`, creating it on first encounter.
    /// The returned flag is true when the profile was just created.
    pub fn entry(&mut self, actor: &str) -> (&mut ActorProfile, bool) {
        if let Some(&idx) = self.index.get(actor) {
            (&mut self.profiles[idx], false)
        } else {
            self.index.insert(actor.to_string(), self.profiles.len());
            self.profiles.push(ActorProfile::new(actor));
            let idx = self.profiles.len() - 1;
            (&mut self.profiles[idx], true)
        }
    }

    pub fn get(&self, actor: &str) -> Option<&ActorProfile> {
        self.index.get(actor).map(|&idx| &self.profiles[idx])
    }

    pub fn profiles(&self) -> &[ActorProfile] {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut [ActorProfile] {
        &mut self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
