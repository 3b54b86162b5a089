// file: src/models/incident.rs
// description: normalized incident record shared by all feed sources
// reference: threat intelligence incident tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel actor label for postings with no resolvable threat group.
pub const UNKNOWN_ACTOR: &str = "Unknown";

/// Victim display name used when a posting carries no title.
pub const NO_TITLE: &str = "No Title";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSource {
    RansomfeedRss,
    RansomwareLiveApi,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::RansomfeedRss => "Ransomfeed.it RSS",
            RecordSource::RansomwareLiveApi => "Ransomware.live API",
        }
    }
}

/// One disclosed ransomware victim posting, normalized from either source.
///
/// `identity` is the deduplication key. It is never empty: sources fall
/// back through id/guid/link, then a victim+timestamp composite, then a
/// random value. The composite fallback is not stable across runs for
/// records whose upstream id is missing; that mirrors upstream behavior
/// and is a known limitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub identity: String,
    pub victim: String,
    pub actor: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    pub description: String,
    pub search_text: String,
    pub source: RecordSource,
}

impl IncidentRecord {
    pub fn new(
        identity: Option<String>,
        victim: String,
        actor: String,
        link: String,
        published_at: Option<DateTime<Utc>>,
        description: String,
        source: RecordSource,
    ) -> Self {
        let search_text = format!("{} {}", victim, description);
        let identity = match identity.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => fallback_identity(&victim, published_at),
        };

        Self {
            identity,
            victim,
            actor,
            link,
            published_at,
            description,
            search_text,
            source,
        }
    }

    pub fn has_known_actor(&self) -> bool {
        !self.actor.is_empty() && self.actor != UNKNOWN_ACTOR
    }
}

/// Composite identity for records lacking a stable upstream id:
/// lowercased victim name plus publication timestamp, or a random
/// value when no timestamp exists either.
pub fn fallback_identity(victim: &str, published_at: Option<DateTime<Utc>>) -> String {
    match published_at {
        Some(ts) => format!("{}_{}", victim.to_lowercase(), ts.to_rfc3339()),
        None => format!("{}_{}", victim.to_lowercase(), uuid::Uuid::new_v4()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_text_concatenates_victim_and_description() {
        let record = IncidentRecord::new(
            Some("id-1".to_string()),
            "Acme Corp".to_string(),
            "DarkGroup".to_string(),
            String::new(),
            None,
            "victim in USA".to_string(),
            RecordSource::RansomfeedRss,
        );
        assert_eq!(record.search_text, "Acme Corp victim in USA");
    }

    #[test]
    fn test_identity_falls_back_to_victim_and_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let record = IncidentRecord::new(
            None,
            "Acme Corp".to_string(),
            UNKNOWN_ACTOR.to_string(),
            String::new(),
            Some(ts),
            String::new(),
            RecordSource::RansomwareLiveApi,
        );
        assert_eq!(record.identity, format!("acme corp_{}", ts.to_rfc3339()));
    }

    #[test]
    fn test_identity_never_empty_without_timestamp() {
        let record = IncidentRecord::new(
            Some("   ".to_string()),
            "Acme Corp".to_string(),
            UNKNOWN_ACTOR.to_string(),
            String::new(),
            None,
            String::new(),
            RecordSource::RansomwareLiveApi,
        );
        assert!(!record.identity.is_empty());
        assert!(record.identity.starts_with("acme corp_"));
    }

    #[test]
    fn test_unknown_actor_is_not_known() {
        let record = IncidentRecord::new(
            Some("id".to_string()),
            NO_TITLE.to_string(),
            UNKNOWN_ACTOR.to_string(),
            String::new(),
            None,
            String::new(),
            RecordSource::RansomfeedRss,
        );
        assert!(!record.has_known_actor());
    }
}
