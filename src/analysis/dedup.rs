// file: src/analysis/dedup.rs
// description: cross-source record deduplication by identity key
// reference: last-writer-wins-by-recency merge, no field-level merging

use crate::error::{IntelError, Result};
use crate::models::IncidentRecord;
use std::collections::HashMap;
use tracing::debug;

/// Merges records from multiple sources into a unique-by-identity set.
///
/// Records are considered in arrival order. An incoming record replaces
/// a stored one only when both carry a publication timestamp and the
/// incoming one is strictly newer; ties and missing-timestamp cases
/// keep the first-seen record. First-seen order is preserved in the
/// output.
#[derive(Debug, Default)]
pub struct Deduplicator {
    index: HashMap<String, usize>,
    records: Vec<IncidentRecord>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: IncidentRecord) {
        match self.index.get(&record.identity) {
            None => {
                self.index.insert(record.identity.clone(), self.records.len());
                self.records.push(record);
            }
            Some(&idx) => {
                let existing = &self.records[idx];
                let newer = match (record.published_at, existing.published_at) {
                    (Some(incoming), Some(stored)) => incoming > stored,
                    _ => false,
                };
                if newer {
                    debug!(
                        identity = %record.identity,
                        "Replacing record with more recent version"
                    );
                    self.records[idx] = record;
                }
            }
        }
    }

    pub fn merge(records: Vec<IncidentRecord>) -> Vec<IncidentRecord> {
        let mut dedup = Self::new();
        for record in records {
            dedup.insert(record);
        }
        dedup.into_records()
    }

    /// Merges the combined fetch output. An empty input means every
    /// source failed or returned nothing; analysis cannot proceed, so
    /// the run halts here with an error.
    pub fn merge_fetched(records: Vec<IncidentRecord>) -> Result<Vec<IncidentRecord>> {
        if records.is_empty() {
            return Err(IntelError::NoData);
        }
        Ok(Self::merge(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<IncidentRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordSource;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record(identity: &str, victim: &str, day: Option<u32>) -> IncidentRecord {
        IncidentRecord::new(
            Some(identity.to_string()),
            victim.to_string(),
            "DarkGroup".to_string(),
            String::new(),
            day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()),
            String::new(),
            RecordSource::RansomfeedRss,
        )
    }

    #[test]
    fn test_newer_record_wins() {
        let merged = Deduplicator::merge(vec![
            record("id-1", "first", Some(1)),
            record("id-1", "second", Some(5)),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].victim, "second");
    }

    #[test]
    fn test_older_record_does_not_replace() {
        let merged = Deduplicator::merge(vec![
            record("id-1", "first", Some(5)),
            record("id-1", "second", Some(1)),
        ]);
        assert_eq!(merged[0].victim, "first");
    }

    #[test]
    fn test_missing_timestamps_keep_first_seen() {
        let merged = Deduplicator::merge(vec![
            record("id-1", "first", None),
            record("id-1", "second", None),
        ]);
        assert_eq!(merged[0].victim, "first");

        let merged = Deduplicator::merge(vec![
            record("id-2", "first", None),
            record("id-2", "second", Some(5)),
        ]);
        assert_eq!(merged[0].victim, "first");
    }

    #[test]
    fn test_equal_timestamps_keep_first_seen() {
        let merged = Deduplicator::merge(vec![
            record("id-1", "first", Some(3)),
            record("id-1", "second", Some(3)),
        ]);
        assert_eq!(merged[0].victim, "first");
    }

    #[test]
    fn test_merge_fetched_halts_on_zero_records() {
        let result = Deduplicator::merge_fetched(Vec::new());
        assert!(matches!(result, Err(crate::error::IntelError::NoData)));

        let merged = Deduplicator::merge_fetched(vec![record("id-1", "first", None)]).unwrap();
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_distinct_identities_all_kept_in_order() {
        let merged = Deduplicator::merge(vec![
            record("id-b", "b", Some(1)),
            record("id-a", "a", Some(2)),
            record("id-c", "c", None),
        ]);
        let identities: Vec<_> = merged.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(identities, vec!["id-b", "id-a", "id-c"]);
    }
}
