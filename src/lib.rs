// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod profiles;
pub mod prompt;
pub mod report;
pub mod sources;
pub mod ttp;
pub mod utils;

pub use analysis::{Deduplicator, ProfileMatcher, TargetingAnalyzer};
pub use config::{AnalysisConfig, AttackConfig, Config, ReportConfig, SourcesConfig};
pub use error::{IntelError, Result};
pub use export::JsonExporter;
pub use models::{ActorProfile, ActorStats, CountryHit, IncidentRecord, RecordSource};
pub use profiles::{INDUSTRY_PROFILES, REGION_PROFILES};
pub use prompt::ProfileSelection;
pub use report::ReportRenderer;
pub use sources::{IncidentSource, RansomfeedClient, RansomwareLiveClient};
pub use ttp::{AttackStixClient, DisabledLookup, TechniqueLookup, TtpCache};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _renderer = ReportRenderer::new(&config.report);
    }

    // Full pipeline over two records sharing the same actor: an RSS
    // entry with an embedded group fragment and an API record with an
    // explicit group name. Their identities differ, so both survive
    // deduplication.
    #[tokio::test]
    async fn test_targeting_flow_end_to_end() {
        let config = Config::default_config();

        let rss_record = IncidentRecord::new(
            Some("https://example.com/post/1".to_string()),
            "Acme Finance Corp".to_string(),
            "DarkGroup".to_string(),
            "https://example.com/post/1".to_string(),
            Some(Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap()),
            "victim in USA, group called DarkGroup".to_string(),
            RecordSource::RansomfeedRss,
        );
        let api_record = IncidentRecord::new(
            None,
            "Acme Finance Corp".to_string(),
            "DarkGroup".to_string(),
            String::new(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            String::new(),
            RecordSource::RansomwareLiveApi,
        );

        let merged = Deduplicator::merge(vec![rss_record, api_record]);
        assert_eq!(merged.len(), 2);

        let industry = ProfileMatcher::new(["finance"]);
        let country = ProfileMatcher::new(["usa"]);
        let mut analyzer = TargetingAnalyzer::new(
            config.analysis.clone(),
            TtpCache::new(Box::new(DisabledLookup)),
        );
        let stats = analyzer.analyze(merged, &industry, &country).await;

        let profile = stats.get("DarkGroup").unwrap();
        assert!(profile.industry_hits >= 1);
        assert!(profile.country_hits >= 1);
        assert!(profile.score >= 5);

        let report = ReportRenderer::new(&config.report).render(
            &stats,
            &["Finance/Insurance".to_string()],
            &["usa".to_string()],
        );
        assert!(report.contains("1. DarkGroup"));
    }
}
