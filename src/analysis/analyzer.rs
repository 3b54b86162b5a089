// file: src/analysis/analyzer.rs
// description: per-actor aggregation of profile matches across the deduplicated set
// reference: weighted relevance scoring over industry and country hits

use crate::analysis::ProfileMatcher;
use crate::config::AnalysisConfig;
use crate::models::{ActorStats, CountryHit, IncidentRecord};
use crate::ttp::TtpCache;
use tracing::info;

/// Aggregates per-actor statistics across the deduplicated record set,
/// consulting the profile matchers and the injected TTP cache.
pub struct TargetingAnalyzer {
    weights: AnalysisConfig,
    ttp: TtpCache,
}

impl TargetingAnalyzer {
    pub fn new(weights: AnalysisConfig, ttp: TtpCache) -> Self {
        Self { weights, ttp }
    }

    /// Runs the full analysis pass. Records are visited newest-first
    /// (missing timestamps sort oldest); records without a resolved
    /// actor are skipped. Scores are computed only after the pass, so
    /// actors with zero matches still appear with score 0 — filtering
    /// them is the renderer's job.
    pub async fn analyze(
        &mut self,
        mut records: Vec<IncidentRecord>,
        industry: &ProfileMatcher,
        country: &ProfileMatcher,
    ) -> ActorStats {
        info!("Analyzing {} records for actor targeting", records.len());

        let mut stats = ActorStats::new();
        if records.is_empty() {
            return stats;
        }

        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        for record in &records {
            if !record.has_known_actor() {
                continue;
            }

            let first_encounter = {
                let (profile, first_encounter) = stats.entry(&record.actor);
                profile.total_hits += 1;
                first_encounter
            };
            if first_encounter {
                let fetched = self.ttp.techniques_for(&record.actor).await;
                let (profile, _) = stats.entry(&record.actor);
                profile.techniques = fetched;
            }

            let (profile, _) = stats.entry(&record.actor);

            if industry.is_match(&record.search_text) {
                profile.industry_hits += 1;
            }

            let country_matches = country.matches(&record.search_text);
            if !country_matches.is_empty() {
                profile.country_hits += 1;

                if let Some(published_at) = record.published_at
                    && !record.link.is_empty()
                {
                    profile.country_hit_details.push(CountryHit {
                        date: published_at,
                        victim: record.victim.clone(),
                        link: record.link.clone(),
                    });
                }

                for keyword in country_matches {
                    profile.record_country_keyword(keyword);
                }
            }
        }

        for profile in stats.profiles_mut() {
            profile.score = profile.industry_hits * self.weights.industry_weight
                + profile.country_hits * self.weights.country_weight;
        }

        info!("Analysis complete for {} unique known actors", stats.len());
        stats
    }

    pub fn ttp_cache(&self) -> &TtpCache {
        &self.ttp
    }
}
