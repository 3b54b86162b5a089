// file: src/report.rs
// description: top-actor report sorting and text rendering
// reference: weighted relevance ranking output

use crate::config::ReportConfig;
use crate::models::{ActorProfile, ActorStats};
use std::fmt::Write;

/// Sorts and formats the top actors for the selected profile.
///
/// Rendering is pure string building; the binary decides where the
/// text goes.
pub struct ReportRenderer {
    top_actors: usize,
    max_recent_hits: usize,
}

impl ReportRenderer {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            top_actors: config.top_actors,
            max_recent_hits: config.max_recent_hits,
        }
    }

    /// Actors with score > 0, descending by (score, total hits). The
    /// sort is stable, so remaining ties keep first-seen order.
    pub fn ranked<'a>(&self, stats: &'a ActorStats) -> Vec<&'a ActorProfile> {
        let mut ranked: Vec<&ActorProfile> = stats
            .profiles()
            .iter()
            .filter(|p| p.score > 0)
            .collect();
        ranked.sort_by(|a, b| (b.score, b.total_hits).cmp(&(a.score, a.total_hits)));
        ranked
    }

    pub fn render(
        &self,
        stats: &ActorStats,
        industry_names: &[String],
        country_names: &[String],
    ) -> String {
        let mut out = String::new();

        writeln!(out, "--- Top Threat Actors Potentially Targeting Your Profile ---").ok();
        writeln!(
            out,
            "(Profile: Industries ({}), Countries/Sub-regions ({}))",
            industry_names.join(", "),
            country_names.join(", ")
        )
        .ok();
        writeln!(
            out,
            "(Based on victim matches, ranked by weighted relevance. TTPs from MITRE ATT&CK)"
        )
        .ok();

        let ranked = self.ranked(stats);
        if ranked.is_empty() {
            writeln!(out).ok();
            writeln!(out, "No actors found with hits matching the selected profile.").ok();
            return out;
        }

        for (i, actor) in ranked.iter().take(self.top_actors).enumerate() {
            writeln!(out).ok();
            writeln!(out, "{}. {}", i + 1, actor.name).ok();
            writeln!(out, "   Industry Hits (Matching Profile): {}", actor.industry_hits).ok();
            writeln!(out, "   Country Hits (Matching Profile Total): {}", actor.country_hits).ok();
            writeln!(out, "   Total Hits (Overall): {}", actor.total_hits).ok();

            let breakdown = actor.country_breakdown();
            if !breakdown.is_empty() {
                writeln!(out, "   Country Hit Breakdown:").ok();
                for (keyword, count) in breakdown {
                    writeln!(out, "     - {}: {}", keyword, count).ok();
                }
            }

            if actor.techniques.is_empty() {
                writeln!(out, "   Associated TTPs (MITRE ATT&CK): None recorded.").ok();
            } else {
                writeln!(out, "   Associated TTPs (MITRE ATT&CK):").ok();
                // BTreeMap iteration is already sorted by technique id
                for (ttp_id, ttp_name) in &actor.techniques {
                    writeln!(out, "     - {}: {}", ttp_id, ttp_name).ok();
                }
            }

            if actor.country_hit_details.is_empty() {
                writeln!(
                    out,
                    "   Latest Hits Matching Selected Countries/Sub-regions: None found."
                )
                .ok();
            } else {
                writeln!(
                    out,
                    "   Latest Hits Matching Selected Countries/Sub-regions (Max {}):",
                    self.max_recent_hits
                )
                .ok();
                for hit in actor.country_hit_details.iter().take(self.max_recent_hits) {
                    writeln!(
                        out,
                        "     - {} | Victim: {} | Link: {}",
                        hit.date.format("%Y-%m-%d"),
                        hit.victim,
                        hit.link
                    )
                    .ok();
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryHit;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn renderer() -> ReportRenderer {
        ReportRenderer::new(&ReportConfig {
            top_actors: 10,
            max_recent_hits: 3,
        })
    }

    fn stats_with(entries: &[(&str, u32, u32)]) -> ActorStats {
        // (name, score, total_hits)
        let mut stats = ActorStats::new();
        for &(name, score, total_hits) in entries {
            let (profile, _) = stats.entry(name);
            profile.score = score;
            profile.total_hits = total_hits;
        }
        stats
    }

    #[test]
    fn test_ranking_score_then_total_hits() {
        let stats = stats_with(&[("Y", 10, 3), ("X", 10, 5), ("Z", 12, 1)]);
        let ranked = renderer().ranked(&stats);
        let names: Vec<_> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "X", "Y"]);
    }

    #[test]
    fn test_full_tie_keeps_first_seen_order() {
        let stats = stats_with(&[("B", 10, 5), ("A", 10, 5)]);
        let ranked = renderer().ranked(&stats);
        let names: Vec<_> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_zero_score_actors_filtered_at_render_time() {
        let stats = stats_with(&[("Quiet", 0, 7), ("Loud", 5, 1)]);
        let ranked = renderer().ranked(&stats);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "Loud");
    }

    #[test]
    fn test_no_matches_message() {
        let stats = stats_with(&[("Quiet", 0, 7)]);
        let report = renderer().render(&stats, &["Legal".to_string()], &["usa".to_string()]);
        assert!(report.contains("No actors found with hits matching the selected profile."));
    }

    #[test]
    fn test_report_body() {
        let mut stats = ActorStats::new();
        let (profile, _) = stats.entry("DarkGroup");
        profile.industry_hits = 2;
        profile.country_hits = 1;
        profile.total_hits = 3;
        profile.score = 7;
        profile.record_country_keyword("usa");
        profile
            .techniques
            .insert("T1486".to_string(), "Data Encrypted for Impact".to_string());
        profile.country_hit_details.push(CountryHit {
            date: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            victim: "Acme Finance Corp".to_string(),
            link: "https://example.com/p/1".to_string(),
        });

        let report = renderer().render(&stats, &["Finance/Insurance".to_string()], &["usa".to_string()]);
        assert!(report.contains("1. DarkGroup"));
        assert!(report.contains("Industry Hits (Matching Profile): 2"));
        assert!(report.contains("- usa: 1"));
        assert!(report.contains("- T1486: Data Encrypted for Impact"));
        assert!(report.contains("- 2024-03-01 | Victim: Acme Finance Corp | Link: https://example.com/p/1"));
    }

    #[test]
    fn test_top_n_truncation() {
        let renderer = ReportRenderer::new(&ReportConfig {
            top_actors: 2,
            max_recent_hits: 3,
        });
        let stats = stats_with(&[("A", 9, 1), ("B", 8, 1), ("C", 7, 1)]);
        let report = renderer.render(&stats, &[], &[]);
        assert!(report.contains("1. A"));
        assert!(report.contains("2. B"));
        assert!(!report.contains("3. C"));
    }
}
