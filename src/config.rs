// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{IntelError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub sources: SourcesConfig,
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub attack: AttackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    pub rss_url: String,
    pub api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Ordered field names tried for the API link field. The upstream
    /// schema for this field is unconfirmed, so it stays overridable.
    #[serde(default = "default_api_link_fields")]
    pub api_link_fields: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    pub industry_weight: u32,
    pub country_weight: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    pub top_actors: usize,
    pub max_recent_hits: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttackConfig {
    pub enabled: bool,
    pub stix_url: String,
    pub timeout_secs: u64,
}

fn default_api_link_fields() -> Vec<String> {
    vec![
        "post_url".to_string(),
        "url".to_string(),
        "link".to_string(),
    ]
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RANSOMSCOPE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| IntelError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| IntelError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            sources: SourcesConfig {
                rss_url: "https://www.ransomfeed.it/rss-complete.php".to_string(),
                api_url: "https://api.ransomware.live/posts".to_string(),
                user_agent: "Mozilla/5.0 (compatible; Ransomscope/0.1)".to_string(),
                timeout_secs: 30,
                api_link_fields: default_api_link_fields(),
            },
            analysis: AnalysisConfig {
                industry_weight: 2,
                country_weight: 3,
            },
            report: ReportConfig {
                top_actors: 10,
                max_recent_hits: 3,
            },
            attack: AttackConfig {
                enabled: true,
                stix_url: "https://raw.githubusercontent.com/mitre/cti/master/enterprise-attack/enterprise-attack.json".to_string(),
                timeout_secs: 60,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.sources.timeout_secs == 0 {
            return Err(IntelError::Config(
                "sources.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.report.top_actors == 0 {
            return Err(IntelError::Config(
                "report.top_actors must be greater than 0".to_string(),
            ));
        }

        if self.analysis.industry_weight == 0 && self.analysis.country_weight == 0 {
            return Err(IntelError::Config(
                "at least one analysis weight must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_validates() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.industry_weight, 2);
        assert_eq!(config.analysis.country_weight, 3);
        assert_eq!(config.report.top_actors, 10);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default_config();
        config.sources.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_link_fields_default_order() {
        let config = Config::default_config();
        assert_eq!(config.sources.api_link_fields, vec!["post_url", "url", "link"]);
    }
}
