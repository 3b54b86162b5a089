// file: src/sources/mod.rs
// description: feed source clients and shared fetch interface
// reference: internal module structure

pub mod api;
pub mod rss;

use crate::config::SourcesConfig;
use crate::error::Result;
use crate::models::IncidentRecord;
use async_trait::async_trait;
use std::time::Duration;

pub use api::RansomwareLiveClient;
pub use rss::RansomfeedClient;

/// Read-only consumer of one disclosure feed. Implementations fetch
/// the feed and return normalized records; every failure mode is an
/// error the call site logs and treats as zero records from that
/// source.
#[async_trait]
pub trait IncidentSource: Send {
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<IncidentRecord>>;
}

/// HTTP client shared by the feed sources: user agent plus a hard
/// timeout so a stalled feed bounds the whole run.
pub fn http_client(config: &SourcesConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
