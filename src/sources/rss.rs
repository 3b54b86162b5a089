// file: src/sources/rss.rs
// description: Ransomfeed RSS client, fetch and item normalization
// reference: https://docs.rs/quick-xml

use crate::config::SourcesConfig;
use crate::error::{IntelError, Result};
use crate::models::{IncidentRecord, RecordSource};
use crate::models::incident::NO_TITLE;
use crate::normalize::{clean_html, extract_rss_actor, parse_rfc2822_datetime};
use crate::sources::{http_client, IncidentSource};
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

pub struct RansomfeedClient {
    client: reqwest::Client,
    url: String,
}

/// Raw fields of one `<item>` element before normalization.
#[derive(Debug, Default)]
struct RawItem {
    guid: Option<String>,
    link: Option<String>,
    title: Option<String>,
    category: Option<String>,
    description: Option<String>,
    pub_date: Option<String>,
}

impl RawItem {
    /// Identity fallback chain: guid, then link, then title.
    fn identity(&self) -> Option<String> {
        self.guid
            .clone()
            .or_else(|| self.link.clone())
            .or_else(|| self.title.clone())
    }

    fn into_record(self) -> IncidentRecord {
        let raw_description = self.description.clone().unwrap_or_default();
        let actor = extract_rss_actor(self.category.as_deref(), &raw_description);
        let published_at = self
            .pub_date
            .as_deref()
            .and_then(parse_rfc2822_datetime);
        let victim = self
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());
        let identity = self.identity();

        IncidentRecord::new(
            identity,
            victim,
            actor,
            self.link.unwrap_or_default(),
            published_at,
            clean_html(&raw_description),
            RecordSource::RansomfeedRss,
        )
    }
}

impl RansomfeedClient {
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            url: config.rss_url.clone(),
        })
    }
}

#[async_trait]
impl IncidentSource for RansomfeedClient {
    fn name(&self) -> &'static str {
        "Ransomfeed.it RSS"
    }

    async fn fetch(&self) -> Result<Vec<IncidentRecord>> {
        debug!("Fetching RSS feed from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(IntelError::SourceUnavailable {
                source_name: self.name().to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body = response.text().await?;
        let records = parse_feed(&body)?;
        debug!("Parsed {} RSS entries", records.len());
        Ok(records)
    }
}

/// Parses RSS `<item>` elements into normalized records. Entity
/// references in element text are unescaped, so embedded HTML arrives
/// as markup for the actor extraction and stripping passes.
fn parse_feed(xml: &str) -> Result<Vec<IncidentRecord>> {
    let mut records = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut current: Option<RawItem> = None;
    let mut field: Option<&'static str> = None;
    let mut saw_channel = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"channel" => saw_channel = true,
                b"item" => current = Some(RawItem::default()),
                b"guid" => field = Some("guid"),
                b"link" => field = Some("link"),
                b"title" => field = Some("title"),
                b"category" => field = Some("category"),
                b"description" => field = Some("description"),
                b"pubDate" => field = Some("pubDate"),
                _ => field = None,
            },
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                assign_field(&mut current, field, text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                assign_field(&mut current, field, text);
            }
            Ok(Event::End(ref e)) => {
                field = None;
                if e.name().as_ref() == b"item"
                    && let Some(item) = current.take()
                {
                    records.push(item.into_record());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("RSS feed malformed: {}", e);
                break;
            }
            _ => {}
        }
    }

    if records.is_empty() && !saw_channel {
        return Err(IntelError::FeedParse(
            "no RSS channel data in response".to_string(),
        ));
    }

    Ok(records)
}

/// Elements can mix plain text and CDATA sections, which arrive as
/// separate events; fragments are appended so none are lost.
fn assign_field(current: &mut Option<RawItem>, field: Option<&'static str>, text: String) {
    let Some(item) = current.as_mut() else {
        return;
    };
    let slot = match field {
        Some("guid") => &mut item.guid,
        Some("link") => &mut item.link,
        Some("title") => &mut item.title,
        Some("category") => &mut item.category,
        Some("description") => &mut item.description,
        Some("pubDate") => &mut item.pub_date,
        _ => return,
    };
    match slot {
        Some(existing) => existing.push_str(&text),
        None => *slot = Some(text),
    }
}
