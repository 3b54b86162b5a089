// file: src/normalize/sanitize.rs
// description: html stripping and threat-actor extraction from feed bodies
// reference: best-effort field extraction, no full html parsing

use crate::models::incident::UNKNOWN_ACTOR;
use crate::normalize::patterns::{GROUP_CALLED, HTML_TAG};

/// Strips HTML tags and decodes the `&amp;`/`&lt;`/`&gt;` entities.
/// Empty or absent input yields an empty string.
pub fn clean_html(raw_html: &str) -> String {
    if raw_html.is_empty() {
        return String::new();
    }

    HTML_TAG
        .replace_all(raw_html, "")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .trim()
        .to_string()
}

/// Resolves the threat actor for an RSS entry: the category field when
/// present, else a `group called <b>NAME</b>` fragment in the raw
/// description, else the "Unknown" sentinel.
pub fn extract_rss_actor(category: Option<&str>, raw_description: &str) -> String {
    if let Some(category) = category {
        let trimmed = category.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(caps) = GROUP_CALLED.captures(raw_description) {
        return caps[1].trim().to_string();
    }

    UNKNOWN_ACTOR.to_string()
}
