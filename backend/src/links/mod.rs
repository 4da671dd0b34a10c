//! Link classification for the raw `link` column.
//!
//! A record's link cell is a comma-joined list of URLs. Map links (Google
//! Maps, long or short form) are separated from everything else, and an
//! embeddable search query is pulled from the first map link when it has one.

use reqwest::Url;
use serde::Serialize;

use crate::models::ActivityRecord;

/// Substrings identifying a map link.
pub const MAP_LINK_MARKERS: [&str; 3] = ["google.com/maps", "maps.app.goo.gl", "goo.gl/maps"];

/// Query parameters carrying a map search, in priority order.
const QUERY_PARAMS: [&str; 2] = ["q", "query"];

const LABEL_MAX_CHARS: usize = 30;

/// Links of one record, split by kind.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkSet {
    pub map_links: Vec<String>,
    pub other_links: Vec<String>,
}

impl LinkSet {
    pub fn has_map(&self) -> bool {
        !self.map_links.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.map_links.is_empty() && self.other_links.is_empty()
    }
}

/// What a map view can show for a record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MapTarget {
    /// No map link at all.
    NoLocation,
    /// Map link without a search query (e.g. a short link); open it as is.
    LinkOnly { url: String },
    /// Map link with a query usable for an embedded map.
    Embed { url: String, query: String },
}

/// Split a raw link cell into trimmed, non-empty URLs.
pub fn split_links(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

pub fn is_map_link(url: &str) -> bool {
    MAP_LINK_MARKERS.iter().any(|m| url.contains(m))
}

/// Classify every URL of a raw link cell.
pub fn classify_links(raw: &str) -> LinkSet {
    let (map_links, other_links): (Vec<String>, Vec<String>) =
        split_links(raw).into_iter().partition(|l| is_map_link(l));
    LinkSet { map_links, other_links }
}

/// Search query of a map URL (`q`, then `query`).
pub fn map_query(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    QUERY_PARAMS.iter().find_map(|name| {
        parsed
            .query_pairs()
            .find(|(k, v)| *k == *name && !v.is_empty())
            .map(|(_, v)| v.into_owned())
    })
}

/// Map view target for a record, based on its first map link.
pub fn map_target(record: &ActivityRecord) -> MapTarget {
    let links = classify_links(&record.link);
    match links.map_links.into_iter().next() {
        None => MapTarget::NoLocation,
        Some(url) => match map_query(&url) {
            Some(query) => MapTarget::Embed { url, query },
            None => MapTarget::LinkOnly { url },
        },
    }
}

/// Short display label for a link.
///
/// Host name without `www.`; unparsable links are truncated instead.
pub fn link_label(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            return host.strip_prefix("www.").unwrap_or(host).to_string();
        }
    }

    if url.chars().count() > LABEL_MAX_CHARS {
        let head: String = url.chars().take(LABEL_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}
