//! Text rendering of cache entries
//!
//! Mirrors the page layout: a loading line while pending, the raw JSON
//! response on success, and a generic error banner on failure followed by
//! the last good response when one is still held.

use serde::Serialize;

use crate::api::{ApiError, Payload};
use crate::cache::{CacheEntry, CacheKey, Status};
use crate::pages::Page;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const ERROR_MESSAGE: &str = "Error fetching data";
pub const STALE_NOTICE: &str = "Showing last successful response:";

/// Renders one entry under a heading
pub fn render_entry(
    label: &str,
    entry: &CacheEntry<Payload, ApiError>,
    planet_filter: Option<&str>,
) -> String {
    let mut out = format!("== {} ==\n", label);

    match entry.status {
        Status::Idle => out.push_str("Not fetched yet\n"),
        Status::Pending => {
            out.push_str(LOADING_MESSAGE);
            out.push('\n');
        }
        Status::Success => {
            if let Some(data) = &entry.data {
                out.push_str(&render_payload(data, planet_filter));
                if let Payload::Gifs(page) = data {
                    if let Some(next) = page.next_offset() {
                        out.push_str(&format!("More results from offset {}\n", next));
                    }
                }
            }
        }
        Status::Error => {
            out.push_str(ERROR_MESSAGE);
            out.push('\n');
            if let Some(data) = &entry.data {
                out.push_str(STALE_NOTICE);
                out.push('\n');
                out.push_str(&render_payload(data, planet_filter));
            }
        }
    }

    out
}

/// Pretty JSON of a payload, applying the planet name filter if given
pub fn render_payload(payload: &Payload, planet_filter: Option<&str>) -> String {
    match (payload, planet_filter) {
        (Payload::Planets(planets), Some(filter)) => to_pretty_json(&planets.filter(filter)),
        _ => to_pretty_json(payload),
    }
}

fn to_pretty_json<S: Serialize + ?Sized>(value: &S) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => format!("{}\n", json),
        Err(e) => format!("<unprintable response: {}>\n", e),
    }
}

/// The home listing
pub fn render_page_list() -> String {
    let mut out = String::from("API Showcase\n\n");
    for page in Page::all() {
        out.push_str(&format!("  {:<20} {}\n", page.title(), page.usage()));
    }
    out
}

/// One line per cached key with its status
pub fn render_cache_listing(entries: &[(CacheKey, CacheEntry<Payload, ApiError>)]) -> String {
    if entries.is_empty() {
        return "Cache is empty\n".to_string();
    }

    let mut out = String::new();
    for (key, entry) in entries {
        out.push_str(&format!("  {:<8} {}\n", entry.status.as_str(), key));
    }
    out.push_str(&format!("{} entries\n", entries.len()));
    out
}
