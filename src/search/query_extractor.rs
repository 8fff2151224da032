// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query inspection ahead of search
//!
//! Finds explicit URLs and intent markers in the raw user query so the
//! service can pick a special-case handler before falling back to search.

use regex::Regex;
use std::sync::OnceLock;

/// Markers that flag a weather question
pub const WEATHER_MARKERS: &[&str] = &["weather", "天气"];

const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', ')', ']', '}', '\'', '"', '>',
];

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Stops at whitespace, quotes and full-width punctuation
        Regex::new(r#"(?i)https?://[^\s<>"'`，。！？、；：（）《》【】“”‘’]+"#)
            .expect("URL pattern is valid")
    })
}

/// Extract explicit http(s) URLs from a query
///
/// URLs are returned in order of first appearance with trailing sentence
/// punctuation stripped. Duplicates are dropped.
pub fn extract_urls(query: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    for found in url_pattern().find_iter(query) {
        let url = found.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if url.ends_with("://") {
            continue;
        }
        if !urls.iter().any(|existing| existing == url) {
            urls.push(url.to_string());
        }
    }

    urls
}

/// Check whether the query carries a weather marker
pub fn contains_weather_marker(query: &str) -> bool {
    let lower = query.to_lowercase();
    WEATHER_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Normalize a query before it is sent to an engine
pub fn clean_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}
