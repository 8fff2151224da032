// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google search provider
//!
//! Scrapes the Google (hk) results page in a headless browser. Result
//! links are sometimes wrapped in `/url?q=` redirects, which are unwrapped.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::browser::PageLoader;
use super::provider::SearchProvider;
use super::scrape::{extract_candidates, into_results, ResultSelectors};
use super::types::{SearchError, SearchResult};

const RESULTS_CONTAINER: &str = "#search";

const SELECTORS: ResultSelectors = ResultSelectors {
    items: &["#search div.g", "#rso > div", "#search > div > div > div"],
    link: &["a[href]"],
    title: &["h3", "a > h3"],
    snippet: &[
        ".VwiC3b",
        "div[data-sncf]",
        "div[style*='-webkit-line-clamp']",
        "div > div > div > div > div > div > span",
    ],
};

/// Google search provider (no API key required)
pub struct GoogleProvider {
    base_url: String,
    loader: Arc<dyn PageLoader>,
}

impl GoogleProvider {
    /// Create a new Google provider
    pub fn new(base_url: impl Into<String>, loader: Arc<dyn PageLoader>) -> Self {
        Self {
            base_url: base_url.into(),
            loader,
        }
    }

    /// Results page URL for `query`
    pub fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(
            &format!("{}/search", self.base_url),
            &[
                ("q", query),
                ("oq", query),
                ("hl", "en"),
                ("gl", "us"),
                ("sourceid", "chrome"),
                ("ie", "UTF-8"),
            ],
        )
        .map_err(|e| SearchError::Config(format!("bad Google base URL '{}': {}", self.base_url, e)))
    }
}

#[async_trait]
impl SearchProvider for GoogleProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.search_url(query)?;
        debug!("Navigating to Google results: {}", url);

        let page = self
            .loader
            .load(url.as_str(), RESULTS_CONTAINER)
            .await
            .map_err(|source| SearchError::Browser {
                provider: self.name().to_string(),
                source,
            })?;

        let results = parse_google_html(&page.html, num_results)?;

        info!("Google returned {} results for '{}'", results.len(), query);
        for result in &results {
            debug!("google: {} | {} | {}", result.title, result.link, result.snippet);
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// Parse a rendered Google results page
pub fn parse_google_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let candidates = extract_candidates("google", html, &SELECTORS, 0, max_results)?;
    Ok(into_results("google", candidates, resolve_google_link))
}

/// Unwrap `/url?q=<target>` redirects; absolute links pass through
fn resolve_google_link(href: &str) -> Option<String> {
    if href.starts_with("/url?") {
        let redirect = Url::parse("https://www.google.com").ok()?.join(href).ok()?;
        return redirect
            .query_pairs()
            .find(|(key, _)| key == "q" || key == "url")
            .map(|(_, target)| target.into_owned());
    }
    Some(href.to_string())
}
