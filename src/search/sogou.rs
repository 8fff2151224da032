// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sogou search provider
//!
//! Scrapes the Sogou web results page in a headless browser. Sogou links
//! are frequently relative (`/link?url=...`) and are resolved against the
//! engine's base URL.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::browser::PageLoader;
use super::provider::SearchProvider;
use super::scrape::{extract_candidates, into_results, ResultSelectors};
use super::types::{SearchError, SearchResult};

const RESULTS_CONTAINER: &str = ".results";

const SELECTORS: ResultSelectors = ResultSelectors {
    items: &[".results > .vrwrap", ".results > .rb"],
    link: &["h3 > a", "h3 a", "a[href]"],
    title: &["h3"],
    snippet: &[".space-txt", ".str-info", ".str_info", ".ft", "p"],
};

/// Sogou search provider (no API key required)
pub struct SogouProvider {
    base_url: String,
    loader: Arc<dyn PageLoader>,
}

impl SogouProvider {
    /// Create a new Sogou provider
    pub fn new(base_url: impl Into<String>, loader: Arc<dyn PageLoader>) -> Self {
        Self {
            base_url: base_url.into(),
            loader,
        }
    }

    /// Results page URL for `query`
    pub fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(
            &format!("{}/web", self.base_url),
            &[("query", query), ("ie", "utf8")],
        )
        .map_err(|e| SearchError::Config(format!("bad Sogou base URL '{}': {}", self.base_url, e)))
    }
}

#[async_trait]
impl SearchProvider for SogouProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.search_url(query)?;
        debug!("Navigating to Sogou results: {}", url);

        let page = self
            .loader
            .load(url.as_str(), RESULTS_CONTAINER)
            .await
            .map_err(|source| SearchError::Browser {
                provider: self.name().to_string(),
                source,
            })?;

        let results = parse_sogou_html(&page.html, &self.base_url, num_results)?;

        info!("Sogou returned {} results for '{}'", results.len(), query);
        for result in &results {
            debug!("sogou: {} | {} | {}", result.title, result.link, result.snippet);
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "sogou"
    }
}

/// Parse a rendered Sogou results page, resolving links against `base_url`
pub fn parse_sogou_html(
    html: &str,
    base_url: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let base = Url::parse(base_url)
        .map_err(|e| SearchError::Config(format!("bad Sogou base URL '{}': {}", base_url, e)))?;
    let candidates = extract_candidates("sogou", html, &SELECTORS, 0, max_results)?;
    Ok(into_results("sogou", candidates, |href| {
        base.join(href).ok().map(String::from)
    }))
}
