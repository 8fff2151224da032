// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bing search provider
//!
//! Scrapes the Bing (cn) results page in a headless browser.
//! First in the default fallback order.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::browser::PageLoader;
use super::provider::SearchProvider;
use super::scrape::{extract_candidates, into_results, ResultSelectors};
use super::types::{SearchError, SearchResult};

const RESULTS_CONTAINER: &str = "#b_results";

const SELECTORS: ResultSelectors = ResultSelectors {
    items: &["#b_results > li.b_algo", "#b_results > .b_algo"],
    link: &["h2 > a", "h2 a", "a[href]"],
    title: &["h2", "a"],
    snippet: &[".b_caption > p", ".b_lineclamp2", ".b_caption", "p"],
};

/// Bing search provider (no API key required)
pub struct BingProvider {
    base_url: String,
    loader: Arc<dyn PageLoader>,
}

impl BingProvider {
    /// Create a new Bing provider
    ///
    /// # Arguments
    /// * `base_url` - Site root, e.g. `https://cn.bing.com`
    /// * `loader` - Browser session factory
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
            &[("form", "QBRE"), ("q", query), ("cc", "CN")],
        )
        .map_err(|e| SearchError::Config(format!("bad Bing base URL '{}': {}", self.base_url, e)))
    }
}

#[async_trait]
impl SearchProvider for BingProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.search_url(query)?;
        debug!("Navigating to Bing results: {}", url);

        let page = self
            .loader
            .load(url.as_str(), RESULTS_CONTAINER)
            .await
            .map_err(|source| SearchError::Browser {
                provider: self.name().to_string(),
                source,
            })?;

        let results = parse_bing_html(&page.html, num_results)?;

        info!("Bing returned {} results for '{}'", results.len(), query);
        for result in &results {
            debug!("bing: {} | {} | {}", result.title, result.link, result.snippet);
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "bing"
    }
}

/// Parse a rendered Bing results page
pub fn parse_bing_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let candidates = extract_candidates("bing", html, &SELECTORS, 0, max_results)?;
    Ok(into_results("bing", candidates, |href| Some(href.to_string())))
}
