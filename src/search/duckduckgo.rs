// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo search provider
//!
//! Scrapes DuckDuckGo's JavaScript results page in a headless browser.
//! Handles both the React layout and the classic HTML layout, including
//! `uddg=` redirect links.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::browser::PageLoader;
use super::provider::SearchProvider;
use super::scrape::{extract_candidates, into_results, ResultSelectors};
use super::types::{SearchError, SearchResult};

const RESULTS_CONTAINER: &str = "#react-layout ol li, .results .result";

const SELECTORS: ResultSelectors = ResultSelectors {
    items: &[
        "#react-layout ol li[data-layout='organic']",
        "article[data-testid='result']",
        "#react-layout ol li",
        "div.result",
    ],
    link: &[
        "a[data-testid='result-title-a']",
        "div:nth-child(2) > a",
        "a.result__a",
        "h2 a",
    ],
    title: &[
        "a[data-testid='result-title-a']",
        "h2",
        "a.result__a",
        "div:nth-child(2) > a",
    ],
    snippet: &[
        "[data-result='snippet']",
        "div:nth-child(3) > div",
        ".result__snippet",
    ],
};

/// DuckDuckGo search provider (no API key required)
pub struct DuckDuckGoProvider {
    base_url: String,
    loader: Arc<dyn PageLoader>,
}

impl DuckDuckGoProvider {
    /// Create a new DuckDuckGo provider
    pub fn new(base_url: impl Into<String>, loader: Arc<dyn PageLoader>) -> Self {
        Self {
            base_url: base_url.into(),
            loader,
        }
    }

    /// Results page URL for `query`
    pub fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(
            &format!("{}/", self.base_url),
            &[("q", query), ("kl", "hk-tzh"), ("ia", "web")],
        )
        .map_err(|e| {
            SearchError::Config(format!("bad DuckDuckGo base URL '{}': {}", self.base_url, e))
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.search_url(query)?;
        debug!("Navigating to DuckDuckGo results: {}", url);

        let page = self
            .loader
            .load(url.as_str(), RESULTS_CONTAINER)
            .await
            .map_err(|source| SearchError::Browser {
                provider: self.name().to_string(),
                source,
            })?;

        let results = parse_ddg_html(&page.html, num_results)?;

        info!("DuckDuckGo returned {} results for '{}'", results.len(), query);
        for result in &results {
            debug!("duckduckgo: {} | {} | {}", result.title, result.link, result.snippet);
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Parse a rendered DuckDuckGo results page
pub fn parse_ddg_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let candidates = extract_candidates("duckduckgo", html, &SELECTORS, 0, max_results)?;
    Ok(into_results("duckduckgo", candidates, extract_ddg_url))
}

/// Extract actual URL from DuckDuckGo's redirect URL
fn extract_ddg_url(href: &str) -> Option<String> {
    // DDG redirects look like: //duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    if absolute.contains("uddg=") {
        let redirect = Url::parse(&absolute).ok()?;
        return redirect
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned());
    }

    Some(absolute)
}
