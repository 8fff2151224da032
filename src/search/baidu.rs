// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Baidu search provider
//!
//! Scrapes the Baidu results page in a headless browser. The first few
//! nodes on a Baidu page are often aladdin cards or ads, so a small random
//! number of leading nodes is skipped, bounded so that enough remain.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::browser::PageLoader;
use super::provider::SearchProvider;
use super::scrape::{count_items, extract_candidates, into_results, ResultSelectors};
use super::types::{SearchError, SearchResult};

const RESULTS_CONTAINER: &str = "#content_left";

/// Upper bound on leading nodes skipped
pub const MAX_SKIPPED_NODES: usize = 2;

const SELECTORS: ResultSelectors = ResultSelectors {
    items: &[
        "#content_left > .result",
        "#content_left > .c-container",
        "#content_left > div[tpl]",
    ],
    link: &["h3 > a", "h3 a", "a[href]"],
    title: &["h3"],
    snippet: &[
        ".c-abstract",
        "[class*='content-right']",
        ".c-span-last",
        "span.content-right_8Zs40",
        "p",
    ],
};

/// Baidu search provider (no API key required)
pub struct BaiduProvider {
    base_url: String,
    loader: Arc<dyn PageLoader>,
}

impl BaiduProvider {
    /// Create a new Baidu provider
    pub fn new(base_url: impl Into<String>, loader: Arc<dyn PageLoader>) -> Self {
        Self {
            base_url: base_url.into(),
            loader,
        }
    }

    /// Results page URL for `query`
    pub fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(
            &format!("{}/s", self.base_url),
            &[("wd", query), ("ie", "utf-8")],
        )
        .map_err(|e| SearchError::Config(format!("bad Baidu base URL '{}': {}", self.base_url, e)))
    }
}

#[async_trait]
impl SearchProvider for BaiduProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.search_url(query)?;
        debug!("Navigating to Baidu results: {}", url);

        let page = self
            .loader
            .load(url.as_str(), RESULTS_CONTAINER)
            .await
            .map_err(|source| SearchError::Browser {
                provider: self.name().to_string(),
                source,
            })?;

        let available = count_items("baidu", &page.html, &SELECTORS)?;
        let offset = pick_offset(available, num_results, &mut rand::thread_rng());
        debug!("Baidu page has {} result nodes, skipping {}", available, offset);

        let results = parse_baidu_html(&page.html, offset, num_results)?;

        info!("Baidu returned {} results for '{}'", results.len(), query);
        for result in &results {
            debug!("baidu: {} | {} | {}", result.title, result.link, result.snippet);
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "baidu"
    }
}

/// Choose how many leading nodes to skip
///
/// Never skips so many that fewer than `wanted` nodes would remain, and
/// never more than [`MAX_SKIPPED_NODES`].
pub fn pick_offset<R: Rng + ?Sized>(available: usize, wanted: usize, rng: &mut R) -> usize {
    let spare = available.saturating_sub(wanted).min(MAX_SKIPPED_NODES);
    if spare == 0 {
        0
    } else {
        rng.gen_range(0..=spare)
    }
}

/// Parse a rendered Baidu results page starting at `offset`
pub fn parse_baidu_html(
    html: &str,
    offset: usize,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let candidates = extract_candidates("baidu", html, &SELECTORS, offset, max_results)?;
    Ok(into_results("baidu", candidates, |href| Some(href.to_string())))
}
