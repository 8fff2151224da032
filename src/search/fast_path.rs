// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Direct retrieval of URLs named in the query
//!
//! When the query already contains links, search is skipped and the pages
//! themselves are fetched one after another. Each fetch is rate limited and
//! followed by a fixed cooperative delay before the next one.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::content::ContentFetcher;
use super::query_extractor::extract_urls;
use super::rate_limiter::SearchRateLimiter;
use super::special_case::SpecialCase;

/// Fetches explicit URLs sequentially and formats them as link/content blocks
pub struct FastPath {
    rate_limiter: Arc<SearchRateLimiter>,
    fetcher: Arc<ContentFetcher>,
    max_chars: usize,
    delay: Duration,
}

impl FastPath {
    /// Create a new fast-path handler
    ///
    /// # Arguments
    /// * `rate_limiter` - Limiter shared with the search providers
    /// * `fetcher` - Page content fetcher
    /// * `max_chars` - Character limit per fetched page
    /// * `delay` - Pause between consecutive fetches
    pub fn new(
        rate_limiter: Arc<SearchRateLimiter>,
        fetcher: Arc<ContentFetcher>,
        max_chars: usize,
        delay: Duration,
    ) -> Self {
        Self {
            rate_limiter,
            fetcher,
            max_chars,
            delay,
        }
    }

    /// Fetch every URL in order and join the blocks with a blank line
    ///
    /// Failed fetches contribute a placeholder block.
    pub async fn fetch_all(&self, urls: &[String]) -> String {
        let mut blocks = Vec::with_capacity(urls.len());

        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                debug!("Waiting {}ms before next URL", self.delay.as_millis());
                tokio::time::sleep(self.delay).await;
            }

            self.rate_limiter.acquire().await;
            let content = self.fetcher.fetch_content(url, self.max_chars).await;
            blocks.push(format_block(url, &content));
        }

        blocks.join("\n\n")
    }
}

#[async_trait]
impl SpecialCase for FastPath {
    fn name(&self) -> &'static str {
        "fast-path"
    }

    async fn intercept(&self, query: &str) -> Option<String> {
        let urls = extract_urls(query);
        if urls.is_empty() {
            return None;
        }

        info!("Query names {} URL(s), fetching directly", urls.len());
        Some(self.fetch_all(&urls).await)
    }
}

/// One `link`/`content` block
pub fn format_block(url: &str, content: &str) -> String {
    format!("link: {}\ncontent: {}", url, content)
}
