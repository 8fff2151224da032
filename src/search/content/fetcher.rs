//! Page content fetching for search result enrichment
//!
//! Opens result links in disposable browser sessions and returns their
//! visible text, truncated. A failed link yields a placeholder and never
//! affects the other links fetched alongside it.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use url::Url;

use super::extractor::{extract_main_content, truncate_content};
use crate::search::browser::{FetchError, PageLoader};

/// Returned in place of page text whenever a fetch fails
pub const CONTENT_UNAVAILABLE: &str = "content unavailable";

/// Fetched page text keyed by its link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub url: String,
    pub text: String,
}

/// Content fetcher over a shared page loader
pub struct ContentFetcher {
    loader: Arc<dyn PageLoader>,
    navigation_timeout: Duration,
}

impl ContentFetcher {
    /// Create a new content fetcher
    ///
    /// `navigation_timeout` bounds each page independently of whatever the
    /// loader enforces itself.
    pub fn new(loader: Arc<dyn PageLoader>, navigation_timeout: Duration) -> Self {
        Self {
            loader,
            navigation_timeout,
        }
    }

    /// Fetch visible text of `url`, truncated to `limit` characters
    ///
    /// Never fails: any error is logged and replaced by [`CONTENT_UNAVAILABLE`].
    pub async fn fetch_content(&self, url: &str, limit: usize) -> String {
        match self.try_fetch(url).await {
            Ok(text) => {
                info!("Fetched {} chars from: {}", text.chars().count(), url);
                truncate_content(&text, limit)
            }
            Err(e) => {
                warn!("Failed to fetch {}, using placeholder: {}", url, e);
                CONTENT_UNAVAILABLE.to_string()
            }
        }
    }

    /// Fetch several links concurrently
    ///
    /// Returns results in the same order as the input links.
    pub async fn fetch_multiple(&self, urls: &[String], limit: usize) -> Vec<PageContent> {
        let futures = urls.iter().map(|url| async move {
            PageContent {
                url: url.clone(),
                text: self.fetch_content(url, limit).await,
            }
        });

        join_all(futures).await
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        if !Self::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching content from: {}", url);

        let page = timeout(self.navigation_timeout, self.loader.load(url, "body"))
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
                timeout_secs: self.navigation_timeout.as_secs(),
            })??;

        let mut text = page.text.trim().to_string();
        if text.is_empty() {
            text = extract_main_content(&page.html);
        }
        if text.is_empty() {
            return Err(FetchError::NoContent(url.to_string()));
        }

        Ok(text)
    }

    /// Check if URL is safe to fetch (http(s), not localhost/private IP)
    pub fn is_safe_url(url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return false,
        };

        if !["http", "https"].contains(&parsed.scheme()) {
            return false;
        }

        match parsed.host() {
            Some(url::Host::Domain(domain)) => {
                let domain = domain.to_lowercase();
                domain != "localhost" && !domain.ends_with(".localhost")
            }
            Some(url::Host::Ipv4(ip)) => {
                !(ip.is_loopback()
                    || ip.is_private()
                    || ip.is_link_local()
                    || ip.is_unspecified()
                    || ip.is_broadcast())
            }
            Some(url::Host::Ipv6(ip)) => !(ip.is_loopback() || ip.is_unspecified()),
            None => false,
        }
    }
}
