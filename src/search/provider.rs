// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::baidu::BaiduProvider;
use super::bing::BingProvider;
use super::browser::PageLoader;
use super::config::SearchConfig;
use super::duckduckgo::DuckDuckGoProvider;
use super::google::GoogleProvider;
use super::sogou::SogouProvider;
use super::types::{SearchError, SearchResult};

/// Trait for implementing search providers
///
/// One implementation per search engine. Markup changes on an engine
/// only ever touch its own implementation.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `num_results` - Maximum number of results to return
    ///
    /// # Returns
    /// A vector of search results or an error
    async fn search(&self, query: &str, num_results: usize)
        -> Result<Vec<SearchResult>, SearchError>;

    /// Get the provider name used in `SEARCH_ENGINES` and logs
    fn name(&self) -> &'static str;
}

/// Known search engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Bing,
    Google,
    DuckDuckGo,
    Baidu,
    Sogou,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Bing => "bing",
            ProviderId::Google => "google",
            ProviderId::DuckDuckGo => "duckduckgo",
            ProviderId::Baidu => "baidu",
            ProviderId::Sogou => "sogou",
        }
    }

    /// Default fallback order
    pub const fn all() -> &'static [ProviderId] {
        &[
            ProviderId::Bing,
            ProviderId::Google,
            ProviderId::DuckDuckGo,
            ProviderId::Baidu,
            ProviderId::Sogou,
        ]
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = SearchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "bing" => Ok(ProviderId::Bing),
            "google" => Ok(ProviderId::Google),
            "duckduckgo" | "ddg" => Ok(ProviderId::DuckDuckGo),
            "baidu" => Ok(ProviderId::Baidu),
            "sogou" => Ok(ProviderId::Sogou),
            _ => Err(SearchError::UnknownProvider(value.trim().to_string())),
        }
    }
}

/// Construct the browser-backed provider for `id`
pub fn build_provider(
    id: ProviderId,
    config: &SearchConfig,
    loader: Arc<dyn PageLoader>,
) -> Box<dyn SearchProvider> {
    let base_url = config.providers.base_url(id).to_string();
    match id {
        ProviderId::Bing => Box::new(BingProvider::new(base_url, loader)),
        ProviderId::Google => Box::new(GoogleProvider::new(base_url, loader)),
        ProviderId::DuckDuckGo => Box::new(DuckDuckGoProvider::new(base_url, loader)),
        ProviderId::Baidu => Box::new(BaiduProvider::new(base_url, loader)),
        ProviderId::Sogou => Box::new(SogouProvider::new(base_url, loader)),
    }
}
