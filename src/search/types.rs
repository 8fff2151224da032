// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search functionality

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::browser::FetchError;

/// A single search result scraped from a search engine results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// URL the result points to
    pub link: String,
    /// Title of the search result
    pub title: String,
    /// Snippet shown on the results page
    pub snippet: String,
    /// Page text fetched by the content enricher (None when enrichment is off)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Engine that produced the result (e.g., "bing", "baidu")
    pub source: String,
}

impl SearchResult {
    /// Create a result without enriched content
    pub fn new(
        link: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
            snippet: snippet.into(),
            content: None,
            source: source.into(),
        }
    }
}

/// Results accumulated across the provider fallback chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    /// Results in provider order; not deduplicated across providers
    pub results: Vec<SearchResult>,
    /// The query the results were collected for
    pub origin_query: String,
}

impl AggregatedResult {
    pub fn new(origin_query: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            origin_query: origin_query.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Browser session failed while loading a results page
    #[error("{provider} browser session failed: {source}")]
    Browser {
        /// Engine whose page failed to load
        provider: String,
        #[source]
        source: FetchError,
    },

    /// Results page loaded but could not be interpreted
    #[error("Failed to parse {provider} results: {reason}")]
    Parse {
        /// Engine whose page failed to parse
        provider: String,
        /// What went wrong
        reason: String,
    },

    /// Search engine identifier is not recognized
    #[error("Unknown search engine: {0}")]
    UnknownProvider(String),

    /// Forecast API request or response failed
    #[error("Weather lookup failed: {0}")]
    Weather(String),

    /// Configuration value is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}
