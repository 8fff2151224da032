// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Live web context for LLM chat
//!
//! Turns a user query into a context block for the model:
//! - Explicit URLs in the query are fetched directly (fast path)
//! - Weather questions about known cities are answered from a forecast API
//! - Everything else is searched on public engines with ordered fallback
//!
//! Key features:
//! - Five scraped providers (Bing, Google, DuckDuckGo, Baidu, Sogou)
//! - Process-wide minimum spacing between scraping requests
//! - Concurrent page content enrichment with per-link placeholders
//! - Never fails: the original query is the last resort answer

pub mod baidu;
pub mod bing;
pub mod browser;
pub mod config;
pub mod content;
pub mod duckduckgo;
pub mod fast_path;
pub mod formatter;
pub mod google;
pub mod provider;
pub mod query_extractor;
pub mod rate_limiter;
pub mod scrape;
pub mod service;
pub mod sogou;
pub mod special_case;
pub mod types;
pub mod weather;

// Re-export commonly used types
pub use browser::{ChromiumLoader, FetchError, LoadedPage, PageLoader};
pub use config::SearchConfig;
pub use content::{ContentFetcher, PageContent, CONTENT_UNAVAILABLE};
pub use provider::{ProviderId, SearchProvider};
pub use rate_limiter::SearchRateLimiter;
pub use service::SearchService;
pub use special_case::SpecialCase;
pub use types::{AggregatedResult, SearchError, SearchResult};
