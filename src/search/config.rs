// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::provider::ProviderId;

pub const DEFAULT_BING_URL: &str = "https://cn.bing.com";
pub const DEFAULT_GOOGLE_URL: &str = "https://www.google.com.hk";
pub const DEFAULT_DUCKDUCKGO_URL: &str = "https://duckduckgo.com";
pub const DEFAULT_BAIDU_URL: &str = "https://www.baidu.com";
pub const DEFAULT_SOGOU_URL: &str = "https://www.sogou.com";
pub const DEFAULT_WEATHER_API_URL: &str = "http://t.weather.sojson.com/api/weather/city";

/// Configuration for web search functionality
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Skip content enrichment and return link/title/snippet only
    pub enable_quick_search: bool,
    /// Provider fallback order (raw identifiers, unknown ones are skipped)
    pub search_engines: Vec<String>,
    /// Provider-specific configuration
    pub providers: SearchProviderConfig,
    /// Forecast endpoint base; the city code is appended as a path segment
    pub weather_api_url: String,
    /// Minimum spacing between rate-limited calls in milliseconds
    pub min_interval_ms: u64,
    /// Stop asking further providers once this many results are collected
    pub early_stop_threshold: usize,
    /// Maximum results taken from a single provider
    pub max_results_per_provider: usize,
    /// Character limit for enriched search result content
    pub content_max_chars: usize,
    /// Character limit for URLs fetched on the fast path
    pub fast_path_max_chars: usize,
    /// Extra delay between consecutive fast-path fetches in milliseconds
    pub fast_path_delay_ms: u64,
    /// Per-navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Explicit Chrome/Chromium executable
    pub chrome_path: Option<PathBuf>,
}

/// Provider-specific configuration
#[derive(Debug, Clone)]
pub struct SearchProviderConfig {
    pub bing_url: String,
    pub google_url: String,
    pub duckduckgo_url: String,
    pub baidu_url: String,
    pub sogou_url: String,
}

impl SearchProviderConfig {
    /// Base URL for a provider, without trailing slash
    pub fn base_url(&self, id: ProviderId) -> &str {
        let url = match id {
            ProviderId::Bing => &self.bing_url,
            ProviderId::Google => &self.google_url,
            ProviderId::DuckDuckGo => &self.duckduckgo_url,
            ProviderId::Baidu => &self.baidu_url,
            ProviderId::Sogou => &self.sogou_url,
        };
        url.trim_end_matches('/')
    }
}

impl Default for SearchProviderConfig {
    fn default() -> Self {
        Self {
            bing_url: DEFAULT_BING_URL.to_string(),
            google_url: DEFAULT_GOOGLE_URL.to_string(),
            duckduckgo_url: DEFAULT_DUCKDUCKGO_URL.to_string(),
            baidu_url: DEFAULT_BAIDU_URL.to_string(),
            sogou_url: DEFAULT_SOGOU_URL.to_string(),
        }
    }
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str| var(key).and_then(|v| v.trim().parse::<u64>().ok());
        let url = |key: &str, default: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            enable_quick_search: var("ENABLE_QUICK_SEARCH")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            search_engines: var("SEARCH_ENGINES")
                .map(|v| parse_engine_list(&v))
                .filter(|engines| !engines.is_empty())
                .unwrap_or(defaults.search_engines),
            providers: SearchProviderConfig {
                bing_url: url("BING_URL", DEFAULT_BING_URL),
                google_url: url("GOOGLE_URL", DEFAULT_GOOGLE_URL),
                duckduckgo_url: url("DUCKDUCKGO_URL", DEFAULT_DUCKDUCKGO_URL),
                baidu_url: url("BAIDU_URL", DEFAULT_BAIDU_URL),
                sogou_url: url("SOGOU_URL", DEFAULT_SOGOU_URL),
            },
            weather_api_url: url("WEATHER_API_URL", DEFAULT_WEATHER_API_URL),
            min_interval_ms: number("SEARCH_MIN_INTERVAL_MS").unwrap_or(defaults.min_interval_ms),
            early_stop_threshold: number("SEARCH_EARLY_STOP")
                .map(|v| v as usize)
                .unwrap_or(defaults.early_stop_threshold),
            max_results_per_provider: number("SEARCH_MAX_RESULTS_PER_ENGINE")
                .map(|v| v as usize)
                .unwrap_or(defaults.max_results_per_provider),
            content_max_chars: number("CONTENT_FETCH_MAX_CHARS")
                .map(|v| v as usize)
                .unwrap_or(defaults.content_max_chars),
            fast_path_max_chars: number("FAST_PATH_MAX_CHARS")
                .map(|v| v as usize)
                .unwrap_or(defaults.fast_path_max_chars),
            fast_path_delay_ms: number("FAST_PATH_DELAY_MS").unwrap_or(defaults.fast_path_delay_ms),
            navigation_timeout_secs: number("NAVIGATION_TIMEOUT_SECS")
                .unwrap_or(defaults.navigation_timeout_secs),
            chrome_path: var("CHROME_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.search_engines.is_empty() {
            return Err("At least one search engine must be configured".to_string());
        }
        if self.min_interval_ms == 0 {
            return Err("Minimum request interval must be greater than 0".to_string());
        }
        if self.early_stop_threshold == 0 {
            return Err("Early-stop threshold must be at least 1".to_string());
        }
        if self.max_results_per_provider == 0 {
            return Err("Results per engine must be at least 1".to_string());
        }
        if self.content_max_chars == 0 || self.fast_path_max_chars == 0 {
            return Err("Content limits must be greater than 0".to_string());
        }
        if self.navigation_timeout_secs == 0 {
            return Err("Navigation timeout must be at least 1 second".to_string());
        }
        Ok(())
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn fast_path_delay(&self) -> Duration {
        Duration::from_millis(self.fast_path_delay_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable_quick_search: false,
            search_engines: ProviderId::all()
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            providers: SearchProviderConfig::default(),
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            min_interval_ms: 3000,
            early_stop_threshold: 3,
            max_results_per_provider: 5,
            content_max_chars: 1000,
            fast_path_max_chars: 5000,
            fast_path_delay_ms: 2000,
            navigation_timeout_secs: 60,
            chrome_path: None,
        }
    }
}

/// Split a comma-separated engine list, dropping blanks
pub fn parse_engine_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
