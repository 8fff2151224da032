// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Coordinates special-case handlers, provider fallback, rate limiting and
//! content enrichment. [`SearchService::execute`] never fails: whatever goes
//! wrong, the caller gets either an answer or its own query back.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::browser::{ChromiumLoader, PageLoader};
use super::config::SearchConfig;
use super::content::ContentFetcher;
use super::fast_path::FastPath;
use super::formatter::format_results;
use super::provider::{build_provider, ProviderId, SearchProvider};
use super::query_extractor::clean_query;
use super::rate_limiter::SearchRateLimiter;
use super::special_case::{SpecialCase, WeatherCase};
use super::types::AggregatedResult;
use super::weather::WeatherClient;

/// Main search service that orchestrates providers, special cases and enrichment
pub struct SearchService {
    providers: Vec<Box<dyn SearchProvider>>,
    special_cases: Vec<Box<dyn SpecialCase>>,
    rate_limiter: Arc<SearchRateLimiter>,
    fetcher: Arc<ContentFetcher>,
    config: SearchConfig,
}

impl SearchService {
    /// Create a new search service backed by headless Chromium
    pub fn new(config: SearchConfig) -> Self {
        let loader: Arc<dyn PageLoader> = Arc::new(ChromiumLoader::new(
            config.chrome_path.clone(),
            config.navigation_timeout(),
        ));
        Self::with_loader(config, loader)
    }

    /// Create a service whose providers and enrichment share `loader`
    pub fn with_loader(config: SearchConfig, loader: Arc<dyn PageLoader>) -> Self {
        let providers = ProviderId::all()
            .iter()
            .map(|id| build_provider(*id, &config, loader.clone()))
            .collect();
        Self::with_components(config, providers, loader)
    }

    /// Create a service from explicit providers
    ///
    /// Providers are looked up by [`SearchProvider::name`] when walking the
    /// configured engine order. `loader` is used for fast-path and
    /// enrichment fetches.
    pub fn with_components(
        config: SearchConfig,
        providers: Vec<Box<dyn SearchProvider>>,
        loader: Arc<dyn PageLoader>,
    ) -> Self {
        let rate_limiter = Arc::new(SearchRateLimiter::new(config.min_interval()));
        let fetcher = Arc::new(ContentFetcher::new(loader, config.navigation_timeout()));

        // Order is precedence: explicit URLs beat weather, both beat search
        let special_cases: Vec<Box<dyn SpecialCase>> = vec![
            Box::new(FastPath::new(
                rate_limiter.clone(),
                fetcher.clone(),
                config.fast_path_max_chars,
                config.fast_path_delay(),
            )),
            Box::new(WeatherCase::new(WeatherClient::new(
                config.weather_api_url.clone(),
            ))),
        ];

        debug!(
            "Search service ready: {} providers, order {:?}, quick search {}",
            providers.len(),
            config.search_engines,
            config.enable_quick_search
        );

        Self {
            providers,
            special_cases,
            rate_limiter,
            fetcher,
            config,
        }
    }

    /// Build LLM context for `prompt`
    ///
    /// Returns a special-case answer, the formatted search results, or the
    /// prompt itself when nothing could be retrieved. Errors and panics
    /// inside the pipeline resolve to the prompt as well.
    pub async fn execute(&self, prompt: &str) -> String {
        let start = Instant::now();

        match AssertUnwindSafe(self.compile(prompt)).catch_unwind().await {
            Ok(context) => {
                info!(
                    "Net search finished in {}ms ({} chars)",
                    start.elapsed().as_millis(),
                    context.chars().count()
                );
                context
            }
            Err(_) => {
                error!("Net search pipeline panicked, returning original query");
                prompt.to_string()
            }
        }
    }

    async fn compile(&self, prompt: &str) -> String {
        for case in &self.special_cases {
            if let Some(answer) = case.intercept(prompt).await {
                info!("Query handled by {} special case", case.name());
                return answer;
            }
        }

        let mut aggregate = self.aggregate(prompt).await;
        if aggregate.is_empty() {
            warn!("No search results from any provider, returning original query");
            return prompt.to_string();
        }

        if self.config.enable_quick_search {
            debug!("Quick search enabled, skipping content enrichment");
            for result in &mut aggregate.results {
                result.content = Some(String::new());
            }
        } else {
            self.enrich(&mut aggregate).await;
        }

        format_results(&aggregate)
    }

    /// Walk the configured engine order until enough results are collected
    ///
    /// Provider failures and unknown engine names are logged and skipped.
    pub async fn aggregate(&self, query: &str) -> AggregatedResult {
        let search_query = clean_query(query);
        let mut aggregate = AggregatedResult::new(query);

        for engine in &self.config.search_engines {
            let provider = match self.find_provider(engine) {
                Some(provider) => provider,
                None => {
                    warn!("Unknown search engine '{}', skipping", engine);
                    continue;
                }
            };

            self.rate_limiter.acquire().await;
            debug!("Trying search provider: {}", provider.name());

            match provider
                .search(&search_query, self.config.max_results_per_provider)
                .await
            {
                Ok(results) => {
                    info!("{} contributed {} results", provider.name(), results.len());
                    aggregate.results.extend(
                        results
                            .into_iter()
                            .take(self.config.max_results_per_provider),
                    );
                }
                Err(e) => {
                    warn!("Search provider {} failed: {}, trying next", provider.name(), e);
                }
            }

            if aggregate.len() >= self.config.early_stop_threshold {
                debug!(
                    "Collected {} results, not asking further providers",
                    aggregate.len()
                );
                break;
            }
        }

        aggregate
    }

    /// Attach page content to every result, fetching concurrently
    async fn enrich(&self, aggregate: &mut AggregatedResult) {
        let links: Vec<String> = aggregate.results.iter().map(|r| r.link.clone()).collect();
        debug!("Enriching {} results", links.len());

        let contents = self
            .fetcher
            .fetch_multiple(&links, self.config.content_max_chars)
            .await;

        for (result, page) in aggregate.results.iter_mut().zip(contents) {
            result.content = Some(page.text);
        }
    }

    fn find_provider(&self, engine: &str) -> Option<&dyn SearchProvider> {
        let id = ProviderId::from_str(engine).ok()?;
        self.providers
            .iter()
            .find(|p| p.name() == id.as_str())
            .map(|p| p.as_ref())
    }

    /// Names of the providers available to the engine order
    pub fn available_providers(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}
