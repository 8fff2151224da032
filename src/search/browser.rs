// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Disposable headless browser sessions
//!
//! Every call launches its own Chromium instance, loads one page and tears
//! everything down again, whatever the outcome. Search engines and content
//! pages render client-side often enough that a plain HTTP GET is not
//! sufficient.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::debug;

const USER_AGENT_ARG: &str = "--user-agent=Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
const SELECTOR_POLL_MS: u64 = 250;
const MAX_SELECTOR_WAIT_SECS: u64 = 15;
const BODY_TEXT_SCRIPT: &str = "document.body ? document.body.innerText : ''";

/// A fully loaded page
#[derive(Debug, Clone, Default)]
pub struct LoadedPage {
    pub url: String,
    /// Serialized DOM after scripts ran
    pub html: String,
    /// `innerText` of the body (visible text only)
    pub text: String,
}

/// Browser/page load error types
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Browser could not be configured or started
    Launch(String),
    /// Navigation or CDP command failed
    Navigation { url: String, message: String },
    /// Navigation did not finish in time
    Timeout { url: String, timeout_secs: u64 },
    /// Expected element never appeared
    Selector { url: String, selector: String },
    /// Page had no usable text
    NoContent(String),
    /// URL is unsafe (localhost, private IP, non-http scheme)
    UnsafeUrl(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Launch(msg) => write!(f, "Browser launch failed: {}", msg),
            Self::Navigation { url, message } => {
                write!(f, "Navigation to {} failed: {}", url, message)
            }
            Self::Timeout { url, timeout_secs } => {
                write!(f, "Timeout after {}s loading: {}", timeout_secs, url)
            }
            Self::Selector { url, selector } => {
                write!(f, "Selector '{}' not found on: {}", selector, url)
            }
            Self::NoContent(url) => write!(f, "No content extracted from: {}", url),
            Self::UnsafeUrl(url) => write!(f, "Unsafe URL blocked: {}", url),
        }
    }
}

impl std::error::Error for FetchError {}

/// Loads a page and waits until `wait_for` matches an element
///
/// Implementations must release every resource they acquire before
/// returning, on success and on failure.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, url: &str, wait_for: &str) -> Result<LoadedPage, FetchError>;
}

/// Chromium-backed page loader (one browser per call)
#[derive(Debug, Clone)]
pub struct ChromiumLoader {
    chrome_path: Option<PathBuf>,
    navigation_timeout: Duration,
}

impl ChromiumLoader {
    /// Create a new loader
    ///
    /// # Arguments
    /// * `chrome_path` - Explicit browser executable, auto-detected when None
    /// * `navigation_timeout` - Upper bound for one complete page load
    pub fn new(chrome_path: Option<PathBuf>, navigation_timeout: Duration) -> Self {
        Self {
            chrome_path,
            navigation_timeout,
        }
    }

    pub fn navigation_timeout(&self) -> Duration {
        self.navigation_timeout
    }

    fn browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig, FetchError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .args([
                "--disable-setuid-sandbox",
                "--disable-dev-shm-usage",
                "--disable-blink-features=AutomationControlled",
                "--no-first-run",
                USER_AGENT_ARG,
            ])
            .window_size(1366, 768)
            .request_timeout(self.navigation_timeout)
            // Concurrent sessions must not share a profile lock
            .user_data_dir(profile_dir);

        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(FetchError::Launch)
    }

    async fn visit(&self, browser: &Browser, url: &str, wait_for: &str) -> Result<LoadedPage, FetchError> {
        let navigation_error = |e: chromiumoxide::error::CdpError| FetchError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        let page = browser.new_page("about:blank").await.map_err(navigation_error)?;
        page.goto(url).await.map_err(navigation_error)?;

        let loaded = async {
            self.wait_for_selector(&page, url, wait_for).await?;

            let html = page.content().await.map_err(navigation_error)?;
            let text = match page.evaluate(BODY_TEXT_SCRIPT).await {
                Ok(result) => result.into_value::<String>().unwrap_or_default(),
                Err(e) => {
                    debug!("innerText evaluation failed on {}: {}", url, e);
                    String::new()
                }
            };

            Ok(LoadedPage {
                url: url.to_string(),
                html,
                text,
            })
        }
        .await;

        if let Err(e) = page.close().await {
            debug!("Page close error (ignored): {}", e);
        }

        loaded
    }

    async fn wait_for_selector(&self, page: &Page, url: &str, selector: &str) -> Result<(), FetchError> {
        let max_wait = self
            .navigation_timeout
            .min(Duration::from_secs(MAX_SELECTOR_WAIT_SECS));

        let found = timeout(max_wait, async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
            }
        })
        .await;

        found.map_err(|_| FetchError::Selector {
            url: url.to_string(),
            selector: selector.to_string(),
        })
    }
}

#[async_trait]
impl PageLoader for ChromiumLoader {
    async fn load(&self, url: &str, wait_for: &str) -> Result<LoadedPage, FetchError> {
        let profile_dir =
            std::env::temp_dir().join(format!("llm-net-search-{:016x}", rand::random::<u64>()));
        let config = self.browser_config(&profile_dir)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    // Newer Chrome builds emit CDP messages chromiumoxide cannot decode
                    debug!("CDP message processing error (continuing): {}", e);
                }
            }
        });

        debug!("Loading {} (waiting for '{}')", url, wait_for);
        let outcome = match timeout(self.navigation_timeout, self.visit(&browser, url, wait_for)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_secs: self.navigation_timeout.as_secs(),
            }),
        };

        if let Err(e) = browser.close().await {
            debug!("Browser close error (ignored): {}", e);
        }
        let _ = browser.wait().await;
        handler_task.abort();

        if let Err(e) = tokio::fs::remove_dir_all(&profile_dir).await {
            debug!("Profile cleanup failed for {}: {}", profile_dir.display(), e);
        }

        outcome
    }
}
