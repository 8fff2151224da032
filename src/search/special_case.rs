// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Special-case handlers evaluated before generic search
//!
//! The service walks an ordered list of handlers and returns the first
//! answer produced. A handler that does not apply, or that fails, yields
//! `None` and the next handler (or generic search) runs.

use async_trait::async_trait;
use tracing::{info, warn};

use super::weather::{self, WeatherClient};

/// A recognized intent answered without generic search
#[async_trait]
pub trait SpecialCase: Send + Sync {
    /// Handler name for logs
    fn name(&self) -> &'static str;

    /// Produce the final answer for `query`, or `None` to pass it on
    async fn intercept(&self, query: &str) -> Option<String>;
}

/// Answers weather questions about known cities from the forecast endpoint
pub struct WeatherCase {
    client: WeatherClient,
}

impl WeatherCase {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpecialCase for WeatherCase {
    fn name(&self) -> &'static str {
        "weather"
    }

    async fn intercept(&self, query: &str) -> Option<String> {
        let city_code = weather::detect(query)?;

        match self.client.forecast(city_code).await {
            Ok(narrative) => {
                info!("Answered weather query for city {}", city_code);
                Some(narrative)
            }
            Err(e) => {
                warn!("Weather lookup failed, falling back to search: {}", e);
                None
            }
        }
    }
}
