// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the LLM net-search service

/// Full version string with feature description
pub const VERSION: &str = "v1.2.0-multi-engine-2025-10-13";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.2.0";

/// Build date
pub const BUILD_DATE: &str = "2025-10-13";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "bing",
    "google",
    "duckduckgo",
    "baidu",
    "sogou",
    "engine-fallback",
    "rate-limiting",
    "content-enrichment",
    "url-fast-path",
    "weather",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("LLM Net Search {} ({})", VERSION_NUMBER, BUILD_DATE)
}
