// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Plugin dispatch
//!
//! Routes a named plugin invocation to its implementation. Only the
//! net-search plugin is provided.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::search::SearchService;

/// Name the net-search plugin is registered under
pub const NET_SEARCH: &str = "net-search";

/// Plugin output returned to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResult {
    pub result: String,
}

/// Names of all registered plugins
pub fn available_plugins() -> &'static [&'static str] {
    &[NET_SEARCH]
}

/// Run plugin `name` on `prompt`
///
/// An unknown name is not an error: the result says the plugin was not found.
pub async fn execute_plugin(service: &SearchService, name: &str, prompt: &str) -> PluginResult {
    if !available_plugins().iter().any(|plugin| *plugin == name) {
        warn!("Requested unknown plugin {}", name);
        return PluginResult {
            result: format!("Plugin {} not found", name),
        };
    }

    info!("Executing plugin {}", name);
    PluginResult {
        result: service.execute(prompt).await,
    }
}
