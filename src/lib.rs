// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod plugins;
pub mod search;
pub mod version;

pub use plugins::{execute_plugin, PluginResult};
pub use search::{SearchConfig, SearchService};
