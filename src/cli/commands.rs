// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use std::str::FromStr;
use tracing::info;

use crate::plugins::execute_plugin;
use crate::search::{ProviderId, SearchConfig, SearchService};

/// Arguments for the execute command
#[derive(Args, Debug)]
pub struct ExecuteArgs {
    /// The user prompt
    pub prompt: String,

    /// Skip content enrichment (overrides ENABLE_QUICK_SEARCH)
    #[arg(long)]
    pub quick: bool,

    /// Comma-separated engine order (overrides SEARCH_ENGINES)
    #[arg(long, value_delimiter = ',')]
    pub engines: Vec<String>,
}

/// Arguments for the plugin command
#[derive(Args, Debug)]
pub struct PluginArgs {
    /// Plugin name, e.g. net-search
    pub name: String,

    /// The user prompt
    pub prompt: String,
}

fn load_config() -> Result<SearchConfig> {
    let config = SearchConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid search configuration: {}", e))?;
    Ok(config)
}

/// Run the net-search pipeline and print the context
pub async fn execute_prompt(args: ExecuteArgs) -> Result<()> {
    let mut config = load_config()?;
    if args.quick {
        config.enable_quick_search = true;
    }
    if !args.engines.is_empty() {
        config.search_engines = args.engines;
    }

    info!("Engine order: {}", config.search_engines.join(","));
    let service = SearchService::new(config);
    let context = service.execute(&args.prompt).await;
    println!("{}", context);
    Ok(())
}

/// Print the configured engine order, flagging unknown names
pub fn show_engines() -> Result<()> {
    let config = load_config()?;
    for (i, engine) in config.search_engines.iter().enumerate() {
        match ProviderId::from_str(engine) {
            Ok(id) => println!(
                "{}. {} ({})",
                i + 1,
                id,
                config.providers.base_url(id)
            ),
            Err(_) => println!("{}. {} (unknown, skipped)", i + 1, engine),
        }
    }
    Ok(())
}

/// Dispatch a plugin by name
pub async fn run_plugin(args: PluginArgs) -> Result<()> {
    let service = SearchService::new(load_config()?);
    let output = execute_plugin(&service, &args.name, &args.prompt).await;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
