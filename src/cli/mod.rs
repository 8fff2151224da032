// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// LLM net-search CLI
#[derive(Parser, Debug)]
#[command(name = "llm-net-search")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Live web context for LLM prompts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build web context for a prompt and print it
    Execute(commands::ExecuteArgs),

    /// Show the configured search engine order
    Engines,

    /// Run a named plugin on a prompt
    Plugin(commands::PluginArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Execute(args) => commands::execute_prompt(args).await,
        Commands::Engines => commands::show_engines(),
        Commands::Plugin(args) => commands::run_plugin(args).await,
    }
}
