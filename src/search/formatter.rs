// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rendering of aggregated search results into LLM context

use super::types::AggregatedResult;

/// Instructions placed ahead of the result blocks
pub const INSTRUCTIONS: &str = "Answer the user's question as precisely and specifically as possible \
using the web search results below. Cite every statement taken from a result inline as \
[[n](link)], where n is the result number. List all cited sources at the end of the answer. \
Reply in the same language the user asked the question in. Search results:";

/// Format aggregated results for injection into a prompt
///
/// Results are numbered from 1 in aggregate order. Results that were not
/// enriched keep an empty `content` line.
pub fn format_results(aggregate: &AggregatedResult) -> String {
    let blocks: Vec<String> = aggregate
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            format!(
                "[{}]\nlink: {}\ntitle: {}\nsnippet: {}\ncontent: {}",
                i + 1,
                result.link,
                result.title,
                result.snippet,
                result.content.as_deref().unwrap_or("")
            )
        })
        .collect();

    format!("{}\n\n{}", INSTRUCTIONS, blocks.join("\n\n"))
}
