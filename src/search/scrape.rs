// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Selector-driven extraction of result candidates from engine pages

use scraper::{ElementRef, Html, Selector};

use super::types::{SearchError, SearchResult};

/// CSS selectors describing one engine's result markup
///
/// Each list is tried in order and the first selector that yields
/// something wins, so newer markup goes first and older layouts follow.
#[derive(Debug, Clone, Copy)]
pub struct ResultSelectors {
    pub items: &'static [&'static str],
    pub link: &'static [&'static str],
    pub title: &'static [&'static str],
    pub snippet: &'static [&'static str],
}

/// A candidate before engine-specific link cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub href: String,
    pub title: String,
    pub snippet: String,
}

/// Extract raw candidates from a results page
///
/// `offset` skips that many leading result nodes before `max_results`
/// are taken.
pub fn extract_candidates(
    provider: &str,
    html: &str,
    selectors: &ResultSelectors,
    offset: usize,
    max_results: usize,
) -> Result<Vec<RawCandidate>, SearchError> {
    let document = Html::parse_document(html);

    let mut items = Vec::new();
    for item_selector in selectors.items {
        let selector = parse_selector(provider, item_selector)?;
        items = document.select(&selector).collect::<Vec<_>>();
        if !items.is_empty() {
            break;
        }
    }

    let mut candidates = Vec::new();
    for item in items.into_iter().skip(offset).take(max_results) {
        let href = first_attr(provider, &item, selectors.link, "href")?.unwrap_or_default();
        let title = first_text(provider, &item, selectors.title)?.unwrap_or_default();
        let snippet = first_text(provider, &item, selectors.snippet)?.unwrap_or_default();

        candidates.push(RawCandidate {
            href,
            title,
            snippet,
        });
    }

    Ok(candidates)
}

/// Count result nodes on the page (used for randomized offsets)
pub fn count_items(provider: &str, html: &str, selectors: &ResultSelectors) -> Result<usize, SearchError> {
    let document = Html::parse_document(html);
    for item_selector in selectors.items {
        let selector = parse_selector(provider, item_selector)?;
        let count = document.select(&selector).count();
        if count > 0 {
            return Ok(count);
        }
    }
    Ok(0)
}

/// Turn cleaned candidates into results, dropping anything without a usable link
pub fn into_results(
    provider: &str,
    candidates: Vec<RawCandidate>,
    resolve_link: impl Fn(&str) -> Option<String>,
) -> Vec<SearchResult> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let link = resolve_link(candidate.href.trim())?;
            if !link.starts_with("http://") && !link.starts_with("https://") {
                return None;
            }
            let title = if candidate.title.is_empty() {
                link.clone()
            } else {
                candidate.title
            };
            Some(SearchResult::new(link, title, candidate.snippet, provider))
        })
        .collect()
}

/// Collapse runs of whitespace into single spaces
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_selector(provider: &str, selector: &str) -> Result<Selector, SearchError> {
    Selector::parse(selector).map_err(|e| SearchError::Parse {
        provider: provider.to_string(),
        reason: format!("invalid selector '{}': {:?}", selector, e),
    })
}

fn first_attr(
    provider: &str,
    item: &ElementRef,
    selectors: &[&str],
    attr: &str,
) -> Result<Option<String>, SearchError> {
    for selector in selectors {
        let selector = parse_selector(provider, selector)?;
        if let Some(value) = item
            .select(&selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::trim)
            .find(|value| !value.is_empty())
        {
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

fn first_text(
    provider: &str,
    item: &ElementRef,
    selectors: &[&str],
) -> Result<Option<String>, SearchError> {
    for selector in selectors {
        let selector = parse_selector(provider, selector)?;
        if let Some(text) = item
            .select(&selector)
            .map(|el| clean_text(&el.text().collect::<String>()))
            .find(|text| !text.is_empty())
        {
            return Ok(Some(text));
        }
    }
    Ok(None)
}
