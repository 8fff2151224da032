//! HTML content extraction
//!
//! Fallback text extraction for pages whose rendered `innerText` came back
//! empty, plus the character-exact truncation applied to all fetched text.

use scraper::{Html, Selector};

/// Suffix appended to truncated content
pub const TRUNCATION_MARKER: &str = "...";

/// Extract main content from HTML
///
/// Tries multiple strategies in order:
/// 1. `<article>` tag
/// 2. `<main>` tag
/// 3. `[role="main"]` attribute
/// 4. Common content class names (.content, .post-content, .article-body, etc.)
/// 5. Fallback to `<body>`
///
/// Script, style and noscript text is never included.
pub fn extract_main_content(html: &str) -> String {
    let document = Html::parse_document(html);

    // Priority order of selectors to try
    let selectors = [
        "article",
        "main",
        "[role='main']",
        ".post-content",
        ".article-content",
        ".entry-content",
        ".article__body",
        "#article-body",
        "#content",
    ];

    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let cleaned = clean_text(&visible_text(&element));
                if cleaned.chars().count() > 200 {
                    return cleaned;
                }
            }
        }
    }

    extract_body_text(&document)
}

/// Truncate to exactly `limit` characters plus the marker
///
/// Counts characters, not bytes, so CJK text is never split mid-codepoint.
/// Text at or under the limit is returned unchanged.
pub fn truncate_content(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Text of an element, skipping non-rendered subtrees
fn visible_text(element: &scraper::ElementRef) -> String {
    let mut parts = Vec::new();
    for node in element.descendants() {
        if let Some(text) = node.value().as_text() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| matches!(el.name(), "script" | "style" | "noscript" | "template"))
                    .unwrap_or(false)
            });
            if !hidden {
                parts.push(&**text);
            }
        }
    }
    parts.join(" ")
}

fn extract_body_text(document: &Html) -> String {
    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            return clean_text(&visible_text(&body));
        }
    }
    String::new()
}

/// Clean text: normalize whitespace
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
