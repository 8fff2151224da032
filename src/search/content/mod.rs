//! Content fetching module for search result enrichment
//!
//! Fetches actual page content from result links so the LLM gets real
//! information instead of just snippets.
//!
//! ## Architecture
//!
//! ```text
//! Result links → ContentFetcher → PageLoader (browser) → innerText
//!                                                      ↘ html → extract_main_content
//!                          ↓
//!                 truncate_content(limit) / "content unavailable"
//! ```

pub mod extractor;
pub mod fetcher;

pub use extractor::{extract_main_content, truncate_content, TRUNCATION_MARKER};
pub use fetcher::{ContentFetcher, PageContent, CONTENT_UNAVAILABLE};
