// Provider fallback, early stop, enrichment and degenerate outcomes

use super::common::*;
use llm_net_search::search::{SearchService, CONTENT_UNAVAILABLE};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_stops_once_threshold_reached() {
    let providers = boxed(vec![
        provider("bing", 2),
        provider("google", 2),
        unused_provider("duckduckgo"),
    ]);
    let service = SearchService::with_components(
        test_config(&["bing", "google", "duckduckgo"]),
        providers,
        FakePages::new(&[]),
    );

    let context = service.execute("rust async runtimes").await;

    assert!(context.contains("https://bing.example.com/1"));
    assert!(context.contains("https://google.example.com/1"));
    assert!(context.contains("[4]"));
    assert!(!context.contains("[5]"));
}

#[tokio::test]
async fn test_empty_first_engine_falls_back_to_second() {
    let providers = boxed(vec![
        provider("bing", 0),
        provider("google", 5),
        unused_provider("duckduckgo"),
    ]);
    let service = SearchService::with_components(
        test_config(&["bing", "google", "duckduckgo"]),
        providers,
        FakePages::new(&[]),
    );

    let context = service.execute("rust").await;

    assert!(context.contains("[1]\nlink: https://google.example.com/0"));
    assert!(context.contains("[5]\nlink: https://google.example.com/4"));
    assert!(!context.contains("bing.example.com"));
}

#[tokio::test]
async fn test_all_engines_empty_returns_original_query() {
    let providers = boxed(vec![
        provider("bing", 0),
        provider("google", 0),
        provider("duckduckgo", 0),
        provider("baidu", 0),
        provider("sogou", 0),
    ]);
    let service = SearchService::with_components(
        test_config(&["bing", "google", "duckduckgo", "baidu", "sogou"]),
        providers,
        FakePages::new(&[]),
    );

    assert_eq!(
        service.execute("a question nobody indexed").await,
        "a question nobody indexed"
    );
}

#[tokio::test]
async fn test_provider_failure_is_absorbed() {
    let providers = boxed(vec![failing_provider("bing"), provider("google", 3)]);
    let service = SearchService::with_components(
        test_config(&["bing", "google"]),
        providers,
        FakePages::new(&[]),
    );

    let context = service.execute("rust").await;

    assert!(context.contains("google title 0"));
    assert!(context.contains("[3]"));
}

#[tokio::test]
async fn test_every_provider_failing_returns_original_query() {
    let providers = boxed(vec![failing_provider("bing"), failing_provider("google")]);
    let service = SearchService::with_components(
        test_config(&["bing", "google"]),
        providers,
        FakePages::new(&[]),
    );

    assert_eq!(service.execute("rust").await, "rust");
}

#[tokio::test]
async fn test_unknown_engine_is_skipped() {
    let providers = boxed(vec![provider("sogou", 3)]);
    let service = SearchService::with_components(
        test_config(&["altavista", "sogou"]),
        providers,
        FakePages::new(&[]),
    );

    let context = service.execute("rust").await;
    assert!(context.contains("sogou.example.com"));
}

#[tokio::test]
async fn test_configured_order_is_respected() {
    let providers = boxed(vec![
        unused_provider("bing"),
        provider("baidu", 3),
    ]);
    let service = SearchService::with_components(
        test_config(&["baidu", "bing"]),
        providers,
        FakePages::new(&[]),
    );

    let context = service.execute("rust").await;
    assert!(context.contains("[1]\nlink: https://baidu.example.com/0"));
}

#[tokio::test]
async fn test_provider_calls_are_spaced_by_min_interval() {
    let calls: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));

    let mut mocks = Vec::new();
    for name in ["bing", "google", "duckduckgo"] {
        let calls = calls.clone();
        let mut mock = MockProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_search().times(1).returning(move |_, _| {
            calls.lock().unwrap().push(Instant::now());
            Ok(results(name, 1))
        });
        mocks.push(mock);
    }

    let mut config = test_config(&["bing", "google", "duckduckgo"]);
    config.min_interval_ms = 150;
    let service = SearchService::with_components(config, boxed(mocks), FakePages::new(&[]));

    let context = service.execute("rust").await;
    assert!(context.contains("[3]"));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    for pair in calls.windows(2) {
        let gap = pair[1].duration_since(pair[0]);
        assert!(gap >= Duration::from_millis(140), "calls only {:?} apart", gap);
    }
}

#[tokio::test]
async fn test_spacing_holds_after_idle_period() {
    let calls: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));

    let mut mocks = Vec::new();
    for name in ["bing", "google"] {
        let calls = calls.clone();
        let mut mock = MockProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_search().times(2).returning(move |_, _| {
            calls.lock().unwrap().push(Instant::now());
            Ok(results(name, 2))
        });
        mocks.push(mock);
    }

    let mut config = test_config(&["bing", "google"]);
    config.min_interval_ms = 300;
    let service = SearchService::with_components(config, boxed(mocks), FakePages::new(&[]));

    service.execute("first question").await;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let context = service.execute("second question").await;
    assert!(context.contains("https://google.example.com/1"));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 4);
    let gap = calls[3].duration_since(calls[2]);
    assert!(
        gap >= Duration::from_millis(290),
        "first calls after idle only {:?} apart",
        gap
    );
}

#[tokio::test]
async fn test_enrichment_attaches_truncated_content() {
    let long_text = "x".repeat(1500);
    let pages = FakePages::new(&[
        ("https://bing.example.com/0", "Short page body"),
        ("https://bing.example.com/1", long_text.as_str()),
    ]);

    let mut config = test_config(&["bing"]);
    config.enable_quick_search = false;
    let service =
        SearchService::with_components(config, boxed(vec![provider("bing", 3)]), pages.clone());

    let context = service.execute("rust").await;

    assert!(context.contains("content: Short page body"));
    assert!(context.contains(&format!("content: {}...", "x".repeat(1000))));
    assert!(!context.contains(&"x".repeat(1001)));
    assert!(context.contains(&format!("content: {}", CONTENT_UNAVAILABLE)));

    let mut requested = pages.requested_urls();
    requested.sort();
    assert_eq!(
        requested,
        vec![
            "https://bing.example.com/0",
            "https://bing.example.com/1",
            "https://bing.example.com/2",
        ]
    );
}

#[tokio::test]
async fn test_quick_search_skips_enrichment() {
    let pages = FakePages::new(&[("https://bing.example.com/0", "body")]);
    let service = SearchService::with_components(
        test_config(&["bing"]),
        boxed(vec![provider("bing", 3)]),
        pages.clone(),
    );

    let context = service.execute("rust").await;

    assert!(context.contains("snippet: bing snippet 0\ncontent: \n\n[2]"));
    assert_eq!(context.matches("\ncontent: ").count(), 3);
    assert!(!context.contains("content: body"));
    assert!(pages.requested_urls().is_empty());
}
