// Explicit URLs in the query bypass search and are fetched in order

use super::common::*;
use axum::http::StatusCode;
use llm_net_search::search::{SearchService, CONTENT_UNAVAILABLE};
use std::time::Duration;

#[tokio::test]
async fn test_single_url_bypasses_search() {
    let pages = FakePages::new(&[("https://example.com/article", "Article body text")]);
    let service = SearchService::with_components(
        test_config(&["bing", "google"]),
        boxed(vec![unused_provider("bing"), unused_provider("google")]),
        pages.clone(),
    );

    let context = service
        .execute("Summarize https://example.com/article please")
        .await;

    assert_eq!(
        context,
        "link: https://example.com/article\ncontent: Article body text"
    );
    assert_eq!(pages.requested_urls(), vec!["https://example.com/article"]);
}

#[tokio::test]
async fn test_multiple_urls_in_query_order() {
    let pages = FakePages::new(&[
        ("https://a.example.org/one", "first page"),
        ("https://b.example.org/two", "second page"),
    ]);
    let service = SearchService::with_components(
        test_config(&["bing"]),
        boxed(vec![unused_provider("bing")]),
        pages.clone(),
    );

    let context = service
        .execute("compare https://a.example.org/one and https://b.example.org/two")
        .await;

    assert_eq!(
        context,
        "link: https://a.example.org/one\ncontent: first page\n\n\
         link: https://b.example.org/two\ncontent: second page"
    );
    assert_eq!(
        pages.requested_urls(),
        vec!["https://a.example.org/one", "https://b.example.org/two"]
    );
}

#[tokio::test]
async fn test_failed_fetches_never_fall_back_to_search() {
    let service = SearchService::with_components(
        test_config(&["bing"]),
        boxed(vec![unused_provider("bing")]),
        FakePages::new(&[]),
    );

    let context = service
        .execute("what does https://gone.example.net/x say")
        .await;

    assert_eq!(
        context,
        format!("link: https://gone.example.net/x\ncontent: {}", CONTENT_UNAVAILABLE)
    );
}

#[tokio::test]
async fn test_fast_path_content_limit() {
    let pages = FakePages::with_text("https://example.com/long", "é".repeat(6000));
    let service = SearchService::with_components(
        test_config(&["bing"]),
        boxed(vec![unused_provider("bing")]),
        pages,
    );

    let context = service.execute("read https://example.com/long").await;

    let content = context
        .strip_prefix("link: https://example.com/long\ncontent: ")
        .unwrap();
    assert_eq!(content.chars().count(), 5000 + 3);
    assert!(content.ends_with("é..."));
}

#[tokio::test]
async fn test_urls_are_spaced_by_delay() {
    let pages = FakePages::new(&[
        ("https://example.com/1", "one"),
        ("https://example.com/2", "two"),
        ("https://example.com/3", "three"),
    ]);
    let mut config = test_config(&["bing"]);
    config.fast_path_delay_ms = 120;
    let service =
        SearchService::with_components(config, boxed(vec![unused_provider("bing")]), pages.clone());

    service
        .execute("https://example.com/1 https://example.com/2 https://example.com/3")
        .await;

    let times = pages.request_times();
    assert_eq!(times.len(), 3);
    for pair in times.windows(2) {
        let gap = pair[1].duration_since(pair[0]);
        assert!(gap >= Duration::from_millis(120), "fetches only {:?} apart", gap);
    }
}

#[tokio::test]
async fn test_url_fetches_wait_for_rate_limiter_without_delay() {
    let pages = FakePages::new(&[
        ("https://example.com/1", "one"),
        ("https://example.com/2", "two"),
        ("https://example.com/3", "three"),
    ]);
    let mut config = test_config(&["bing"]);
    config.fast_path_delay_ms = 0;
    config.min_interval_ms = 300;
    let service =
        SearchService::with_components(config, boxed(vec![unused_provider("bing")]), pages.clone());

    let context = service
        .execute("https://example.com/1 https://example.com/2 https://example.com/3")
        .await;
    assert!(context.contains("link: https://example.com/3\ncontent: three"));

    let times = pages.request_times();
    assert_eq!(times.len(), 3);
    for pair in times.windows(2) {
        let gap = pair[1].duration_since(pair[0]);
        assert!(gap >= Duration::from_millis(290), "fetches only {:?} apart", gap);
    }
}

#[tokio::test]
async fn test_url_takes_precedence_over_weather() {
    let (weather_url, codes) = spawn_weather_server(StatusCode::OK, BEIJING_FORECAST).await;
    let pages = FakePages::new(&[("https://news.example.com/beijing", "Beijing news")]);
    let mut config = test_config(&["bing"]);
    config.weather_api_url = weather_url;
    let service =
        SearchService::with_components(config, boxed(vec![unused_provider("bing")]), pages);

    let context = service
        .execute("Beijing weather today https://news.example.com/beijing")
        .await;

    assert_eq!(
        context,
        "link: https://news.example.com/beijing\ncontent: Beijing news"
    );
    assert!(codes.lock().unwrap().is_empty());
}
