// Weather questions about known cities short-circuit search

use super::common::*;
use axum::http::StatusCode;
use llm_net_search::search::SearchService;

fn service_with_weather(weather_url: String, providers: Vec<MockProvider>) -> SearchService {
    let mut config = test_config(&["bing"]);
    config.weather_api_url = weather_url;
    SearchService::with_components(config, boxed(providers), FakePages::new(&[]))
}

#[tokio::test]
async fn test_weather_query_returns_forecast() {
    let (weather_url, codes) = spawn_weather_server(StatusCode::OK, BEIJING_FORECAST).await;
    let service = service_with_weather(weather_url, vec![unused_provider("bing")]);

    let context = service.execute("Beijing weather today").await;

    assert!(context.contains("2025-10-13"));
    assert!(context.contains("高温 21℃"));
    assert!(context.contains("低温 9℃"));
    assert!(context.contains("AQI 31"));
    assert!(context.contains("sunrise 06:22"));
    assert!(!context.contains("bing snippet"));
    assert_eq!(*codes.lock().unwrap(), vec!["101010100".to_string()]);
}

#[tokio::test]
async fn test_chinese_weather_query() {
    let (weather_url, codes) = spawn_weather_server(StatusCode::OK, BEIJING_FORECAST).await;
    let service = service_with_weather(weather_url, vec![unused_provider("bing")]);

    let context = service.execute("深圳天气怎么样").await;

    assert!(context.contains("2025-10-14"));
    assert_eq!(*codes.lock().unwrap(), vec!["101280601".to_string()]);
}

#[tokio::test]
async fn test_weather_server_error_falls_back_to_search() {
    let (weather_url, codes) =
        spawn_weather_server(StatusCode::INTERNAL_SERVER_ERROR, "upstream down").await;
    let service = service_with_weather(weather_url, vec![provider("bing", 3)]);

    let context = service.execute("Beijing weather today").await;

    assert!(context.contains("[1]\nlink: https://bing.example.com/0"));
    assert!(context.contains("bing snippet 2"));
    assert_eq!(codes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_forecast_falls_back_to_search() {
    let (weather_url, _codes) = spawn_weather_server(StatusCode::OK, "<html>oops</html>").await;
    let service = service_with_weather(weather_url, vec![provider("bing", 3)]);

    let context = service.execute("上海天气").await;

    assert!(context.contains("bing title 0"));
}

#[tokio::test]
async fn test_city_without_marker_is_searched() {
    let (weather_url, codes) = spawn_weather_server(StatusCode::OK, BEIJING_FORECAST).await;
    let service = service_with_weather(weather_url, vec![provider("bing", 3)]);

    let context = service.execute("Beijing population").await;

    assert!(context.contains("bing title 0"));
    assert!(codes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_marker_without_known_city_is_searched() {
    let (weather_url, codes) = spawn_weather_server(StatusCode::OK, BEIJING_FORECAST).await;
    let service = service_with_weather(weather_url, vec![provider("bing", 3)]);

    let context = service.execute("weather on Mars").await;

    assert!(context.contains("bing title 0"));
    assert!(codes.lock().unwrap().is_empty());
}
