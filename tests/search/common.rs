// Shared fixtures for net-search integration tests

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use llm_net_search::search::{
    FetchError, LoadedPage, PageLoader, SearchConfig, SearchError, SearchProvider, SearchResult,
};
use mockall::mock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

mock! {
    pub Provider {}

    #[async_trait]
    impl SearchProvider for Provider {
        async fn search(
            &self,
            query: &str,
            num_results: usize,
        ) -> Result<Vec<SearchResult>, SearchError>;
        fn name(&self) -> &'static str;
    }
}

pub const NO_WEATHER_API: &str = "http://127.0.0.1:9/api/weather/city";

/// Config with short spacing so tests run fast
pub fn test_config(engines: &[&str]) -> SearchConfig {
    SearchConfig {
        search_engines: engines.iter().map(|e| e.to_string()).collect(),
        enable_quick_search: true,
        min_interval_ms: 10,
        fast_path_delay_ms: 0,
        weather_api_url: NO_WEATHER_API.to_string(),
        ..SearchConfig::default()
    }
}

pub fn results(source: &str, n: usize) -> Vec<SearchResult> {
    (0..n)
        .map(|i| {
            SearchResult::new(
                format!("https://{}.example.com/{}", source, i),
                format!("{} title {}", source, i),
                format!("{} snippet {}", source, i),
                source,
            )
        })
        .collect()
}

/// Provider expected to be asked exactly once
pub fn provider(name: &'static str, n: usize) -> MockProvider {
    let mut mock = MockProvider::new();
    mock.expect_name().return_const(name);
    mock.expect_search()
        .times(1)
        .returning(move |_, _| Ok(results(name, n)));
    mock
}

/// Provider that fails once when asked
pub fn failing_provider(name: &'static str) -> MockProvider {
    let mut mock = MockProvider::new();
    mock.expect_name().return_const(name);
    mock.expect_search().times(1).returning(move |_, _| {
        Err(SearchError::Parse {
            provider: name.to_string(),
            reason: "results container missing".to_string(),
        })
    });
    mock
}

/// Provider that must never be asked
pub fn unused_provider(name: &'static str) -> MockProvider {
    let mut mock = MockProvider::new();
    mock.expect_name().return_const(name);
    mock.expect_search().times(0);
    mock
}

pub fn boxed(providers: Vec<MockProvider>) -> Vec<Box<dyn SearchProvider>> {
    providers
        .into_iter()
        .map(|p| Box::new(p) as Box<dyn SearchProvider>)
        .collect()
}

/// Page loader serving fixed text per URL and recording each request
#[derive(Default)]
pub struct FakePages {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<(String, Instant)>>,
}

impl FakePages {
    pub fn new(pages: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages
                .iter()
                .map(|(url, text)| (url.to_string(), text.to_string()))
                .collect(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn with_text(url: &str, text: String) -> Arc<Self> {
        let mut pages = HashMap::new();
        pages.insert(url.to_string(), text);
        Arc::new(Self {
            pages,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn request_times(&self) -> Vec<Instant> {
        self.requests.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl PageLoader for FakePages {
    async fn load(&self, url: &str, _wait_for: &str) -> Result<LoadedPage, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        match self.pages.get(url) {
            Some(text) => Ok(LoadedPage {
                url: url.to_string(),
                html: String::new(),
                text: text.clone(),
            }),
            None => Err(FetchError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_REFUSED".to_string(),
            }),
        }
    }
}

#[derive(Clone)]
struct WeatherState {
    status: StatusCode,
    body: String,
    codes: Arc<Mutex<Vec<String>>>,
}

async fn forecast(
    State(state): State<WeatherState>,
    Path(code): Path<String>,
) -> (StatusCode, String) {
    state.codes.lock().unwrap().push(code);
    (state.status, state.body.clone())
}

/// Forecast endpoint on an ephemeral port
///
/// Returns the base URL to configure and the list of requested city codes.
pub async fn spawn_weather_server(
    status: StatusCode,
    body: impl Into<String>,
) -> (String, Arc<Mutex<Vec<String>>>) {
    let codes = Arc::new(Mutex::new(Vec::new()));
    let state = WeatherState {
        status,
        body: body.into(),
        codes: codes.clone(),
    };

    let app = Router::new()
        .route("/api/weather/city/:code", get(forecast))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/weather/city", addr), codes)
}

pub const BEIJING_FORECAST: &str = r#"{
    "message": "success",
    "status": 200,
    "date": "20251013",
    "cityInfo": {"city": "北京市", "citykey": "101010100", "parent": "北京", "updateTime": "07:16"},
    "data": {
        "shidu": "45%", "pm25": 12.0, "pm10": 30.0, "quality": "优", "wendu": "14",
        "forecast": [
            {"date": "13", "high": "高温 21℃", "low": "低温 9℃", "ymd": "2025-10-13", "week": "星期一",
             "sunrise": "06:22", "sunset": "17:36", "aqi": 31, "fx": "北风", "fl": "3级",
             "type": "晴", "notice": "愿你拥有比阳光明媚的心情"},
            {"date": "14", "high": "高温 19℃", "low": "低温 8℃", "ymd": "2025-10-14", "week": "星期二",
             "sunrise": "06:23", "sunset": "17:34", "aqi": 48, "fx": "西北风", "fl": "2级",
             "type": "多云", "notice": "阴晴之间，谨防紫外线侵扰"}
        ]
    }
}"#;
