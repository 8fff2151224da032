// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Weather special case
//!
//! Recognizes weather questions about known cities and answers them from a
//! forecast endpoint instead of scraping search engines. Detection only
//! succeeds when the query carries a weather marker and names a city from
//! [`CITY_DICTIONARY`].

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::query_extractor::contains_weather_marker;
use super::types::SearchError;

/// City name to forecast-endpoint city code, checked in this order
///
/// Chinese names come first so a mixed-language query resolves by its
/// Chinese name.
pub const CITY_DICTIONARY: &[(&str, &str)] = &[
    ("北京", "101010100"),
    ("上海", "101020100"),
    ("天津", "101030100"),
    ("重庆", "101040100"),
    ("哈尔滨", "101050101"),
    ("长春", "101060101"),
    ("沈阳", "101070101"),
    ("呼和浩特", "101080101"),
    ("石家庄", "101090101"),
    ("太原", "101100101"),
    ("西安", "101110101"),
    ("济南", "101120101"),
    ("青岛", "101120201"),
    ("乌鲁木齐", "101130101"),
    ("拉萨", "101140101"),
    ("西宁", "101150101"),
    ("兰州", "101160101"),
    ("银川", "101170101"),
    ("郑州", "101180101"),
    ("南京", "101190101"),
    ("苏州", "101190401"),
    ("武汉", "101200101"),
    ("杭州", "101210101"),
    ("合肥", "101220101"),
    ("福州", "101230101"),
    ("厦门", "101230201"),
    ("南昌", "101240101"),
    ("长沙", "101250101"),
    ("贵阳", "101260101"),
    ("成都", "101270101"),
    ("广州", "101280101"),
    ("深圳", "101280601"),
    ("昆明", "101290101"),
    ("南宁", "101300101"),
    ("海口", "101310101"),
    ("香港", "101320101"),
    ("澳门", "101330101"),
    ("台北", "101340101"),
    ("Beijing", "101010100"),
    ("Shanghai", "101020100"),
    ("Tianjin", "101030100"),
    ("Chongqing", "101040100"),
    ("Harbin", "101050101"),
    ("Shenyang", "101070101"),
    ("Xi'an", "101110101"),
    ("Jinan", "101120101"),
    ("Qingdao", "101120201"),
    ("Zhengzhou", "101180101"),
    ("Nanjing", "101190101"),
    ("Suzhou", "101190401"),
    ("Wuhan", "101200101"),
    ("Hangzhou", "101210101"),
    ("Hefei", "101220101"),
    ("Xiamen", "101230201"),
    ("Changsha", "101250101"),
    ("Chengdu", "101270101"),
    ("Guangzhou", "101280101"),
    ("Shenzhen", "101280601"),
    ("Kunming", "101290101"),
    ("Hong Kong", "101320101"),
    ("Macau", "101330101"),
    ("Taipei", "101340101"),
];

/// Detect a weather question and return the city code it refers to
///
/// Latin city names match case-insensitively. The first dictionary entry
/// found in the query wins.
pub fn detect(query: &str) -> Option<&'static str> {
    if !contains_weather_marker(query) {
        return None;
    }

    let lower = query.to_lowercase();
    CITY_DICTIONARY
        .iter()
        .find(|(city, _)| lower.contains(&city.to_lowercase()))
        .map(|(city, code)| {
            debug!("Weather query for {} ({})", city, code);
            *code
        })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastResponse {
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    city_info: Option<CityInfo>,
    data: Option<ForecastData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CityInfo {
    #[serde(default)]
    city: String,
    #[serde(default)]
    update_time: String,
}

#[derive(Debug, Deserialize)]
struct ForecastData {
    #[serde(default)]
    wendu: String,
    #[serde(default)]
    shidu: String,
    #[serde(default)]
    quality: String,
    #[serde(default)]
    forecast: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    #[serde(default)]
    ymd: String,
    #[serde(default)]
    week: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    high: String,
    #[serde(default)]
    low: String,
    #[serde(default)]
    sunrise: String,
    #[serde(default)]
    sunset: String,
    #[serde(default)]
    aqi: Option<serde_json::Value>,
    #[serde(default)]
    fx: String,
    #[serde(default)]
    fl: String,
    #[serde(default)]
    notice: String,
}

/// Client for the city forecast endpoint
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a new weather client
    ///
    /// # Arguments
    /// * `base_url` - Endpoint root; the city code is appended as a path segment
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the forecast for `city_code` and render it as text
    pub async fn forecast(&self, city_code: &str) -> Result<String, SearchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), city_code);
        debug!("Requesting forecast: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::Weather(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SearchError::Weather(format!(
                "forecast endpoint returned {}",
                response.status()
            )));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Weather(format!("malformed forecast: {}", e)))?;

        let narrative = render_forecast(body)?;
        info!("Forecast for {} rendered ({} chars)", city_code, narrative.chars().count());
        Ok(narrative)
    }
}

fn render_forecast(body: ForecastResponse) -> Result<String, SearchError> {
    if let Some(status) = body.status.filter(|s| *s != 200) {
        return Err(SearchError::Weather(format!(
            "forecast status {}: {}",
            status,
            body.message.unwrap_or_default()
        )));
    }

    let data = body
        .data
        .ok_or_else(|| SearchError::Weather("forecast has no data".to_string()))?;
    if data.forecast.is_empty() {
        return Err(SearchError::Weather("forecast has no days".to_string()));
    }

    let mut text = String::new();
    if let Some(info) = body.city_info {
        text.push_str(&format!("{} weather (updated {}). ", info.city, info.update_time));
    }
    text.push_str(&format!(
        "Now: {}℃, humidity {}, air quality {}.\n",
        data.wendu, data.shidu, data.quality
    ));

    for day in data.forecast {
        let aqi = match day.aqi {
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::String(s)) => s,
            _ => "n/a".to_string(),
        };
        text.push_str(&format!(
            "{} {}: {}, {}, {}, sunrise {}, sunset {}, AQI {}, wind {} {}. {}\n",
            day.ymd,
            day.week,
            day.kind,
            day.high,
            day.low,
            day.sunrise,
            day.sunset,
            aqi,
            day.fx,
            day.fl,
            day.notice
        ));
    }

    Ok(text.trim_end().to_string())
}
