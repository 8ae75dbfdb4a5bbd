use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::WeatherError;
use crate::model::{ErrorBody, SearchHit, Weather, WeatherForecast};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The three WeatherAPI.com lookups the app performs.
///
/// Kept as a trait so the interactive loop and the suggestion worker can be
/// driven by a stub in tests.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Current conditions for a city query.
    async fn current(&self, query: &str) -> Result<Weather, WeatherError>;

    /// Daily forecast (including current conditions) for a city query.
    async fn forecast(&self, query: &str, days: u8) -> Result<WeatherForecast, WeatherError>;

    /// Place autocomplete for a partial city name.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WeatherError>;
}

/// Build the live provider from configuration.
pub fn source_from_config(config: &Config) -> anyhow::Result<WeatherApi> {
    let api_key = config.resolve_api_key()?;
    Ok(WeatherApi::new(api_key)?)
}

#[derive(Debug, Clone)]
pub struct WeatherApi {
    api_key: String,
    http: Client,
    base_url: String,
}

impl WeatherApi {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Same client against a different host, for tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { api_key, http, base_url })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, "querying WeatherAPI.com");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // WeatherAPI ships a JSON error payload next to 4xx statuses.
            if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
                return Err(WeatherError::Api {
                    code: parsed.error.code,
                    message: parsed.error.message,
                });
            }
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { endpoint, source })
    }
}

#[async_trait]
impl WeatherSource for WeatherApi {
    async fn current(&self, query: &str) -> Result<Weather, WeatherError> {
        self.get("current.json", &[("q", query), ("aqi", "no")]).await
    }

    async fn forecast(&self, query: &str, days: u8) -> Result<WeatherForecast, WeatherError> {
        let days = days.to_string();
        self.get(
            "forecast.json",
            &[("q", query), ("days", days.as_str()), ("aqi", "no"), ("alerts", "no")],
        )
        .await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WeatherError> {
        self.get("search.json", &[("q", query)]).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
