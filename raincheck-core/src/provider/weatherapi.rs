use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{
    error::{RaincheckError, Result},
    model::WeatherResponse,
};

use super::WeatherProvider;

/// Client for weatherapi.com's `forecast.json`.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, url: String) -> Self {
        Self { api_key, url, http: Client::new() }
    }

    async fn fetch_body(&self, query: &str) -> Result<String> {
        tracing::debug!(url = %self.url, query, "requesting forecast");

        let res = self
            .http
            .get(&self.url)
            .query(&[("key", self.api_key.as_str()), ("q", query), ("aqi", "no")])
            .send()
            .await
            .map_err(RaincheckError::WeatherApiUnavailable)?;

        let status = res.status();
        let body = res.text().await.map_err(RaincheckError::WeatherApiUnavailable)?;

        if status != StatusCode::OK {
            tracing::debug!(%status, body = %truncate_body(&body), "forecast request rejected");
            return Err(RaincheckError::NoResults);
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn forecast(&self, query: &str) -> Result<WeatherResponse> {
        let body = self.fetch_body(query).await?;
        decode_forecast(&body)
    }
}

/// Decode a `forecast.json` body. A payload without any forecast day counts as no result.
pub fn decode_forecast(body: &str) -> Result<WeatherResponse> {
    let parsed: WeatherResponse =
        serde_json::from_str(body).map_err(RaincheckError::MalformedResponse)?;

    if parsed.today().is_none() {
        return Err(RaincheckError::NoResults);
    }

    tracing::debug!(
        location = %parsed.location.name,
        hours = parsed.today().map_or(0, <[_]>::len),
        "decoded forecast"
    );

    Ok(parsed)
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
