use crate::{Config, WeatherResponse, error::Result, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Source of hourly forecasts for a free-text location query.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn forecast(&self, query: &str) -> Result<WeatherResponse>;
}

/// Construct the forecast provider from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(WeatherApiProvider::new(config.api_key.clone(), config.forecast_url.clone()))
}
