//! Working out what to search for when the user didn't say.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt::Debug;

use crate::{
    Config,
    error::{RaincheckError, Result},
    model::IpCity,
};

/// Best-effort lookup of the caller's city.
#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn city(&self) -> Result<String>;
}

/// ip-api.com lookup, asking only for the `city` field.
#[derive(Debug, Clone)]
pub struct IpApiLocator {
    url: String,
    http: Client,
}

impl IpApiLocator {
    pub fn new(url: String) -> Self {
        Self { url, http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.geolocation_url.clone())
    }
}

#[async_trait]
impl Locator for IpApiLocator {
    async fn city(&self) -> Result<String> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("fields", "city")])
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "ip lookup failed");
                RaincheckError::LocationNotFound
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|_| RaincheckError::LocationNotFound)?;

        if status != StatusCode::OK {
            tracing::debug!(%status, "ip lookup rejected");
            return Err(RaincheckError::LocationNotFound);
        }

        let parsed: IpCity =
            serde_json::from_str(&body).map_err(|_| RaincheckError::LocationNotFound)?;

        if parsed.city.trim().is_empty() {
            return Err(RaincheckError::LocationNotFound);
        }

        Ok(parsed.city)
    }
}

/// The explicit argument verbatim, otherwise whatever the locator finds.
pub async fn resolve_search_term(arg: Option<String>, locator: &dyn Locator) -> Result<String> {
    if let Some(term) = arg {
        return Ok(term);
    }

    let city = locator.city().await?;
    tracing::debug!(%city, "resolved search term from ip lookup");
    Ok(city)
}
