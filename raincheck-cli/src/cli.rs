use chrono::{Local, Utc};
use clap::Parser;
use raincheck_core::{
    Config, IpApiLocator, Locator, WeatherProvider, WeatherResponse, error::Result,
    provider_from_config, resolve_search_term,
};
use std::io::{self, Write};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "raincheck", version, about = "Hour-by-hour chance of rain for today")]
pub struct Cli {
    /// City to look up, e.g. `raincheck New York`. Without it, your city is
    /// guessed from your IP address.
    pub city: Vec<String>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let locator = IpApiLocator::from_config(&config);
        let provider = provider_from_config(&config);

        let weather = self.fetch(&locator, provider.as_ref()).await?;
        let hours = weather.today().unwrap_or_default();

        let mut stdout = io::stdout().lock();
        render::render_title(&mut stdout, &weather, render::use_escapes())?;
        render::render_hours(&mut stdout, hours, Utc::now(), &Local)?;
        stdout.flush()?;

        Ok(())
    }

    /// Resolve what to search for and fetch its forecast.
    pub async fn fetch(
        self,
        locator: &dyn Locator,
        provider: &dyn WeatherProvider,
    ) -> Result<WeatherResponse> {
        let term = resolve_search_term(self.search_term(), locator).await?;
        provider.forecast(&term).await
    }

    /// Words of the city argument joined by single spaces, if any were given.
    pub fn search_term(&self) -> Option<String> {
        (!self.city.is_empty()).then(|| self.city.join(" "))
    }
}
