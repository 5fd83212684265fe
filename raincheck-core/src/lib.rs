//! Core library for the `raincheck` CLI.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - The weatherapi.com forecast client and its record types
//! - Location fallback through IP geolocation
//!
//! Rendering lives in `raincheck-cli`.

pub mod config;
pub mod error;
pub mod locate;
pub mod model;
pub mod provider;

#[cfg(test)]
mod testutil;

pub use config::{Config, Settings};
pub use error::RaincheckError;
pub use locate::{IpApiLocator, Locator, resolve_search_term};
pub use model::{Condition, Current, Hour, IpCity, Location, WeatherResponse};
pub use provider::{WeatherProvider, provider_from_config};
