use thiserror::Error;

/// Failures surfaced to the user. The `Display` text is what gets printed.
#[derive(Debug, Error)]
pub enum RaincheckError {
    #[error("Weather API not available")]
    WeatherApiUnavailable(#[source] reqwest::Error),

    #[error("No results found")]
    NoResults,

    #[error("No results found, try searching for a city instead, e.g $ raincheck <city>")]
    LocationNotFound,

    #[error("Unexpected response from Weather API")]
    MalformedResponse(#[source] serde_json::Error),

    #[error(
        "No API key found.\n\
         Hint: set API_KEY in the environment or in a .env file."
    )]
    MissingApiKey,

    #[error("Failed to load .env file")]
    EnvFile(#[source] dotenv::Error),
}

pub type Result<T> = std::result::Result<T, RaincheckError>;
