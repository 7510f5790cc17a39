//! Application configuration management.
//!
//! Configuration is loaded from environment variables via the `envy` crate,
//! with an optional `.env` file picked up by `dotenvy`.

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `HOLIDAY_FEED_URL` (optional): base URL of the public-holiday feed;
///   the calendar year is appended as a path segment on each fetch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_holiday_feed_url")]
    pub holiday_feed_url: String,
}

fn default_port() -> u16 {
    3000
}

fn default_holiday_feed_url() -> String {
    "https://brasilapi.com.br/api/feriados/v1".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing, values cannot be
    /// parsed into the expected types, or the holiday feed URL is not a
    /// well-formed http(s) URL.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()?;

        let feed_url = Url::parse(&config.holiday_feed_url).map_err(|e| {
            envy::Error::Custom(format!("HOLIDAY_FEED_URL is not a valid URL: {e}"))
        })?;
        if !matches!(feed_url.scheme(), "http" | "https") {
            return Err(envy::Error::Custom(
                "HOLIDAY_FEED_URL must use http or https".to_string(),
            ));
        }

        Ok(config)
    }
}
