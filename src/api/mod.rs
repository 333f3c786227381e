//! Clients for the public APIs shown by the pages
//!
//! Every page fetches through one shared `ApiClient`. Each submodule holds the
//! typed response of one API plus the method that fetches it; the methods are
//! the producers handed to the request cache.

pub mod cocktails;
pub mod countries;
pub mod covid;
pub mod geonames;
pub mod giphy;
pub mod joke;
pub mod nasa;
pub mod weather;
pub mod worldbank;

pub use cocktails::{Cocktail, CocktailResults};
pub use countries::Country;
pub use covid::CovidStats;
pub use geonames::{CityList, CountryInfoList};
pub use giphy::GifPage;
pub use joke::{Joke, JokeCategory};
pub use nasa::{Apod, PlanetList};
pub use weather::WeatherReport;
pub use worldbank::WorldBankData;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Errors that can occur when calling an API
///
/// `Clone` so that failures can be stored in cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status code
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The body was not the expected JSON
    #[error("Failed to parse {endpoint} response: {message}")]
    ParseError {
        endpoint: &'static str,
        message: String,
    },

    /// The API answered but reported an error in the body
    #[error("{endpoint} rejected the request: {message}")]
    Rejected {
        endpoint: &'static str,
        message: String,
    },

    /// A required credential is not configured
    #[error("Missing API key for {0}")]
    MissingApiKey(&'static str),

    /// The request parameters were rejected before sending
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // URLs carry API keys in their query strings
        ApiError::RequestFailed(err.without_url().to_string())
    }
}

/// A successful response from any page's API
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Weather(WeatherReport),
    Cocktails(CocktailResults),
    WorldBank(WorldBankData),
    CountryInfo(CountryInfoList),
    Cities(CityList),
    Countries(Vec<Country>),
    Joke(Joke),
    Gifs(GifPage),
    Covid(CovidStats),
    Apod(Apod),
    Planets(PlanetList),
}

/// HTTP client shared by every page
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    config: Config,
}

impl ApiClient {
    /// Creates a client using the timeout and credentials from `config`
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;
        Ok(Self::with_client(http_client, config))
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends `request` and parses a JSON body, treating non-2xx as failure
    async fn get_json<R: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<R, ApiError> {
        let text = self.get_text(endpoint, request).await?;
        parse_json(endpoint, &text)
    }

    async fn get_text(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<String, ApiError> {
        debug!(endpoint, "sending request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Parses a JSON body, naming the endpoint in the error
pub(crate) fn parse_json<R: DeserializeOwned>(
    endpoint: &'static str,
    text: &str,
) -> Result<R, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::ParseError {
        endpoint,
        message: e.to_string(),
    })
}

/// Trims a required text input, rejecting empty values
pub(crate) fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::InvalidInput(format!("{} is required", field)));
    }
    Ok(value)
}

/// Appends percent-encoded path segments to `base`
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base).map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidInput(format!("{} cannot take a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
