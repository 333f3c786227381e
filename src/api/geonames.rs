//! GeoNames country details and largest cities
//!
//! GeoNames reports account and quota problems inside a 200 response as
//! `{"status": {"message": ..., "value": ...}}`, so both endpoints check for
//! that before trusting the body.

use serde::{Deserialize, Deserializer, Serialize};

use super::{parse_json, required, ApiClient, ApiError};

const GEONAMES_COUNTRY_INFO_URL: &str = "https://secure.geonames.org/countryInfoJSON";
const GEONAMES_SEARCH_URL: &str = "https://secure.geonames.org/searchJSON";

/// Number of cities requested for a country
const MAX_CITIES: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryInfoList {
    #[serde(default)]
    pub geonames: Vec<CountryInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryInfo {
    pub country_name: String,
    #[serde(default)]
    pub capital: String,
    pub continent_name: String,
    /// Sent as a string by the API
    #[serde(deserialize_with = "number_or_string")]
    pub population: u64,
    #[serde(default)]
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityList {
    #[serde(default)]
    pub geonames: Vec<City>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub geoname_id: u64,
    pub name: String,
    /// First-level administrative division (state, province)
    #[serde(default)]
    pub admin_name1: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub population: u64,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: Option<GeoNamesStatus>,
}

#[derive(Debug, Deserialize)]
struct GeoNamesStatus {
    message: String,
}

/// Accepts `123` as well as `"123"`
fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) if s.trim().is_empty() => Ok(0),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Parses a GeoNames body, surfacing an embedded status error
pub(crate) fn parse_response<R>(endpoint: &'static str, text: &str) -> Result<R, ApiError>
where
    R: serde::de::DeserializeOwned,
{
    let status: StatusBody = parse_json(endpoint, text)?;
    if let Some(status) = status.status {
        return Err(ApiError::Rejected {
            endpoint,
            message: status.message,
        });
    }
    parse_json(endpoint, text)
}

impl ApiClient {
    /// Fetch capital, continent, population and currency for a country code
    pub async fn fetch_country_info(&self, country: &str) -> Result<CountryInfoList, ApiError> {
        let country = required("country code", country)?;
        let request = self.http_client.get(GEONAMES_COUNTRY_INFO_URL).query(&[
            ("country", country),
            ("username", self.config.geonames_username.as_str()),
        ]);

        let text = self.get_text("geonames", request).await?;
        parse_response("geonames", &text)
    }

    /// Fetch the most populated places of a country
    pub async fn fetch_cities(&self, country: &str) -> Result<CityList, ApiError> {
        let country = required("country code", country)?;
        let max_rows = MAX_CITIES.to_string();
        let request = self.http_client.get(GEONAMES_SEARCH_URL).query(&[
            ("country", country),
            ("featureClass", "P"),
            ("maxRows", max_rows.as_str()),
            ("username", self.config.geonames_username.as_str()),
        ]);

        let text = self.get_text("geonames_cities", request).await?;
        parse_response("geonames_cities", &text)
    }
}
