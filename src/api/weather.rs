//! Weatherbit current conditions
//!
//! Fetches current weather for a coordinate pair from the Weatherbit API.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

/// Base URL for the Weatherbit current conditions endpoint
const WEATHERBIT_CURRENT_URL: &str = "https://api.weatherbit.io/v2.0/current";

/// Response of the current conditions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Observations, normally exactly one
    #[serde(default)]
    pub data: Vec<WeatherObservation>,
}

impl WeatherReport {
    /// The first observation, if any
    pub fn current(&self) -> Option<&WeatherObservation> {
        self.data.first()
    }
}

/// Current conditions at one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub city_name: String,
    pub country_code: String,
    pub weather: WeatherDescription,
    /// Temperature in Celsius
    pub temp: f64,
    /// Apparent (feels-like) temperature in Celsius
    pub app_temp: f64,
    /// Wind speed in m/s
    pub wind_spd: f64,
    pub wind_cdir_full: String,
    /// Relative humidity percentage
    pub rh: f64,
    /// Precipitation in mm/hr
    pub precip: f64,
    /// Visibility in km
    pub vis: f64,
    /// Sunrise time (HH:MM, UTC)
    pub sunrise: String,
    /// Sunset time (HH:MM, UTC)
    pub sunset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDescription {
    pub description: String,
    pub icon: String,
}

/// Checks that a coordinate pair is on the globe
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ApiError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::InvalidInput(format!(
            "latitude {} is outside -90..90",
            lat
        )));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ApiError::InvalidInput(format!(
            "longitude {} is outside -180..180",
            lon
        )));
    }
    Ok(())
}

impl ApiClient {
    /// Fetch current weather for the given coordinates
    ///
    /// # Returns
    /// * `Ok(WeatherReport)` - Current conditions
    /// * `Err(ApiError::MissingApiKey)` - If no Weatherbit key is configured
    /// * `Err(ApiError)` - If the coordinates are invalid or the request fails
    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherReport, ApiError> {
        validate_coordinates(lat, lon)?;
        let key = self
            .config
            .weatherbit_api_key
            .as_deref()
            .ok_or(ApiError::MissingApiKey("weatherbit"))?;

        let request = self.http_client.get(WEATHERBIT_CURRENT_URL).query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("key", key.to_string()),
        ]);

        self.get_json("weather", request).await
    }
}
