//! NASA astronomy picture of the day and the Solar System bodies list

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

const NASA_APOD_URL: &str = "https://api.nasa.gov/planetary/apod";
const SOLAR_SYSTEM_BODIES_URL: &str = "https://api.le-systeme-solaire.net/rest/bodies/";

/// Astronomy picture of the day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apod {
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub date: Option<String>,
    /// "image" or "video"
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetList {
    pub bodies: Vec<Body>,
}

impl PlanetList {
    /// Bodies whose English name contains `term`, ignoring case
    pub fn filter(&self, term: &str) -> Vec<&Body> {
        let term = term.trim().to_lowercase();
        self.bodies
            .iter()
            .filter(|body| body.english_name.to_lowercase().contains(&term))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub id: String,
    pub english_name: String,
    /// Surface gravity in m/s²
    #[serde(default)]
    pub gravity: f64,
    #[serde(default)]
    pub is_planet: bool,
}

impl ApiClient {
    /// Fetch today's astronomy picture
    pub async fn fetch_apod(&self) -> Result<Apod, ApiError> {
        let request = self
            .http_client
            .get(NASA_APOD_URL)
            .query(&[("api_key", self.config.nasa_api_key.as_str())]);

        self.get_json("nasa_apod", request).await
    }

    /// Fetch every body of the Solar System
    pub async fn fetch_planets(&self) -> Result<PlanetList, ApiError> {
        let request = self.http_client.get(SOLAR_SYSTEM_BODIES_URL);
        self.get_json("nasa_planets", request).await
    }
}
