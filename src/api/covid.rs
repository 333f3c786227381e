//! disease.sh COVID-19 country statistics

use serde::{Deserialize, Serialize};

use super::{endpoint_url, required, ApiClient, ApiError};

const DISEASE_SH_COUNTRIES_URL: &str = "https://disease.sh/v3/covid-19/countries";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CovidStats {
    pub country: String,
    pub cases: u64,
    pub deaths: u64,
    pub recovered: u64,
    pub active: u64,
    pub critical: u64,
    pub today_cases: u64,
    pub today_deaths: u64,
    pub country_info: CountryInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryInfo {
    /// URL of the flag image
    pub flag: Option<String>,
}

impl ApiClient {
    /// Fetch case totals for a country name or ISO code
    pub async fn fetch_covid_stats(&self, country: &str) -> Result<CovidStats, ApiError> {
        let country = required("country", country)?;
        let url = endpoint_url(DISEASE_SH_COUNTRIES_URL, &[country])?;

        let request = self.http_client.get(url);
        self.get_json("covid", request).await
    }
}
