//! REST Countries lookup by ISO code

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{endpoint_url, required, ApiClient, ApiError};

const RESTCOUNTRIES_ALPHA_URL: &str = "https://restcountries.com/v3.1/alpha";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    pub region: String,
    pub population: u64,
    /// Keyed by ISO 4217 code
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    pub flag: Option<String>,
}

impl Country {
    /// Currency names joined for display
    pub fn currency_names(&self) -> String {
        self.currencies
            .values()
            .map(|currency| currency.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

impl ApiClient {
    /// Fetch country details for an ISO 3166 alpha-2 or alpha-3 code
    pub async fn fetch_country(&self, code: &str) -> Result<Vec<Country>, ApiError> {
        let code = required("country code", code)?.to_uppercase();
        let url = endpoint_url(RESTCOUNTRIES_ALPHA_URL, &[&code])?;

        let request = self.http_client.get(url);
        self.get_json("restcountries", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_json;

    const JAPAN_RESPONSE: &str = r#"[{
        "name": {"common": "Japan", "official": "Japan", "nativeName": {}},
        "cca2": "JP",
        "capital": ["Tokyo"],
        "region": "Asia",
        "population": 125836021,
        "currencies": {"JPY": {"name": "Japanese yen", "symbol": "¥"}},
        "flag": "🇯🇵"
    }]"#;

    #[test]
    fn test_parse_country() {
        let countries: Vec<Country> = parse_json("restcountries", JAPAN_RESPONSE).unwrap();
        let japan = &countries[0];

        assert_eq!(japan.name.common, "Japan");
        assert_eq!(japan.capital, vec!["Tokyo".to_string()]);
        assert_eq!(japan.region, "Asia");
        assert_eq!(japan.population, 125_836_021);
        assert_eq!(japan.currency_names(), "Japanese yen");
    }

    #[test]
    fn test_parse_country_without_capital_or_currency() {
        let body = r#"[{"name": {"common": "Antarctica"}, "region": "Antarctic", "population": 1000}]"#;
        let countries: Vec<Country> = parse_json("restcountries", body).unwrap();

        assert!(countries[0].capital.is_empty());
        assert_eq!(countries[0].currency_names(), "");
    }
}
