//! World Bank GDP indicator

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{endpoint_url, parse_json, required, ApiClient, ApiError};

const WORLDBANK_COUNTRY_URL: &str = "https://api.worldbank.org/v2/country";

/// GDP (current US$)
const GDP_INDICATOR: &str = "NY.GDP.MKTP.CD";

/// Yearly GDP values for one country, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldBankData {
    /// Paging metadata as returned by the API
    pub meta: Value,
    pub records: Vec<IndicatorRecord>,
}

impl WorldBankData {
    /// The newest record that carries a value
    pub fn latest(&self) -> Option<&IndicatorRecord> {
        self.records.iter().find(|record| record.value.is_some())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub country: Labeled,
    pub indicator: Labeled,
    /// Year, e.g. "2023"
    pub date: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Labeled {
    pub id: String,
    pub value: String,
}

/// Error body: `[{"message": [{"id": "120", "key": "Invalid value", "value": "..."}]}]`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Vec<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    value: String,
}

/// Parses the `[meta, records]` pair, or the single-element error form
pub(crate) fn parse_response(text: &str) -> Result<WorldBankData, ApiError> {
    let parts: Vec<Value> = parse_json("worldbank", text)?;

    match parts.as_slice() {
        [meta, records] => {
            // `null` records means the country has no data for the indicator
            let records = match records {
                Value::Null => Vec::new(),
                other => serde_json::from_value(other.clone()).map_err(|e| {
                    ApiError::ParseError {
                        endpoint: "worldbank",
                        message: e.to_string(),
                    }
                })?,
            };
            Ok(WorldBankData {
                meta: meta.clone(),
                records,
            })
        }
        [error] => {
            let message = serde_json::from_value::<ErrorBody>(error.clone())
                .ok()
                .and_then(|body| body.message.into_iter().next())
                .map(|m| m.value)
                .unwrap_or_else(|| "unknown error".to_string());
            Err(ApiError::Rejected {
                endpoint: "worldbank",
                message,
            })
        }
        _ => Err(ApiError::ParseError {
            endpoint: "worldbank",
            message: format!("expected 1 or 2 elements, got {}", parts.len()),
        }),
    }
}

impl ApiClient {
    /// Fetch yearly GDP for a country code (e.g. "US", "IN", "GB")
    pub async fn fetch_gdp(&self, country: &str) -> Result<WorldBankData, ApiError> {
        let country = required("country code", country)?.to_uppercase();
        let url = endpoint_url(
            WORLDBANK_COUNTRY_URL,
            &[&country, "indicator", GDP_INDICATOR],
        )?;

        let request = self.http_client.get(url).query(&[("format", "json")]);
        let text = self.get_text("worldbank", request).await?;
        parse_response(&text)
    }
}
