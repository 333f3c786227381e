//! JokeAPI two-part jokes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{endpoint_url, parse_json, ApiClient, ApiError};

const JOKEAPI_URL: &str = "https://v2.jokeapi.dev/joke";

/// Joke categories offered by the joke page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JokeCategory {
    #[default]
    Any,
    Programming,
    Misc,
    Dark,
    Pun,
}

impl JokeCategory {
    /// All categories in display order
    pub fn all() -> &'static [JokeCategory] {
        &[
            JokeCategory::Any,
            JokeCategory::Programming,
            JokeCategory::Misc,
            JokeCategory::Dark,
            JokeCategory::Pun,
        ]
    }

    /// Name used in the API path
    pub fn as_str(&self) -> &'static str {
        match self {
            JokeCategory::Any => "Any",
            JokeCategory::Programming => "Programming",
            JokeCategory::Misc => "Misc",
            JokeCategory::Dark => "Dark",
            JokeCategory::Pun => "Pun",
        }
    }

    /// Parses a category name, case-insensitively
    ///
    /// Accepts "miscellaneous" as an alias for `Misc`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "any" => Some(JokeCategory::Any),
            "programming" => Some(JokeCategory::Programming),
            "misc" | "miscellaneous" => Some(JokeCategory::Misc),
            "dark" => Some(JokeCategory::Dark),
            "pun" => Some(JokeCategory::Pun),
            _ => None,
        }
    }
}

impl fmt::Display for JokeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A joke with a setup and a punchline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joke {
    pub id: u64,
    pub category: String,
    pub setup: String,
    pub delivery: String,
}

/// Body as sent by the API; errors come back as `{"error": true, ...}`
#[derive(Debug, Deserialize)]
struct RawJoke {
    #[serde(default)]
    error: bool,
    message: Option<String>,
    id: Option<u64>,
    category: Option<String>,
    setup: Option<String>,
    delivery: Option<String>,
}

pub(crate) fn parse_response(text: &str) -> Result<Joke, ApiError> {
    let raw: RawJoke = parse_json("joke", text)?;
    if raw.error {
        return Err(ApiError::Rejected {
            endpoint: "joke",
            message: raw.message.unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    match (raw.setup, raw.delivery) {
        (Some(setup), Some(delivery)) => Ok(Joke {
            id: raw.id.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            setup,
            delivery,
        }),
        _ => Err(ApiError::ParseError {
            endpoint: "joke",
            message: "missing setup or delivery".to_string(),
        }),
    }
}

impl ApiClient {
    /// Fetch a random two-part joke from a category
    pub async fn fetch_joke(&self, category: JokeCategory) -> Result<Joke, ApiError> {
        let url = endpoint_url(JOKEAPI_URL, &[category.as_str()])?;
        let request = self.http_client.get(url).query(&[("type", "twopart")]);

        let text = self.get_text("joke", request).await?;
        parse_response(&text)
    }
}
