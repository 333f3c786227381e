//! Page catalogue and the requests each page issues
//!
//! A page is a named view over one API. Pages turn their inputs into one or
//! two `Query` values; a query knows its cache key and how to produce its
//! payload with an `ApiClient`.

use serde_json::json;

use crate::api::{giphy, ApiClient, ApiError, JokeCategory, Payload};
use crate::cache::CacheKey;

/// A page of the showcase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Weather,
    Cocktails,
    Bank,
    Geonames,
    Countries,
    Joke,
    Giphy,
    Health,
    Nasa,
}

impl Page {
    /// All pages in home-listing order
    pub fn all() -> &'static [Page] {
        &[
            Page::Weather,
            Page::Cocktails,
            Page::Bank,
            Page::Geonames,
            Page::Countries,
            Page::Joke,
            Page::Giphy,
            Page::Health,
            Page::Nasa,
        ]
    }

    /// Command name of the page
    pub fn id(&self) -> &'static str {
        match self {
            Page::Weather => "weather",
            Page::Cocktails => "cocktails",
            Page::Bank => "bank",
            Page::Geonames => "geonames",
            Page::Countries => "countries",
            Page::Joke => "joke",
            Page::Giphy => "giphy",
            Page::Health => "health",
            Page::Nasa => "nasa",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Weather => "Weather API",
            Page::Cocktails => "Cocktail API",
            Page::Bank => "Bank API",
            Page::Geonames => "Geoname API",
            Page::Countries => "REST Countries API",
            Page::Joke => "Joke API",
            Page::Giphy => "Giphy API",
            Page::Health => "Health API",
            Page::Nasa => "NASA API",
        }
    }

    /// One-line usage shown in listings and shell help
    pub fn usage(&self) -> &'static str {
        match self {
            Page::Weather => "weather <lat> <lon>",
            Page::Cocktails => "cocktails <name>",
            Page::Bank => "bank <country code>",
            Page::Geonames => "geonames <country code>",
            Page::Countries => "countries <country code>",
            Page::Joke => "joke [any|programming|misc|dark|pun]",
            Page::Giphy => "giphy [term] [offset]",
            Page::Health => "health <country>",
            Page::Nasa => "nasa [planet filter]",
        }
    }

    pub fn from_id(id: &str) -> Option<Page> {
        Page::all().iter().copied().find(|page| page.id() == id)
    }
}

/// A single request issued by a page
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Weather { lat: f64, lon: f64 },
    Cocktails { name: String },
    WorldBank { country: String },
    GeoCountry { country: String },
    GeoCities { country: String },
    RestCountry { code: String },
    Joke { category: JokeCategory },
    Gifs { term: String, offset: u32 },
    Covid { country: String },
    Apod,
    Planets,
}

impl Query {
    /// Stable cache key: endpoint name followed by every parameter
    pub fn key(&self) -> CacheKey {
        match self {
            Query::Weather { lat, lon } => {
                CacheKey::from_parts([json!("weather"), json!(lat), json!(lon)])
            }
            Query::Cocktails { name } => {
                CacheKey::from_parts([json!("cocktails"), json!(name.trim())])
            }
            Query::WorldBank { country } => CacheKey::from_parts([
                json!("worldbank"),
                json!(country.trim().to_uppercase()),
            ]),
            Query::GeoCountry { country } => {
                CacheKey::from_parts([json!("geonames"), json!(country.trim())])
            }
            Query::GeoCities { country } => {
                CacheKey::from_parts([json!("geonames_cities"), json!(country.trim())])
            }
            Query::RestCountry { code } => CacheKey::from_parts([
                json!("restcountries"),
                json!(code.trim().to_uppercase()),
            ]),
            Query::Joke { category } => {
                CacheKey::from_parts([json!("joke"), json!(category.as_str())])
            }
            Query::Gifs { term, offset } => {
                CacheKey::from_parts([json!("giphy"), json!(term), json!(offset)])
            }
            Query::Covid { country } => {
                CacheKey::from_parts([json!("covid"), json!(country.trim())])
            }
            Query::Apod => CacheKey::from_parts([json!("nasa_apod")]),
            Query::Planets => CacheKey::from_parts([json!("nasa_planets")]),
        }
    }

    /// Runs the request and wraps the response as a payload
    pub async fn run(self, client: ApiClient) -> Result<Payload, ApiError> {
        let payload = match self {
            Query::Weather { lat, lon } => Payload::Weather(client.fetch_weather(lat, lon).await?),
            Query::Cocktails { name } => {
                Payload::Cocktails(client.search_cocktails(&name).await?)
            }
            Query::WorldBank { country } => Payload::WorldBank(client.fetch_gdp(&country).await?),
            Query::GeoCountry { country } => {
                Payload::CountryInfo(client.fetch_country_info(&country).await?)
            }
            Query::GeoCities { country } => Payload::Cities(client.fetch_cities(&country).await?),
            Query::RestCountry { code } => Payload::Countries(client.fetch_country(&code).await?),
            Query::Joke { category } => Payload::Joke(client.fetch_joke(category).await?),
            Query::Gifs { term, offset } => Payload::Gifs(client.fetch_gifs(&term, offset).await?),
            Query::Covid { country } => Payload::Covid(client.fetch_covid_stats(&country).await?),
            Query::Apod => Payload::Apod(client.fetch_apod().await?),
            Query::Planets => Payload::Planets(client.fetch_planets().await?),
        };
        Ok(payload)
    }

    /// Short label shown above the response
    pub fn label(&self) -> &'static str {
        match self {
            Query::Weather { .. } => "Weather",
            Query::Cocktails { .. } => "Cocktails",
            Query::WorldBank { .. } => "World Bank GDP",
            Query::GeoCountry { .. } => "Country info",
            Query::GeoCities { .. } => "Cities",
            Query::RestCountry { .. } => "Country",
            Query::Joke { .. } => "Joke",
            Query::Gifs { .. } => "GIFs",
            Query::Covid { .. } => "COVID-19 stats",
            Query::Apod => "Astronomy picture of the day",
            Query::Planets => "Solar System bodies",
        }
    }
}

/// Errors that can occur when reading page arguments
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    /// No page with this name
    #[error("Unknown page: '{0}'. Type 'help' to list pages")]
    UnknownPage(String),

    /// A required argument is missing
    #[error("Missing argument. Usage: {0}")]
    MissingArgument(&'static str),

    /// An argument could not be parsed
    #[error("Invalid argument '{value}'. Usage: {usage}")]
    InvalidArgument { value: String, usage: &'static str },
}

/// Inputs of one page visit, already parsed
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: Page,
    pub queries: Vec<Query>,
    /// Name filter applied to the planets list when rendering
    pub planet_filter: Option<String>,
}

impl PageRequest {
    pub fn new(page: Page, queries: Vec<Query>) -> Self {
        Self {
            page,
            queries,
            planet_filter: None,
        }
    }

    /// Parses a shell line such as `weather 40.0 -75.0`
    pub fn parse_line(line: &str) -> Result<Self, PageError> {
        let mut words = line.split_whitespace();
        let id = words.next().unwrap_or_default();
        let page = Page::from_id(id).ok_or_else(|| PageError::UnknownPage(id.to_string()))?;
        let args: Vec<&str> = words.collect();
        Self::from_args(page, &args)
    }

    /// Builds the queries of `page` from positional arguments
    pub fn from_args(page: Page, args: &[&str]) -> Result<Self, PageError> {
        let usage = page.usage();
        let rest = args.join(" ");
        let first = || {
            args.first()
                .copied()
                .ok_or(PageError::MissingArgument(usage))
        };
        // NaN and infinities would all encode to `null` in the cache key
        let number = |value: &str| {
            value
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| PageError::InvalidArgument {
                    value: value.to_string(),
                    usage,
                })
        };

        let request = match page {
            Page::Weather => {
                let (Some(lat), Some(lon)) = (args.first(), args.get(1)) else {
                    return Err(PageError::MissingArgument(usage));
                };
                Self::new(
                    page,
                    vec![Query::Weather {
                        lat: number(*lat)?,
                        lon: number(*lon)?,
                    }],
                )
            }
            Page::Cocktails => Self::new(page, vec![Query::Cocktails { name: rest }]),
            Page::Bank => Self::new(
                page,
                vec![Query::WorldBank {
                    country: first()?.to_string(),
                }],
            ),
            Page::Geonames => {
                let country = first()?.to_string();
                Self::new(
                    page,
                    vec![
                        Query::GeoCountry {
                            country: country.clone(),
                        },
                        Query::GeoCities { country },
                    ],
                )
            }
            Page::Countries => Self::new(
                page,
                vec![Query::RestCountry {
                    code: first()?.to_string(),
                }],
            ),
            Page::Joke => {
                let category = match args.first() {
                    Some(name) => {
                        JokeCategory::from_str(name).ok_or_else(|| PageError::InvalidArgument {
                            value: name.to_string(),
                            usage,
                        })?
                    }
                    None => JokeCategory::default(),
                };
                Self::new(page, vec![Query::Joke { category }])
            }
            Page::Giphy => {
                // A trailing number is the page offset
                let (term_words, offset) = match args.split_last() {
                    Some((last, init)) => match last.parse::<u32>() {
                        Ok(offset) => (init, offset),
                        Err(_) => (args, 0),
                    },
                    None => (args, 0),
                };
                let term = term_words.join(" ");
                Self::new(
                    page,
                    vec![Query::Gifs {
                        term: giphy::search_term(Some(&term)),
                        offset,
                    }],
                )
            }
            Page::Health => {
                if rest.trim().is_empty() {
                    return Err(PageError::MissingArgument(usage));
                }
                Self::new(page, vec![Query::Covid { country: rest }])
            }
            Page::Nasa => {
                let mut request = Self::new(page, vec![Query::Apod, Query::Planets]);
                if !rest.trim().is_empty() {
                    request.planet_filter = Some(rest);
                }
                request
            }
        };

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids_are_unique_and_resolvable() {
        for page in Page::all() {
            assert_eq!(Page::from_id(page.id()), Some(*page));
        }
        assert_eq!(Page::from_id("home"), None);
    }

    #[test]
    fn test_weather_key_includes_coordinates() {
        let query = Query::Weather {
            lat: 40.0,
            lon: -75.0,
        };
        assert_eq!(query.key().as_str(), r#"["weather",40.0,-75.0]"#);
    }

    #[test]
    fn test_keys_normalize_country_codes() {
        let lower = Query::WorldBank {
            country: " us".to_string(),
        };
        let upper = Query::WorldBank {
            country: "US".to_string(),
        };
        assert_eq!(lower.key(), upper.key());
    }

    #[test]
    fn test_geonames_queries_have_distinct_keys() {
        let request = PageRequest::parse_line("geonames FR").unwrap();
        assert_eq!(request.queries.len(), 2);
        assert_ne!(request.queries[0].key(), request.queries[1].key());
    }

    #[test]
    fn test_parse_weather_line() {
        let request = PageRequest::parse_line("weather 40.0 -75.0").unwrap();
        assert_eq!(request.page, Page::Weather);
        assert_eq!(
            request.queries,
            vec![Query::Weather {
                lat: 40.0,
                lon: -75.0
            }]
        );
    }

    #[test]
    fn test_parse_weather_requires_two_numbers() {
        assert_eq!(
            PageRequest::parse_line("weather 40.0"),
            Err(PageError::MissingArgument("weather <lat> <lon>"))
        );
        assert!(matches!(
            PageRequest::parse_line("weather north -75"),
            Err(PageError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_parse_weather_rejects_non_finite_numbers() {
        for line in ["weather NaN 0", "weather inf 0", "weather 40 -infinity"] {
            assert!(
                matches!(
                    PageRequest::parse_line(line),
                    Err(PageError::InvalidArgument { .. })
                ),
                "{} should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_parse_joke_defaults_to_any() {
        let request = PageRequest::parse_line("joke").unwrap();
        assert_eq!(
            request.queries,
            vec![Query::Joke {
                category: JokeCategory::Any
            }]
        );
        assert!(PageRequest::parse_line("joke knock-knock").is_err());
    }

    #[test]
    fn test_parse_giphy_term_and_offset() {
        let request = PageRequest::parse_line("giphy funny cats 25").unwrap();
        assert_eq!(
            request.queries,
            vec![Query::Gifs {
                term: "funny cats".to_string(),
                offset: 25
            }]
        );

        let trending = PageRequest::parse_line("giphy").unwrap();
        assert_eq!(
            trending.queries,
            vec![Query::Gifs {
                term: "trending".to_string(),
                offset: 0
            }]
        );
    }

    #[test]
    fn test_parse_health_keeps_multi_word_country() {
        let request = PageRequest::parse_line("health united kingdom").unwrap();
        assert_eq!(
            request.queries,
            vec![Query::Covid {
                country: "united kingdom".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_nasa_filter() {
        let request = PageRequest::parse_line("nasa mar").unwrap();
        assert_eq!(request.queries, vec![Query::Apod, Query::Planets]);
        assert_eq!(request.planet_filter.as_deref(), Some("mar"));
    }

    #[test]
    fn test_parse_unknown_page() {
        assert_eq!(
            PageRequest::parse_line("stocks AAPL"),
            Err(PageError::UnknownPage("stocks".to_string()))
        );
    }

    #[test]
    fn test_parse_missing_country() {
        assert!(matches!(
            PageRequest::parse_line("bank"),
            Err(PageError::MissingArgument(_))
        ));
    }
}
