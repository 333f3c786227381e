//! Command-line interface parsing for the API showcase
//!
//! One subcommand per page plus `list` and the interactive `shell`. Page
//! subcommands are turned into the same `PageRequest` the shell builds from a
//! typed line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{giphy, JokeCategory};
use crate::pages::{Page, PageRequest, Query};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified joke category is not recognized
    #[error("Invalid joke category: '{0}'. Valid categories: any, programming, misc, dark, pun")]
    InvalidJokeCategory(String),

    /// A latitude or longitude is not a finite number
    #[error("Invalid coordinate: '{0}'. Expected a finite number")]
    InvalidCoordinate(String),
}

/// API Showcase - fetch public APIs through a shared request cache
#[derive(Parser, Debug)]
#[command(name = "apishowcase")]
#[command(about = "Browse public APIs through a de-duplicating request cache")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available pages
    List,

    /// Current weather for a coordinate (Weatherbit)
    #[command(allow_negative_numbers = true)]
    Weather {
        #[arg(long, value_parser = parse_coordinate)]
        lat: f64,
        #[arg(long, value_parser = parse_coordinate)]
        lon: f64,
    },

    /// Search cocktails by name (TheCocktailDB)
    Cocktails {
        #[arg(default_value = "")]
        name: String,
    },

    /// GDP series of a country (World Bank)
    Bank { country: String },

    /// Country info and largest cities (GeoNames)
    Geonames { country: String },

    /// Country details by ISO code (REST Countries)
    Countries { code: String },

    /// A random joke (JokeAPI)
    Joke {
        /// One of: any, programming, misc, dark, pun
        #[arg(long, default_value = "any", value_parser = parse_joke_category)]
        category: JokeCategory,
    },

    /// Search or trending GIFs (Giphy)
    Giphy {
        /// Search term; trending GIFs when omitted
        term: Option<String>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// COVID-19 statistics of a country (disease.sh)
    Health { country: String },

    /// Astronomy picture of the day and Solar System bodies (NASA)
    Nasa {
        /// Only show bodies whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Read page commands from stdin against one shared cache
    Shell,
}

/// Parses a joke category argument
///
/// # Returns
/// * `Ok(JokeCategory)` if the string names a category, ignoring case
/// * `Err(CliError::InvalidJokeCategory)` otherwise
pub fn parse_joke_category(s: &str) -> Result<JokeCategory, CliError> {
    JokeCategory::from_str(s).ok_or_else(|| CliError::InvalidJokeCategory(s.to_string()))
}

/// Parses a coordinate, rejecting NaN and infinities
pub fn parse_coordinate(s: &str) -> Result<f64, CliError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CliError::InvalidCoordinate(s.to_string()))
}

impl Command {
    /// The page visit this command stands for, if it is a page command
    pub fn page_request(&self) -> Option<PageRequest> {
        let request = match self {
            Command::List | Command::Shell => return None,
            Command::Weather { lat, lon } => PageRequest::new(
                Page::Weather,
                vec![Query::Weather {
                    lat: *lat,
                    lon: *lon,
                }],
            ),
            Command::Cocktails { name } => PageRequest::new(
                Page::Cocktails,
                vec![Query::Cocktails { name: name.clone() }],
            ),
            Command::Bank { country } => PageRequest::new(
                Page::Bank,
                vec![Query::WorldBank {
                    country: country.clone(),
                }],
            ),
            Command::Geonames { country } => PageRequest::new(
                Page::Geonames,
                vec![
                    Query::GeoCountry {
                        country: country.clone(),
                    },
                    Query::GeoCities {
                        country: country.clone(),
                    },
                ],
            ),
            Command::Countries { code } => PageRequest::new(
                Page::Countries,
                vec![Query::RestCountry { code: code.clone() }],
            ),
            Command::Joke { category } => PageRequest::new(
                Page::Joke,
                vec![Query::Joke {
                    category: *category,
                }],
            ),
            Command::Giphy { term, offset } => PageRequest::new(
                Page::Giphy,
                vec![Query::Gifs {
                    term: giphy::search_term(term.as_deref()),
                    offset: *offset,
                }],
            ),
            Command::Health { country } => PageRequest::new(
                Page::Health,
                vec![Query::Covid {
                    country: country.clone(),
                }],
            ),
            Command::Nasa { filter } => {
                let mut request = PageRequest::new(Page::Nasa, vec![Query::Apod, Query::Planets]);
                request.planet_filter = filter.clone().filter(|f| !f.trim().is_empty());
                request
            }
        };

        Some(request)
    }
}
