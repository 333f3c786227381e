//! TheCocktailDB search

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

const COCKTAIL_SEARCH_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1/search.php";

/// Search results; `drinks` is `None` when nothing matched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CocktailResults {
    pub drinks: Option<Vec<Cocktail>>,
}

impl CocktailResults {
    pub fn drinks(&self) -> &[Cocktail] {
        self.drinks.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cocktail {
    #[serde(rename = "idDrink")]
    pub id: String,
    #[serde(rename = "strDrink")]
    pub name: String,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strGlass")]
    pub glass: Option<String>,
    #[serde(rename = "strDrinkThumb")]
    pub thumbnail: Option<String>,
}

impl ApiClient {
    /// Search cocktails by name
    ///
    /// An empty query resolves to no drinks without sending a request.
    pub async fn search_cocktails(&self, query: &str) -> Result<CocktailResults, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(CocktailResults::default());
        }

        let request = self
            .http_client
            .get(COCKTAIL_SEARCH_URL)
            .query(&[("s", query)]);

        self.get_json("cocktails", request).await
    }
}
