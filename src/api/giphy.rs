//! Giphy trending and search, one page of results at a time

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

const GIPHY_BASE_URL: &str = "https://api.giphy.com/v1/gifs";

/// Number of GIFs per page
pub const PAGE_SIZE: u32 = 25;

/// Term that selects the trending feed instead of a search
pub const TRENDING: &str = "trending";

/// One page of GIFs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GifPage {
    pub data: Vec<Gif>,
    pub pagination: Pagination,
}

impl GifPage {
    /// Offset of the page after this one, if there are more results
    pub fn next_offset(&self) -> Option<u32> {
        let next = self.pagination.offset + self.pagination.count;
        match self.pagination.total_count {
            Some(total) if next >= total => None,
            _ if self.pagination.count == 0 => None,
            _ => Some(next),
        }
    }

    /// This page's GIFs followed by those of `next`, keeping the pagination
    /// of `next`
    pub fn followed_by(mut self, next: GifPage) -> GifPage {
        self.data.extend(next.data);
        GifPage {
            data: self.data,
            pagination: next.pagination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gif {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub images: GifImages,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GifImages {
    pub fixed_height: GifRendition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GifRendition {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Absent on the trending feed
    pub total_count: Option<u32>,
    pub count: u32,
    pub offset: u32,
}

/// Normalizes a search term; blank terms select the trending feed
pub fn search_term(term: Option<&str>) -> String {
    match term.map(str::trim) {
        Some(term) if !term.is_empty() => term.to_string(),
        _ => TRENDING.to_string(),
    }
}

impl ApiClient {
    /// Fetch a page of GIFs for `term`, or of trending GIFs when the term is
    /// "trending"
    pub async fn fetch_gifs(&self, term: &str, offset: u32) -> Result<GifPage, ApiError> {
        let key = self
            .config
            .giphy_api_key
            .as_deref()
            .ok_or(ApiError::MissingApiKey("giphy"))?;

        let endpoint = if term == TRENDING { "trending" } else { "search" };
        let url = format!("{}/{}", GIPHY_BASE_URL, endpoint);

        let request = self.http_client.get(url).query(&[
            ("api_key", key.to_string()),
            ("limit", PAGE_SIZE.to_string()),
            ("offset", offset.to_string()),
            ("q", term.to_string()),
        ]);

        self.get_json("giphy", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_json;
    use crate::config::Config;

    const SEARCH_RESPONSE: &str = r#"{
        "data": [
            {
                "type": "gif",
                "id": "JIX9t2j0ZTN9S",
                "title": "Cat Kitten GIF",
                "images": {
                    "fixed_height": {"height": "200", "width": "267", "url": "https://media.giphy.com/media/JIX9t2j0ZTN9S/200.gif"},
                    "original": {"url": "https://media.giphy.com/media/JIX9t2j0ZTN9S/giphy.gif"}
                }
            }
        ],
        "pagination": {"total_count": 26, "count": 25, "offset": 0},
        "meta": {"status": 200, "msg": "OK"}
    }"#;

    #[test]
    fn test_parse_page() {
        let page: GifPage = parse_json("giphy", SEARCH_RESPONSE).unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, "JIX9t2j0ZTN9S");
        assert!(page.data[0].images.fixed_height.url.ends_with("200.gif"));
        assert_eq!(page.next_offset(), Some(25));
    }

    #[test]
    fn test_next_offset_stops_at_total() {
        let page = GifPage {
            data: Vec::new(),
            pagination: Pagination {
                total_count: Some(50),
                count: 25,
                offset: 25,
            },
        };
        assert_eq!(page.next_offset(), None);
    }

    #[test]
    fn test_next_offset_on_trending_feed() {
        let page = GifPage {
            data: Vec::new(),
            pagination: Pagination {
                total_count: None,
                count: 25,
                offset: 50,
            },
        };
        assert_eq!(page.next_offset(), Some(75));
    }

    #[test]
    fn test_search_term_defaults_to_trending() {
        assert_eq!(search_term(None), "trending");
        assert_eq!(search_term(Some("  ")), "trending");
        assert_eq!(search_term(Some(" cats ")), "cats");
    }

    #[tokio::test]
    async fn test_fetch_without_key_fails_before_request() {
        let client = ApiClient::new(Config::default()).unwrap();
        let err = client.fetch_gifs("cats", 0).await.unwrap_err();
        assert_eq!(err, ApiError::MissingApiKey("giphy"));
    }
}
