//! Google Books adapter.
//!
//! One GET against the volumes endpoint, restricted to Portuguese print
//! books and ordered by the provider's own relevance. ISBN-shaped queries
//! are rewritten to the `isbn:` scoped form before the request.

use async_trait::async_trait;
use serde::Deserialize;

use crate::book::{
    Book, BookSource, NO_DESCRIPTION, UNKNOWN_AUTHOR, UNKNOWN_DATE, UNKNOWN_PUBLISHER,
    UNKNOWN_TITLE, placeholder_cover,
};
use crate::config::SearchConfig;
use crate::isbn::rewrite_isbn_query;
use crate::providers::BookProvider;
use crate::providers::error::{ProviderError, ProviderResult};
use crate::score::relevance;

/// Search client for the Google Books volumes API.
pub struct GoogleBooksProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    image_links: Option<ImageLinks>,
    description: Option<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    page_count: Option<u32>,
    categories: Option<Vec<String>>,
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    identifier: String,
}

impl GoogleBooksProvider {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            endpoint: config.google_endpoint.clone(),
            api_key: config.google_api_key.clone(),
            limit: config.google_limit,
        }
    }

    async fn fetch(&self, query: &str) -> ProviderResult<Vec<Book>> {
        let search_query = rewrite_isbn_query(query);

        let mut params = vec![
            ("q", search_query.to_string()),
            ("maxResults", self.limit.to_string()),
            ("printType", "books".to_string()),
            ("orderBy", "relevance".to_string()),
            ("langRestrict", "pt".to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                url: self.endpoint.clone(),
                status: response.status().as_u16(),
            });
        }

        let data: VolumesResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Decode {
                    url: self.endpoint.clone(),
                    source,
                })?;

        Ok(data
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|volume| map_volume(volume, Some(query)))
            .collect())
    }

    /// Look up a single volume by its native Google Books ID.
    ///
    /// Unlike `search`, a failure here is surfaced: the caller asked for a
    /// specific record and needs to know it wasn't delivered.
    pub async fn volume(&self, id: &str) -> ProviderResult<Book> {
        let url = format!("{}/{}", self.endpoint, id);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.clone(),
                source,
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::VolumeNotFound { id: id.to_string() });
        }
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                url: url.clone(),
                status: response.status().as_u16(),
            });
        }

        let volume: Volume = response
            .json()
            .await
            .map_err(|source| ProviderError::Decode {
                url: url.clone(),
                source,
            })?;

        Ok(map_volume(volume, None))
    }
}

#[async_trait]
impl BookProvider for GoogleBooksProvider {
    fn source(&self) -> BookSource {
        BookSource::GoogleBooks
    }

    fn author_query(&self, name: &str) -> String {
        format!("inauthor:\"{name}\"")
    }

    async fn search(&self, query: &str) -> Vec<Book> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        match self.fetch(query).await {
            Ok(books) => books,
            Err(error) => {
                tracing::warn!(provider = %self.source(), query, %error, "provider search failed");
                Vec::new()
            }
        }
    }
}

/// Normalize one volume, defaulting every absent field to its sentinel.
///
/// `query` is `Some` for search results (relevance is scored against it)
/// and `None` for direct volume lookups, which carry no score.
fn map_volume(volume: Volume, query: Option<&str>) -> Book {
    let info = volume.volume_info;

    let title = info.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let author = info
        .authors
        .filter(|authors| !authors.is_empty())
        .map(|authors| authors.join(", "))
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
    let cover = info
        .image_links
        .and_then(|links| links.thumbnail.or(links.small_thumbnail))
        .unwrap_or_else(|| placeholder_cover(&title));
    let publisher = info
        .publisher
        .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());

    let relevance_score = query
        .map(|q| relevance(&title, &author, &publisher, q))
        .unwrap_or(0);

    Book {
        id: format!("google-{}", volume.id),
        title,
        author,
        cover,
        description: info
            .description
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        publisher,
        published_date: info
            .published_date
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        page_count: info.page_count.unwrap_or(0),
        categories: info.categories.unwrap_or_default(),
        isbn: info
            .industry_identifiers
            .and_then(|ids| ids.into_iter().next())
            .map(|id| id.identifier)
            .unwrap_or_default(),
        source: BookSource::GoogleBooks,
        relevance_score,
    }
}
