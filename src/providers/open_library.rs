//! Open Library adapter.
//!
//! Two-stage: a summary search against `search.json`, then one detail
//! fetch per matched document to recover fields the summary omits
//! (description, publisher, page count). The batch is capped low because
//! of that per-document cost, and the detail fetches run as their own
//! bounded concurrent fan-out. A failed detail fetch degrades that single
//! record to defaults; it never sinks the batch.

use async_trait::async_trait;
use futures_util::future::join_all;
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

/// Search client for the Open Library catalog.
pub struct OpenLibraryProvider {
    client: reqwest::Client,
    endpoint: String,
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    key: String,
    title: Option<String>,
    author_name: Option<Vec<String>>,
    cover_i: Option<u64>,
    first_publish_year: Option<i64>,
    subject: Option<Vec<String>>,
    isbn: Option<Vec<String>>,
    edition_key: Option<Vec<String>>,
}

/// Work/edition detail document. All fields optional: a failed or partial
/// detail fetch leaves the record on its defaults.
#[derive(Debug, Default, Deserialize)]
struct Detail {
    description: Option<Description>,
    publishers: Option<Vec<String>>,
    number_of_pages: Option<u32>,
    publish_date: Option<String>,
}

/// Work descriptions appear either as a bare string or as a typed
/// `{"type": ..., "value": ...}` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Description {
    Text(String),
    Object { value: String },
}

impl Description {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Object { value } => value,
        }
    }
}

impl OpenLibraryProvider {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            endpoint: config.open_library_endpoint.clone(),
            limit: config.open_library_limit,
        }
    }

    async fn fetch(&self, query: &str) -> ProviderResult<Vec<Book>> {
        let search_query = rewrite_isbn_query(query);
        let url = format!("{}/search.json", self.endpoint);
        let limit = self.limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", search_query.as_ref()),
                ("limit", limit.as_str()),
                ("language", "por"),
                (
                    "fields",
                    "key,title,author_name,cover_i,first_publish_year,publisher,subject,isbn,edition_key",
                ),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                url: url.clone(),
                status: response.status().as_u16(),
            });
        }

        let data: SearchResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Decode {
                    url: url.clone(),
                    source,
                })?;

        let docs: Vec<Doc> = data.docs.into_iter().take(self.limit).collect();

        // Per-document detail fetches, all launched together and all
        // awaited: one failure degrades only its own record.
        let books = join_all(docs.into_iter().map(|doc| self.enrich(doc, query))).await;
        Ok(books)
    }

    /// Fetch edition/work details for one summary doc and normalize it.
    async fn enrich(&self, doc: Doc, query: &str) -> Book {
        let detail = match self.fetch_detail(&doc).await {
            Ok(detail) => detail,
            Err(error) => {
                tracing::debug!(
                    provider = %BookSource::OpenLibrary,
                    key = %doc.key,
                    %error,
                    "detail fetch failed, using summary fields only"
                );
                Detail::default()
            }
        };
        map_doc(doc, detail, query)
    }

    async fn fetch_detail(&self, doc: &Doc) -> ProviderResult<Detail> {
        // Works keys are paths ("/works/OL123W"); bare edition keys from
        // `edition_key` need the /books/ route.
        let key = if doc.key.starts_with("/works/") {
            doc.key.clone()
        } else {
            match doc.edition_key.as_ref().and_then(|keys| keys.first()) {
                Some(edition) => format!("/books/{edition}"),
                None => doc.key.clone(),
            }
        };
        let url = format!("{}{}.json", self.endpoint, key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                url: url.clone(),
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| ProviderError::Decode { url, source })
    }
}

#[async_trait]
impl BookProvider for OpenLibraryProvider {
    fn source(&self) -> BookSource {
        BookSource::OpenLibrary
    }

    fn author_query(&self, name: &str) -> String {
        format!("author:\"{name}\"")
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

/// Merge a summary doc with its (possibly defaulted) detail document.
fn map_doc(doc: Doc, detail: Detail, query: &str) -> Book {
    let title = doc.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let author = doc
        .author_name
        .filter(|names| !names.is_empty())
        .map(|names| names.join(", "))
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
    let cover = doc
        .cover_i
        .map(|id| format!("https://covers.openlibrary.org/b/id/{id}-L.jpg"))
        .unwrap_or_else(|| placeholder_cover(&title));
    let publisher = detail
        .publishers
        .and_then(|publishers| publishers.into_iter().next())
        .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());
    let published_date = doc
        .first_publish_year
        .map(|year| year.to_string())
        .or(detail.publish_date)
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    let relevance_score = relevance(&title, &author, &publisher, query);

    Book {
        id: format!("openlibrary-{}", doc.key.replacen('/', "", 1)),
        title,
        author,
        cover,
        description: detail
            .description
            .map(Description::into_string)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        publisher,
        published_date,
        page_count: detail.number_of_pages.unwrap_or(0),
        categories: doc
            .subject
            .map(|subjects| subjects.into_iter().take(5).collect())
            .unwrap_or_default(),
        isbn: doc
            .isbn
            .and_then(|isbns| isbns.into_iter().next())
            .unwrap_or_default(),
        source: BookSource::OpenLibrary,
        relevance_score,
    }
}
