//! WorldCat union-catalog adapter.
//!
//! WorldCat's OpenSearch endpoint serializes an Atom feed as JSON: text
//! values hide behind `$t` keys, and author/publisher appear as either a
//! single object or an array depending on the record. The catalog exposes
//! no covers, page counts, or ISBNs through this interface.

use async_trait::async_trait;
use serde::Deserialize;

use crate::book::{
    Book, BookSource, NO_DESCRIPTION, UNKNOWN_AUTHOR, UNKNOWN_DATE, UNKNOWN_PUBLISHER,
    UNKNOWN_TITLE, placeholder_cover,
};
use crate::config::SearchConfig;
use crate::providers::BookProvider;
use crate::providers::error::{ProviderError, ProviderResult};
use crate::score::relevance;

/// Search client for the WorldCat OpenSearch API.
pub struct WorldCatProvider {
    client: reqwest::Client,
    endpoint: String,
    limit: usize,
}

/// Atom-as-JSON: a node is either one value or a list of values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// An Atom text node: `{"$t": "..."}`.
#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$t")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    entries: Option<Entries>,
}

#[derive(Debug, Deserialize)]
struct Entries {
    entry: Option<OneOrMany<Entry>>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    title: Option<TextNode>,
    author: Option<OneOrMany<Author>>,
    summary: Option<TextNode>,
    publisher: Option<OneOrMany<Publisher>>,
    published: Option<TextNode>,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: TextNode,
}

#[derive(Debug, Deserialize)]
struct Publisher {
    name: TextNode,
}

impl WorldCatProvider {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            endpoint: config.worldcat_endpoint.clone(),
            limit: config.worldcat_limit,
        }
    }

    async fn fetch(&self, query: &str) -> ProviderResult<Vec<Book>> {
        let count = self.limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("srwt", query),
                ("format", "json"),
                ("count", count.as_str()),
            ])
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

        let data: FeedResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Decode {
                    url: self.endpoint.clone(),
                    source,
                })?;

        let entries = data
            .entries
            .and_then(|entries| entries.entry)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();

        Ok(entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| map_entry(entry, index, query))
            .collect())
    }
}

#[async_trait]
impl BookProvider for WorldCatProvider {
    fn source(&self) -> BookSource {
        BookSource::WorldCat
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

/// Normalize one feed entry. Entries carry no stable native ID, so records
/// are numbered by batch position.
fn map_entry(entry: Entry, index: usize, query: &str) -> Book {
    let title = entry
        .title
        .map(|node| node.value)
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let author = entry
        .author
        .map(|authors| {
            authors
                .into_vec()
                .into_iter()
                .map(|author| author.name.value)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
    let publisher = entry
        .publisher
        .and_then(|publishers| publishers.into_vec().into_iter().next())
        .map(|publisher| publisher.name.value)
        .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());

    let relevance_score = relevance(&title, &author, &publisher, query);

    Book {
        id: format!("worldcat-{index}"),
        cover: placeholder_cover(&title),
        title,
        author,
        description: entry
            .summary
            .map(|node| node.value)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        publisher,
        published_date: entry
            .published
            .map(|node| node.value)
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        page_count: 0,
        categories: Vec::new(),
        isbn: String::new(),
        source: BookSource::WorldCat,
        relevance_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_entry(json: &str) -> Entry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn maps_entry_with_author_array() {
        let entry = parse_entry(
            r#"{
                "title": {"$t": "Grande Sertão: Veredas"},
                "author": [{"name": {"$t": "João Guimarães Rosa"}}, {"name": {"$t": "Outro"}}],
                "summary": {"$t": "Riobaldo narra."},
                "publisher": {"name": {"$t": "José Olympio"}},
                "published": {"$t": "1956"}
            }"#,
        );
        let book = map_entry(entry, 3, "grande sertão: veredas");

        assert_eq!(book.id, "worldcat-3");
        assert_eq!(book.title, "Grande Sertão: Veredas");
        assert_eq!(book.author, "João Guimarães Rosa, Outro");
        assert_eq!(book.publisher, "José Olympio");
        assert_eq!(book.published_date, "1956");
        assert!(book.cover.contains("via.placeholder.com"));
    }

    #[test]
    fn maps_entry_with_single_author() {
        let entry = parse_entry(r#"{"author": {"name": {"$t": "Solo"}}}"#);
        assert_eq!(map_entry(entry, 0, "q").author, "Solo");
    }

    #[test]
    fn missing_fields_default_to_sentinels() {
        let entry = parse_entry("{}");
        let book = map_entry(entry, 0, "q");
        assert_eq!(book.title, UNKNOWN_TITLE);
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.publisher, UNKNOWN_PUBLISHER);
        assert_eq!(book.description, NO_DESCRIPTION);
        assert_eq!(book.published_date, UNKNOWN_DATE);
    }

    #[test]
    fn empty_feed_parses() {
        let feed: FeedResponse = serde_json::from_str("{}").unwrap();
        assert!(feed.entries.is_none());
    }
}
