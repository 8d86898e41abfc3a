//! iTunes Store adapter (ebooks, Brazilian storefront).
//!
//! The store has no page counts, ISBNs, or publisher data for ebooks, so
//! those fields ride their sentinels. Artwork URLs are upgraded from the
//! small variants the API returns to 300x300.

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

/// Search client for the iTunes Store search API.
pub struct ItunesProvider {
    client: reqwest::Client,
    endpoint: String,
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Track>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Track {
    track_id: Option<i64>,
    track_name: Option<String>,
    artist_name: Option<String>,
    artwork_url100: Option<String>,
    artwork_url60: Option<String>,
    description: Option<String>,
    release_date: Option<String>,
    genres: Option<Vec<String>>,
}

impl ItunesProvider {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            endpoint: config.itunes_endpoint.clone(),
            limit: config.itunes_limit,
        }
    }

    async fn fetch(&self, query: &str) -> ProviderResult<Vec<Book>> {
        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("term", query),
                ("entity", "ebook"),
                ("limit", limit.as_str()),
                ("country", "br"),
                ("attribute", "allArtistTerm"),
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

        let data: SearchResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Decode {
                    url: self.endpoint.clone(),
                    source,
                })?;

        Ok(data
            .results
            .into_iter()
            .enumerate()
            .map(|(index, track)| map_track(track, index, query))
            .collect())
    }
}

#[async_trait]
impl BookProvider for ItunesProvider {
    fn source(&self) -> BookSource {
        BookSource::Itunes
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

/// Normalize one store track. `index` backs the record ID when the track
/// has no native ID, keeping IDs unique within the batch.
fn map_track(track: Track, index: usize, query: &str) -> Book {
    let title = track.track_name.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let author = track
        .artist_name
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
    let cover = track
        .artwork_url100
        .map(|url| url.replace("100x100", "300x300"))
        .or_else(|| {
            track
                .artwork_url60
                .map(|url| url.replace("60x60", "300x300"))
        })
        .unwrap_or_else(|| placeholder_cover(&title));

    let id = match track.track_id {
        Some(track_id) => format!("itunes-{track_id}"),
        None => format!("itunes-{index}"),
    };

    let relevance_score = relevance(&title, &author, UNKNOWN_PUBLISHER, query);

    Book {
        id,
        title,
        author,
        cover,
        description: track
            .description
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        publisher: UNKNOWN_PUBLISHER.to_string(),
        published_date: track
            .release_date
            .as_deref()
            .and_then(release_year)
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        page_count: 0,
        categories: track
            .genres
            .map(|genres| genres.into_iter().take(3).collect())
            .unwrap_or_default(),
        isbn: String::new(),
        source: BookSource::Itunes,
        relevance_score,
    }
}

/// Extract the year from an ISO-8601 release timestamp.
fn release_year(date: &str) -> Option<String> {
    let year = date.split('-').next()?;
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Some(year.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_track(json: &str) -> Track {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn maps_track_and_upgrades_artwork() {
        let track = parse_track(
            r#"{
                "trackId": 98765,
                "trackName": "Capitães da Areia",
                "artistName": "Jorge Amado",
                "artworkUrl100": "https://is1.mzstatic.com/image/100x100bb.jpg",
                "releaseDate": "2008-06-12T07:00:00Z",
                "genres": ["Fiction", "Classics", "Brazil", "Extra"]
            }"#,
        );
        let book = map_track(track, 0, "capitães da areia");

        assert_eq!(book.id, "itunes-98765");
        assert_eq!(book.cover, "https://is1.mzstatic.com/image/300x300bb.jpg");
        assert_eq!(book.published_date, "2008");
        assert_eq!(book.categories.len(), 3);
        assert_eq!(book.page_count, 0);
        assert!(book.isbn.is_empty());
    }

    #[test]
    fn falls_back_to_small_artwork() {
        let track = parse_track(
            r#"{"trackId": 1, "trackName": "T", "artworkUrl60": "https://x/60x60bb.jpg"}"#,
        );
        assert_eq!(map_track(track, 0, "t").cover, "https://x/300x300bb.jpg");
    }

    #[test]
    fn missing_track_id_uses_batch_index() {
        let track = parse_track(r#"{"trackName": "T"}"#);
        assert_eq!(map_track(track, 7, "q").id, "itunes-7");
    }

    #[test]
    fn missing_fields_default_to_sentinels() {
        let track = parse_track("{}");
        let book = map_track(track, 0, "q");
        assert_eq!(book.title, UNKNOWN_TITLE);
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.publisher, UNKNOWN_PUBLISHER);
        assert_eq!(book.published_date, UNKNOWN_DATE);
        assert_eq!(book.description, NO_DESCRIPTION);
        assert!(book.cover.contains("via.placeholder.com"));
    }

    #[test]
    fn release_year_rejects_garbage() {
        assert_eq!(release_year("2011-03-15T07:00:00Z").as_deref(), Some("2011"));
        assert_eq!(release_year("not a date"), None);
    }
}
