//! Raw, unvalidated records as NewsAPI.org sends them.
//!
//! These structs only rename wire fields; they hold plain strings and do no
//! checking of their own. Turn them into entities with
//! [`Source::from_record`](crate::models::Source::from_record) and
//! [`Article::from_record`](crate::models::Article::from_record).
//!
//! # Field mapping
//!
//! | Wire field         | Record field          |
//! |--------------------|-----------------------|
//! | `urls`             | `logo_urls`           |
//! | `sortBysAvailable` | `available_sort_bys`  |
//! | `urlToImage`       | `url_to_image`        |
//! | `publishedAt`      | `published_at`        |

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// One source object from the `/sources` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub language: String,
    pub country: String,
    /// Logo size key (`small`, `medium`, `large`) to logo URL.
    #[serde(rename = "urls", default)]
    pub logo_urls: HashMap<String, String>,
    #[serde(rename = "sortBysAvailable", default)]
    pub available_sort_bys: Vec<String>,
}

/// One article object from the `/articles` endpoint.
///
/// The API leaves `author` and `description` as `null` when it has nothing,
/// so the free-text fields read `null` (or a missing key) as `""`. URL and
/// date fields must be present strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    /// Not part of the article object itself; the caller fills it in from the
    /// source it queried.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub url: String,
    pub url_to_image: String,
    pub published_at: String,
}

impl ArticleRecord {
    /// Attach the id of the source the article was fetched from.
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_record_maps_wire_names() {
        let json = r#"{
            "id": "bbc-news",
            "name": "BBC News",
            "description": "Use BBC News for up-to-the-minute news.",
            "url": "http://www.bbc.co.uk/news",
            "category": "general",
            "language": "en",
            "country": "gb",
            "urls": {
                "small": "http://i.newsapi.org/bbc-news-s.png",
                "medium": "http://i.newsapi.org/bbc-news-m.png",
                "large": "http://i.newsapi.org/bbc-news-l.png"
            },
            "sortBysAvailable": ["top"]
        }"#;

        let record: SourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "bbc-news");
        assert_eq!(record.logo_urls.len(), 3);
        assert_eq!(
            record.logo_urls.get("medium").map(String::as_str),
            Some("http://i.newsapi.org/bbc-news-m.png")
        );
        assert_eq!(record.available_sort_bys, vec!["top".to_string()]);
    }

    #[test]
    fn test_source_record_defaults_missing_collections() {
        let json = r#"{
            "id": "x", "name": "X", "description": "", "url": "http://x.test",
            "category": "music", "language": "fr", "country": "it"
        }"#;
        let record: SourceRecord = serde_json::from_str(json).unwrap();
        assert!(record.logo_urls.is_empty());
        assert!(record.available_sort_bys.is_empty());
    }

    #[test]
    fn test_source_record_keeps_unknown_tokens_raw() {
        let json = r#"{
            "id": "x", "name": "X", "description": "", "url": "not a url",
            "category": "weather", "language": "xx", "country": "zz",
            "urls": {"huge": "nope"}, "sortBysAvailable": ["oldest"]
        }"#;
        let record: SourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "weather");
        assert_eq!(record.url, "not a url");
    }

    #[test]
    fn test_article_record_reads_null_text_as_empty() {
        let json = r#"{
            "author": null,
            "title": "The hunt for the fastest growing company of Europe starts now",
            "description": null,
            "url": "http://thenextweb.com/insider/",
            "urlToImage": "https://cdn3.tnwcdn.com/Banner-Tech5.png",
            "publishedAt": "2017-01-03T08:49:12Z"
        }"#;
        let record: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.author, "");
        assert_eq!(record.description, "");
        assert_eq!(record.source_id, "");
        assert_eq!(record.url_to_image, "https://cdn3.tnwcdn.com/Banner-Tech5.png");
        assert_eq!(record.published_at, "2017-01-03T08:49:12Z");
    }

    #[test]
    fn test_article_record_requires_url_fields() {
        let json = r#"{
            "author": "a", "title": "t", "description": "d",
            "url": "http://thenextweb.com/", "urlToImage": null,
            "publishedAt": "2017-01-03T08:49:12Z"
        }"#;
        assert!(serde_json::from_str::<ArticleRecord>(json).is_err());
    }

    #[test]
    fn test_with_source_id() {
        let record = ArticleRecord::default().with_source_id("the-next-web");
        assert_eq!(record.source_id, "the-next-web");
    }
}
