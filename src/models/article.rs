//! The validated news [`Article`] entity.

use crate::models::FieldError;
use crate::records::ArticleRecord;
use crate::utils::parse_absolute_url;
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use url::Url;

/// `yyyy-MM-dd'T'HH:mm:ss'Z'`, the only timestamp shape the API emits.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// chrono alone accepts one-digit months, signed years and leap seconds, so
// the exact shape is checked first. Seconds stop at 59.
static PUBLISHED_AT_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-5][0-9]Z$")
        .expect("publishedAt pattern is valid")
});

/// Parse a `publishedAt` timestamp such as `2016-12-16T09:56:38Z`.
///
/// Returns `None` for anything that does not match the pattern exactly:
/// missing seconds, fractional seconds, offsets other than a literal `Z`,
/// surrounding whitespace or impossible calendar values.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    if !PUBLISHED_AT_SHAPE.is_match(raw) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, PUBLISHED_AT_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render an instant in the `publishedAt` wire format.
pub fn format_published_at(instant: &DateTime<Utc>) -> String {
    instant.format(PUBLISHED_AT_FORMAT).to_string()
}

fn serialize_published_at<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_published_at(instant))
}

/// Why an [`ArticleRecord`] could not become an [`Article`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArticleError {
    #[error("invalid article url `{0}`")]
    InvalidUrl(String),
    #[error("invalid article image url `{0}`")]
    InvalidImageUrl(String),
    #[error("invalid publishedAt date `{0}` (expected yyyy-MM-ddTHH:mm:ssZ)")]
    InvalidPublishedAtDate(String),
}

impl FieldError for ArticleError {
    fn field(&self) -> &'static str {
        match self {
            ArticleError::InvalidUrl(_) => "url",
            ArticleError::InvalidImageUrl(_) => "urlToImage",
            ArticleError::InvalidPublishedAtDate(_) => "publishedAt",
        }
    }

    fn value(&self) -> &str {
        match self {
            ArticleError::InvalidUrl(v)
            | ArticleError::InvalidImageUrl(v)
            | ArticleError::InvalidPublishedAtDate(v) => v,
        }
    }
}

/// A single news item attributed to a source, fully validated.
///
/// `source_id` is a plain string copied from the caller; it is not checked
/// against any [`Source`](crate::models::Source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ArticleRecord", rename_all = "camelCase")]
pub struct Article {
    source_id: String,
    author: String,
    title: String,
    description: String,
    url: Url,
    url_to_image: Url,
    #[serde(serialize_with = "serialize_published_at")]
    published_at: DateTime<Utc>,
}

impl Article {
    /// Validate a raw record and build an `Article` from it.
    ///
    /// Checks run in the order url, urlToImage, publishedAt and the first
    /// failure is returned. Free-text fields are copied as-is, empty or not.
    ///
    /// # Errors
    ///
    /// Returns the [`ArticleError`] variant naming the field that failed.
    pub fn from_record(record: ArticleRecord) -> Result<Self, ArticleError> {
        let url = parse_absolute_url(&record.url)
            .ok_or_else(|| ArticleError::InvalidUrl(record.url.clone()))?;
        let url_to_image = parse_absolute_url(&record.url_to_image)
            .ok_or_else(|| ArticleError::InvalidImageUrl(record.url_to_image.clone()))?;
        let published_at = parse_published_at(&record.published_at)
            .ok_or_else(|| ArticleError::InvalidPublishedAtDate(record.published_at.clone()))?;

        Ok(Article {
            source_id: record.source_id,
            author: record.author,
            title: record.title,
            description: record.description,
            url,
            url_to_image,
            published_at,
        })
    }

    /// Id of the source this article was fetched from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Author byline; empty when the API had none.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Headline of the article.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Preface or first part of the body.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Direct link to the article content.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Representative image for the article.
    pub fn url_to_image(&self) -> &Url {
        &self.url_to_image
    }

    /// Publication instant, in UTC.
    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
}

impl TryFrom<ArticleRecord> for Article {
    type Error = ArticleError;

    fn try_from(record: ArticleRecord) -> Result<Self, Self::Error> {
        Article::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn tnw_article() -> ArticleRecord {
        ArticleRecord {
            source_id: "the-next-web".to_string(),
            author: "Arno Nijhof".to_string(),
            title: "The hunt for the fastest growing company of Europe starts now".to_string(),
            description: "Tech5 is a competition in which TNW and Adyen search for the fastest growing tech companies to celebrate their growth. Companies can apply from 1 January.".to_string(),
            url: "http://thenextweb.com/insider/2017/01/03/the-hunt-for-the-fastest-growing-company-of-europe-starts-now/".to_string(),
            url_to_image: "https://cdn3.tnwcdn.com/wp-content/blogs.dir/1/files/2016/12/Banner-Tech5.png".to_string(),
            published_at: "2017-01-03T08:49:12Z".to_string(),
        }
    }

    #[test]
    fn test_article_initialization() {
        let article = Article::from_record(tnw_article()).unwrap();

        assert_eq!(article.source_id(), "the-next-web");
        assert_eq!(article.author(), "Arno Nijhof");
        assert_eq!(
            article.title(),
            "The hunt for the fastest growing company of Europe starts now"
        );
        assert!(article.description().starts_with("Tech5 is a competition"));
        assert_eq!(
            article.url().as_str(),
            "http://thenextweb.com/insider/2017/01/03/the-hunt-for-the-fastest-growing-company-of-europe-starts-now/"
        );
        assert_eq!(
            article.url_to_image().as_str(),
            "https://cdn3.tnwcdn.com/wp-content/blogs.dir/1/files/2016/12/Banner-Tech5.png"
        );
        assert_eq!(
            article.published_at(),
            Utc.with_ymd_and_hms(2017, 1, 3, 8, 49, 12).unwrap()
        );
    }

    #[test]
    fn test_article_initialization_fail_bad_date() {
        let mut record = tnw_article();
        record.published_at = "badDate".to_string();
        let err = Article::from_record(record).unwrap_err();
        assert_eq!(err, ArticleError::InvalidPublishedAtDate("badDate".to_string()));
        assert_eq!(err.field(), "publishedAt");
        assert_eq!(err.value(), "badDate");
    }

    #[test]
    fn test_invalid_url_is_checked_before_image_and_date() {
        let mut record = tnw_article();
        record.url = "thenextweb.com/insider".to_string();
        record.url_to_image = "Banner-Tech5.png".to_string();
        record.published_at = "badDate".to_string();
        assert_eq!(
            Article::from_record(record.clone()),
            Err(ArticleError::InvalidUrl("thenextweb.com/insider".to_string()))
        );

        record.url = "http://thenextweb.com/insider".to_string();
        assert_eq!(
            Article::from_record(record),
            Err(ArticleError::InvalidImageUrl("Banner-Tech5.png".to_string()))
        );
    }

    #[test]
    fn test_malformed_urls_are_not_repaired() {
        for raw in [
            " http://thenextweb.com/insider ",
            "http://thenext\nweb.com/insider",
            "http:thenextweb.com",
            "http:\\\\thenextweb.com\\insider",
        ] {
            let mut record = tnw_article();
            record.url = raw.to_string();
            assert_eq!(
                Article::from_record(record),
                Err(ArticleError::InvalidUrl(raw.to_string()))
            );

            let mut record = tnw_article();
            record.url_to_image = raw.to_string();
            assert_eq!(
                Article::from_record(record),
                Err(ArticleError::InvalidImageUrl(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_empty_free_text_is_accepted() {
        let mut record = tnw_article();
        record.source_id = String::new();
        record.author = String::new();
        record.title = String::new();
        record.description = String::new();
        let article = Article::from_record(record).unwrap();
        assert_eq!(article.author(), "");
        assert_eq!(article.source_id(), "");
    }

    #[test]
    fn test_parse_published_at_accepts_exact_pattern() {
        assert_eq!(
            parse_published_at("2016-12-16T09:56:38Z"),
            Some(Utc.with_ymd_and_hms(2016, 12, 16, 9, 56, 38).unwrap())
        );
        assert_eq!(
            parse_published_at("2016-02-29T23:59:59Z"),
            Some(Utc.with_ymd_and_hms(2016, 2, 29, 23, 59, 59).unwrap())
        );
    }

    #[test]
    fn test_parse_published_at_rejects_variants() {
        for bad in [
            "badDate",
            "",
            "2017-01-03",
            "2017-01-03T08:49Z",
            "2017-01-03T08:49:12",
            "2017-01-03T08:49:12+01:00",
            "2017-01-03T08:49:12+00:00",
            "2017-01-03T08:49:12.000Z",
            "2017-01-03 08:49:12Z",
            "2017/01/03T08:49:12Z",
            "2017-1-03T08:49:12Z",
            "+2017-01-03T08:49:12Z",
            "2017-01-03T08:49:12z",
            " 2017-01-03T08:49:12Z",
            "2017-01-03T08:49:12Z\n",
            "2017-01-03T08:49:60Z",
            "2017-13-03T08:49:12Z",
            "2017-02-30T08:49:12Z",
            "2017-01-03T24:00:00Z",
            "２０17-01-03T08:49:12Z",
        ] {
            assert_eq!(parse_published_at(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn test_format_published_at_matches_wire_format() {
        let instant = Utc.with_ymd_and_hms(2017, 1, 3, 8, 49, 12).unwrap();
        assert_eq!(format_published_at(&instant), "2017-01-03T08:49:12Z");
    }

    #[test]
    fn test_article_serializes_with_wire_names() {
        let article = Article::from_record(tnw_article()).unwrap();
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["sourceId"], "the-next-web");
        assert_eq!(json["publishedAt"], "2017-01-03T08:49:12Z");
        assert_eq!(
            json["urlToImage"],
            "https://cdn3.tnwcdn.com/wp-content/blogs.dir/1/files/2016/12/Banner-Tech5.png"
        );

        let back: Article = serde_json::from_value(json).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn test_article_deserialization_validates() {
        let json = serde_json::json!({
            "author": "Arno Nijhof",
            "title": "t",
            "description": "d",
            "url": "http://thenextweb.com/",
            "urlToImage": "https://cdn3.tnwcdn.com/x.png",
            "publishedAt": "2017-01-03T08:49:12+01:00"
        });
        let err = serde_json::from_value::<Article>(json).unwrap_err();
        assert!(err.to_string().contains("invalid publishedAt date"));
    }

    proptest! {
        #[test]
        fn prop_valid_timestamps_round_trip(
            secs in 0i64..4_102_444_800i64,
        ) {
            let instant = DateTime::from_timestamp(secs, 0).unwrap();
            let raw = format_published_at(&instant);
            prop_assert_eq!(parse_published_at(&raw), Some(instant));
        }

        #[test]
        fn prop_arbitrary_text_without_z_is_rejected(raw in "[^Z]{0,32}") {
            prop_assert_eq!(parse_published_at(&raw), None);
        }

        #[test]
        fn prop_non_absolute_image_urls_are_rejected(raw in "[a-z0-9./-]{0,24}") {
            let mut record = tnw_article();
            record.url_to_image = raw.clone();
            prop_assert_eq!(
                Article::from_record(record),
                Err(ArticleError::InvalidImageUrl(raw))
            );
        }
    }
}
