//! # newsapi_models
//!
//! Typed, validated models for the [NewsAPI.org](https://newsapi.org) news
//! aggregation API.
//!
//! The API hands back loosely typed JSON: URLs, dates and enumerations all
//! arrive as strings. This crate turns each raw record into a strongly typed
//! entity, or tells you exactly which field was wrong and what it contained.
//!
//! ## Layout
//!
//! - [`records`]: raw wire records ([`SourceRecord`], [`ArticleRecord`])
//! - [`models`]: the validated [`Source`] and [`Article`] entities, their
//!   closed enumerations and error types
//! - [`batch`]: validating a whole list of records under a skip or abort
//!   policy
//! - [`outputs`]: writing validated entities back out as JSON
//! - [`utils`]: URL validation and small helpers
//!
//! ## Example
//!
//! ```
//! use newsapi_models::{Article, ArticleError, ArticleRecord};
//!
//! let record = ArticleRecord {
//!     source_id: "the-next-web".into(),
//!     author: "Arno Nijhof".into(),
//!     title: "The hunt for the fastest growing company of Europe starts now".into(),
//!     description: String::new(),
//!     url: "http://thenextweb.com/insider/".into(),
//!     url_to_image: "https://cdn3.tnwcdn.com/Banner-Tech5.png".into(),
//!     published_at: "badDate".into(),
//! };
//!
//! assert_eq!(
//!     Article::from_record(record),
//!     Err(ArticleError::InvalidPublishedAtDate("badDate".into()))
//! );
//! ```

pub mod batch;
pub mod models;
pub mod outputs;
pub mod records;
pub mod utils;

pub use batch::{BatchPolicy, BatchReport, RecordError, Rejected};
pub use models::{
    Article, ArticleError, Category, Country, FieldError, Language, LogoSize, SortBy, Source,
    SourceError, UnknownToken,
};
pub use records::{ArticleRecord, SourceRecord};
