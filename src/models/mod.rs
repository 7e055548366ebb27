//! Validated domain models for NewsAPI.org data.
//!
//! - [`Source`]: a news publisher, with its closed enumerations
//!   [`Category`], [`Language`], [`Country`], [`LogoSize`] and [`SortBy`]
//! - [`Article`]: a single news item attributed to a source
//!
//! Both are built from raw [`records`](crate::records) and are immutable once
//! constructed. Construction is pure: no I/O, no logging, no shared state.

pub mod article;
pub mod source;
pub mod wire;

pub use article::{Article, ArticleError, format_published_at, parse_published_at};
pub use source::{Category, Country, Language, LogoSize, SortBy, Source, SourceError};
pub use wire::UnknownToken;

/// A validation failure that can name the field and raw value it rejected.
///
/// Implemented by [`SourceError`] and [`ArticleError`] so callers can report
/// either without matching on variants.
pub trait FieldError: std::error::Error {
    /// The wire field that failed validation (e.g. `"publishedAt"`).
    fn field(&self) -> &'static str;

    /// The raw value that was rejected, exactly as received.
    fn value(&self) -> &str;
}
