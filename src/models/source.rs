//! The validated news [`Source`] entity and its closed enumerations.
//!
//! A `Source` is only ever built through [`Source::from_record`] (or the
//! equivalent `TryFrom<SourceRecord>`), which parses every raw field and stops
//! at the first one that fails. There is no partially valid `Source`.

use crate::models::FieldError;
use crate::models::wire::{UnknownToken, wire_enum};
use crate::records::SourceRecord;
use crate::utils::parse_absolute_url;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use url::Url;

wire_enum! {
    /// The topic category a source focuses on.
    pub enum Category as "category" {
        Business => "business",
        Entertainment => "entertainment",
        Gaming => "gaming",
        General => "general",
        Music => "music",
        ScienceAndNature => "science-and-nature",
        Sport => "sport",
        Technology => "technology",
    }
}

impl Category {
    /// Human-readable label, e.g. "Science and Nature".
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::Gaming => "Gaming",
            Category::General => "General",
            Category::Music => "Music",
            Category::ScienceAndNature => "Science and Nature",
            Category::Sport => "Sport",
            Category::Technology => "Technology",
        }
    }
}

wire_enum! {
    /// The 2-letter ISO-639-1 code of the language a source writes in.
    pub enum Language as "language" {
        English => "en",
        German => "de",
        French => "fr",
    }
}

impl Language {
    /// English name of the language.
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::French => "French",
        }
    }
}

wire_enum! {
    /// The 2-letter ISO 3166-1 code of the country a source mainly covers.
    pub enum Country as "country" {
        Australia => "au",
        Germany => "de",
        UnitedKingdom => "gb",
        India => "in",
        Italy => "it",
        UnitedStates => "us",
    }
}

impl Country {
    /// English name of the country.
    pub fn name(self) -> &'static str {
        match self {
            Country::Australia => "Australia",
            Country::Germany => "Germany",
            Country::UnitedKingdom => "United Kingdom",
            Country::India => "India",
            Country::Italy => "Italy",
            Country::UnitedStates => "United States of America",
        }
    }
}

wire_enum! {
    /// The size a source logo is published in.
    pub enum LogoSize as "logo size" {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

impl LogoSize {
    /// Nominal logo width in pixels.
    pub fn pixel_width(self) -> u32 {
        match self {
            LogoSize::Small => 200,
            LogoSize::Medium => 400,
            LogoSize::Large => 600,
        }
    }
}

wire_enum! {
    /// The headline lists a source can be queried for.
    pub enum SortBy as "sort-by" {
        /// The order articles appear on the source homepage.
        Top => "top",
        /// Chronological order, newest first.
        Latest => "latest",
        /// Currently trending headlines.
        Popular => "popular",
    }
}

/// Why a [`SourceRecord`] could not become a [`Source`].
///
/// Every variant carries the offending raw string, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("invalid source url `{0}`")]
    InvalidSourceUrl(String),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),
    #[error("unknown country `{0}`")]
    UnknownCountry(String),
    #[error("unknown logo size `{0}`")]
    UnknownLogoSize(String),
    #[error("invalid logo url `{0}`")]
    InvalidLogoUrl(String),
    #[error("unknown sort-by `{0}`")]
    UnknownSortBy(String),
}

impl FieldError for SourceError {
    fn field(&self) -> &'static str {
        match self {
            SourceError::InvalidSourceUrl(_) => "url",
            SourceError::UnknownCategory(_) => "category",
            SourceError::UnknownLanguage(_) => "language",
            SourceError::UnknownCountry(_) => "country",
            SourceError::UnknownLogoSize(_) | SourceError::InvalidLogoUrl(_) => "urls",
            SourceError::UnknownSortBy(_) => "sortBysAvailable",
        }
    }

    fn value(&self) -> &str {
        match self {
            SourceError::InvalidSourceUrl(v)
            | SourceError::UnknownCategory(v)
            | SourceError::UnknownLanguage(v)
            | SourceError::UnknownCountry(v)
            | SourceError::UnknownLogoSize(v)
            | SourceError::InvalidLogoUrl(v)
            | SourceError::UnknownSortBy(v) => v,
        }
    }
}

/// A news publisher, fully validated.
///
/// Serializes with the same field names and tokens NewsAPI.org uses, and
/// deserializes through [`SourceRecord`] so decoded JSON is always validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SourceRecord")]
pub struct Source {
    id: String,
    name: String,
    description: String,
    url: Url,
    category: Category,
    language: Language,
    country: Country,
    #[serde(rename = "urls")]
    logo_urls: BTreeMap<LogoSize, Url>,
    #[serde(rename = "sortBysAvailable")]
    available_sort_bys: BTreeSet<SortBy>,
}

impl Source {
    /// Validate a raw record and build a `Source` from it.
    ///
    /// Scalar fields are checked in the order url, category, language,
    /// country; then logo entries, then sort criteria. The first failure is
    /// returned. When several logo entries are invalid, which one is reported
    /// depends on the iteration order of the input map.
    ///
    /// # Errors
    ///
    /// Returns the [`SourceError`] variant naming the first field that failed.
    pub fn from_record(record: SourceRecord) -> Result<Self, SourceError> {
        let url = parse_absolute_url(&record.url)
            .ok_or_else(|| SourceError::InvalidSourceUrl(record.url.clone()))?;
        let category = record
            .category
            .parse::<Category>()
            .map_err(|e: UnknownToken| SourceError::UnknownCategory(e.token))?;
        let language = record
            .language
            .parse::<Language>()
            .map_err(|e: UnknownToken| SourceError::UnknownLanguage(e.token))?;
        let country = record
            .country
            .parse::<Country>()
            .map_err(|e: UnknownToken| SourceError::UnknownCountry(e.token))?;

        let logo_urls = record
            .logo_urls
            .iter()
            .map(|(size, logo_url)| {
                let size = size
                    .parse::<LogoSize>()
                    .map_err(|e: UnknownToken| SourceError::UnknownLogoSize(e.token))?;
                let logo_url = parse_absolute_url(logo_url)
                    .ok_or_else(|| SourceError::InvalidLogoUrl(logo_url.clone()))?;
                Ok((size, logo_url))
            })
            .collect::<Result<BTreeMap<_, _>, SourceError>>()?;

        let available_sort_bys = record
            .available_sort_bys
            .iter()
            .map(|sort_by| {
                sort_by
                    .parse::<SortBy>()
                    .map_err(|e: UnknownToken| SourceError::UnknownSortBy(e.token))
            })
            .collect::<Result<BTreeSet<_>, SourceError>>()?;

        Ok(Source {
            id: record.id,
            name: record.name,
            description: record.description,
            url,
            category,
            language,
            country,
            logo_urls,
            available_sort_bys,
        })
    }

    /// Unique identifier, used as `sourceId` when querying articles.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display-friendly name of the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the source covers and specializes in.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Homepage of the source.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Topic category the source focuses on.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Language the source writes in.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Country the source mainly covers.
    pub fn country(&self) -> Country {
        self.country
    }

    /// Every published logo, keyed by size.
    pub fn logo_urls(&self) -> &BTreeMap<LogoSize, Url> {
        &self.logo_urls
    }

    /// Logo URL for one size, if the source published it.
    pub fn logo_url(&self, size: LogoSize) -> Option<&Url> {
        self.logo_urls.get(&size)
    }

    /// Headline lists the source can be queried for.
    pub fn available_sort_bys(&self) -> &BTreeSet<SortBy> {
        &self.available_sort_bys
    }

    /// Whether the source offers the given headline list.
    pub fn supports_sort_by(&self, sort_by: SortBy) -> bool {
        self.available_sort_bys.contains(&sort_by)
    }
}

impl TryFrom<SourceRecord> for Source {
    type Error = SourceError;

    fn try_from(record: SourceRecord) -> Result<Self, Self::Error> {
        Source::from_record(record)
    }
}
