//! Validating many decoded records at once.
//!
//! The model factories reject one record at a time. What to do with a bad
//! record inside a larger response is the caller's decision, expressed here
//! as a [`BatchPolicy`]:
//!
//! - [`BatchPolicy::SkipInvalid`]: keep going, collect every rejection
//! - [`BatchPolicy::AbortOnFirst`]: stop at the first rejection
//!
//! Unlike the models, this layer logs: every rejected record is reported at
//! `warn` with its index, field and (truncated) raw value.

use crate::models::{Article, ArticleError, FieldError, Source, SourceError};
use crate::records::{ArticleRecord, SourceRecord};
use crate::utils::truncate_for_log;
use clap::ValueEnum;
use itertools::{Either, Itertools};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Longest raw value echoed into a log line.
const LOG_VALUE_MAX: usize = 120;

/// What to do when a record in a batch fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BatchPolicy {
    /// Drop invalid records and report them alongside the valid ones.
    #[default]
    #[value(name = "skip")]
    SkipInvalid,
    /// Fail the whole batch on the first invalid record.
    #[value(name = "abort")]
    AbortOnFirst,
}

/// Why a single record in a batch was rejected.
#[derive(Debug, Error)]
pub enum RecordError<E> {
    /// The JSON value does not have the shape of a record.
    #[error("malformed record: {0}")]
    Decode(#[source] serde_json::Error),
    /// The record decoded but failed entity validation.
    #[error("{0}")]
    Invalid(E),
}

impl<E: FieldError> RecordError<E> {
    /// Field that failed, when the record got as far as validation.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RecordError::Decode(_) => None,
            RecordError::Invalid(e) => Some(e.field()),
        }
    }
}

/// A rejected record and its position in the input.
#[derive(Debug, Error)]
#[error("record {index}: {error}")]
pub struct Rejected<E> {
    pub index: usize,
    pub error: RecordError<E>,
}

/// Outcome of a batch validated with [`BatchPolicy::SkipInvalid`].
#[derive(Debug)]
pub struct BatchReport<T, E> {
    /// Valid entities, in input order.
    pub valid: Vec<T>,
    /// Rejected records, in input order.
    pub rejected: Vec<Rejected<E>>,
}

impl<T, E> BatchReport<T, E> {
    pub fn total(&self) -> usize {
        self.valid.len() + self.rejected.len()
    }

    /// True when no record was rejected.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Decode and validate every value with `convert`, applying `policy`.
///
/// # Errors
///
/// With [`BatchPolicy::AbortOnFirst`], returns the first [`Rejected`] record.
/// With [`BatchPolicy::SkipInvalid`] this never fails.
#[instrument(level = "info", skip_all, fields(total = values.len(), ?policy))]
pub fn validate_batch_with<R, T, E, F>(
    values: Vec<Value>,
    policy: BatchPolicy,
    mut convert: F,
) -> Result<BatchReport<T, E>, Rejected<E>>
where
    R: DeserializeOwned,
    E: FieldError,
    F: FnMut(R) -> Result<T, E>,
{
    let mut check = |index: usize, value: Value| -> Result<T, Rejected<E>> {
        let record = serde_json::from_value::<R>(value).map_err(|e| Rejected {
            index,
            error: RecordError::Decode(e),
        })?;
        convert(record).map_err(|e| Rejected {
            index,
            error: RecordError::Invalid(e),
        })
    };

    let report = match policy {
        BatchPolicy::SkipInvalid => {
            let (valid, rejected): (Vec<T>, Vec<Rejected<E>>) = values
                .into_iter()
                .enumerate()
                .map(|(index, value)| check(index, value))
                .partition_map(|outcome| match outcome {
                    Ok(entity) => Either::Left(entity),
                    Err(rejected) => Either::Right(rejected),
                });
            for rejected in &rejected {
                log_rejected(rejected);
            }
            BatchReport { valid, rejected }
        }
        BatchPolicy::AbortOnFirst => {
            let valid = values
                .into_iter()
                .enumerate()
                .map(|(index, value)| check(index, value))
                .collect::<Result<Vec<T>, Rejected<E>>>()
                .inspect_err(log_rejected)?;
            BatchReport {
                valid,
                rejected: Vec::new(),
            }
        }
    };

    info!(
        valid = report.valid.len(),
        rejected = report.rejected.len(),
        "Validated batch"
    );
    Ok(report)
}

/// [`validate_batch_with`] using the entity's `TryFrom<Record>` conversion.
pub fn validate_batch<R, T, E>(
    values: Vec<Value>,
    policy: BatchPolicy,
) -> Result<BatchReport<T, E>, Rejected<E>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = E>,
    E: FieldError,
{
    validate_batch_with(values, policy, T::try_from)
}

/// Validate a list of source objects.
pub fn validate_sources(
    values: Vec<Value>,
    policy: BatchPolicy,
) -> Result<BatchReport<Source, SourceError>, Rejected<SourceError>> {
    validate_batch::<SourceRecord, Source, SourceError>(values, policy)
}

/// Validate a list of article objects.
///
/// When `source_id` is given it is attached to every record before
/// validation, overriding any `sourceId` already present.
pub fn validate_articles(
    values: Vec<Value>,
    source_id: Option<&str>,
    policy: BatchPolicy,
) -> Result<BatchReport<Article, ArticleError>, Rejected<ArticleError>> {
    validate_batch_with(values, policy, |record: ArticleRecord| {
        let record = match source_id {
            Some(id) => record.with_source_id(id),
            None => record,
        };
        Article::from_record(record)
    })
}

fn log_rejected<E: FieldError>(rejected: &Rejected<E>) {
    match &rejected.error {
        RecordError::Decode(e) => {
            warn!(index = rejected.index, error = %e, "Skipping malformed record");
        }
        RecordError::Invalid(e) => {
            warn!(
                index = rejected.index,
                field = e.field(),
                value = %truncate_for_log(e.value(), LOG_VALUE_MAX),
                error = %e,
                "Record failed validation"
            );
        }
    }
}
