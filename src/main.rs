//! # newsapi-models
//!
//! Validates a dump of raw NewsAPI.org records against the typed models in
//! the `newsapi_models` library and reports which records are usable.
//!
//! ## Usage
//!
//! ```sh
//! newsapi-models -i sources.json -o ./out
//! ```
//!
//! ## Pipeline
//!
//! 1. **Reading**: load a JSON array of source or article objects
//! 2. **Validating**: run every record through its entity factory under the
//!    chosen skip/abort policy
//! 3. **Output**: log a report and optionally write the valid entities as JSON

use clap::Parser;
use newsapi_models::batch::{self, BatchReport, Rejected};
use newsapi_models::models::FieldError;
use newsapi_models::outputs::json;
use newsapi_models::utils::ensure_writable_dir;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, EntityKind};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsapi-models starting up");

    let args = Cli::parse();
    debug!(?args.input, ?args.kind, ?args.policy, ?args.output_dir, "Parsed CLI arguments");

    // Early check: fail before validating anything if we can't write results.
    if let Some(output_dir) = &args.output_dir {
        if let Err(e) = ensure_writable_dir(output_dir).await {
            error!(
                path = %output_dir.display(),
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Read input ----
    let text = match tokio::fs::read_to_string(&args.input).await {
        Ok(text) => text,
        Err(e) => {
            error!(path = %args.input.display(), error = %e, "Failed to read input file");
            return Err(e.into());
        }
    };
    let values: Vec<Value> = match serde_json::from_str(&text) {
        Ok(values) => values,
        Err(e) => {
            error!(path = %args.input.display(), error = %e, "Input is not a JSON array of records");
            return Err(e.into());
        }
    };
    info!(count = values.len(), kind = args.kind.as_str(), "Loaded records");

    // ---- Validate and write ----
    match args.kind {
        EntityKind::Sources => {
            if args.source_id.is_some() {
                warn!("--source-id only applies to articles; ignoring");
            }
            let outcome = batch::validate_sources(values, args.policy);
            finish(outcome, args.kind, args.output_dir.as_deref()).await?;
        }
        EntityKind::Articles => {
            let outcome = batch::validate_articles(values, args.source_id.as_deref(), args.policy);
            finish(outcome, args.kind, args.output_dir.as_deref()).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Report a validated batch and write its valid entities if asked to.
async fn finish<T, E>(
    outcome: Result<BatchReport<T, E>, Rejected<E>>,
    kind: EntityKind,
    output_dir: Option<&Path>,
) -> Result<(), Box<dyn Error>>
where
    T: Serialize,
    E: FieldError + 'static,
{
    let report = match outcome {
        Ok(report) => report,
        Err(rejected) => {
            error!(
                index = rejected.index,
                field = rejected.error.field().unwrap_or("-"),
                error = %rejected.error,
                "Aborting batch on invalid record"
            );
            return Err(rejected.into());
        }
    };

    info!(
        kind = kind.as_str(),
        total = report.total(),
        valid = report.valid.len(),
        rejected = report.rejected.len(),
        "Validation complete"
    );

    if let Some(output_dir) = output_dir {
        match json::write_entities(&report.valid, output_dir, kind.as_str()).await {
            Ok(path) => info!(path = %path.display(), "Wrote validated entities"),
            Err(e) => {
                error!(error = %e, "Failed to write validated entities");
                return Err(e);
            }
        }
    }

    Ok(())
}
