//! Command-line interface definitions for the NewsAPI model validator.
//!
//! All arguments can be provided via command-line flags or environment variables.

use clap::{Parser, ValueEnum};
use newsapi_models::batch::BatchPolicy;
use std::path::PathBuf;

/// Which entity the input file holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    /// Source objects, as returned by `/sources`.
    #[default]
    Sources,
    /// Article objects, as returned by `/articles`.
    Articles,
}

impl EntityKind {
    /// Stem used for the output file name.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Sources => "sources",
            EntityKind::Articles => "articles",
        }
    }
}

/// Command-line arguments for the validator.
///
/// # Examples
///
/// ```sh
/// # Validate a dump of /sources records, skipping bad ones
/// newsapi-models -i sources.json
///
/// # Validate articles, stamp their source id, stop on the first bad one
/// newsapi-models -i articles.json -k articles --source-id the-next-web -p abort
///
/// # Write the validated entities to ./out/sources.json
/// newsapi-models -i sources.json -o ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON file holding an array of raw records
    #[arg(short, long, env = "NEWSAPI_INPUT")]
    pub input: PathBuf,

    /// Entity type of the records in the input file
    #[arg(short, long, env = "NEWSAPI_KIND", value_enum, default_value_t = EntityKind::Sources)]
    pub kind: EntityKind,

    /// What to do with records that fail validation
    #[arg(short, long, env = "NEWSAPI_POLICY", value_enum, default_value_t = BatchPolicy::SkipInvalid)]
    pub policy: BatchPolicy,

    /// Source id to attach to every article (articles only)
    #[arg(short, long, env = "NEWSAPI_SOURCE_ID")]
    pub source_id: Option<String>,

    /// Output directory for the validated JSON file
    #[arg(short, long, env = "NEWSAPI_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}
