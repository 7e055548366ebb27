//! JSON output of validated entities.
//!
//! Entities are written as a pretty-printed JSON array using the same field
//! names and tokens as the API, so the file can be fed back through the
//! validator unchanged:
//!
//! ```text
//! output_dir/
//! ├── sources.json
//! └── articles.json
//! ```

use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `entities` to `{output_dir}/{kind}.json`.
///
/// Creates `output_dir` if needed and replaces any existing file.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an error if serialization, directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), %kind, count = entities.len()))]
pub async fn write_entities<T: Serialize>(
    entities: &[T],
    output_dir: &Path,
    kind: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(entities)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = output_dir.join(format!("{kind}.json"));
    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON file");

    Ok(path)
}
