//! Loading the game data export.
//!
//! The export is one JSON document with `items` and `recipes` maps. Record
//! shapes are checked here by `serde`; everything downstream assumes
//! well-formed input.

use std::path::Path;

use craftgraph_types::Dataset;
use tracing::info;

/// Errors that can occur when loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Failed to read the dataset file from disk.
    #[error("failed to read dataset: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The document is not valid JSON or a record has the wrong shape.
    #[error("failed to parse dataset JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Load a dataset from a JSON file.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be read, or
/// [`DatasetError::Json`] if it does not parse.
pub fn from_file(path: &Path) -> Result<Dataset, DatasetError> {
    let contents = std::fs::read_to_string(path)?;
    let dataset = parse(&contents)?;
    info!(
        path = %path.display(),
        items = dataset.items.len(),
        recipes = dataset.recipes.len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Parse a dataset from a JSON string.
///
/// # Errors
///
/// Returns [`DatasetError::Json`] if the string does not parse.
pub fn parse(json: &str) -> Result<Dataset, DatasetError> {
    Ok(serde_json::from_str(json)?)
}
