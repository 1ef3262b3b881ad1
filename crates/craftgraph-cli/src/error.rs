//! Error types for the craftgraph binary.
//!
//! [`CliError`] wraps every failure a subcommand can hit so command
//! functions can propagate with `?`.

use craftgraph_core::{ConfigError, DatasetError};

use crate::fetch::FetchError;

/// Top-level error for the craftgraph binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Dataset loading failed.
    #[error("dataset error: {source}")]
    Dataset {
        /// The underlying dataset error.
        #[from]
        source: DatasetError,
    },

    /// Icon mirroring could not start.
    #[error("icon fetch error: {source}")]
    Fetch {
        /// The underlying fetch error.
        #[from]
        source: FetchError,
    },

    /// Writing output failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing the graph document failed.
    #[error("serialization error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
