//! # Catalog Errors
//!
//! Errors raised while loading a meter catalog from configuration. Errors
//! in the catalog's content (duplicates, bad widths) are `SasError`s and
//! are wrapped transparently.

use std::path::PathBuf;

use sas_core::SasError;
use thiserror::Error;

/// Error loading or validating a meter catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The YAML document did not match the catalog schema.
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document did not match the catalog schema.
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported catalog format {0:?}; expected .yaml, .yml, or .json")]
    UnsupportedFormat(String),

    /// The catalog parsed but its content is invalid.
    #[error(transparent)]
    Sas(#[from] SasError),
}

/// Convenience alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
