//! Error types for the OpenMovies scraper
//!
//! Provides a single error enum with human-readable messages and
//! string serialization for the host plugin layer.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::CatalogMode;

/// Error type for all OpenMovies scraper operations
///
/// Implements Display for human-readable messages and Serialize
/// so the host can render errors without knowing the variants.
#[derive(Error, Debug)]
pub enum OpenMoviesError {
    /// Fetching or parsing the catalog failed
    #[error("Failed to fetch {mode} catalog from {url}: {reason}")]
    FetchError {
        mode: CatalogMode,
        url: String,
        #[source]
        reason: FetchFailure,
    },

    /// No catalog entry scored above the match threshold
    #[error("No catalog entry matches: {0}")]
    NotFound(String),

    /// Scraper options are incomplete or contradictory
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Reason a single catalog request failed
#[derive(Error, Debug)]
pub enum FetchFailure {
    /// Transport-level failure (DNS, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Body does not have the shape the selected mode expects
    #[error("malformed catalog: {0}")]
    Malformed(String),
}

impl OpenMoviesError {
    /// Wraps a [`FetchFailure`] with the mode and URL it happened under
    pub fn fetch(mode: CatalogMode, url: impl Into<String>, reason: FetchFailure) -> Self {
        Self::FetchError {
            mode,
            url: url.into(),
            reason,
        }
    }
}

impl Serialize for OpenMoviesError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for OpenMovies operations
pub type Result<T> = std::result::Result<T, OpenMoviesError>;
