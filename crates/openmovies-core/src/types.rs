//! Core data types for the OpenMovies scraper
//!
//! Contains the catalog, search and stream structures shared by the
//! parsers, the resolver and the host adapter.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OpenMoviesError;

/// Container format of a playable stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Progressive MP4 (also the fallback for unknown extensions)
    #[default]
    Mp4,
    /// WebM
    Webm,
    /// HLS playlist (`.m3u8`)
    Hls,
}

impl MediaKind {
    /// Maps a file extension (without the dot) to a media kind
    ///
    /// Returns `None` for extensions that are not playable media.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp4" | "m4v" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            "m3u8" => Some(Self::Hls),
            _ => None,
        }
    }
}

/// Strategy used to turn the raw catalog body into entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum CatalogMode {
    /// JSON array of `{ "title", "url" }` objects
    #[default]
    BlenderJson,
    /// Every media link on an HTML page
    HtmlList,
    /// Items picked out of an HTML page with CSS selectors
    Css,
}

impl CatalogMode {
    /// Configuration name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlenderJson => "blender-json",
            Self::HtmlList => "html-list",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for CatalogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogMode {
    type Err = OpenMoviesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blender-json" => Ok(Self::BlenderJson),
            "html-list" => Ok(Self::HtmlList),
            "css" => Ok(Self::Css),
            other => Err(OpenMoviesError::InvalidConfig(format!(
                "unknown catalog mode \"{}\" (expected blender-json, html-list or css)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for CatalogMode {
    type Error = OpenMoviesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single playable title from the catalog
///
/// Only built by the parsers, which guarantee a non-empty title and an
/// absolute http(s) `stream_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display title, whitespace-normalized
    pub title: String,

    /// Absolute URL of the media file or playlist
    pub stream_url: String,

    /// Container format inferred from the URL
    pub kind: MediaKind,
}

/// A catalog entry ranked against a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub entry: CatalogEntry,

    /// Normalized similarity in `[0, 1]`
    pub score: f64,
}

/// What the user picked in the host UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Free-text query the user typed
    #[serde(default)]
    pub query: String,

    /// URL of a previously returned search result, if any
    #[serde(default)]
    pub url: Option<String>,
}

/// Resolved playable source handed back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub url: String,
    pub kind: MediaKind,

    /// Request headers the player must send (User-Agent, Referer, ...)
    pub headers: BTreeMap<String, String>,
}
