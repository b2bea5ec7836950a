//! OpenMovies host integration
//!
//! Exposes the catalog scraper through the interface the media browser
//! drives its scrapers with: a registry of named scrapers, each answering
//! blocking `search` and `scrape` calls with the user's scraper options.
//!
//! # Usage
//!
//! ```no_run
//! use openmovies_host::{Metadata, get_scrapers};
//! use serde_json::json;
//!
//! let scrapers = get_scrapers();
//! let scraper = &scrapers["DEFAULT"];
//! let options = json!({ "source": "blender-json" });
//!
//! let hits = scraper.search("big buck", &options)?;
//! if let Some(hit) = hits.first() {
//!     let media = scraper.scrape(&Metadata::from_url(&hit.url), &options)?;
//!     println!("{:?}", media);
//! }
//! # Ok::<(), String>(())
//! ```

use std::collections::BTreeMap;

use openmovies_core::{MediaKind, SearchResult, Selection, Stream};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod commands;

/// Registry key the host resolves when no scraper variant is named
pub const DEFAULT_SCRAPER: &str = "DEFAULT";

/// A search result as the host renders it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub kind: MediaKind,
    pub score: f64,
}

impl From<SearchResult> for SearchHit {
    fn from(result: SearchResult) -> Self {
        Self {
            title: result.entry.title,
            url: result.entry.stream_url,
            kind: result.entry.kind,
            score: result.score,
        }
    }
}

/// What the host passes back when the user picks something
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Metadata {
    pub fn from_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            url: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            url: Some(url.into()),
        }
    }
}

impl From<&Metadata> for Selection {
    fn from(metadata: &Metadata) -> Self {
        Selection {
            query: metadata.query.clone(),
            url: metadata.url.clone(),
        }
    }
}

/// Playable source plus the headers the player has to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

/// Media handed to the host's player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Media {
    /// A single video; the catalog has no episodic content
    Single { source: Source },
}

impl From<Stream> for Media {
    fn from(stream: Stream) -> Self {
        Media::Single {
            source: Source {
                url: stream.url,
                headers: stream.headers,
            },
        }
    }
}

/// Interface the host drives every scraper through
///
/// Calls are blocking and independent; errors are plain messages the
/// host shows to the user.
pub trait Scraper: Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Titles matching `query`
    fn search(&self, query: &str, options: &Value) -> Result<Vec<SearchHit>, String>;

    /// Resolve a pick to something playable
    fn scrape(&self, metadata: &Metadata, options: &Value) -> Result<Media, String>;

    /// Season number to episode count, for series sources
    fn scrape_episodes(&self, _metadata: &Metadata, _options: &Value) -> Option<BTreeMap<u32, u32>> {
        None
    }
}

/// The OpenMovies catalog scraper
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMoviesPlugin;

impl Scraper for OpenMoviesPlugin {
    fn name(&self) -> &str {
        "OpenMovies"
    }

    fn search(&self, query: &str, options: &Value) -> Result<Vec<SearchHit>, String> {
        commands::search(query, options)
    }

    fn scrape(&self, metadata: &Metadata, options: &Value) -> Result<Media, String> {
        commands::scrape(metadata, options)
    }
}

/// Scrapers this plugin provides, keyed by registry name
///
/// `DEFAULT` lets the host select the plugin without a variant suffix.
pub fn get_scrapers() -> BTreeMap<&'static str, Box<dyn Scraper>> {
    BTreeMap::from([(DEFAULT_SCRAPER, Box::new(OpenMoviesPlugin) as Box<dyn Scraper>)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use openmovies_core::CatalogEntry;
    use serde_json::json;

    #[test]
    fn test_registry_has_default() {
        let scrapers = get_scrapers();
        assert_eq!(scrapers.len(), 1);
        assert_eq!(scrapers[DEFAULT_SCRAPER].name(), "OpenMovies");
    }

    #[test]
    fn test_no_episodes() {
        let plugin = OpenMoviesPlugin;
        assert_eq!(plugin.scrape_episodes(&Metadata::from_query("sintel"), &json!({})), None);
    }

    #[test]
    fn test_search_hit_from_result() {
        let hit = SearchHit::from(SearchResult {
            entry: CatalogEntry {
                title: "Sintel".to_string(),
                stream_url: "https://cdn.test/sintel.webm".to_string(),
                kind: MediaKind::Webm,
            },
            score: 0.9,
        });
        assert_eq!(hit.title, "Sintel");
        assert_eq!(hit.url, "https://cdn.test/sintel.webm");
        assert_eq!(hit.kind, MediaKind::Webm);
    }

    #[test]
    fn test_media_serialization() {
        let media = Media::from(Stream {
            url: "https://cdn.test/a.mp4".to_string(),
            kind: MediaKind::Mp4,
            headers: BTreeMap::from([("User-Agent".to_string(), "mpv".to_string())]),
        });
        let json = serde_json::to_value(&media).expect("Serialization should succeed");
        assert_eq!(
            json,
            json!({
                "type": "single",
                "source": { "url": "https://cdn.test/a.mp4", "headers": { "User-Agent": "mpv" } }
            })
        );
    }

    #[test]
    fn test_metadata_to_selection() {
        let selection = Selection::from(&Metadata::from_url("https://cdn.test/a.mp4"));
        assert!(selection.query.is_empty());
        assert_eq!(selection.url.as_deref(), Some("https://cdn.test/a.mp4"));
    }
}
