//! OpenMovies Scraper Core Library
//!
//! Fetches a small catalog of freely licensed demo videos, fuzzy-matches
//! titles against a user query and resolves the pick to a direct stream
//! URL (MP4, WebM or HLS).
//!
//! # Overview
//!
//! - Three catalog modes: a JSON list (`blender-json`), every media link
//!   on an HTML page (`html-list`) or CSS-selector extraction (`css`)
//! - Pure, stateless fuzzy resolver ranking titles in `[0, 1]`
//! - One HTTP request per operation, no caching and no retries
//!
//! # Example
//!
//! ```no_run
//! use openmovies_core::{CatalogConfig, OpenMoviesScraper, Result, Selection};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = OpenMoviesScraper::new(CatalogConfig::default())?;
//!
//!     // Search the catalog
//!     let results = scraper.search("big buck").await?;
//!
//!     for result in &results {
//!         println!("{}: {}", result.entry.title, result.entry.stream_url);
//!     }
//!
//!     // Resolve what the user typed to a stream
//!     let stream = scraper
//!         .scrape(&Selection { query: "sintel".to_string(), url: None })
//!         .await?;
//!     println!("play {} with {:?}", stream.url, stream.headers);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
pub mod parser;
pub mod resolver;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{CatalogClient, ClientConfig, USER_AGENT};

// Re-export configuration
pub use config::CatalogConfig;

// Re-export error types
pub use error::{FetchFailure, OpenMoviesError, Result};

// Re-export parser entry points
pub use parser::{CatalogParser, CssSelectors, parse_css_catalog, parse_html_list, parse_json_catalog};

// Re-export resolver functions
pub use resolver::{MATCH_THRESHOLD, resolve, search};

// Re-export main scraper API
pub use crate::scraper::{OpenMoviesScraper, fetch};

// Re-export data types
pub use types::{CatalogEntry, CatalogMode, MediaKind, SearchResult, Selection, Stream};
