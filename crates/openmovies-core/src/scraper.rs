//! Main scraper API
//!
//! Combines the HTTP client, the catalog parsers and the resolver.

use reqwest::Url;

use crate::client::CatalogClient;
use crate::config::CatalogConfig;
use crate::error::{FetchFailure, OpenMoviesError, Result};
use crate::parser::CatalogParser;
use crate::resolver::{self, MATCH_THRESHOLD};
use crate::types::{CatalogEntry, CatalogMode, SearchResult, Selection, Stream};
use crate::url::{infer_media_kind, is_absolute_http_url};

/// Number of catalog entries offered when nothing matches a query
const BROWSE_LIMIT: usize = 10;

/// Fetches and parses a catalog once
///
/// Shorthand for building an [`OpenMoviesScraper`] with default options.
/// `css` mode needs selectors, so use [`OpenMoviesScraper::new`] for it.
///
/// # Errors
/// - `InvalidConfig` for `css` mode
/// - `InvalidUrl` if `source_url` is not an absolute http(s) URL
/// - `FetchError` if the request fails or the body is malformed
pub async fn fetch(mode: CatalogMode, source_url: &str) -> Result<Vec<CatalogEntry>> {
    OpenMoviesScraper::new(CatalogConfig::new(mode, source_url))?
        .fetch_catalog()
        .await
}

/// Main scraper API
///
/// Holds no state between calls besides its configuration: every
/// operation fetches the catalog afresh with a single request.
pub struct OpenMoviesScraper {
    client: CatalogClient,
    parser: CatalogParser,
    source: Url,
}

impl OpenMoviesScraper {
    /// Create a new scraper from scraper options
    ///
    /// # Errors
    /// - `InvalidConfig` if a required option is missing, a selector is
    ///   invalid or a header cannot be sent
    /// - `InvalidUrl` if the source URL is not an absolute http(s) URL
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let source = config.source_url()?;
        let parser = CatalogParser::from_config(&config)?;
        let client = CatalogClient::with_config(config.client_config())?;
        Ok(Self {
            client,
            parser,
            source,
        })
    }

    /// Catalog mode this scraper parses with
    pub fn mode(&self) -> CatalogMode {
        self.parser.mode()
    }

    /// URL the catalog is fetched from
    pub fn source_url(&self) -> &Url {
        &self.source
    }

    /// Fetches the catalog and parses it into entries
    ///
    /// # Errors
    /// `FetchError` carrying the mode and URL if the request fails, the
    /// status is not 200 or the body is malformed for the mode
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        let mode = self.mode();
        let fetch_error = |reason: FetchFailure| OpenMoviesError::fetch(mode, self.source.as_str(), reason);

        let body = self.client.fetch(&self.source).await.map_err(fetch_error)?;
        let entries = self.parser.parse(&body, &self.source).map_err(fetch_error)?;

        tracing::debug!(%mode, url = %self.source, count = entries.len(), "catalog parsed");
        Ok(entries)
    }

    /// Search the catalog by title
    ///
    /// # Arguments
    /// * `query` - Free-text query; empty returns the whole catalog
    ///
    /// # Returns
    /// Entries scoring above the match threshold, best first. When none
    /// qualify, the first entries of the catalog in catalog order so the
    /// user still has something to pick from.
    ///
    /// # Errors
    /// `FetchError` if the catalog cannot be fetched
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> openmovies_core::Result<()> {
    /// use openmovies_core::{CatalogConfig, OpenMoviesScraper};
    /// let scraper = OpenMoviesScraper::new(CatalogConfig::default())?;
    /// for result in scraper.search("big buck").await? {
    ///     println!("{:.2} {}: {}", result.score, result.entry.title, result.entry.stream_url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let entries = self.fetch_catalog().await?;
        Ok(rank_or_browse(query, &entries))
    }

    /// Best catalog entry for `query`, if one scores above the threshold
    ///
    /// # Errors
    /// `FetchError` if the catalog cannot be fetched
    pub async fn resolve(&self, query: &str) -> Result<Option<CatalogEntry>> {
        let entries = self.fetch_catalog().await?;
        Ok(resolver::resolve(query, &entries))
    }

    /// Resolve a user selection to a playable stream
    ///
    /// Uses the selection URL when the host passes one back. Otherwise a
    /// query that already is an http(s) URL is played as is, and anything
    /// else is resolved against the catalog.
    ///
    /// # Errors
    /// - `NotFound` if nothing in the catalog matches the query
    /// - `FetchError` if the catalog has to be fetched and that fails
    pub async fn scrape(&self, selection: &Selection) -> Result<Stream> {
        let url = selection
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty());

        let query = selection.query.trim();
        let url = match url {
            Some(url) => url.to_string(),
            None if is_absolute_http_url(query) => query.to_string(),
            None => self
                .resolve(query)
                .await?
                .map(|entry| entry.stream_url)
                .ok_or_else(|| OpenMoviesError::NotFound(query.to_string()))?,
        };

        Ok(Stream {
            kind: infer_media_kind(&url),
            headers: self.client.stream_headers(),
            url,
        })
    }
}

/// Matches above the threshold, or the head of the catalog when none qualify
fn rank_or_browse(query: &str, entries: &[CatalogEntry]) -> Vec<SearchResult> {
    let matches: Vec<SearchResult> = resolver::search(query, entries)
        .into_iter()
        .filter(|result| result.score > MATCH_THRESHOLD)
        .collect();

    if !matches.is_empty() || entries.is_empty() {
        return matches;
    }

    tracing::debug!(query, "no title matched, offering catalog head");
    entries
        .iter()
        .take(BROWSE_LIMIT)
        .map(|entry| SearchResult {
            score: resolver::score(query, &entry.title),
            entry: entry.clone(),
        })
        .collect()
}
