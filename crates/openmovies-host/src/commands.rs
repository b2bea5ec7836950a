//! Blocking host commands
//!
//! Each call decodes the scraper options, runs the async core on its
//! own current-thread runtime and turns errors into messages.

use std::future::Future;

use openmovies_core::{CatalogConfig, OpenMoviesError, OpenMoviesScraper, Selection};
use serde_json::{Map, Value};

use crate::{Media, Metadata, SearchHit};

/// Search the configured catalog
///
/// # Arguments
/// * `query` - What the user typed
/// * `options` - Scraper options object from the host config
///
/// # Errors
/// Returns error message as String if the options are invalid or the
/// catalog cannot be fetched
pub fn search(query: &str, options: &Value) -> Result<Vec<SearchHit>, String> {
    let scraper = scraper_for(options)?;
    let results = block_on(scraper.search(query))?.map_err(|e| e.to_string())?;
    Ok(results.into_iter().map(SearchHit::from).collect())
}

/// Resolve the user's pick to a playable source
///
/// # Errors
/// Returns error message as String if nothing matches, the options are
/// invalid or the catalog cannot be fetched
pub fn scrape(metadata: &Metadata, options: &Value) -> Result<Media, String> {
    let scraper = scraper_for(options)?;
    let selection = Selection::from(metadata);
    let stream = block_on(scraper.scrape(&selection))?.map_err(|e| e.to_string())?;
    Ok(Media::from(stream))
}

fn scraper_for(options: &Value) -> Result<OpenMoviesScraper, String> {
    let config = decode_options(options).map_err(|e| e.to_string())?;
    tracing::debug!(mode = %config.mode, "building scraper from host options");
    OpenMoviesScraper::new(config).map_err(|e| e.to_string())
}

/// Decodes host options, treating `null` values as unset
fn decode_options(options: &Value) -> openmovies_core::Result<CatalogConfig> {
    let options = match options {
        Value::Null => Value::Object(Map::new()),
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        _ => {
            return Err(OpenMoviesError::InvalidConfig(
                "scraper options must be an object".to_string(),
            ));
        }
    };
    CatalogConfig::from_options(options)
}

/// Drives `future` to completion on a fresh runtime
///
/// A thread that already runs a Tokio runtime cannot block on another one,
/// so callers inside async code get a short-lived worker thread instead.
fn block_on<F>(future: F) -> Result<F::Output, String>
where
    F: Future + Send,
    F::Output: Send,
{
    if tokio::runtime::Handle::try_current().is_err() {
        return run_to_completion(future);
    }

    tracing::debug!("called from inside a runtime, blocking on a worker thread");
    std::thread::scope(|scope| {
        scope
            .spawn(move || run_to_completion(future))
            .join()
            .map_err(|_| "Scraper worker thread panicked".to_string())?
    })
}

fn run_to_completion<F: Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;
    Ok(runtime.block_on(future))
}
