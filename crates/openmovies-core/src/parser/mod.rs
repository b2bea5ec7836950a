//! Catalog parsers
//!
//! One module per catalog mode. [`CatalogParser`] picks the right one
//! from the configuration and is the only thing the scraper talks to.

pub mod css;
pub mod html_list;
pub mod json;

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use crate::config::CatalogConfig;
use crate::error::{FetchFailure, Result};
use crate::types::{CatalogEntry, CatalogMode};
use crate::url::{media_kind_of, resolve_stream_url};

pub use css::{CssSelectors, parse_css_catalog};
pub use html_list::parse_html_list;
pub use json::parse_json_catalog;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn normalize_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Parsing strategy for one catalog mode
#[derive(Debug, Clone)]
pub enum CatalogParser {
    BlenderJson,
    HtmlList,
    Css(CssSelectors),
}

impl CatalogParser {
    /// Builds the parser the configuration asks for
    ///
    /// # Errors
    /// `InvalidConfig` when `css` mode lacks an item selector or a
    /// selector does not parse
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Ok(match config.mode {
            CatalogMode::BlenderJson => Self::BlenderJson,
            CatalogMode::HtmlList => Self::HtmlList,
            CatalogMode::Css => Self::Css(CssSelectors::from_config(config)?),
        })
    }

    pub fn mode(&self) -> CatalogMode {
        match self {
            Self::BlenderJson => CatalogMode::BlenderJson,
            Self::HtmlList => CatalogMode::HtmlList,
            Self::Css(_) => CatalogMode::Css,
        }
    }

    /// Turns a fetched document into catalog entries, in document order
    ///
    /// # Errors
    /// `FetchFailure::Malformed` when a JSON body is not a catalog. HTML
    /// never fails; it simply yields no entries.
    pub fn parse(&self, body: &str, base: &Url) -> std::result::Result<Vec<CatalogEntry>, FetchFailure> {
        match self {
            Self::BlenderJson => parse_json_catalog(body, base),
            Self::HtmlList => Ok(parse_html_list(body, base)),
            Self::Css(selectors) => Ok(parse_css_catalog(body, base, selectors)),
        }
    }
}

/// Validates one raw item and turns it into an entry
///
/// Drops items with an empty title or a link that does not resolve to an
/// absolute http(s) URL. With `require_media`, links without a known
/// media extension are dropped too; otherwise their kind defaults to MP4.
pub(crate) fn build_entry(title: &str, href: &str, base: &Url, require_media: bool) -> Option<CatalogEntry> {
    let title = normalize_text(title);
    if title.is_empty() {
        tracing::debug!(href, "dropping catalog item without title");
        return None;
    }

    let Some(url) = resolve_stream_url(base, href) else {
        tracing::debug!(%title, href, "dropping catalog item with invalid url");
        return None;
    };

    let kind = match media_kind_of(&url) {
        Some(kind) => kind,
        None if require_media => return None,
        None => Default::default(),
    };

    Some(CatalogEntry {
        title,
        stream_url: url.to_string(),
        kind,
    })
}
