//! Scraper options
//!
//! Typed form of the key/value options object the host passes in,
//! including the short option names (`source`, `url`, `item_selector`).

use std::collections::BTreeMap;

use reqwest::Url;
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ClientConfig;
use crate::error::{OpenMoviesError, Result};
use crate::types::CatalogMode;
use crate::url::{DEFAULT_CATALOG_URL, parse_source_url};

const DEFAULT_HREF_ATTR: &str = "href";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Option names paired with their short forms
const OPTION_ALIASES: [(&str, &str); 4] = [
    ("mode", "source"),
    ("source_url", "url"),
    ("css_link_selector", "item_selector"),
    ("css_title_selector", "title_selector"),
];

/// Where the catalog lives and how to read it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Parsing strategy (option name `source` is accepted too)
    #[serde(default, alias = "source")]
    pub mode: CatalogMode,

    /// Catalog location; optional for `blender-json` only
    #[serde(default, alias = "url")]
    pub source_url: Option<String>,

    /// CSS selector for catalog items (`css` mode)
    #[serde(default, alias = "item_selector")]
    pub css_link_selector: Option<String>,

    /// CSS selector for the title inside an item (`css` mode)
    #[serde(default, alias = "title_selector")]
    pub css_title_selector: Option<String>,

    /// Attribute holding the stream link on an item (`css` mode)
    #[serde(default = "default_href_attr")]
    pub href_attr: String,

    /// Extra request headers, also forwarded to the player
    #[serde(default, deserialize_with = "deserialize_headers")]
    pub headers: BTreeMap<String, String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_href_attr() -> String {
    DEFAULT_HREF_ATTR.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            mode: CatalogMode::default(),
            source_url: None,
            css_link_selector: None,
            css_title_selector: None,
            href_attr: default_href_attr(),
            headers: BTreeMap::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CatalogConfig {
    /// Config for `mode` reading from `source_url`, everything else default
    pub fn new(mode: CatalogMode, source_url: impl Into<String>) -> Self {
        Self {
            mode,
            source_url: Some(source_url.into()),
            ..Self::default()
        }
    }

    /// Decodes host options
    ///
    /// When an option is given under both its full and its short name, the
    /// full name wins and the short one is ignored.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the options are not an object or a
    /// field has the wrong type (e.g. an unknown mode)
    pub fn from_options(mut options: Value) -> Result<Self> {
        if let Value::Object(map) = &mut options {
            for (name, alias) in OPTION_ALIASES {
                if map.contains_key(name) && map.remove(alias).is_some() {
                    tracing::warn!(option = name, alias, "option set twice, ignoring the short name");
                }
            }
        }
        serde_json::from_value(options)
            .map_err(|e| OpenMoviesError::InvalidConfig(e.to_string()))
    }

    /// Resolves the catalog URL for the configured mode
    ///
    /// # Errors
    /// - `InvalidConfig` if no URL is set and the mode has no default
    /// - `InvalidUrl` if the URL is not an absolute http(s) URL
    pub fn source_url(&self) -> Result<Url> {
        match self.source_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => parse_source_url(url),
            _ if self.mode == CatalogMode::BlenderJson => parse_source_url(DEFAULT_CATALOG_URL),
            _ => Err(OpenMoviesError::InvalidConfig(format!(
                "{} mode requires a source url",
                self.mode
            ))),
        }
    }

    /// Attribute to read item links from, falling back to `href`
    pub fn href_attr(&self) -> &str {
        match self.href_attr.trim() {
            "" => DEFAULT_HREF_ATTR,
            attr => attr,
        }
    }

    /// Transport settings derived from these options
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout_secs: self.timeout_secs,
            headers: self.headers.clone(),
            ..ClientConfig::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HeaderOption {
    Map(BTreeMap<String, Value>),
    Encoded(String),
    Other(IgnoredAny),
}

/// Accepts headers as an object or as a JSON-encoded object string
///
/// Anything unusable is ignored rather than failing the whole config.
fn deserialize_headers<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = match HeaderOption::deserialize(deserializer)? {
        HeaderOption::Map(map) => map,
        HeaderOption::Encoded(raw) if raw.trim().is_empty() => BTreeMap::new(),
        HeaderOption::Encoded(raw) => match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring headers option that is not a JSON object");
                BTreeMap::new()
            }
        },
        HeaderOption::Other(_) => {
            tracing::warn!("ignoring headers option of unsupported type");
            BTreeMap::new()
        }
    };

    Ok(map
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(s) => (name, s),
            other => (name, other.to_string()),
        })
        .collect())
}
