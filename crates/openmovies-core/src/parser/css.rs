//! CSS selector parser (`css` mode)
//!
//! Items are picked with a configured selector; the title and link are
//! then looked up inside each item.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::config::CatalogConfig;
use crate::error::{OpenMoviesError, Result};
use crate::types::CatalogEntry;

use super::{build_entry, normalize_text};

/// Compiled selectors for `css` mode
#[derive(Debug, Clone)]
pub struct CssSelectors {
    item: Selector,
    title: Option<Selector>,
    fallback_link: Selector,
    href_attr: String,
}

impl CssSelectors {
    /// Compiles the item and title selectors
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the item selector is missing or either
    /// selector is not valid CSS
    pub fn new(item: &str, title: Option<&str>, href_attr: &str) -> Result<Self> {
        let item = item.trim();
        if item.is_empty() {
            return Err(OpenMoviesError::InvalidConfig(
                "css mode requires an item selector".to_string(),
            ));
        }

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(compile)
            .transpose()?;

        Ok(Self {
            item: compile(item)?,
            title,
            fallback_link: compile("a[href]")?,
            href_attr: href_attr.to_string(),
        })
    }

    /// Compiles the selectors named in the scraper options
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::new(
            config.css_link_selector.as_deref().unwrap_or_default(),
            config.css_title_selector.as_deref(),
            config.href_attr(),
        )
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        OpenMoviesError::InvalidConfig(format!("Invalid selector {:?}: {:?}", selector, e))
    })
}

/// Extracts entries from an HTML page using the configured selectors
///
/// # Arguments
/// * `html` - Raw HTML of the catalog page
/// * `base` - Page URL, used to resolve relative links
/// * `selectors` - Compiled item/title selectors
///
/// # Returns
/// Entries in document order. Items without any link are skipped; items
/// without a title fall back to their own text, then to the raw link.
pub fn parse_css_catalog(html: &str, base: &Url, selectors: &CssSelectors) -> Vec<CatalogEntry> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.item)
        .filter_map(|item| parse_item(&item, base, selectors))
        .collect()
}

fn parse_item(item: &ElementRef, base: &Url, selectors: &CssSelectors) -> Option<CatalogEntry> {
    let href = item_link(item, selectors)?;

    let title = selectors
        .title
        .as_ref()
        .and_then(|title| item.select(title).next())
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
        .or_else(|| Some(element_text(item)).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| href.to_string());

    build_entry(&title, href, base, false)
}

/// Link of an item: configured attribute, then `href`, then first nested anchor
fn item_link<'a>(item: &ElementRef<'a>, selectors: &CssSelectors) -> Option<&'a str> {
    let element = item.value();
    let non_empty = |href: &&str| !href.trim().is_empty();
    element
        .attr(&selectors.href_attr)
        .filter(non_empty)
        .or_else(|| element.attr("href").filter(non_empty))
        .or_else(|| {
            item.select(&selectors.fallback_link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .filter(non_empty)
        })
}

fn element_text(element: &ElementRef) -> String {
    normalize_text(&element.text().collect::<String>())
}
