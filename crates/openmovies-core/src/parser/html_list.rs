//! HTML link-list parser (`html-list` mode)
//!
//! Every `<a href>` pointing at a media file becomes an entry.

use std::sync::LazyLock;

use reqwest::Url;
use scraper::{Html, Selector};

use crate::types::CatalogEntry;

use super::build_entry;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Parses an HTML page into entries, one per media link
///
/// # Arguments
/// * `html` - Raw HTML of the catalog page
/// * `base` - Page URL, used to resolve relative links
///
/// # Returns
/// Entries in document order. Anchors with empty text or a link whose
/// extension is not `.mp4`, `.m4v`, `.webm` or `.m3u8` are skipped.
pub fn parse_html_list(html: &str, base: &Url) -> Vec<CatalogEntry> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let text: String = anchor.text().collect();
            build_entry(&text, href, base, true)
        })
        .collect()
}
