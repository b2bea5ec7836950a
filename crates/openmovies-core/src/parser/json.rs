//! JSON catalog parser (`blender-json` mode)
//!
//! Accepts a plain array of `{ "title", "url" }` objects as well as the
//! sample-video layout (`categories[].videos[]` with a `sources` list).

use reqwest::Url;
use serde_json::Value;

use crate::error::FetchFailure;
use crate::types::CatalogEntry;

use super::build_entry;

/// Parses a JSON catalog document
///
/// # Arguments
/// * `body` - Raw response body
/// * `base` - Catalog URL, used to resolve relative stream links
///
/// # Returns
/// One entry per well-formed item, in input order. Items without a title,
/// without a link or with an unusable link are dropped.
///
/// # Errors
/// Returns `Malformed` if the body is not JSON or has no entry list
pub fn parse_json_catalog(body: &str, base: &Url) -> Result<Vec<CatalogEntry>, FetchFailure> {
    let document = parse_document(body)?;
    let items = catalog_items(document)?;
    let total = items.len();

    let entries: Vec<CatalogEntry> = items
        .into_iter()
        .filter_map(|item| parse_item(item, base))
        .collect();

    if entries.len() < total {
        tracing::debug!(total, kept = entries.len(), "dropped malformed catalog items");
    }
    Ok(entries)
}

/// Parses the body, tolerating a `var x = {...};` script wrapper
fn parse_document(body: &str) -> Result<Value, FetchFailure> {
    let error = match serde_json::from_str(body) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let start = body.find(['[', '{']);
    let end = body.rfind([']', '}']);
    if let (Some(start), Some(end)) = (start, end)
        && start < end
        && let Ok(value) = serde_json::from_str(&body[start..=end])
    {
        return Ok(value);
    }

    Err(FetchFailure::Malformed(format!("invalid JSON: {}", error)))
}

/// Locates the list of entry objects inside the document
fn catalog_items(document: Value) -> Result<Vec<Value>, FetchFailure> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(mut root) => {
            if let Some(Value::Array(videos)) = root.remove("videos") {
                return Ok(videos);
            }
            if let Some(Value::Array(categories)) = root.remove("categories") {
                return Ok(categories
                    .into_iter()
                    .filter_map(|category| match category {
                        Value::Object(mut category) => match category.remove("videos") {
                            Some(Value::Array(videos)) => Some(videos),
                            _ => None,
                        },
                        _ => None,
                    })
                    .flatten()
                    .collect());
            }
            Err(FetchFailure::Malformed(
                "expected an array of entries or a \"videos\"/\"categories\" object".to_string(),
            ))
        }
        other => Err(FetchFailure::Malformed(format!(
            "expected an array of entries, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Title plus `url`, or the first of `sources` when `url` is absent
///
/// Other fields are not inspected, so an odd `sources` value does not
/// cost an item that has a usable `url`.
fn parse_item(item: Value, base: &Url) -> Option<CatalogEntry> {
    let Value::Object(fields) = item else {
        return None;
    };
    let title = fields.get("title")?.as_str()?;
    let url = fields
        .get("url")
        .and_then(Value::as_str)
        .filter(|u| !u.trim().is_empty())
        .or_else(|| fields.get("sources")?.get(0)?.as_str())?;
    build_entry(title, url, base, false)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
