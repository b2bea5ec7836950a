//! URL helper functions for catalog entries
//!
//! Provides resolution of relative links, stream URL validation and
//! media kind inference from file extensions.

use reqwest::Url;

use crate::error::{OpenMoviesError, Result};
use crate::types::MediaKind;

/// Public sample-video catalog used when no source URL is configured
pub const DEFAULT_CATALOG_URL: &str =
    "https://gist.githubusercontent.com/jsturgis/3b19447b304616f18657/raw";

/// Parses the catalog source URL
///
/// # Errors
/// Returns `InvalidUrl` unless `source` is an absolute http(s) URL
///
/// # Example
/// ```
/// use openmovies_core::url::parse_source_url;
/// assert!(parse_source_url("https://example.org/catalog.json").is_ok());
/// assert!(parse_source_url("catalog.json").is_err());
/// ```
pub fn parse_source_url(source: &str) -> Result<Url> {
    Url::parse(source.trim())
        .ok()
        .filter(is_stream_url)
        .ok_or_else(|| OpenMoviesError::InvalidUrl(source.to_string()))
}

/// Resolves `href` against the catalog page and validates the result
///
/// Handles absolute, scheme-relative (`//host/x`), root-relative and
/// document-relative links.
///
/// # Returns
/// `Some(url)` if the joined URL is an absolute http(s) URL, `None` otherwise
///
/// # Example
/// ```
/// use openmovies_core::url::{parse_source_url, resolve_stream_url};
/// let base = parse_source_url("https://example.org/movies/index.html").unwrap();
/// let url = resolve_stream_url(&base, "sintel.webm").unwrap();
/// assert_eq!(url.as_str(), "https://example.org/movies/sintel.webm");
/// ```
pub fn resolve_stream_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().filter(is_stream_url)
}

/// Checks if a URL is something a player can fetch directly
fn is_stream_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

/// Returns `true` if `text` is an absolute http(s) URL
pub fn is_absolute_http_url(text: &str) -> bool {
    Url::parse(text.trim()).is_ok_and(|u| is_stream_url(&u))
}

/// Extracts the media kind from the last path segment's extension
///
/// Query string and fragment are ignored. Returns `None` when the
/// extension is missing or not a known media type.
pub fn media_kind_of(url: &Url) -> Option<MediaKind> {
    let segment = url.path().rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    MediaKind::from_extension(ext)
}

/// Infers the media kind of a stream URL, defaulting to MP4
///
/// # Example
/// ```
/// use openmovies_core::url::infer_media_kind;
/// use openmovies_core::MediaKind;
/// assert_eq!(infer_media_kind("https://cdn.test/live/master.m3u8?token=1"), MediaKind::Hls);
/// assert_eq!(infer_media_kind("https://cdn.test/watch/42"), MediaKind::Mp4);
/// ```
pub fn infer_media_kind(url: &str) -> MediaKind {
    Url::parse(url)
        .ok()
        .and_then(|u| media_kind_of(&u))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        parse_source_url("https://example.org/movies/index.html").unwrap()
    }

    #[test]
    fn test_parse_source_url_rejects_non_http() {
        assert!(parse_source_url("ftp://example.org/list").is_err());
        assert!(parse_source_url("/relative/list.html").is_err());
        assert!(parse_source_url("").is_err());
    }

    #[test]
    fn test_resolve_absolute_href() {
        let url = resolve_stream_url(&base(), "http://cdn.test/a.mp4").unwrap();
        assert_eq!(url.as_str(), "http://cdn.test/a.mp4");
    }

    #[test]
    fn test_resolve_scheme_relative_href() {
        let url = resolve_stream_url(&base(), "//cdn.test/a.mp4").unwrap();
        assert_eq!(url.as_str(), "https://cdn.test/a.mp4");
    }

    #[test]
    fn test_resolve_root_relative_href() {
        let url = resolve_stream_url(&base(), "/media/a.mp4").unwrap();
        assert_eq!(url.as_str(), "https://example.org/media/a.mp4");
    }

    #[test]
    fn test_resolve_document_relative_href() {
        let url = resolve_stream_url(&base(), "clips/a.webm").unwrap();
        assert_eq!(url.as_str(), "https://example.org/movies/clips/a.webm");
    }

    #[test]
    fn test_resolve_rejects_non_http_schemes() {
        assert_eq!(resolve_stream_url(&base(), "javascript:void(0)"), None);
        assert_eq!(resolve_stream_url(&base(), "mailto:someone@example.org"), None);
        assert_eq!(resolve_stream_url(&base(), "   "), None);
    }

    #[test]
    fn test_media_kind_ignores_query_and_case() {
        let url = Url::parse("https://cdn.test/BigBuckBunny.MP4?start=10#t").unwrap();
        assert_eq!(media_kind_of(&url), Some(MediaKind::Mp4));
    }

    #[test]
    fn test_media_kind_unknown_extension() {
        let url = Url::parse("https://cdn.test/page.html").unwrap();
        assert_eq!(media_kind_of(&url), None);
        let url = Url::parse("https://cdn.test/").unwrap();
        assert_eq!(media_kind_of(&url), None);
    }

    #[test]
    fn test_infer_media_kind_defaults_to_mp4() {
        assert_eq!(infer_media_kind("https://cdn.test/stream"), MediaKind::Mp4);
        assert_eq!(infer_media_kind("https://cdn.test/a.webm"), MediaKind::Webm);
        assert_eq!(infer_media_kind("not a url"), MediaKind::Mp4);
    }

    #[test]
    fn test_is_absolute_http_url() {
        assert!(is_absolute_http_url("https://cdn.test/a.mp4"));
        assert!(is_absolute_http_url("  http://cdn.test  "));
        assert!(!is_absolute_http_url("big buck bunny"));
        assert!(!is_absolute_http_url("file:///tmp/a.mp4"));
    }
}
