//! Fuzzy title matching
//!
//! Pure functions ranking catalog entries against a free-text query.
//! Scores live in `[0, 1]`:
//!
//! - `1.0` for an empty query or an exact (case-insensitive) title match
//! - `0.7..=1.0` when the query is a substring of the title, growing with
//!   the share of the title it covers
//! - below `0.7` otherwise, from per-token and whole-string edit distance

use crate::parser::normalize_text;
use crate::types::{CatalogEntry, SearchResult};

/// Minimum score (exclusive) for [`resolve`] to accept a match
pub const MATCH_THRESHOLD: f64 = 0.3;

const SUBSTRING_FLOOR: f64 = 0.7;
const FUZZY_WEIGHT: f64 = 0.7;

/// Scores how well `title` matches `query`
///
/// # Example
/// ```
/// use openmovies_core::resolver::score;
/// assert_eq!(score("sintel", "Sintel"), 1.0);
/// assert!(score("big buck", "Big Buck Bunny") > 0.7);
/// assert!(score("zzz", "Sintel") < 0.3);
/// ```
pub fn score(query: &str, title: &str) -> f64 {
    Matcher::new(query).score(title)
}

/// Ranks every entry against `query`
///
/// Results are ordered by descending score; equal scores keep catalog order.
pub fn search(query: &str, entries: &[CatalogEntry]) -> Vec<SearchResult> {
    let matcher = Matcher::new(query);
    let mut results: Vec<SearchResult> = entries
        .iter()
        .map(|entry| SearchResult {
            score: matcher.score(&entry.title),
            entry: entry.clone(),
        })
        .collect();

    // sort_by is stable, ties stay in catalog order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

/// Returns the best entry for `query` if it scores above [`MATCH_THRESHOLD`]
pub fn resolve(query: &str, entries: &[CatalogEntry]) -> Option<CatalogEntry> {
    search(query, entries)
        .into_iter()
        .next()
        .filter(|best| best.score > MATCH_THRESHOLD)
        .map(|best| best.entry)
}

/// Query normalized once and reused for every title
struct Matcher {
    text: String,
    tokens: Vec<String>,
}

impl Matcher {
    fn new(query: &str) -> Self {
        let text = normalize_text(query).to_lowercase();
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    fn score(&self, title: &str) -> f64 {
        let title = normalize_text(title).to_lowercase();

        if self.text.is_empty() || self.text == title {
            return 1.0;
        }
        if title.is_empty() {
            return 0.0;
        }

        if title.contains(&self.text) {
            let coverage = self.text.chars().count() as f64 / title.chars().count() as f64;
            return SUBSTRING_FLOOR + (1.0 - SUBSTRING_FLOOR) * coverage;
        }

        let fuzzy = self
            .token_similarity(&tokenize(&title))
            .max(similarity(&self.text, &title));
        (FUZZY_WEIGHT * fuzzy).clamp(0.0, 1.0)
    }

    /// Mean over query tokens of their best match among title tokens
    fn token_similarity(&self, title_tokens: &[String]) -> f64 {
        if self.tokens.is_empty() || title_tokens.is_empty() {
            return 0.0;
        }

        let total: f64 = self
            .tokens
            .iter()
            .map(|token| {
                title_tokens
                    .iter()
                    .map(|candidate| {
                        if candidate.contains(token.as_str()) {
                            1.0
                        } else {
                            similarity(token, candidate)
                        }
                    })
                    .fold(0.0, f64::max)
            })
            .sum();

        total / self.tokens.len() as f64
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized Levenshtein similarity: `1 - distance / longer length`
fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
