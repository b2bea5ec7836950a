//! Debug script to inspect a catalog and resolve a title
//!
//! Run with: cargo run --example debug_catalog -p openmovies-core -- [query] [catalog-url]

use openmovies_core::{CatalogConfig, CatalogMode, OpenMoviesScraper, Selection};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let query = args.next().unwrap_or_else(|| "big buck".to_string());
    let config = match args.next() {
        Some(url) => CatalogConfig::new(CatalogMode::BlenderJson, url),
        None => CatalogConfig::default(),
    };

    let scraper = OpenMoviesScraper::new(config)?;
    println!("Fetching {} catalog from {}...\n", scraper.mode(), scraper.source_url());

    let entries = scraper.fetch_catalog().await?;
    println!("Catalog has {} entries", entries.len());
    for entry in entries.iter().take(5) {
        println!("   {:?} {} -> {}", entry.kind, entry.title, entry.stream_url);
    }

    println!("\nSearching for '{}'...\n", query);
    for (i, result) in scraper.search(&query).await?.iter().enumerate() {
        println!("{}. [{:.2}] {}", i + 1, result.score, result.entry.title);
    }

    let selection = Selection {
        query,
        url: None,
    };
    match scraper.scrape(&selection).await {
        Ok(stream) => println!("\n✓ Stream: {} ({:?})", stream.url, stream.kind),
        Err(e) => println!("\n✗ {}", e),
    }

    Ok(())
}
