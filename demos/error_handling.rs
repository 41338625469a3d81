//! Error handling example for storefront-rs
//!
//! Shows how catalog failures surface: product lookups map to a tri-state
//! result, and search failures collapse into the dropdown's error view.

use storefront_core::api::{decode_product, decode_search};
use storefront_core::prelude::*;
use storefront_core::search::QueuedExecutor;

/// A catalog held in memory: raw response bodies keyed by product id.
struct CannedCatalog {
    products: Vec<(&'static str, &'static [u8])>,
}

impl CatalogClient for CannedCatalog {
    fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
        Err(StoreError::Status {
            status: 503,
            url: "canned://tw/index".into(),
        })
    }

    fn product(&self, id: &str) -> Result<Option<Product>> {
        match self.products.iter().find(|(key, _)| *key == id) {
            Some((_, body)) => decode_product(body, id),
            None => Ok(None),
        }
    }
}

fn main() -> Result<()> {
    println!("=== storefront-rs Error Handling Example ===\n");

    // Example 1: product lookups
    println!("--- Example 1: product lookup outcomes ---");
    let catalog = CannedCatalog {
        products: vec![
            ("1", &br#"[{"id":1,"nazwa":"Kabel HDMI 2m"}]"#[..]),
            ("2", &b"[]"[..]),
            ("3", &b"<html>Bad Gateway</html>"[..]),
        ],
    };
    for id in ["1", "2", "3", "404", ""] {
        match lookup_product(&catalog, id) {
            ProductLookup::Found(p) => println!("  {id:>3}: found {} ({})", p.name(), p.id()),
            other => println!("  {id:>3}: {}", other.message().unwrap_or_default()),
        }
    }
    println!();

    // Example 2: decoding is strict about shape, lenient about extra fields
    println!("--- Example 2: decoding ---");
    let ok = decode_search(br#"[{"nazwa":"Widget","cena":"9.99"}]"#)?;
    println!("  array with extras -> {} result(s)", ok.len());
    match decode_search(br#"{"nazwa":"Widget"}"#) {
        Ok(_) => println!("  object -> unexpectedly accepted"),
        Err(e) => println!("  object -> {:?}: {e}", e.kind()),
    }
    println!();

    // Example 3: a failed search as the dropdown shows it
    println!("--- Example 3: failed search ---");
    let clock = ManualClock::new();
    let mut search = SearchController::new(
        clock.clone(),
        QueuedExecutor::new(),
        SearchSettings::default(),
    );
    search.focus();
    search.on_query_changed("widget");
    clock.advance_ms(500);
    search.tick();
    let seq = search.executor().issued()[0].seq;
    let outcome = catalog.search("widget");
    search.executor_mut().resolve(seq, outcome);
    search.tick();
    println!("  results: {}", search.results().len());
    println!("  loading: {}", search.is_loading());
    println!("  view:    {:?}", search.view());

    Ok(())
}
