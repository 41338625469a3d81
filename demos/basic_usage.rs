//! Basic usage example for storefront-rs
//!
//! Drives the search controller with a manual clock and a host-driven
//! executor, so the whole debounce / race story plays out without a network.

use storefront_core::prelude::*;
use storefront_core::search::QueuedExecutor;

fn show(label: &str, search: &SearchController<ManualClock, QueuedExecutor>) {
    println!("{label:<36} state = {:?}", search.state());
}

fn main() {
    println!("=== storefront-rs Basic Usage Example ===\n");

    let clock = ManualClock::new();
    let mut search = SearchController::new(
        clock.clone(),
        QueuedExecutor::new(),
        StoreConfig::default().search_settings(),
    );
    search.focus();

    // Example 1: short queries never reach the catalog
    println!("--- Example 1: short query ---");
    search.on_query_changed("ka");
    clock.advance_ms(1_000);
    search.tick();
    show("typed \"ka\", waited 1s", &search);
    println!("  requests issued: {}\n", search.executor().issued().len());

    // Example 2: typing fast only searches for the final text
    println!("--- Example 2: debounce ---");
    for text in ["kab", "kabe", "kabel"] {
        search.on_query_changed(text);
        clock.advance_ms(200);
        search.tick();
    }
    clock.advance_ms(300);
    search.tick();
    show("typed \"kabel\" quickly", &search);
    for r in search.executor().issued() {
        println!("  request #{} for {:?}", r.seq, r.query);
    }
    let first = search.executor().issued()[0].seq;
    println!();

    // Example 3: a slow answer to an old query arrives last
    println!("--- Example 3: stale response ---");
    search.on_query_changed("kabel hdmi");
    clock.advance_ms(500);
    search.tick();
    let second = search.executor().issued()[1].seq;

    search
        .executor_mut()
        .resolve(second, Ok(vec![SearchResult::new("Kabel HDMI 2m")]));
    search.tick();
    show("newer request answered", &search);

    search
        .executor_mut()
        .resolve(first, Ok(vec![SearchResult::new("Kabel USB-C")]));
    search.tick();
    show("older request answered afterwards", &search);
    println!("  dropdown: {:?}", search.view());

    search.dispose();
}
