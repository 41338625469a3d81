//! storefront — Command-line interface for storefront-core
//!
//! A terminal stand-in for the storefront navbar and product page. It talks
//! to the live catalog API through the same debounced search controller the
//! web front-end uses.
//!
//! Usage examples
//! --------------
//!
//! - One search, printed once the debounce settles
//!   $ storefront search "kabel hdmi"
//!
//! - Product detail by catalog id
//!   $ storefront product 12345
//!
//! - Type into the search box line by line
//!   $ storefront interactive
//!
//! - Point at another catalog
//!   $ storefront --base-url http://localhost:8080 search kabel
mod args;
mod render;

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use storefront_core::prelude::*;

use crate::args::{CliArgs, Commands};

/// Upper bound on how long the event loops block without looking at the
/// controller again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    TermLogger::init(
        args.log_level(),
        ConfigBuilder::new().set_time_level(log::LevelFilter::Off).build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialise logging")?;

    let config = args.store_config()?;
    info!("catalog at {}", config.base_url);
    let catalog = HttpCatalog::new(&config)?;

    match args.command {
        Commands::Search { query } => run_search(catalog, &config, &query),
        Commands::Product { id } => run_product(&catalog, &id),
        Commands::Interactive => run_interactive(catalog, &config),
    }
}

fn run_search(catalog: HttpCatalog, config: &StoreConfig, query: &str) -> anyhow::Result<()> {
    let executor = ThreadExecutor::spawn(catalog)?;
    let mut search = SearchController::new(SystemClock::new(), executor, config.search_settings());
    search.focus();
    search.on_query_changed(query);

    if !search.is_pending() {
        println!(
            "Query must be longer than {} characters.",
            config.min_query_chars
        );
        return Ok(());
    }

    while search.is_pending() {
        match search.next_deadline() {
            Some(wait) => thread::sleep(wait),
            None => {
                for completion in search.executor_mut().poll_timeout(POLL_INTERVAL) {
                    search.complete(completion);
                }
            }
        }
        search.tick();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::view(&mut out, search.view())?;
    search.dispose();

    if let Some(failure) = search.error() {
        bail!("search failed: {failure}");
    }
    Ok(())
}

fn run_product(catalog: &HttpCatalog, id: &str) -> anyhow::Result<()> {
    let lookup = lookup_product(catalog, id);
    match &lookup {
        ProductLookup::Found(product) => {
            let stdout = io::stdout();
            render::product(&mut stdout.lock(), product)?;
        }
        ProductLookup::NotFound => {
            eprintln!("No product found for id: {id}");
        }
        ProductLookup::Failed(failure) => {
            bail!("{} ({failure})", lookup.message().unwrap_or_default());
        }
    }
    Ok(())
}

fn run_interactive(catalog: HttpCatalog, config: &StoreConfig) -> anyhow::Result<()> {
    let executor = ThreadExecutor::spawn(catalog)?;
    let mut search = SearchController::new(SystemClock::new(), executor, config.search_settings());

    // stdin is blocking, so it gets its own thread; `None` marks end of input
    let (line_tx, line_rx) = mpsc::channel::<Option<String>>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(Some(line)).is_err() {
                return;
            }
        }
        let _ = line_tx.send(None);
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Type to search (:open, :close, :q).")?;
    search.focus();

    loop {
        let wait = search
            .next_deadline()
            .map_or(POLL_INTERVAL, |d| d.min(POLL_INTERVAL));
        let mut changed = match line_rx.recv_timeout(wait) {
            Ok(Some(line)) => match line.as_str() {
                ":q" => break,
                ":open" => search.focus(),
                ":close" => search.close(),
                text => {
                    search.on_query_changed(text);
                    true
                }
            },
            Ok(None) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => false,
        };
        changed |= search.tick();

        if changed {
            writeln!(out, "> {}", search.query())?;
            render::view(&mut out, search.view())?;
            out.flush()?;
        }
    }

    search.dispose();
    Ok(())
}
