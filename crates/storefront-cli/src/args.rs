use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use storefront_core::config::StoreConfig;

/// CLI arguments for storefront
#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    version,
    about = "Search the storefront catalog and look up products from the terminal"
)]
pub struct CliArgs {
    /// JSON file with storefront settings (every field optional)
    #[arg(short = 'c', long = "config", global = true, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog base URL (default: https://www.bapi2.ebartex.pl)
    #[arg(long = "base-url", global = true, env = "STOREFRONT_BASE_URL")]
    pub base_url: Option<String>,

    /// Quiet period after the last keystroke before searching, in milliseconds
    #[arg(long = "debounce-ms", global = true)]
    pub debounce_ms: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout-secs", global = true)]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one debounced search and print the dropdown
    Search {
        /// Product name, barcode or serial number (more than 2 characters)
        query: String,
    },

    /// Show a product by its catalog id
    Product {
        /// Catalog id (tw-id)
        id: String,
    },

    /// Type queries line by line; each line replaces the search box content.
    /// `:open` / `:close` toggle the dropdown, `:q` quits.
    Interactive,
}

impl CliArgs {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn store_config(&self) -> storefront_core::Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_json_file(path)?,
            None => StoreConfig::default(),
        };
        if let Some(base) = &self.base_url {
            config.base_url = base.clone();
        }
        if let Some(ms) = self.debounce_ms {
            config.debounce_ms = ms;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = secs;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
