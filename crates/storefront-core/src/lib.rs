// crates/storefront-core/src/lib.rs

//! # storefront-core
//!
//! Client-side core of the storefront: the debounced product search behind
//! the navbar and the product detail lookup, both talking to the catalog's
//! `tw/index` endpoint.
//!
//! ```rust
//! use storefront_core::prelude::*;
//! use storefront_core::search::QueuedExecutor;
//!
//! let clock = ManualClock::new();
//! let mut search = SearchController::new(
//!     clock.clone(),
//!     QueuedExecutor::new(),
//!     SearchSettings::default(),
//! );
//!
//! search.on_query_changed("kabel");
//! clock.advance_ms(500);
//! search.tick();
//! assert!(search.is_loading());
//! assert_eq!(search.executor().issued()[0].query, "kabel");
//! ```

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod product;
pub mod search;

// Re-exports
pub use crate::error::{FailureKind, Result, SearchFailure, StoreError};
pub use crate::model::{Product, SearchResult};

pub mod prelude {
    pub use crate::api::CatalogClient;
    #[cfg(feature = "http")]
    pub use crate::api::HttpCatalog;
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::{SearchSettings, StoreConfig};
    pub use crate::error::{FailureKind, Result, SearchFailure, StoreError};
    pub use crate::model::{Product, SearchResult};
    pub use crate::product::{lookup_product, ProductLookup};
    pub use crate::search::{
        RequestExecutor, SearchController, SearchState, SearchView, ThreadExecutor,
    };
}
