// crates/storefront-core/src/api/mod.rs

//! # Catalog API
//!
//! The remote catalog exposes a single resource, `tw/index`, queried either
//! by name (`tw-nazwa`) or by id (`tw-id`). Both answer with a JSON array.
//!
//! [`CatalogClient`] is the seam the rest of the crate talks to. The real
//! implementation lives in [`http`] (feature `http`); the payload decoders in
//! [`decode`] are transport-agnostic.

use crate::error::Result;
use crate::model::{Product, SearchResult};
use std::sync::Arc;

pub mod decode;
#[cfg(feature = "http")]
pub mod http;

pub use decode::{decode_product, decode_search};
#[cfg(feature = "http")]
pub use http::{Endpoints, HttpCatalog};

/// Path of the catalog resource, relative to the configured base URL.
pub const INDEX_PATH: &str = "tw/index";
pub const SEARCH_PARAM: &str = "tw-nazwa";
pub const ID_PARAM: &str = "tw-id";

/// Blocking access to the product catalog.
///
/// Implementations are called from an executor's worker thread, hence the
/// `Send + Sync` bound.
pub trait CatalogClient: Send + Sync {
    /// Products whose name matches `query`, in the order the catalog
    /// returned them. An empty vector is a valid answer.
    fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// The product with the given id, or `None` if the catalog does not
    /// know it.
    fn product(&self, id: &str) -> Result<Option<Product>>;
}

impl<T: CatalogClient + ?Sized> CatalogClient for Arc<T> {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        (**self).search(query)
    }

    fn product(&self, id: &str) -> Result<Option<Product>> {
        (**self).product(id)
    }
}

impl<T: CatalogClient + ?Sized> CatalogClient for Box<T> {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        (**self).search(query)
    }

    fn product(&self, id: &str) -> Result<Option<Product>> {
        (**self).product(id)
    }
}
