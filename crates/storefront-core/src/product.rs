// crates/storefront-core/src/product.rs

//! Product detail lookup: one request, three possible outcomes.

use crate::api::CatalogClient;
use crate::error::{FailureKind, SearchFailure};
use crate::model::Product;
use log::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum ProductLookup {
    Found(Product),
    NotFound,
    Failed(SearchFailure),
}

impl ProductLookup {
    pub fn product(&self) -> Option<&Product> {
        match self {
            ProductLookup::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Text for the product page when there is nothing to render.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ProductLookup::Found(_) => None,
            ProductLookup::NotFound => Some("Product not found."),
            ProductLookup::Failed(f) if f.kind == FailureKind::Decode => {
                Some("The catalog sent an unreadable product record.")
            }
            ProductLookup::Failed(_) => Some("Could not load the product."),
        }
    }
}

/// Fetches the product `id` once. No caching, no retry.
///
/// A blank id is reported as not found without contacting the catalog.
pub fn lookup_product<C: CatalogClient + ?Sized>(client: &C, id: &str) -> ProductLookup {
    let id = id.trim();
    if id.is_empty() {
        return ProductLookup::NotFound;
    }
    match client.product(id) {
        Ok(Some(product)) => ProductLookup::Found(product),
        Ok(None) => ProductLookup::NotFound,
        Err(err) => {
            warn!("product {id} could not be loaded: {err}");
            ProductLookup::Failed(SearchFailure::from(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_product;
    use crate::error::{Result, StoreError};
    use crate::model::SearchResult;
    use std::sync::Mutex;

    /// Serves a fixed body for every product request.
    struct FixedBody {
        body: &'static [u8],
        calls: Mutex<Vec<String>>,
    }

    impl FixedBody {
        fn new(body: &'static [u8]) -> Self {
            Self {
                body,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl CatalogClient for FixedBody {
        fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Ok(Vec::new())
        }

        fn product(&self, id: &str) -> Result<Option<Product>> {
            self.calls.lock().unwrap().push(id.to_string());
            decode_product(self.body, id)
        }
    }

    struct Offline;

    impl CatalogClient for Offline {
        fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Err(StoreError::Status { status: 503, url: "x".into() })
        }

        fn product(&self, _id: &str) -> Result<Option<Product>> {
            Err(StoreError::Status { status: 503, url: "x".into() })
        }
    }

    #[test]
    fn found() {
        let client = FixedBody::new(br#"[{"id":"5","nazwa":"Kabel"}]"#);
        let lookup = lookup_product(&client, "5");
        assert_eq!(lookup.product().map(|p| p.name()), Some("Kabel"));
        assert_eq!(lookup.message(), None);
    }

    #[test]
    fn empty_array_is_not_found() {
        let client = FixedBody::new(b"[]");
        assert_eq!(lookup_product(&client, "5"), ProductLookup::NotFound);
    }

    #[test]
    fn blank_id_skips_request() {
        let client = FixedBody::new(br#"[{"nazwa":"Kabel"}]"#);
        assert_eq!(lookup_product(&client, "  "), ProductLookup::NotFound);
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn garbage_is_a_decode_failure() {
        let client = FixedBody::new(b"<!doctype html>");
        let lookup = lookup_product(&client, "5");
        assert!(matches!(&lookup, ProductLookup::Failed(f) if f.kind == FailureKind::Decode));
    }

    #[test]
    fn transport_failure() {
        let lookup = lookup_product(&Offline, "5");
        assert!(matches!(&lookup, ProductLookup::Failed(f) if f.kind == FailureKind::Transport));
        assert_eq!(lookup.message(), Some("Could not load the product."));
    }
}
