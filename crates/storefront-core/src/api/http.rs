// crates/storefront-core/src/api/http.rs
#![cfg(feature = "http")]

use super::{decode_product, decode_search, CatalogClient, ID_PARAM, INDEX_PATH, SEARCH_PARAM};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::{Product, SearchResult};
use log::debug;
use reqwest::blocking::Client;
use reqwest::Url;

// -----------------------------------------------------------------------------
// ENDPOINTS
// -----------------------------------------------------------------------------

/// URL builder for the two catalog queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    index: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url.trim())
            .map_err(|e| StoreError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(format!("{base_url}: not a base URL")));
        }
        // `join` replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let index = base
            .join(INDEX_PATH)
            .map_err(|e| StoreError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { index })
    }

    /// `<base>/tw/index?tw-nazwa=<query>`, query URL-encoded.
    pub fn search_url(&self, query: &str) -> Url {
        self.with_param(SEARCH_PARAM, query)
    }

    /// `<base>/tw/index?tw-id=<id>`.
    pub fn product_url(&self, id: &str) -> Url {
        self.with_param(ID_PARAM, id)
    }

    fn with_param(&self, key: &str, value: &str) -> Url {
        let mut url = self.index.clone();
        url.query_pairs_mut().append_pair(key, value);
        url
    }
}

// -----------------------------------------------------------------------------
// CLIENT
// -----------------------------------------------------------------------------

/// [`CatalogClient`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    endpoints: Endpoints,
}

impl HttpCatalog {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoints: Endpoints::new(&config.base_url)?,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn get(&self, url: Url) -> Result<Vec<u8>> {
        debug!("GET {url}");
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl CatalogClient for HttpCatalog {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let body = self.get(self.endpoints.search_url(query))?;
        decode_search(&body)
    }

    fn product(&self, id: &str) -> Result<Option<Product>> {
        let body = self.get(self.endpoints.product_url(id))?;
        decode_product(&body, id)
    }
}
