// crates/storefront-core/src/search/mod.rs

//! # Product search box
//!
//! The pieces behind the navbar search: the [`SearchController`] state
//! machine, the executors that carry its requests, and the view model it
//! publishes.

mod controller;
mod dropdown;
mod executor;
mod state;

pub use controller::SearchController;
pub use dropdown::Dropdown;
pub use executor::{Completion, QueuedExecutor, RequestExecutor, SearchRequest, ThreadExecutor};
pub use state::{SearchState, SearchView};
