//! storefront-rs
//! =============
//!
//! Umbrella crate for the workspace. It re-exports [`storefront_core`] so the
//! demos under `demos/` can be run from the repository root:
//!
//! ```text
//! cargo run --example basic_usage
//! cargo run --example error_handling
//! ```
pub use storefront_core::*;
