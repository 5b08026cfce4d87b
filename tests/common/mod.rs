//! Shared test setup.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ...
//! }
//! ```
//!
//! Events are only emitted when the crate is built with the `tracing`
//! feature. `RUST_LOG` selects what is printed, e.g.
//! `RUST_LOG=scapegoat=debug cargo test --features tracing`.

#![allow(dead_code)]

use std::sync::Once;

use scapegoat::ScapegoatTree;
use tracing_subscriber::EnvFilter;

/// Ensures the subscriber is only installed once per test binary.
static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "scapegoat=info";

/// Installs a `fmt` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call has an effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // another harness may already have installed a global subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Builds a tree mapping each key to ten times itself.
pub fn tree_of<I>(keys: I) -> ScapegoatTree<i32, i32>
where
    I: IntoIterator<Item = i32>,
{
    keys.into_iter().map(|key| (key, key * 10)).collect()
}
