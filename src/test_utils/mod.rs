//! Test utilities for vpc-topology
//!
//! Shared fixtures and logging setup for unit and integration tests. Available
//! under `cfg(test)` and through the `test-utils` feature.
//!
//! # Example
//!
//! ```rust,no_run
//! use vpc_topology::test_utils::InventoryFixture;
//!
//! let inventory = InventoryFixture::three_tier().build();
//! let output = vpc_topology::graph::build(&inventory);
//! assert!(!output.has_orphans());
//! ```

pub mod fixtures;

pub use fixtures::{Binding, InventoryFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
