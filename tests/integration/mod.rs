//! Integration test suite for vpc-topology
//!
//! End-to-end runs of the `vpc-topology` binary against inventory folders written
//! into temporary directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **diagrams**: successful runs and the files they produce
//! - **errors**: missing or malformed input and bad configuration

#[path = "../common/mod.rs"]
mod common;

mod diagrams;
mod errors;
