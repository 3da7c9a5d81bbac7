//! Unit test suite for vpc-topology
//!
//! Properties of the graph builder checked through the public API.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod builder_properties;
mod routing;
