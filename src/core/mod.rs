//! Core types and functionality for vpc-topology
//!
//! This module holds the error taxonomy shared by the inventory loader, the graph
//! builder, and the renderer, plus the file/JSON helpers that attach that taxonomy
//! to low-level failures.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//! - [`TopologyError`] - Enumerated failure modes (missing input, malformed input,
//!   render failure, configuration)
//! - [`ErrorContext`] - User-friendly wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any [`anyhow::Error`] for CLI display
//!
//! ## `error_helpers` - Contextual IO
//! - [`FileOps`] / [`FileOperations`] - Read documents, write diagrams
//! - [`JsonOps`] / [`JsonOperations`] - Deserialize inventory documents
//!
//! # Examples
//!
//! ```rust,no_run
//! use vpc_topology::core::{JsonOps, JsonOperations, user_friendly_error};
//!
//! let result: anyhow::Result<serde_json::Value> =
//!     JsonOps::read_document_json("./inventory", "vpcs.json");
//! if let Err(e) = result {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod error;
pub mod error_helpers;

pub use error::{ErrorContext, TopologyError, user_friendly_error};
pub use error_helpers::{FileOperations, FileOps, JsonOperations, JsonOps};
