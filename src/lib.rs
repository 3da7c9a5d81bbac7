//! vpc-topology - AWS network topology diagrams
//!
//! Turns an inventory snapshot of AWS resources (VPCs, subnets, RDS instances,
//! load balancers, ECS clusters and services, target groups) into a directed
//! topology graph and renders one PNG diagram per VPC.
//!
//! # Architecture Overview
//!
//! A run is a straight pipeline with no feedback:
//!
//! 1. [`inventory`] reads the eight JSON documents of a snapshot folder
//! 2. [`graph::builder`] turns them into a [`graph::TopologyGraph`], recovering
//!    load-balancer identity from target-group ARNs and parenting resources that
//!    belong to no VPC under a synthetic `NO_VPC` node
//! 3. [`render`] extracts each VPC's reachable subgraph, lays it out in tiers and
//!    writes `<VpcId>_topology.png` (plus `NO_VPC_topology.png` for orphans)
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line parsing and pipeline driver
//! - [`config`] - Canvas and font settings with environment overrides
//! - [`constants`] - Layout constants, sentinel ids and inventory file names
//! - [`core`] - Error types and user-facing error formatting
//! - [`graph`] - Node identity, graph container, routing indexes and the builder
//! - [`inventory`] - Serde schema and loader for the snapshot documents
//! - [`render`] - Layout, SVG scene generation and PNG output
//! - [`utils`] - Path resolution
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vpc_topology::config::RenderConfig;
//! use vpc_topology::graph;
//! use vpc_topology::inventory::Inventory;
//! use vpc_topology::render::{InventorySummary, TopologyRenderer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let folder = Path::new("./inventory");
//! let inventory = Inventory::load(folder)?;
//! let output = graph::build(&inventory);
//! let summary = InventorySummary::collect(&inventory, &output);
//!
//! let renderer = TopologyRenderer::new(RenderConfig::default());
//! for path in renderer.render_all(&output, &summary, folder)? {
//!     println!("wrote {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod graph;
pub mod inventory;
pub mod render;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
