//! Command-line interface for vpc-topology.
//!
//! ```bash
//! vpc-topology ./inventory          # writes ./inventory/<VpcId>_topology.png
//! vpc-topology ~/snapshots/prod     # `~` is expanded
//! RUST_LOG=debug vpc-topology ./inventory
//! ```
//!
//! The run is a single pass: resolve the folder, read every inventory document,
//! build the graph, then write one diagram per VPC (and one for orphaned
//! resources when there are any). Any error stops the run with exit status 1.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::RenderConfig;
use crate::graph;
use crate::inventory::Inventory;
use crate::render::{InventorySummary, TopologyRenderer};
use crate::utils::resolve_folder;

/// Render per-VPC topology diagrams from an AWS inventory snapshot.
#[derive(Parser, Debug)]
#[command(
    name = "vpc-topology",
    version,
    about = "Render per-VPC topology diagrams from AWS inventory JSON",
    long_about = "Reads vpcs.json, subnets.json, ec2-instances.json, rds-instances.json, \
                  ecs-clusters.json, load-balancers.json, ecs-services.json and \
                  target-groups.json from FOLDER and writes one <VpcId>_topology.png per \
                  VPC into the same folder, plus NO_VPC_topology.png for resources that \
                  belong to no VPC."
)]
pub struct Cli {
    /// Folder holding the inventory JSON documents; diagrams are written here too
    #[arg(value_name = "FOLDER")]
    pub folder: String,
}

impl Cli {
    /// Run the full pipeline. Returns the diagrams written.
    pub fn execute(self) -> Result<Vec<PathBuf>> {
        let folder = resolve_folder(&self.folder)?;
        let config = RenderConfig::from_env()?;

        let inventory = Inventory::load(&folder)?;
        let output = graph::build(&inventory);
        let summary = InventorySummary::collect(&inventory, &output);

        let renderer = TopologyRenderer::new(config);
        let written = renderer.render_all(&output, &summary, &folder)?;

        info!("Rendered {} diagrams into {}", written.len(), folder.display());
        Ok(written)
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins; the default level is `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
