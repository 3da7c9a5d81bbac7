//! Diagram rendering.
//!
//! One PNG per VPC, plus one for the orphan sentinel when unattached resources
//! exist. Each diagram covers the root and everything reachable from it:
//!
//! 1. [`TopologyGraph::partition`] extracts the subgraph copy
//! 2. [`layout::LayeredLayout`] places nodes in tiers
//! 3. [`svg::SceneWriter`] draws the scene with the global legend
//! 4. [`raster::Rasterizer`] rasterizes it and writes `<root>_topology.png`
//!
//! Diagrams are written one after another; a failure stops the run but leaves
//! earlier files in place.

pub mod layout;
pub mod legend;
pub mod raster;
pub mod svg;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::RenderConfig;
use crate::constants::{ORPHAN_TITLE, OUTPUT_SUFFIX};
use crate::graph::{BuildOutput, NodeId, NodeKind, TopologyGraph};

pub use layout::{LayeredLayout, Layout};
pub use legend::{InventorySummary, LegendEntry};
pub use raster::Rasterizer;
pub use svg::SceneWriter;

/// Output file for the partition rooted at `root`.
pub fn output_path(folder: &Path, root: &NodeId) -> PathBuf {
    folder.join(format!("{root}{OUTPUT_SUFFIX}"))
}

/// Diagram title for the partition rooted at `root`.
pub fn title_for(root: &NodeId) -> String {
    match root.kind() {
        NodeKind::Unattached => ORPHAN_TITLE.to_string(),
        _ => format!("Topology for {root}"),
    }
}

/// Renders every partition of a built graph.
pub struct TopologyRenderer {
    config: RenderConfig,
    rasterizer: Rasterizer,
}

impl TopologyRenderer {
    pub fn new(config: RenderConfig) -> Self {
        let rasterizer = Rasterizer::new(&config.font_family);
        Self { config, rasterizer }
    }

    /// Partition roots in output order: VPCs in inventory order, then the orphan
    /// sentinel if present.
    pub fn roots(output: &BuildOutput) -> Vec<NodeId> {
        let mut roots: Vec<NodeId> = output
            .graph
            .nodes()
            .filter(|n| n.kind() == NodeKind::Vpc)
            .map(|n| n.id.clone())
            .collect();
        if output.has_orphans() {
            roots.push(NodeId::no_vpc());
        }
        roots
    }

    /// Render one diagram per partition into `folder`.
    ///
    /// Returns the written paths in order.
    pub fn render_all(
        &self,
        output: &BuildOutput,
        summary: &InventorySummary,
        folder: &Path,
    ) -> Result<Vec<PathBuf>> {
        let legend = summary.legend_entries();
        let mut written = Vec::new();

        for root in Self::roots(output) {
            let path = output_path(folder, &root);
            let partition = output.graph.partition(&root);
            self.render_partition(&partition, &title_for(&root), &legend, &path)?;
            info!(
                "Wrote {} ({} nodes, {} edges)",
                path.display(),
                partition.node_count(),
                partition.edge_count()
            );
            written.push(path);
        }
        Ok(written)
    }

    /// Lay out, draw and write a single partition.
    pub fn render_partition(
        &self,
        partition: &TopologyGraph,
        title: &str,
        legend: &[LegendEntry],
        path: &Path,
    ) -> Result<()> {
        let svg = self.render_svg(partition, title, legend);
        self.rasterizer.write_png(&svg, path)
    }

    /// SVG scene for a partition.
    pub fn render_svg(&self, partition: &TopologyGraph, title: &str, legend: &[LegendEntry]) -> String {
        let layout = LayeredLayout::compute(partition);
        SceneWriter::new(&self.config).write(title, partition, &layout, legend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build;
    use crate::test_utils::InventoryFixture;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_and_titles() {
        let folder = Path::new("/tmp/inv");
        assert_eq!(
            output_path(folder, &NodeId::vpc("vpc-1")),
            folder.join("vpc-1_topology.png")
        );
        assert_eq!(output_path(folder, &NodeId::no_vpc()), folder.join("NO_VPC_topology.png"));
        assert_eq!(title_for(&NodeId::vpc("vpc-1")), "Topology for vpc-1");
        assert_eq!(title_for(&NodeId::no_vpc()), "Topology - Orphaned Resources");
    }

    #[test]
    fn test_roots_in_inventory_order_orphan_last() {
        let inventory = InventoryFixture::new()
            .vpc("vpc-b", None)
            .vpc("vpc-a", None)
            .database("lonely", &[])
            .build();
        let output = build(&inventory);
        assert_eq!(
            TopologyRenderer::roots(&output),
            vec![NodeId::vpc("vpc-b"), NodeId::vpc("vpc-a"), NodeId::no_vpc()]
        );
    }

    #[test]
    fn test_render_all_writes_one_file_per_vpc() {
        let temp = TempDir::new().unwrap();
        let inventory = InventoryFixture::three_tier().build();
        let output = build(&inventory);
        let summary = InventorySummary::collect(&inventory, &output);

        let renderer = TopologyRenderer::new(RenderConfig::default());
        let written = renderer.render_all(&output, &summary, temp.path()).unwrap();

        assert_eq!(written, vec![temp.path().join("vpc-0a1b2c3d_topology.png")]);
        assert!(written[0].exists());
        assert!(!temp.path().join("NO_VPC_topology.png").exists());
    }

    #[test]
    fn test_orphan_partition_only_holds_unattached() {
        let inventory = InventoryFixture::new()
            .vpc("vpc-1", None)
            .subnet("subnet-1", "vpc-1", None)
            .database("lonely", &[])
            .build();
        let output = build(&inventory);
        let partition = output.graph.partition(&NodeId::no_vpc());

        assert_eq!(partition.node_count(), 2);
        assert!(partition.contains(&NodeId::database("lonely")));

        let renderer = TopologyRenderer::new(RenderConfig::default());
        let svg = renderer.render_svg(&partition, ORPHAN_TITLE, &[]);
        assert!(svg.contains(ORPHAN_TITLE));
        assert_eq!(svg.matches("<circle").count(), 2);
    }
}
