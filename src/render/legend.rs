//! Legend contents.
//!
//! Counts are global to the snapshot and identical on every diagram.

use crate::graph::BuildOutput;
use crate::inventory::Inventory;

/// Resource counts shown in the legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventorySummary {
    pub vpcs: usize,
    pub subnets: usize,
    pub ec2_instances: usize,
    pub rds_instances: usize,
    /// Load balancers referenced by a service binding
    pub load_balancers: usize,
    pub services: usize,
    pub unattached: usize,
}

impl InventorySummary {
    /// Count resources from the raw inventory and the build metadata.
    pub fn collect(inventory: &Inventory, output: &BuildOutput) -> Self {
        Self {
            vpcs: inventory.vpcs.vpcs.len(),
            subnets: inventory.subnets.subnets.len(),
            ec2_instances: inventory.ec2.instance_count(),
            rds_instances: inventory.rds.db_instances.len(),
            load_balancers: output.used_load_balancers.len(),
            services: inventory.services.services.len(),
            unattached: output.unattached.len(),
        }
    }

    /// Legend entries in display order. `Unattached` only appears when non-zero.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let mut entries = vec![
            LegendEntry::new("skyblue", "VPCs", self.vpcs),
            LegendEntry::new("lightgreen", "Subnets", self.subnets),
            LegendEntry::new("orange", "EC2 instances", self.ec2_instances),
            LegendEntry::new("plum", "RDS instances", self.rds_instances),
            LegendEntry::new("lightslategray", "Load Balancers", self.load_balancers),
            LegendEntry::new("gold", "ECS Services", self.services),
        ];
        if self.unattached > 0 {
            entries.push(LegendEntry::new("lightgray", "Unattached", self.unattached));
        }
        entries
    }
}

/// One colored patch with its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: &'static str,
    pub caption: String,
}

impl LegendEntry {
    fn new(color: &'static str, name: &str, count: usize) -> Self {
        Self {
            color,
            caption: format!("{name} ({count})"),
        }
    }
}
