//! Inventory snapshot loading.
//!
//! An inventory folder holds one JSON document per resource kind, written by an
//! external collector. [`Inventory::load`] reads all eight documents up front; a
//! missing or malformed document aborts the run before any graph work starts.
//!
//! | file | top-level key |
//! |---|---|
//! | `vpcs.json` | `Vpcs` |
//! | `subnets.json` | `Subnets` |
//! | `ec2-instances.json` | `Reservations` |
//! | `rds-instances.json` | `DBInstances` |
//! | `ecs-clusters.json` | (validated only) |
//! | `load-balancers.json` | `LoadBalancers` |
//! | `ecs-services.json` | `services` |
//! | `target-groups.json` | `TargetGroups` |

pub mod models;

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::constants::{
    EC2_FILE, ECS_CLUSTERS_FILE, ECS_SERVICES_FILE, LOAD_BALANCERS_FILE, RDS_FILE,
    SUBNETS_FILE, TARGET_GROUPS_FILE, VPCS_FILE,
};
use crate::core::{JsonOperations, JsonOps};

pub use models::{
    DbInstance, Ec2Document, EcsService, EcsServicesDocument, LoadBalancer,
    LoadBalancerBinding, LoadBalancersDocument, RdsDocument, Subnet, SubnetsDocument, Tag,
    TargetGroup, TargetGroupsDocument, Vpc, VpcsDocument,
};

/// All eight resource collections of one snapshot.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// `vpcs.json`
    pub vpcs: VpcsDocument,
    /// `subnets.json`
    pub subnets: SubnetsDocument,
    /// `ec2-instances.json`
    pub ec2: Ec2Document,
    /// `rds-instances.json`
    pub rds: RdsDocument,
    /// `ecs-clusters.json`, kept verbatim; cluster identity comes from service ARNs
    pub ecs_clusters: serde_json::Value,
    /// `load-balancers.json`
    pub load_balancers: LoadBalancersDocument,
    /// `ecs-services.json`
    pub services: EcsServicesDocument,
    /// `target-groups.json`
    pub target_groups: TargetGroupsDocument,
}

impl Inventory {
    /// Load every document from `folder`.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::MissingInputFile`] when a document is absent
    /// - [`TopologyError::MalformedInput`] when a document is not valid JSON or lacks a
    ///   required key
    ///
    /// [`TopologyError::MissingInputFile`]: crate::core::TopologyError::MissingInputFile
    /// [`TopologyError::MalformedInput`]: crate::core::TopologyError::MalformedInput
    pub fn load(folder: &Path) -> Result<Self> {
        debug!("Loading inventory from {}", folder.display());

        let inventory = Self {
            vpcs: JsonOps::read_document_json(folder, VPCS_FILE)?,
            subnets: JsonOps::read_document_json(folder, SUBNETS_FILE)?,
            ec2: JsonOps::read_document_json(folder, EC2_FILE)?,
            rds: JsonOps::read_document_json(folder, RDS_FILE)?,
            ecs_clusters: JsonOps::read_document_json(folder, ECS_CLUSTERS_FILE)?,
            load_balancers: JsonOps::read_document_json(folder, LOAD_BALANCERS_FILE)?,
            services: JsonOps::read_document_json(folder, ECS_SERVICES_FILE)?,
            target_groups: JsonOps::read_document_json(folder, TARGET_GROUPS_FILE)?,
        };

        debug!(
            "Inventory loaded: {} VPCs, {} subnets, {} EC2 instances, {} RDS instances, {} load balancers, {} services, {} target groups",
            inventory.vpcs.vpcs.len(),
            inventory.subnets.subnets.len(),
            inventory.ec2.instance_count(),
            inventory.rds.db_instances.len(),
            inventory.load_balancers.load_balancers.len(),
            inventory.services.services.len(),
            inventory.target_groups.target_groups.len(),
        );

        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TopologyError;
    use crate::test_utils::InventoryFixture;
    use tempfile::TempDir;

    #[test]
    fn test_load_empty_inventory() {
        let temp = TempDir::new().unwrap();
        InventoryFixture::new().write_to(temp.path()).unwrap();

        let inventory = Inventory::load(temp.path()).unwrap();
        assert!(inventory.vpcs.vpcs.is_empty());
        assert_eq!(inventory.ec2.instance_count(), 0);
        assert!(inventory.services.services.is_empty());
    }

    #[test]
    fn test_load_populated_inventory() {
        let temp = TempDir::new().unwrap();
        InventoryFixture::new()
            .vpc("vpc-1", Some("10.0.0.0/16"))
            .subnet("subnet-1", "vpc-1", Some("web"))
            .database("orders", &["subnet-1"])
            .instances(3)
            .write_to(temp.path())
            .unwrap();

        let inventory = Inventory::load(temp.path()).unwrap();
        assert_eq!(inventory.vpcs.vpcs[0].vpc_id, "vpc-1");
        assert_eq!(inventory.subnets.subnets[0].display_name(), "web");
        assert_eq!(inventory.rds.db_instances[0].subnet_ids().count(), 1);
        assert_eq!(inventory.ec2.instance_count(), 3);
    }

    #[test]
    fn test_missing_document_aborts() {
        let temp = TempDir::new().unwrap();
        InventoryFixture::new().write_to(temp.path()).unwrap();
        std::fs::remove_file(temp.path().join(ECS_CLUSTERS_FILE)).unwrap();

        let err = Inventory::load(temp.path()).unwrap_err();
        match err.downcast_ref::<TopologyError>() {
            Some(TopologyError::MissingInputFile { file, .. }) => {
                assert_eq!(file, ECS_CLUSTERS_FILE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_top_level_key_is_malformed() {
        let temp = TempDir::new().unwrap();
        InventoryFixture::new().write_to(temp.path()).unwrap();
        std::fs::write(temp.path().join(VPCS_FILE), r#"{"Vpc": []}"#).unwrap();

        let err = Inventory::load(temp.path()).unwrap_err();
        match err.downcast_ref::<TopologyError>() {
            Some(TopologyError::MalformedInput { file, reason }) => {
                assert_eq!(file, VPCS_FILE);
                assert!(reason.contains("Vpcs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
