//! Global constants used throughout the vpc-topology codebase.
//!
//! This module contains layout gaps, sentinel identifiers, and the file names
//! that make up the inventory contract. Defining them centrally keeps magic
//! numbers and strings discoverable.

/// Vertical distance between two adjacent tiers, in layout units.
pub const LAYER_GAP: f64 = 3.0;

/// Multiplier applied to `LAYER_GAP` for horizontal spacing within a tier.
pub const HORIZONTAL_GAP_FACTOR: f64 = 2.0;

/// Tier used for nodes that were never assigned a layer.
pub const FALLBACK_LAYER: u32 = 99;

/// Number of barycenter sweeps (down then up) applied to tier ordering.
pub const ORDERING_SWEEPS: usize = 4;

/// Largest canvas, in pixels, that will be allocated for a single diagram.
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;

/// Display id of the synthetic node that parents every unattached resource.
pub const NO_VPC_ID: &str = "NO_VPC";

/// Suffix appended to a partition id to form its output file name.
pub const OUTPUT_SUFFIX: &str = "_topology.png";

/// Title used for the orphan partition diagram.
pub const ORPHAN_TITLE: &str = "Topology - Orphaned Resources";

/// Characters kept from the tail of a synthetic id in a node label.
pub const SYNTHETIC_ID_WIDTH: usize = 10;

/// Characters kept from a native id in a node label.
pub const NATIVE_ID_WIDTH: usize = 12;

/// Inventory document holding the `Vpcs` collection.
pub const VPCS_FILE: &str = "vpcs.json";

/// Inventory document holding the `Subnets` collection.
pub const SUBNETS_FILE: &str = "subnets.json";

/// Inventory document holding EC2 `Reservations`.
pub const EC2_FILE: &str = "ec2-instances.json";

/// Inventory document holding the `DBInstances` collection.
pub const RDS_FILE: &str = "rds-instances.json";

/// Inventory document listing ECS clusters (validated, not consumed).
pub const ECS_CLUSTERS_FILE: &str = "ecs-clusters.json";

/// Inventory document holding the `LoadBalancers` collection.
pub const LOAD_BALANCERS_FILE: &str = "load-balancers.json";

/// Inventory document holding the ECS `services` collection.
pub const ECS_SERVICES_FILE: &str = "ecs-services.json";

/// Inventory document holding the `TargetGroups` collection.
pub const TARGET_GROUPS_FILE: &str = "target-groups.json";

/// Every document that must be present in an inventory folder, in load order.
pub const INVENTORY_FILES: [&str; 8] = [
    VPCS_FILE,
    SUBNETS_FILE,
    EC2_FILE,
    RDS_FILE,
    ECS_CLUSTERS_FILE,
    LOAD_BALANCERS_FILE,
    ECS_SERVICES_FILE,
    TARGET_GROUPS_FILE,
];
