//! Serde schema for the inventory documents.
//!
//! Each struct mirrors the subset of an AWS `describe-*` response that the graph
//! builder consumes. Fields the builder can do without are `Option`/`#[serde(default)]`;
//! every other field is required, so a document missing it fails to deserialize and is
//! reported as malformed input. Unknown fields are ignored.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// `vpcs.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcsDocument {
    /// Network containers in collection order
    pub vpcs: Vec<Vpc>,
}

/// One network container.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vpc {
    /// Native identifier, e.g. `vpc-0abc`
    pub vpc_id: String,
    /// Primary IPv4 block
    #[serde(default)]
    pub cidr_block: Option<String>,
}

/// `subnets.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubnetsDocument {
    /// Subnets in collection order
    pub subnets: Vec<Subnet>,
}

/// One subnet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    /// Native identifier, e.g. `subnet-0abc`
    pub subnet_id: String,
    /// Owning network container
    pub vpc_id: String,
    /// Resource tags; only the first one is used for display
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Subnet {
    /// Display name: value of the first tag, or the subnet id.
    pub fn display_name(&self) -> &str {
        match self.tags.first().and_then(|tag| tag.value.as_deref()) {
            Some(value) => value,
            None => &self.subnet_id,
        }
    }
}

/// Resource tag. Only the value is displayed; the key is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    /// Tag value
    #[serde(default)]
    pub value: Option<String>,
}

/// `ec2-instances.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ec2Document {
    /// Reservations, each holding one or more instances
    pub reservations: Vec<Reservation>,
}

impl Ec2Document {
    /// Total number of instances across all reservations.
    pub fn instance_count(&self) -> usize {
        self.reservations.iter().map(|r| r.instances.len()).sum()
    }
}

/// One EC2 reservation. Instances are only counted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reservation {
    /// Instance payloads (contents ignored)
    pub instances: Vec<IgnoredAny>,
}

/// `rds-instances.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RdsDocument {
    /// Managed database instances
    #[serde(rename = "DBInstances")]
    pub db_instances: Vec<DbInstance>,
}

/// One managed database instance.
#[derive(Debug, Clone, Deserialize)]
pub struct DbInstance {
    /// Native identifier
    #[serde(rename = "DBInstanceIdentifier")]
    pub identifier: String,
    /// Subnet group the instance is placed in
    #[serde(rename = "DBSubnetGroup", default)]
    pub subnet_group: Option<DbSubnetGroup>,
}

impl DbInstance {
    /// Subnet ids listed in the instance's subnet group, skipping blank entries.
    pub fn subnet_ids(&self) -> impl Iterator<Item = &str> {
        self.subnet_group
            .iter()
            .flat_map(|group| group.subnets.iter())
            .filter_map(|subnet| subnet.subnet_identifier.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Database subnet group.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbSubnetGroup {
    /// Member subnets
    #[serde(default)]
    pub subnets: Vec<DbSubnet>,
}

/// Database subnet group member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbSubnet {
    /// Subnet id
    #[serde(default)]
    pub subnet_identifier: Option<String>,
}

/// `load-balancers.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancersDocument {
    /// Load balancers
    pub load_balancers: Vec<LoadBalancer>,
}

/// One load balancer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancer {
    /// Full ARN
    pub load_balancer_arn: String,
    /// Logical name, unique per account and region
    pub load_balancer_name: String,
    /// Owning network container
    pub vpc_id: String,
    /// Target groups routed through this load balancer
    #[serde(default)]
    pub target_group_arns: Vec<String>,
}

/// `ecs-services.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsServicesDocument {
    /// Container services
    pub services: Vec<EcsService>,
}

/// One container service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsService {
    /// Service name
    pub service_name: String,
    /// ARN of the cluster the service runs in
    pub cluster_arn: String,
    /// Declared load-balancer bindings
    #[serde(default)]
    pub load_balancers: Vec<LoadBalancerBinding>,
}

impl EcsService {
    /// Short cluster name: the last `/`-delimited segment of the cluster ARN.
    pub fn cluster_name(&self) -> &str {
        self.cluster_arn.rsplit('/').next().unwrap_or(&self.cluster_arn)
    }
}

/// A service's load-balancer binding. Either field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerBinding {
    /// Classic binding by load-balancer name
    #[serde(default)]
    pub load_balancer_name: Option<String>,
    /// ELBv2 binding by target group
    #[serde(default)]
    pub target_group_arn: Option<String>,
}

/// `target-groups.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetGroupsDocument {
    /// Target groups
    pub target_groups: Vec<TargetGroup>,
}

/// One target group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetGroup {
    /// Full ARN
    pub target_group_arn: String,
    /// Network container the targets live in
    pub vpc_id: String,
}
