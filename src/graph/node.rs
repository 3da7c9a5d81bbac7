//! Node identity and display attributes.

use std::fmt;

use crate::constants::{FALLBACK_LAYER, NATIVE_ID_WIDTH, NO_VPC_ID, SYNTHETIC_ID_WIDTH};

/// Kind of resource a node stands for.
///
/// The kind drives the node's semantic label, marker color, and default tier.
/// `Instance` and `Task` are never created by the builder; they exist so the
/// always-contained check covers compute instances and container tasks too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// Network container (VPC)
    Vpc,
    /// Subnet of a VPC
    Subnet,
    /// Managed database instance
    Database,
    /// Load balancer wired into at least one service
    LoadBalancer,
    /// Container cluster
    Cluster,
    /// Container service
    Service,
    /// Sentinel parent of unattached resources
    Unattached,
    /// Compute instance
    Instance,
    /// Container task
    Task,
}

impl NodeKind {
    /// Semantic label drawn on the first line of a node label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vpc => "VPC",
            Self::Subnet => "Subnet",
            Self::Database => "RDS",
            Self::LoadBalancer => "Load Balancer",
            Self::Cluster => "ECS Cluster",
            Self::Service => "ECS Service",
            Self::Unattached => "No VPC",
            Self::Instance => "EC2",
            Self::Task => "ECS Task",
        }
    }

    /// Tier assigned when a node of this kind is created.
    #[must_use]
    pub const fn default_layer(self) -> Option<u32> {
        match self {
            Self::Database | Self::Unattached => Some(0),
            Self::Subnet => Some(1),
            Self::Vpc => Some(2),
            Self::LoadBalancer | Self::Cluster => Some(3),
            Self::Service => Some(4),
            Self::Instance | Self::Task => None,
        }
    }

    /// Marker fill color (SVG named color).
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Vpc => "skyblue",
            Self::Subnet => "lightgreen",
            Self::Database => "plum",
            Self::LoadBalancer => "lightslategray",
            Self::Cluster => "lightyellow",
            Self::Service => "gold",
            Self::Unattached => "lightgray",
            Self::Instance | Self::Task => "gray",
        }
    }

    /// Whether a resource of this kind must always sit inside a VPC.
    #[must_use]
    pub const fn requires_container(self) -> bool {
        matches!(self, Self::Instance | Self::Database | Self::Cluster | Self::Task)
    }

    /// Prefix of the display id for synthetic kinds.
    const fn synthetic_prefix(self) -> Option<&'static str> {
        match self {
            Self::LoadBalancer => Some("LB"),
            Self::Cluster => Some("CLUSTER"),
            Self::Service => Some("SVC"),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tagged node identifier: kind discriminator plus natural key.
///
/// Two ids with equal keys but different kinds are distinct, so a load balancer
/// named `vpc-1` can never collide with the VPC `vpc-1`. [`fmt::Display`] renders
/// the conventional string form (`vpc-1`, `LB:web`, `CLUSTER:prod`, `SVC:api`,
/// `NO_VPC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    kind: NodeKind,
    key: String,
}

impl NodeId {
    /// Id for a resource of `kind` keyed by `key`.
    pub fn new(kind: NodeKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }

    /// VPC id.
    pub fn vpc(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Vpc, id)
    }

    /// Subnet id.
    pub fn subnet(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Subnet, id)
    }

    /// Database id.
    pub fn database(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Database, id)
    }

    /// Load balancer id, keyed by logical name.
    pub fn load_balancer(name: impl Into<String>) -> Self {
        Self::new(NodeKind::LoadBalancer, name)
    }

    /// Cluster id, keyed by short cluster name.
    pub fn cluster(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Cluster, name)
    }

    /// Service id, keyed by service name.
    pub fn service(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Service, name)
    }

    /// The orphan sentinel.
    pub fn no_vpc() -> Self {
        Self::new(NodeKind::Unattached, NO_VPC_ID)
    }

    /// Kind discriminator.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Short identifier for the second label line.
    ///
    /// Synthetic ids show the text after the last `:`, truncated to 10 characters;
    /// other ids show the raw id truncated to 12 characters.
    #[must_use]
    pub fn short_name(&self) -> String {
        let full = self.to_string();
        match full.rsplit_once(':') {
            Some((_, tail)) => tail.chars().take(SYNTHETIC_ID_WIDTH).collect(),
            None => full.chars().take(NATIVE_ID_WIDTH).collect(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.synthetic_prefix() {
            Some(prefix) => write!(f, "{prefix}:{}", self.key),
            None => f.write_str(&self.key),
        }
    }
}

/// A graph node: one resource or synthetic placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique id
    pub id: NodeId,
    /// Identifying detail shown under the kind label (CIDR, tag, service name)
    pub detail: Option<String>,
    /// Tier for vertical placement; `None` falls back to [`FALLBACK_LAYER`]
    pub layer: Option<u32>,
}

impl Node {
    /// Node for `id` with the kind's default layer and no detail.
    pub fn new(id: NodeId) -> Self {
        let layer = id.kind().default_layer();
        Self {
            id,
            detail: None,
            layer,
        }
    }

    /// Attach an identifying detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Kind of the node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.id.kind()
    }

    /// Display label: kind label, plus the detail on a second line.
    #[must_use]
    pub fn display_label(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}\n{detail}", self.kind().label()),
            None => self.kind().label().to_string(),
        }
    }

    /// Tier used for layout.
    #[must_use]
    pub fn effective_layer(&self) -> u32 {
        self.layer.unwrap_or(FALLBACK_LAYER)
    }
}
