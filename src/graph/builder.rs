//! Graph construction from an inventory snapshot.
//!
//! The builder runs eight discrete steps in dependency order:
//!
//! 1. VPC nodes
//! 2. Subnet nodes, `VPC → subnet`
//! 3. Database nodes, `subnet → database` per subnet-group member
//! 4. Target-group indexes ([`RoutingIndex`])
//! 5. Used load-balancer names (from service bindings)
//! 6. Load-balancer nodes for used names, `VPC → load balancer`
//! 7. Cluster and service nodes, `cluster → service`, `service → load balancer`,
//!    `VPC → service` through target groups
//! 8. Orphan sentinel `NO_VPC` parenting every always-contained node with no parent
//!
//! References to resources that are not in the graph are skipped; the builder never
//! fails. Running it twice on the same inventory yields the same nodes and edges in
//! the same order.

use std::collections::BTreeSet;
use tracing::{debug, info, trace, warn};

use super::routing::{self, RoutingIndex};
use super::{Node, NodeId, TopologyGraph};
use crate::inventory::Inventory;

/// Result of a build: the graph plus the metadata the renderer needs.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    /// The full topology graph
    pub graph: TopologyGraph,
    /// Always-contained nodes that ended up with no parent
    pub unattached: BTreeSet<NodeId>,
    /// Load-balancer names referenced by at least one service binding
    pub used_load_balancers: BTreeSet<String>,
}

impl BuildOutput {
    /// Whether an orphan partition exists.
    pub fn has_orphans(&self) -> bool {
        !self.unattached.is_empty()
    }
}

/// Build the topology graph for `inventory`, running every step in order.
pub fn build(inventory: &Inventory) -> BuildOutput {
    let mut builder = GraphBuilder::new(inventory);
    builder.add_vpcs();
    builder.add_subnets();
    builder.add_databases();
    builder.index_routing();
    builder.collect_used_load_balancers();
    builder.add_load_balancers();
    builder.add_services();
    builder.attach_orphans();
    let output = builder.finish();

    info!(
        "Built topology graph: {} nodes, {} edges, {} unattached",
        output.graph.node_count(),
        output.graph.edge_count(),
        output.unattached.len()
    );
    output
}

/// Step-by-step graph builder.
///
/// Each `add_*` method is one pipeline step and may be called on its own in tests;
/// [`build`] calls them in the documented order.
pub struct GraphBuilder<'a> {
    inventory: &'a Inventory,
    graph: TopologyGraph,
    routing: RoutingIndex,
    used_load_balancers: BTreeSet<String>,
    unattached: BTreeSet<NodeId>,
}

impl<'a> GraphBuilder<'a> {
    /// Start an empty build over `inventory`.
    pub fn new(inventory: &'a Inventory) -> Self {
        Self {
            inventory,
            graph: TopologyGraph::new(),
            routing: RoutingIndex::default(),
            used_load_balancers: BTreeSet::new(),
            unattached: BTreeSet::new(),
        }
    }

    /// Graph built so far.
    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    /// Step 1: one node per VPC, detail = CIDR block or `unknown`.
    pub fn add_vpcs(&mut self) {
        let before = self.graph.node_count();
        for vpc in &self.inventory.vpcs.vpcs {
            let cidr = vpc.cidr_block.as_deref().unwrap_or("unknown");
            self.graph.add_node(Node::new(NodeId::vpc(&vpc.vpc_id)).with_detail(cidr));
        }
        debug!("Added {} VPC nodes", self.graph.node_count() - before);
    }

    /// Step 2: one node per subnet, detail = first tag value or subnet id.
    pub fn add_subnets(&mut self) {
        let mut linked = 0;
        for subnet in &self.inventory.subnets.subnets {
            let id = NodeId::subnet(&subnet.subnet_id);
            self.graph.add_node(Node::new(id.clone()).with_detail(subnet.display_name()));

            if self.graph.add_edge(&NodeId::vpc(&subnet.vpc_id), &id) {
                linked += 1;
            } else if !self.graph.contains(&NodeId::vpc(&subnet.vpc_id)) {
                warn!("Subnet {} references unknown VPC {}", subnet.subnet_id, subnet.vpc_id);
            }
        }
        debug!(
            "Added {} subnet nodes ({} linked to a VPC)",
            self.inventory.subnets.subnets.len(),
            linked
        );
    }

    /// Step 3: one node per database, `subnet → database` for each subnet-group member.
    pub fn add_databases(&mut self) {
        let mut edges = 0;
        for db in &self.inventory.rds.db_instances {
            let id = NodeId::database(&db.identifier);
            self.graph.add_node(Node::new(id.clone()));

            for subnet_id in db.subnet_ids() {
                if self.graph.add_edge(&NodeId::subnet(subnet_id), &id) {
                    edges += 1;
                } else {
                    trace!("Database {} lists subnet {} not in graph", db.identifier, subnet_id);
                }
            }
        }
        debug!(
            "Added {} database nodes with {} subnet edges",
            self.inventory.rds.db_instances.len(),
            edges
        );
    }

    /// Step 4: target-group → VPC and target-group → load-balancer maps.
    pub fn index_routing(&mut self) {
        self.routing = RoutingIndex::from_inventory(self.inventory);
    }

    /// Step 5: names of load balancers referenced by any service binding.
    pub fn collect_used_load_balancers(&mut self) {
        self.used_load_balancers = routing::used_load_balancer_names(self.inventory);
        debug!("{} load balancers referenced by services", self.used_load_balancers.len());
    }

    /// Step 6: nodes for used load balancers, `VPC → load balancer`.
    ///
    /// Load balancers wired into no service are omitted.
    pub fn add_load_balancers(&mut self) {
        let mut added = 0;
        for lb in &self.inventory.load_balancers.load_balancers {
            if !self.used_load_balancers.contains(&lb.load_balancer_name) {
                trace!("Omitting unused load balancer {}", lb.load_balancer_name);
                continue;
            }
            let id = NodeId::load_balancer(&lb.load_balancer_name);
            if self.graph.add_node(Node::new(id.clone())) {
                added += 1;
            }
            self.graph.add_edge(&NodeId::vpc(&lb.vpc_id), &id);
        }
        debug!("Added {added} load balancer nodes");
    }

    /// Step 7: cluster and service nodes with their routing edges.
    ///
    /// Load-balancer nodes referenced by a binding are created on demand, so a
    /// name recovered from a target-group ARN always gets a node.
    pub fn add_services(&mut self) {
        let before = self.graph.node_count();
        for svc in &self.inventory.services.services {
            let cluster_id = NodeId::cluster(svc.cluster_name());
            let service_id = NodeId::service(&svc.service_name);

            self.graph.add_node(Node::new(cluster_id.clone()));
            self.graph.add_node(Node::new(service_id.clone()).with_detail(&svc.service_name));
            self.graph.add_edge(&cluster_id, &service_id);

            for binding in &svc.load_balancers {
                if let Some(name) = routing::load_balancer_name(binding) {
                    let lb_id = NodeId::load_balancer(name);
                    self.graph.add_node(Node::new(lb_id.clone()));
                    self.graph.add_edge(&service_id, &lb_id);
                }

                let Some(tg_arn) = binding.target_group_arn.as_deref().filter(|a| !a.is_empty())
                else {
                    continue;
                };
                match self.routing.vpc_for(tg_arn) {
                    Some(vpc_id) => {
                        if let Some(lb_arn) = self.routing.load_balancer_for(tg_arn) {
                            trace!("Service {} routes via {tg_arn} on {lb_arn}", svc.service_name);
                        }
                        self.graph.add_edge(&NodeId::vpc(vpc_id), &service_id);
                    }
                    None => {
                        trace!("Service {} binds unknown target group {tg_arn}", svc.service_name);
                    }
                }
            }
        }
        debug!(
            "Added {} cluster/service/load balancer nodes for {} services",
            self.graph.node_count() - before,
            self.inventory.services.services.len()
        );
    }

    /// Step 8: attach always-contained nodes with no parent to `NO_VPC`.
    ///
    /// The sentinel is only created when at least one such node exists.
    pub fn attach_orphans(&mut self) {
        let orphans: Vec<NodeId> = self
            .graph
            .nodes()
            .filter(|n| n.kind().requires_container() && self.graph.in_degree(&n.id) == 0)
            .map(|n| n.id.clone())
            .collect();

        if orphans.is_empty() {
            return;
        }

        let sentinel = NodeId::no_vpc();
        self.graph.add_node(Node::new(sentinel.clone()));
        for orphan in &orphans {
            self.graph.add_edge(&sentinel, orphan);
        }
        debug!("Attached {} unattached resources to {sentinel}", orphans.len());
        self.unattached = orphans.into_iter().collect();
    }

    /// Finish the build.
    pub fn finish(self) -> BuildOutput {
        BuildOutput {
            graph: self.graph,
            unattached: self.unattached,
            used_load_balancers: self.used_load_balancers,
        }
    }
}
