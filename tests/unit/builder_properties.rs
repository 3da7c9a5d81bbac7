use std::collections::HashSet;

use vpc_topology::graph::{NodeId, NodeKind, build};
use vpc_topology::render::InventorySummary;
use vpc_topology::test_utils::{InventoryFixture, init_test_logging};

fn busy_fixture() -> InventoryFixture {
    let tg = "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/api-gw/abc123";
    InventoryFixture::three_tier()
        .vpc("vpc-2", Some("10.1.0.0/16"))
        .subnet("subnet-x", "vpc-2", None)
        .database("reports", &["subnet-x", "subnet-missing"])
        .database("scratch", &[])
        .target_group(tg, "vpc-2")
        .load_balancer("web", "vpc-0a1b2c3d", &[])
        .load_balancer("idle", "vpc-2", &[])
        .service("frontend", "prod", &[(Some("web"), None)])
        .service("api", "prod", &[(None, Some(tg))])
        .service("batch", "jobs", &[])
}

#[test]
fn test_node_ids_are_unique() {
    init_test_logging(None);
    let output = build(&busy_fixture().build());
    let ids: Vec<&NodeId> = output.graph.nodes().map(|n| &n.id).collect();
    let unique: HashSet<&NodeId> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
}

#[test]
fn test_database_gets_one_edge_per_known_subnet() {
    let output = build(&busy_fixture().build());

    let orders = output.graph.predecessors(&NodeId::database("orders"));
    assert_eq!(orders, vec![NodeId::subnet("subnet-app"), NodeId::subnet("subnet-data")]);

    // subnet-missing is not in the inventory
    let reports = output.graph.predecessors(&NodeId::database("reports"));
    assert_eq!(reports, vec![NodeId::subnet("subnet-x")]);
}

#[test]
fn test_load_balancer_nodes_only_for_used_names() {
    let output = build(&busy_fixture().build());
    let graph = &output.graph;

    assert!(graph.contains(&NodeId::load_balancer("web")));
    assert!(graph.contains(&NodeId::load_balancer("api-gw")));
    assert!(!graph.contains(&NodeId::load_balancer("idle")));
    assert_eq!(graph.count_kind(NodeKind::LoadBalancer), output.used_load_balancers.len());
}

#[test]
fn test_target_group_binding_recovers_load_balancer() {
    let output = build(&busy_fixture().build());
    assert!(output
        .graph
        .has_edge(&NodeId::service("api"), &NodeId::load_balancer("api-gw")));
    assert!(output.graph.has_edge(&NodeId::vpc("vpc-2"), &NodeId::service("api")));
}

#[test]
fn test_unattached_set_matches_parentless_contained_nodes() {
    let output = build(&busy_fixture().build());
    let graph = &output.graph;

    let expected: HashSet<NodeId> = [
        NodeId::database("scratch"),
        NodeId::cluster("prod"),
        NodeId::cluster("jobs"),
    ]
    .into_iter()
    .collect();
    let actual: HashSet<NodeId> = output.unattached.iter().cloned().collect();
    assert_eq!(actual, expected);

    for id in &output.unattached {
        assert_eq!(graph.predecessors(id), vec![NodeId::no_vpc()]);
    }
    // Every always-contained node now has a parent
    assert!(graph
        .nodes()
        .filter(|n| n.kind().requires_container())
        .all(|n| graph.in_degree(&n.id) > 0));
}

#[test]
fn test_no_sentinel_without_unattached() {
    let output = build(&InventoryFixture::three_tier().build());
    assert!(output.unattached.is_empty());
    assert!(!output.graph.contains(&NodeId::no_vpc()));
}

#[test]
fn test_build_is_idempotent() {
    let inventory = busy_fixture().build();
    let first = build(&inventory);
    let second = build(&inventory);

    let ids = |o: &vpc_topology::graph::BuildOutput| -> Vec<NodeId> {
        o.graph.nodes().map(|n| n.id.clone()).collect()
    };
    let edges = |o: &vpc_topology::graph::BuildOutput| -> Vec<(NodeId, NodeId)> {
        o.graph.edges().map(|(a, b)| (a.clone(), b.clone())).collect()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(edges(&first), edges(&second));
    assert_eq!(first.unattached, second.unattached);
}

#[test]
fn test_end_to_end_three_nodes() {
    let inventory = InventoryFixture::new()
        .vpc("vpc-1", Some("10.0.0.0/16"))
        .subnet("subnet-1", "vpc-1", Some("web"))
        .database("orders", &["subnet-1"])
        .build();
    let output = build(&inventory);

    assert_eq!(output.graph.node_count(), 3);
    let edges: Vec<(String, String)> = output
        .graph
        .edges()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("vpc-1".to_string(), "subnet-1".to_string()),
            ("subnet-1".to_string(), "orders".to_string()),
        ]
    );
    assert!(output.unattached.is_empty());

    let summary = InventorySummary::collect(&inventory, &output);
    assert_eq!((summary.vpcs, summary.subnets, summary.rds_instances), (1, 1, 1));
    assert_eq!((summary.load_balancers, summary.services), (0, 0));
}
