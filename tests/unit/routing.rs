use vpc_topology::graph::routing::{load_balancer_name, name_from_target_group_arn};
use vpc_topology::inventory::LoadBalancerBinding;

#[test]
fn test_name_from_target_group_arn() {
    assert_eq!(
        name_from_target_group_arn(
            "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/my-tg/abc123"
        ),
        Some("my-tg")
    );
    assert_eq!(name_from_target_group_arn("arn:aws:elb:us-east-1:1:targetgroup"), None);
    assert_eq!(name_from_target_group_arn(""), None);
}

#[test]
fn test_direct_name_wins_over_arn() {
    let binding = LoadBalancerBinding {
        load_balancer_name: Some("classic".to_string()),
        target_group_arn: Some("arn:aws:elb:r:1:targetgroup/other/1".to_string()),
    };
    assert_eq!(load_balancer_name(&binding), Some("classic"));
}

#[test]
fn test_empty_binding_has_no_name() {
    assert_eq!(load_balancer_name(&LoadBalancerBinding::default()), None);
}
