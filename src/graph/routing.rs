//! Target-group lookups and load-balancer name recovery.
//!
//! Services declare load-balancer bindings either by load-balancer name or only by
//! target-group ARN. These helpers turn both forms into a logical load-balancer
//! name and anchor services to a VPC through their target groups.

use std::collections::{BTreeSet, HashMap};

use crate::inventory::{Inventory, LoadBalancerBinding};

/// Recover a logical name from a target-group ARN.
///
/// ELBv2 target-group ARNs end in `targetgroup/<name>/<id>`: the text after the last
/// `:` is split on `/` and the second-to-last segment is returned. ARNs that are
/// empty or yield fewer than two segments recover nothing.
///
/// ```
/// use vpc_topology::graph::routing::name_from_target_group_arn;
///
/// let arn = "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/my-tg/abc123";
/// assert_eq!(name_from_target_group_arn(arn), Some("my-tg"));
/// assert_eq!(name_from_target_group_arn("arn:aws:thing:no-slashes"), None);
/// ```
#[must_use]
pub fn name_from_target_group_arn(arn: &str) -> Option<&str> {
    if arn.is_empty() {
        return None;
    }
    let resource = arn.rsplit(':').next().unwrap_or(arn);
    let segments: Vec<&str> = resource.split('/').collect();
    if segments.len() < 2 {
        return None;
    }
    Some(segments[segments.len() - 2])
}

/// Resolve the load-balancer name a binding refers to.
///
/// A non-empty `loadBalancerName` wins; otherwise the name is recovered from
/// `targetGroupArn` via [`name_from_target_group_arn`].
#[must_use]
pub fn load_balancer_name(binding: &LoadBalancerBinding) -> Option<&str> {
    match binding.load_balancer_name.as_deref() {
        Some(name) if !name.is_empty() => Some(name),
        _ => binding.target_group_arn.as_deref().and_then(name_from_target_group_arn),
    }
}

/// Names of every load balancer referenced by at least one service binding.
pub fn used_load_balancer_names(inventory: &Inventory) -> BTreeSet<String> {
    inventory
        .services
        .services
        .iter()
        .flat_map(|svc| svc.load_balancers.iter())
        .filter_map(load_balancer_name)
        .map(str::to_string)
        .collect()
}

/// Lookup tables derived from the target-group and load-balancer collections.
#[derive(Debug, Clone, Default)]
pub struct RoutingIndex {
    /// Target-group ARN → owning VPC id
    tg_to_vpc: HashMap<String, String>,
    /// Target-group ARN → load-balancer ARN
    tg_to_lb: HashMap<String, String>,
}

impl RoutingIndex {
    /// Build both maps from the inventory.
    ///
    /// When a target group is listed by several load balancers, the last one wins.
    pub fn from_inventory(inventory: &Inventory) -> Self {
        let tg_to_lb = inventory
            .load_balancers
            .load_balancers
            .iter()
            .flat_map(|lb| {
                lb.target_group_arns
                    .iter()
                    .map(move |tg| (tg.clone(), lb.load_balancer_arn.clone()))
            })
            .collect();

        let tg_to_vpc = inventory
            .target_groups
            .target_groups
            .iter()
            .map(|tg| (tg.target_group_arn.clone(), tg.vpc_id.clone()))
            .collect();

        Self {
            tg_to_vpc,
            tg_to_lb,
        }
    }

    /// VPC the target group belongs to.
    pub fn vpc_for(&self, target_group_arn: &str) -> Option<&str> {
        self.tg_to_vpc.get(target_group_arn).map(String::as_str)
    }

    /// Load balancer ARN the target group is attached to.
    pub fn load_balancer_for(&self, target_group_arn: &str) -> Option<&str> {
        self.tg_to_lb.get(target_group_arn).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{EcsService, LoadBalancer, TargetGroup};

    fn binding(name: Option<&str>, arn: Option<&str>) -> LoadBalancerBinding {
        LoadBalancerBinding {
            load_balancer_name: name.map(str::to_string),
            target_group_arn: arn.map(str::to_string),
        }
    }

    #[test]
    fn test_name_from_target_group_arn() {
        assert_eq!(
            name_from_target_group_arn(
                "arn:aws:elasticloadbalancing:eu-west-1:111122223333:targetgroup/my-tg/abc123"
            ),
            Some("my-tg")
        );
        assert_eq!(name_from_target_group_arn("targetgroup/api-gw/0f1e"), Some("api-gw"));
        assert_eq!(name_from_target_group_arn("arn:aws:x:y:z:single"), None);
        assert_eq!(name_from_target_group_arn(""), None);
    }

    #[test]
    fn test_direct_name_takes_precedence() {
        let b = binding(Some("classic-lb"), Some("arn:aws:e:r:a:targetgroup/tg-name/1"));
        assert_eq!(load_balancer_name(&b), Some("classic-lb"));
    }

    #[test]
    fn test_empty_name_falls_back_to_arn() {
        let b = binding(Some(""), Some("arn:aws:e:r:a:targetgroup/tg-name/1"));
        assert_eq!(load_balancer_name(&b), Some("tg-name"));

        let b = binding(None, Some("arn:aws:e:r:a:targetgroup/tg-name/1"));
        assert_eq!(load_balancer_name(&b), Some("tg-name"));
    }

    #[test]
    fn test_unresolvable_binding() {
        assert_eq!(load_balancer_name(&binding(None, None)), None);
        assert_eq!(load_balancer_name(&binding(None, Some(""))), None);
        assert_eq!(load_balancer_name(&binding(None, Some("arn:aws:e:r:a:plain"))), None);
    }

    #[test]
    fn test_used_names_and_index() {
        let mut inventory = Inventory::default();
        inventory.services.services.push(EcsService {
            service_name: "api".to_string(),
            cluster_arn: "arn:aws:ecs:r:a:cluster/prod".to_string(),
            load_balancers: vec![
                binding(Some("web"), None),
                binding(None, Some("arn:aws:e:r:a:targetgroup/api-gw/9")),
                binding(None, Some("broken")),
            ],
        });
        inventory.load_balancers.load_balancers.push(LoadBalancer {
            load_balancer_arn: "arn:lb/web".to_string(),
            load_balancer_name: "web".to_string(),
            vpc_id: "vpc-1".to_string(),
            target_group_arns: vec!["arn:tg/1".to_string()],
        });
        inventory.target_groups.target_groups.push(TargetGroup {
            target_group_arn: "arn:tg/1".to_string(),
            vpc_id: "vpc-1".to_string(),
        });

        let used = used_load_balancer_names(&inventory);
        assert_eq!(used.into_iter().collect::<Vec<_>>(), vec!["api-gw", "web"]);

        let index = RoutingIndex::from_inventory(&inventory);
        assert_eq!(index.vpc_for("arn:tg/1"), Some("vpc-1"));
        assert_eq!(index.load_balancer_for("arn:tg/1"), Some("arn:lb/web"));
        assert_eq!(index.vpc_for("arn:tg/unknown"), None);
    }
}
