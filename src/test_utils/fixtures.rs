//! Inventory fixtures for tests.
//!
//! [`InventoryFixture`] assembles the eight inventory documents as JSON, so the
//! same fixture can either be parsed in memory ([`InventoryFixture::build`]) or
//! written into a folder for the loader and the CLI ([`InventoryFixture::write_to`]).

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

use crate::constants::{
    EC2_FILE, ECS_CLUSTERS_FILE, ECS_SERVICES_FILE, LOAD_BALANCERS_FILE, RDS_FILE,
    SUBNETS_FILE, TARGET_GROUPS_FILE, VPCS_FILE,
};
use crate::inventory::Inventory;

const ACCOUNT: &str = "123456789012";
const REGION: &str = "us-east-1";

/// A binding as `(loadBalancerName, targetGroupArn)`.
pub type Binding<'a> = (Option<&'a str>, Option<&'a str>);

/// Builder for a complete inventory snapshot.
#[derive(Clone, Debug, Default)]
pub struct InventoryFixture {
    vpcs: Vec<Value>,
    subnets: Vec<Value>,
    instances: usize,
    databases: Vec<Value>,
    clusters: Vec<String>,
    load_balancers: Vec<Value>,
    services: Vec<Value>,
    target_groups: Vec<Value>,
}

impl InventoryFixture {
    /// Empty snapshot: every document present, every collection empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// One VPC with three subnets tagged `web`/`app`/`data` and a database spanning
    /// the two private ones.
    pub fn three_tier() -> Self {
        Self::new()
            .vpc("vpc-0a1b2c3d", Some("10.0.0.0/16"))
            .subnet("subnet-web", "vpc-0a1b2c3d", Some("web"))
            .subnet("subnet-app", "vpc-0a1b2c3d", Some("app"))
            .subnet("subnet-data", "vpc-0a1b2c3d", Some("data"))
            .database("orders", &["subnet-app", "subnet-data"])
            .instances(2)
    }

    /// Add a VPC.
    pub fn vpc(mut self, id: &str, cidr: Option<&str>) -> Self {
        let mut vpc = json!({ "VpcId": id, "State": "available" });
        if let Some(cidr) = cidr {
            vpc["CidrBlock"] = json!(cidr);
        }
        self.vpcs.push(vpc);
        self
    }

    /// Add a subnet, optionally with a `Name` tag.
    pub fn subnet(mut self, id: &str, vpc_id: &str, tag: Option<&str>) -> Self {
        let mut subnet = json!({ "SubnetId": id, "VpcId": vpc_id });
        if let Some(tag) = tag {
            subnet["Tags"] = json!([{ "Key": "Name", "Value": tag }]);
        }
        self.subnets.push(subnet);
        self
    }

    /// Add a database whose subnet group lists `subnets`.
    pub fn database(mut self, id: &str, subnets: &[&str]) -> Self {
        let members: Vec<Value> =
            subnets.iter().map(|s| json!({ "SubnetIdentifier": s })).collect();
        self.databases.push(json!({
            "DBInstanceIdentifier": id,
            "Engine": "postgres",
            "DBSubnetGroup": { "Subnets": members },
        }));
        self
    }

    /// Add `count` EC2 instances in a single reservation.
    pub fn instances(mut self, count: usize) -> Self {
        self.instances += count;
        self
    }

    /// Add a load balancer in `vpc_id` forwarding to `target_groups`.
    pub fn load_balancer(mut self, name: &str, vpc_id: &str, target_groups: &[&str]) -> Self {
        self.load_balancers.push(json!({
            "LoadBalancerArn": format!(
                "arn:aws:elasticloadbalancing:{REGION}:{ACCOUNT}:loadbalancer/app/{name}/0001"
            ),
            "LoadBalancerName": name,
            "VpcId": vpc_id,
            "TargetGroupArns": target_groups,
        }));
        self
    }

    /// Add a service in `cluster` with the given bindings.
    pub fn service(mut self, name: &str, cluster: &str, bindings: &[Binding<'_>]) -> Self {
        let cluster_arn = format!("arn:aws:ecs:{REGION}:{ACCOUNT}:cluster/{cluster}");
        if !self.clusters.contains(&cluster_arn) {
            self.clusters.push(cluster_arn.clone());
        }

        let load_balancers: Vec<Value> = bindings
            .iter()
            .map(|(lb, tg)| {
                let mut binding = json!({ "containerName": name, "containerPort": 8080 });
                if let Some(lb) = lb {
                    binding["loadBalancerName"] = json!(lb);
                }
                if let Some(tg) = tg {
                    binding["targetGroupArn"] = json!(tg);
                }
                binding
            })
            .collect();

        self.services.push(json!({
            "serviceName": name,
            "clusterArn": cluster_arn,
            "loadBalancers": load_balancers,
        }));
        self
    }

    /// Add a target group in `vpc_id`.
    pub fn target_group(mut self, arn: &str, vpc_id: &str) -> Self {
        self.target_groups.push(json!({ "TargetGroupArn": arn, "VpcId": vpc_id }));
        self
    }

    /// The eight documents keyed by file name, in load order.
    pub fn documents(&self) -> Vec<(&'static str, Value)> {
        let reservations = if self.instances == 0 {
            json!([])
        } else {
            let instances: Vec<Value> = (0..self.instances)
                .map(|i| json!({ "InstanceId": format!("i-{i:08x}") }))
                .collect();
            json!([{ "Instances": instances }])
        };

        vec![
            (VPCS_FILE, json!({ "Vpcs": self.vpcs })),
            (SUBNETS_FILE, json!({ "Subnets": self.subnets })),
            (EC2_FILE, json!({ "Reservations": reservations })),
            (RDS_FILE, json!({ "DBInstances": self.databases })),
            (ECS_CLUSTERS_FILE, json!({ "clusterArns": self.clusters })),
            (LOAD_BALANCERS_FILE, json!({ "LoadBalancers": self.load_balancers })),
            (ECS_SERVICES_FILE, json!({ "services": self.services })),
            (TARGET_GROUPS_FILE, json!({ "TargetGroups": self.target_groups })),
        ]
    }

    /// Parse the documents in memory.
    ///
    /// Panics if a document does not match the schema, which means the fixture
    /// itself is wrong.
    pub fn build(&self) -> Inventory {
        let mut docs = self.documents().into_iter().map(|(_, value)| value);
        let mut next = || docs.next().unwrap_or(Value::Null);

        Inventory {
            vpcs: serde_json::from_value(next()).expect("vpcs fixture"),
            subnets: serde_json::from_value(next()).expect("subnets fixture"),
            ec2: serde_json::from_value(next()).expect("ec2 fixture"),
            rds: serde_json::from_value(next()).expect("rds fixture"),
            ecs_clusters: next(),
            load_balancers: serde_json::from_value(next()).expect("load balancers fixture"),
            services: serde_json::from_value(next()).expect("services fixture"),
            target_groups: serde_json::from_value(next()).expect("target groups fixture"),
        }
    }

    /// Write every document into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create fixture dir {}", dir.display()))?;
        for (file, value) in self.documents() {
            let path = dir.join(file);
            let content = serde_json::to_string_pretty(&value)?;
            fs::write(&path, content)
                .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        }
        Ok(())
    }
}
