use predicates::prelude::*;
use vpc_topology::test_utils::InventoryFixture;

use crate::common::{PNG_MAGIC, inventory_dir, png_files, vpc_topology_cmd};

#[test]
fn test_single_vpc_produces_one_diagram() {
    let fixture = InventoryFixture::new()
        .vpc("vpc-0abc", Some("10.0.0.0/16"))
        .subnet("subnet-1", "vpc-0abc", Some("web"))
        .database("orders", &["subnet-1"]);
    let dir = inventory_dir(&fixture);

    vpc_topology_cmd().arg(dir.path()).assert().success();

    assert_eq!(png_files(dir.path()), vec!["vpc-0abc_topology.png"]);
    let bytes = std::fs::read(dir.path().join("vpc-0abc_topology.png")).unwrap();
    assert!(bytes.starts_with(PNG_MAGIC));
}

#[test]
fn test_unattached_resources_get_orphan_diagram() {
    let tg = "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/api-gw/6d0ecf831eec9f09";
    let fixture = InventoryFixture::three_tier()
        .vpc("vpc-0def", None)
        .target_group(tg, "vpc-0def")
        .load_balancer("api-gw", "vpc-0def", &[tg])
        .service("api", "prod", &[(None, Some(tg))])
        .database("legacy", &[]);
    let dir = inventory_dir(&fixture);

    vpc_topology_cmd().arg(dir.path()).assert().success();

    assert_eq!(
        png_files(dir.path()),
        vec![
            "NO_VPC_topology.png",
            "vpc-0a1b2c3d_topology.png",
            "vpc-0def_topology.png",
        ]
    );
}

#[test]
fn test_empty_inventory_writes_nothing() {
    let dir = inventory_dir(&InventoryFixture::new());
    vpc_topology_cmd().arg(dir.path()).assert().success();
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn test_info_log_names_written_files() {
    let dir = inventory_dir(&InventoryFixture::three_tier());
    vpc_topology_cmd()
        .arg(dir.path())
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stderr(predicate::str::contains("vpc-0a1b2c3d_topology.png"));
}

#[test]
fn test_dpi_override_changes_image_size() {
    let dir = inventory_dir(&InventoryFixture::three_tier());
    vpc_topology_cmd()
        .arg(dir.path())
        .env("VPC_TOPOLOGY_DPI", "50")
        .assert()
        .success();

    // IHDR width: big-endian u32 at byte 16
    let bytes = std::fs::read(dir.path().join("vpc-0a1b2c3d_topology.png")).unwrap();
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    assert_eq!(width, 900);
}

#[test]
fn test_help_and_version() {
    vpc_topology_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("FOLDER"));
    vpc_topology_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
