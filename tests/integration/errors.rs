use predicates::prelude::*;
use vpc_topology::constants::{RDS_FILE, SUBNETS_FILE};
use vpc_topology::test_utils::InventoryFixture;

use crate::common::{inventory_dir, png_files, vpc_topology_cmd};

#[test]
fn test_missing_document_fails_before_rendering() {
    let dir = inventory_dir(&InventoryFixture::three_tier());
    std::fs::remove_file(dir.path().join(RDS_FILE)).unwrap();

    vpc_topology_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(RDS_FILE));

    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn test_malformed_document() {
    let dir = inventory_dir(&InventoryFixture::three_tier());
    std::fs::write(dir.path().join(SUBNETS_FILE), "{ not json").unwrap();

    vpc_topology_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(SUBNETS_FILE));
}

#[test]
fn test_missing_folder() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    vpc_topology_cmd()
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_config_override() {
    let dir = inventory_dir(&InventoryFixture::three_tier());
    vpc_topology_cmd()
        .arg(dir.path())
        .env("VPC_TOPOLOGY_DPI", "lots")
        .assert()
        .failure()
        .stderr(predicate::str::contains("VPC_TOPOLOGY_DPI"));
}

#[test]
fn test_unwritable_output_names_path() {
    let dir = inventory_dir(&InventoryFixture::three_tier());
    // A directory squatting on the output name makes the write fail
    std::fs::create_dir(dir.path().join("vpc-0a1b2c3d_topology.png")).unwrap();

    vpc_topology_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to render diagram"))
        .stderr(predicate::str::contains("vpc-0a1b2c3d_topology.png"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    vpc_topology_cmd().assert().failure().code(2);
}
