//! Shared helpers for the integration suite.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;
use vpc_topology::test_utils::InventoryFixture;

pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// The binary under test, with logging and render overrides cleared.
pub fn vpc_topology_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vpc-topology").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("VPC_TOPOLOGY_DPI")
        .env_remove("VPC_TOPOLOGY_WIDTH")
        .env_remove("VPC_TOPOLOGY_HEIGHT")
        .env_remove("VPC_TOPOLOGY_FONT");
    cmd
}

/// A temporary folder populated with `fixture`.
pub fn inventory_dir(fixture: &InventoryFixture) -> TempDir {
    let temp = TempDir::new().unwrap();
    fixture.write_to(temp.path()).unwrap();
    temp
}

/// PNG files in `dir`, sorted by name.
pub fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}
