//! Path helpers.

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::core::TopologyError;

/// Resolve the inventory folder argument to an absolute, existing directory.
///
/// A leading `~` is expanded to the home directory; relative paths are resolved
/// against the current directory.
///
/// # Errors
///
/// Returns [`TopologyError::InventoryNotFound`] if the path does not exist or is
/// not a directory.
pub fn resolve_folder(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::tilde(raw);
    let path = PathBuf::from(expanded.as_ref());

    let not_found = || TopologyError::InventoryNotFound {
        path: path.display().to_string(),
    };

    let resolved = path.canonicalize().map_err(|_| not_found())?;
    if !resolved.is_dir() {
        return Err(not_found().into());
    }

    debug!("Resolved inventory folder {raw} to {}", resolved.display());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolves_existing_directory() {
        let temp = TempDir::new().unwrap();
        let resolved = resolve_folder(temp.path().to_str().unwrap()).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = resolve_folder(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TopologyError>(),
            Some(TopologyError::InventoryNotFound { .. })
        ));
    }

    #[test]
    fn test_file_is_not_a_folder() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("vpcs.json");
        std::fs::write(&file, "{}").unwrap();
        assert!(resolve_folder(file.to_str().unwrap()).is_err());
    }
}
