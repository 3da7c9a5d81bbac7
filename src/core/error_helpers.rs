//! Error handling helper functions and utilities
//!
//! This module provides the file and JSON operations used by the inventory loader
//! and the renderer, mapping low-level failures onto [`TopologyError`] variants so
//! every message names the offending document or output path.

use anyhow::Result;
use std::path::Path;

use super::error::TopologyError;

/// Common file operations with consistent error handling
pub trait FileOperations {
    /// Read a required inventory document as text.
    ///
    /// A missing file becomes [`TopologyError::MissingInputFile`]; other IO failures
    /// (permissions, invalid UTF-8) become [`TopologyError::MalformedInput`].
    fn read_document_with_context(folder: impl AsRef<Path>, file: &str) -> Result<String> {
        let path = folder.as_ref().join(file);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TopologyError::MissingInputFile {
                    file: file.to_string(),
                    path: path.display().to_string(),
                }
                .into())
            }
            Err(e) => Err(TopologyError::MalformedInput {
                file: file.to_string(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    /// Write rendered output, reporting failures as [`TopologyError::RenderFailure`].
    fn write_output_with_context(path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, content.as_ref()).map_err(|e| {
            TopologyError::RenderFailure {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Implement FileOperations for a unit struct to enable trait usage
pub struct FileOps;
impl FileOperations for FileOps {}

/// Common JSON operations with consistent error handling
pub trait JsonOperations {
    /// Read and deserialize a required inventory document.
    ///
    /// Syntax errors and missing required fields both surface as
    /// [`TopologyError::MalformedInput`] carrying serde's line/column message.
    fn read_document_json<T: serde::de::DeserializeOwned>(
        folder: impl AsRef<Path>,
        file: &str,
    ) -> Result<T> {
        let content = FileOps::read_document_with_context(folder, file)?;
        serde_json::from_str(&content).map_err(|e| {
            TopologyError::MalformedInput {
                file: file.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Implement JsonOperations for a unit struct to enable trait usage
pub struct JsonOps;
impl JsonOperations for JsonOps {}
