//! Error handling for vpc-topology
//!
//! This module provides the error taxonomy and user-friendly error reporting for the
//! diagram generator. The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can match on the exact failure
//! 2. **User-friendly messages** naming the file, key, or path to fix before re-running
//!
//! # Architecture
//!
//! - [`TopologyError`] - Enumerated error types for every failure mode
//! - [`ErrorContext`] - Wrapper that adds a suggestion and details for CLI display
//!
//! # Error Categories
//!
//! - **Input**: [`TopologyError::InventoryNotFound`], [`TopologyError::MissingInputFile`],
//!   [`TopologyError::MalformedInput`]
//! - **Output**: [`TopologyError::RenderFailure`]
//! - **Configuration**: [`TopologyError::ConfigError`]
//!
//! None of these are retried. The tool is a one-shot batch transform, so every error
//! is reported to the user and the run stops.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vpc_topology::core::{TopologyError, user_friendly_error};
//!
//! let error = TopologyError::MissingInputFile {
//!     file: "vpcs.json".to_string(),
//!     path: "/tmp/inventory/vpcs.json".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for vpc-topology operations
///
/// Library functions return [`anyhow::Result`] and raise these variants, so the CLI
/// can downcast them in [`user_friendly_error`] and print tailored guidance.
#[derive(Error, Debug)]
pub enum TopologyError {
    /// The inventory folder passed on the command line does not exist
    #[error("Inventory folder not found: {path}")]
    InventoryNotFound {
        /// Path as given by the user (after `~` expansion)
        path: String,
    },

    /// A required inventory document is absent from the folder
    #[error("Required inventory file '{file}' not found at {path}")]
    MissingInputFile {
        /// Document name, e.g. `vpcs.json`
        file: String,
        /// Full path that was probed
        path: String,
    },

    /// A document is not valid JSON or lacks a required key/field
    #[error("Malformed inventory file '{file}': {reason}")]
    MalformedInput {
        /// Document name, e.g. `subnets.json`
        file: String,
        /// Parser message, including line and column when available
        reason: String,
    },

    /// A diagram could not be rasterized or written
    #[error("Failed to render diagram to {path}: {reason}")]
    RenderFailure {
        /// Output file that could not be produced
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// Invalid rendering configuration (environment overrides)
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What was wrong with the configuration
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that carries user-facing guidance
///
/// Suggestions are actionable steps; details explain why the error happened.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TopologyError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: TopologyError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`TopologyError`] variants and raw [`std::io::Error`]s; anything else is
/// wrapped as [`TopologyError::Other`] with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<TopologyError>() {
        Ok(topology_error) => return create_error_context(topology_error),
        Err(other) => other,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(TopologyError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check that the inventory folder is readable and writable by the current user")
                .with_details("Diagrams are written next to the inventory documents");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(TopologyError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(TopologyError::Other {
        message,
    })
}

/// Map each [`TopologyError`] variant to an [`ErrorContext`] with tailored guidance.
fn create_error_context(error: TopologyError) -> ErrorContext {
    match error {
        TopologyError::InventoryNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the folder produced by the inventory collector, e.g. 'vpc-topology ./inventory'")
            .with_details("The folder must contain one JSON document per resource kind"),

        TopologyError::MissingInputFile { ref file, .. } => {
            let suggestion = format!(
                "Re-run the inventory collector so that '{file}' is written, or create it with an empty collection"
            );
            ErrorContext::new(error).with_suggestion(suggestion).with_details(format!(
                "All of the following documents are required: {}",
                crate::constants::INVENTORY_FILES.join(", ")
            ))
        }

        TopologyError::MalformedInput { ref file, .. } => {
            let suggestion = format!(
                "Check that '{file}' is the unmodified JSON output of the corresponding describe call"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("No diagrams are produced when any inventory document is invalid")
        }

        TopologyError::RenderFailure { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the inventory folder is writable and has free space")
            .with_details("Diagrams written before the failure are kept"),

        TopologyError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Unset or fix the VPC_TOPOLOGY_* environment variables"),

        TopologyError::Other { .. } => ErrorContext::new(error),
    }
}
