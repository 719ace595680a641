//! Error types for `framedata`
//!
//! This module provides the error hierarchy for the analyzer and maps each
//! failure class to a process exit code.

use thiserror::Error;

pub use framedata_core::error::{ConfigError, Severity, ValidationIssue};

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `framedata` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Weapon lookup error (no archive entry, or more than one)
    pub const LOOKUP_ERROR: i32 = 4;

    /// Event parameter decoding error
    pub const DECODE_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `framedata` operations.
///
/// This enum aggregates all domain-specific errors and provides
/// a unified interface for error handling and exit code mapping.
#[derive(Debug, Error)]
pub enum FrameDataError {
    /// Rule-file loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Weapon archive lookup error
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Timeline or parameter decoding error
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error while writing output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FrameDataError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Lookup(_) => ExitCode::LOOKUP_ERROR,
            Self::Decode(_) => ExitCode::DECODE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Lookup Errors
// ============================================================================

/// A configured weapon id must resolve to exactly one archive entry.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No archive entry matched the weapon id
    #[error("no archive entry '{entry}' for weapon '{weapon_id}'{}", suggestion.as_ref().map_or_else(String::new, |s| format!(" (did you mean '{s}'?)")))]
    NotFound {
        /// Configured weapon id
        weapon_id: String,
        /// Entry file name that was searched for
        entry: String,
        /// Closest existing entry name, if any is near
        suggestion: Option<String>,
    },

    /// More than one archive entry matched the weapon id
    #[error("weapon '{weapon_id}' matches {} archive entries: {}", candidates.len(), candidates.join(", "))]
    Ambiguous {
        /// Configured weapon id
        weapon_id: String,
        /// Every matching entry name
        candidates: Vec<String>,
    },
}

// ============================================================================
// Decode Errors
// ============================================================================

/// Errors decoding a timeline container or an event's parameters.
///
/// Format mismatches are not errors (the entry is skipped); these only fire
/// once a container has been recognized.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Recognized container whose body is malformed
    #[error("malformed timeline container: {0}")]
    Container(String),

    /// No field template for a recognized event type
    #[error("no field template for event type {type_code} (container version {version})")]
    MissingTemplate {
        /// Container version
        version: u32,
        /// Event type code
        type_code: i32,
    },

    /// Parameter bytes end before the template does
    #[error("field '{field}' needs {needed} byte(s) at offset {offset}, only {available} available")]
    Truncated {
        /// Field being decoded
        field: String,
        /// Byte offset of the field
        offset: usize,
        /// Bytes required by the field
        needed: usize,
        /// Bytes in the parameter block
        available: usize,
    },

    /// Decoded parameters lack a field the classifier reads
    #[error("event type {type_code} has no '{field}' field")]
    MissingField {
        /// Event type code
        type_code: i32,
        /// Expected field name
        field: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `framedata` operations.
pub type Result<T> = std::result::Result<T, FrameDataError>;

// ============================================================================
// Tests
// ============================================================================
