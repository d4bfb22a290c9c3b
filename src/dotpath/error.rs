//! Error types for dot-path parsing and traversal.

use std::fmt;

/// Errors that can occur while parsing a dot-path or applying it to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path string is malformed (empty segment, leading/trailing/doubled separator).
    InvalidPathSyntax {
        path: String,
        position: usize,
        message: String,
    },
    /// The root value cannot be traversed (a scalar used as the target itself).
    UnsupportedTargetType { kind: String },
    /// A record rejected a write to a field it does not declare and has no dynamic store.
    UnknownField { type_name: String, field: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidPathSyntax {
                path,
                position,
                message,
            } => write!(
                f,
                "Invalid path syntax in '{}' at position {}: {}",
                path, position, message
            ),
            PathError::UnsupportedTargetType { kind } => {
                write!(f, "Unsupported target type: {} cannot be traversed", kind)
            }
            PathError::UnknownField { type_name, field } => write!(
                f,
                "Cannot write field '{}' on {}: no such field and no dynamic fields",
                field, type_name
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, PathError>;
