//! Error types for IDL loading and type resolution.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for IDL loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The IDL file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The IDL source is not valid JSON or does not match the model.
    #[error("malformed IDL in '{module}': {source}")]
    Json {
        /// Name of the source being parsed.
        module: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A required top-level container is absent.
    #[error("'{module}' has no top-level '{container}' array")]
    MissingContainer {
        /// Name of the source being parsed.
        module: String,
        /// Missing container key.
        container: &'static str,
    },
}

impl ParseError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a JSON error for the given source name.
    pub fn json(module: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            module: module.into(),
            source,
        }
    }

    /// Creates a missing container error.
    pub fn missing_container(module: impl Into<String>, container: &'static str) -> Self {
        Self::MissingContainer {
            module: module.into(),
            container,
        }
    }
}

/// Error type for type descriptor resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Descriptor is empty or whitespace.
    #[error("empty type descriptor")]
    Empty,

    /// Array marker with no element name (e.g. `"[]"`).
    #[error("dangling array marker in type descriptor '{descriptor}'")]
    DanglingArray {
        /// Offending descriptor.
        descriptor: String,
    },

    /// Bare name that cannot be used as a type name.
    #[error("invalid type name '{descriptor}'")]
    InvalidName {
        /// Offending descriptor.
        descriptor: String,
    },
}

impl ResolveError {
    /// Creates a dangling array marker error.
    pub fn dangling_array(descriptor: impl Into<String>) -> Self {
        Self::DanglingArray {
            descriptor: descriptor.into(),
        }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(descriptor: impl Into<String>) -> Self {
        Self::InvalidName {
            descriptor: descriptor.into(),
        }
    }
}
