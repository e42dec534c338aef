//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// IDL loading error.
    #[error("IDL parse error: {0}")]
    Parse(#[from] kurento_idl::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised while generating one module.
    #[error("in '{module}': {source}")]
    Module {
        /// Source file of the module.
        module: String,
        /// Underlying error.
        source: Box<CodegenError>,
    },

    /// Error raised while resolving one item of a module.
    #[error("{item}: {source}")]
    Item {
        /// Class, type, property or method being resolved.
        item: String,
        /// Underlying error.
        source: kurento_idl::ResolveError,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' in '{item}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Item referencing the type.
        item: String,
    },

    /// Parent class not declared by any loaded module.
    #[error("class '{class}' extends unknown class '{parent}'")]
    UnknownParent {
        /// Class name.
        class: String,
        /// Parent name.
        parent: String,
    },

    /// Inheritance chain that loops back on itself.
    #[error("inheritance cycle through class '{class}'")]
    InheritanceCycle {
        /// Class at which the cycle was detected.
        class: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Wraps an error with the module it was raised in.
    pub fn in_module(self, module: impl Into<String>) -> Self {
        Self::Module {
            module: module.into(),
            source: Box::new(self),
        }
    }

    /// Creates an item resolution error.
    pub fn item(item: impl Into<String>, source: kurento_idl::ResolveError) -> Self {
        Self::Item {
            item: item.into(),
            source,
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, item: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            item: item.into(),
        }
    }
}
