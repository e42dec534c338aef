//! # Kurento Codegen
//!
//! Rust client binding generation from Kurento IDL descriptions.
//!
//! This crate provides:
//! - Capability traits, structs and call stubs for remote classes
//! - Enum and struct generation for complex types
//! - Documentation normalization
//! - One output unit per module plus a shared complex types unit
//! - A namespace unit tying the units into one module
//! - Build script integration

pub mod docs;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod hierarchy;
pub mod rust;

pub use emitter::{COMPLEX_TYPES_UNIT, Emitter, NAMESPACE_UNIT, OutputUnit, write_units};
pub use error::CodegenError;
pub use generator::{Generator, GeneratorBuilder, GeneratorConfig};
pub use hierarchy::ClassHierarchy;

use kurento_idl::Module;
use std::path::Path;

/// Generates the output units for already loaded modules with the default
/// configuration.
///
/// # Errors
/// Returns `CodegenError` if resolution or generation fails.
pub fn generate_from_modules(modules: &[Module]) -> Result<Vec<OutputUnit>, CodegenError> {
    Generator::default().generate_modules(modules)
}

/// Generates the output units for a core description and a set of elements
/// descriptions.
///
/// # Arguments
/// * `core` - Path to the core description
/// * `elements` - Paths to elements descriptions
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_files(
    core: &Path,
    elements: &[&Path],
) -> Result<Vec<OutputUnit>, CodegenError> {
    let mut modules = vec![kurento_idl::load(core)?];
    for path in elements {
        modules.push(kurento_idl::load(path)?);
    }
    generate_from_modules(&modules)
}
