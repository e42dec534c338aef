//! # Kurento IDL
//!
//! Loader and type system for Kurento `kmd.json` interface descriptions.
//!
//! This crate provides:
//! - The IDL model (remote classes, complex types, properties, methods)
//! - Loading and discovery of core and elements descriptions
//! - The complex type registry, built once over every module
//! - Resolution of raw type descriptors into target types

pub mod error;
pub mod loader;
pub mod registry;
pub mod resolve;
pub mod types;

pub use error::{ParseError, ResolveError};
pub use loader::{
    ELEMENTS_PREFIX, KMD_SUFFIX, discover, file_name, load, load_named, load_str, output_name,
};
pub use registry::{Registry, RegistryBuilder};
pub use resolve::{
    PrimitiveKind, ResolvedField, ResolvedType, Resolver, is_identifier, rust_ident,
    to_snake_case,
};
pub use types::{
    ComplexType, Constructor, Method, Module, Param, Property, RemoteClass, Return, TypeFormat,
};
