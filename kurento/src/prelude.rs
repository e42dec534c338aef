//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use kurento::prelude::*;
//! ```

// Runtime types
pub use kurento_client::prelude::*;
pub use kurento_client::{ConnectionBuilder, Request, Transport, TransportError};

// Generator types
pub use kurento_codegen::{CodegenError, Generator, GeneratorBuilder, GeneratorConfig, OutputUnit};
