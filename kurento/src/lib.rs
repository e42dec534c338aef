//! # Kurento
//!
//! Strongly-typed Kurento client bindings for Rust.
//!
//! Kurento media servers describe their remote objects in `kmd.json`
//! interface descriptions. This crate turns those descriptions into Rust
//! traits, structs and async call stubs, and provides the JSON-RPC runtime
//! the generated code calls into.
//!
//! ## Quick Start
//!
//! Generate the bindings once with the `kurento-gen` binary, run from the
//! directory holding `kms-core` and `kms-elements`:
//!
//! ```text
//! $ kurento-gen
//! ```
//!
//! or from a build script:
//!
//! ```ignore
//! let units = kurento::codegen::Generator::builder()
//!     .core_path("idl/core.kmd.json")
//!     .elements_dir("idl")
//!     .output_dir(std::env::var("OUT_DIR")?)
//!     .build()
//!     .run()?;
//! ```
//!
//! then `include!` every unit into one module and drive it:
//!
//! ```ignore
//! use kurento::prelude::*;
//!
//! let client = ConnectionBuilder::new(transport).build_client();
//! let mut pipeline = MediaPipeline::default();
//! create(&client, &mut pipeline, Params::new()).await?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`idl`] - IDL model, loading, complex type registry and type resolution
//! - [`codegen`] - Rust code generation from IDL modules
//! - [`client`] - JSON-RPC runtime used by generated code

pub mod prelude;

/// IDL model, loading and type resolution.
pub mod idl {
    pub use kurento_idl::*;
}

/// Code generation from IDL modules.
pub mod codegen {
    pub use kurento_codegen::*;
}

/// JSON-RPC runtime.
pub mod client {
    pub use kurento_client::*;
}

// Re-export commonly used items at the crate root
pub use kurento_client::{
    ChannelTransport, ClientError, Connection, ConnectionBuilder, ServerClient, Transport,
};
pub use kurento_codegen::{CodegenError, Generator, GeneratorBuilder, GeneratorConfig};
