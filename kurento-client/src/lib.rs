//! # Kurento Client
//!
//! JSON-RPC runtime for generated Kurento client bindings.
//!
//! This crate provides:
//! - Request and reply envelopes for `create`, `invoke` and `release`
//! - A shared connection matching replies to their requests
//! - The transport abstraction and in-process transports
//! - The object base and parameter encoding used by generated code

pub mod builder;
pub mod connection;
pub mod error;
pub mod message;
pub mod object;
pub mod params;
pub mod pending;
pub mod prelude;
pub mod transport;

pub use builder::ConnectionBuilder;
pub use connection::Connection;
pub use error::{ClientError, TransportError};
pub use message::{CreateParams, InvokeParams, ReleaseParams, Request, Response, RpcError};
pub use object::{IMediaObject, ObjectBase, ServerClient, create};
pub use params::{ParamValue, Params, merge_options, set_if_not_empty};
pub use pending::PendingRequests;
pub use transport::{ChannelTransport, TextTransport, Transport};
