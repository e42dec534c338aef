//! Items used by generated bindings.
//!
//! Generated units start with `use kurento_client::prelude::*;`.

pub use crate::connection::Connection;
pub use crate::error::{ClientError, TransportError};
pub use crate::message::{Response, RpcError};
pub use crate::object::{IMediaObject, ObjectBase, ServerClient, create};
pub use crate::params::{ParamValue, Params, merge_options, set_if_not_empty};
pub use async_trait::async_trait;
pub use serde_json::{Value, json};
pub use std::sync::Arc;
