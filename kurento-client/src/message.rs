//! JSON-RPC envelopes.
//!
//! Requests are `create`, `invoke` and `release` calls addressed to the media
//! server. Replies carry either a `result` object, whose `value` member holds
//! the return value, or an `error` object.

use crate::error::ClientError;
use crate::params::Params;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Method name of object creation requests.
pub const CREATE: &str = "create";

/// Method name of operation invocation requests.
pub const INVOKE: &str = "invoke";

/// Method name of object release requests.
pub const RELEASE: &str = "release";

/// Request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version.
    pub jsonrpc: String,
    /// Correlation id.
    pub id: u64,
    /// Request method.
    pub method: String,
    /// Method parameters.
    pub params: Value,
}

impl Request {
    /// Creates a request envelope.
    #[must_use]
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }

    /// Encodes the request as JSON text.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parameters of a `create` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    /// Wire type of the object to create.
    #[serde(rename = "type")]
    pub object_type: String,
    /// Constructor arguments.
    pub constructor_parameters: Params,
}

/// Parameters of an `invoke` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeParams {
    /// Handle of the target object.
    pub object: String,
    /// Operation name.
    pub operation: String,
    /// Operation arguments, sent only when the operation declares some.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_params: Option<Params>,
}

/// Parameters of a `release` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseParams {
    /// Handle of the object to release.
    pub object: String,
}

/// Error object of a failed reply.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("[{code}] {message}")]
pub struct RpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Additional error data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Reply envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    /// Protocol version.
    #[serde(default)]
    pub jsonrpc: String,
    /// Correlation id of the request being answered.
    #[serde(default)]
    pub id: Option<u64>,
    /// Result object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Map<String, Value>>,
    /// Error object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    /// Creates a successful reply.
    #[must_use]
    pub fn success(id: u64, result: Map<String, Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Creates a successful reply carrying `value`.
    #[must_use]
    pub fn with_value(id: u64, value: impl Into<Value>) -> Self {
        let mut result = Map::new();
        result.insert("value".to_string(), value.into());
        Self::success(id, result)
    }

    /// Creates a failed reply.
    #[must_use]
    pub fn failure(id: u64, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: None,
            error: Some(error),
        }
    }

    /// Decodes a reply from JSON text.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if the text is not a reply.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns the `value` member of the result.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.result.as_ref().and_then(|r| r.get("value"))
    }

    /// Converts the reply into its result object.
    ///
    /// # Errors
    /// Returns `ClientError::Rpc` if the reply carries an error.
    pub fn into_result(self) -> Result<Option<Map<String, Value>>, ClientError> {
        match self.error {
            Some(error) => Err(ClientError::Rpc(error)),
            None => Ok(self.result),
        }
    }

    /// Checks the reply of an operation that returns nothing.
    ///
    /// # Errors
    /// Returns `ClientError::Rpc` if the reply carries an error.
    pub fn into_unit(self) -> Result<(), ClientError> {
        self.into_result().map(|_| ())
    }

    /// Converts the `value` member into a primitive. A missing or `null`
    /// value yields the zero value.
    ///
    /// # Errors
    /// Returns `ClientError::Rpc` if the reply carries an error, or
    /// `ClientError::InvalidReply` if the value has the wrong type.
    pub fn into_value<T: DeserializeOwned + Default>(self) -> Result<T, ClientError> {
        let value = self
            .into_result()?
            .and_then(|mut result| result.remove("value"));
        match value {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Checks the reply of an operation returning a compound type and yields
    /// its zero value.
    ///
    /// # Errors
    /// Returns `ClientError::Rpc` if the reply carries an error.
    pub fn into_default<T: Default>(self) -> Result<T, ClientError> {
        self.into_result()?;
        Ok(T::default())
    }
}
