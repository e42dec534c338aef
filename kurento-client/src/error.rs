//! Error types for client operations.

use crate::message::RpcError;
use thiserror::Error;

/// Error type for transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Transport closed.
    #[error("transport closed")]
    Closed,
}

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error returned by the media server.
    #[error("server error: {0}")]
    Rpc(#[from] RpcError),

    /// Connection closed before the reply arrived.
    #[error("connection closed")]
    ConnectionClosed,

    /// Object used before it was created on the server.
    #[error("object not created")]
    NotCreated,

    /// Create reply without an object handle.
    #[error("create reply carried no object handle")]
    MissingHandle,

    /// Reply that does not match the expected shape.
    #[error("invalid reply: {0}")]
    InvalidReply(#[from] serde_json::Error),
}
