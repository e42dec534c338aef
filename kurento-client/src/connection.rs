//! Connection to a media server.
//!
//! One connection is shared by every object created through it. It assigns
//! correlation ids, keeps the table of requests awaiting a reply and routes
//! each reply to its caller.

use crate::builder::ConnectionBuilder;
use crate::error::{ClientError, TransportError};
use crate::message::{
    CREATE, CreateParams, INVOKE, InvokeParams, RELEASE, ReleaseParams, Request, Response,
};
use crate::pending::PendingRequests;
use crate::transport::Transport;
use futures::{Stream, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Connection to a media server.
pub struct Connection {
    transport: Arc<dyn Transport>,
    pending: PendingRequests,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .field("pending", &self.pending.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Connection {
    /// Creates a connection over `transport`, numbering requests from 1.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_start_id(transport, 1)
    }

    /// Creates a connection numbering requests from `start_id`.
    #[must_use]
    pub fn with_start_id(transport: Arc<dyn Transport>, start_id: u64) -> Self {
        Self {
            transport,
            pending: PendingRequests::new(),
            next_id: AtomicU64::new(start_id),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns a builder for a connection over `transport`.
    #[must_use]
    pub fn builder(transport: Arc<dyn Transport>) -> ConnectionBuilder {
        ConnectionBuilder::new(transport)
    }

    /// Allocates the next correlation id.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Builds a `create` request with a fresh id.
    ///
    /// # Errors
    /// Returns `ClientError::Transport` if the parameters cannot be encoded.
    pub fn create_request(&self, params: CreateParams) -> Result<Request, ClientError> {
        self.build_request(CREATE, &params)
    }

    /// Builds an `invoke` request with a fresh id.
    ///
    /// # Errors
    /// Returns `ClientError::Transport` if the parameters cannot be encoded.
    pub fn invoke_request(&self, params: InvokeParams) -> Result<Request, ClientError> {
        self.build_request(INVOKE, &params)
    }

    /// Builds a `release` request with a fresh id.
    ///
    /// # Errors
    /// Returns `ClientError::Transport` if the parameters cannot be encoded.
    pub fn release_request(&self, params: ReleaseParams) -> Result<Request, ClientError> {
        self.build_request(RELEASE, &params)
    }

    fn build_request<P: Serialize>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<Request, ClientError> {
        let params: Value = serde_json::to_value(params).map_err(TransportError::Encode)?;
        Ok(Request::new(self.next_id(), method, params))
    }

    /// Sends a request and waits for its reply.
    ///
    /// Dropping the returned future before the reply arrives retires the
    /// request's slot.
    ///
    /// # Errors
    /// Returns `ClientError::ConnectionClosed` if the connection is closed
    /// before the reply arrives, or `ClientError::Transport` if sending fails.
    pub async fn request(&self, request: Request) -> Result<Response, ClientError> {
        if self.is_closed() {
            return Err(ClientError::ConnectionClosed);
        }

        let id = request.id;
        let reply = self.pending.register(id);
        let _slot = SlotGuard {
            pending: &self.pending,
            id,
        };
        if self.is_closed() {
            return Err(ClientError::ConnectionClosed);
        }

        tracing::debug!("Sending {} request {}", request.method, id);
        self.transport.send(&request).await?;

        reply.await.map_err(|_| ClientError::ConnectionClosed)
    }

    /// Routes a reply to the caller waiting for it.
    ///
    /// Returns false if no caller waits for the reply's id, which is the case
    /// for unknown ids and for ids already answered.
    pub fn dispatch(&self, response: Response) -> bool {
        let Some(id) = response.id else {
            tracing::warn!("Dropping reply without id");
            return false;
        };

        if self.pending.resolve(id, response) {
            true
        } else {
            tracing::warn!("Dropping reply for unknown request {}", id);
            false
        }
    }

    /// Decodes a JSON text frame and routes it. Server-initiated messages,
    /// which carry a `method`, are skipped.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidReply` if the frame is not a reply.
    pub fn dispatch_json(&self, text: &str) -> Result<bool, ClientError> {
        let value: Value = serde_json::from_str(text)?;
        if value.get("method").is_some() {
            tracing::debug!("Skipping server message");
            return Ok(false);
        }
        let response: Response = serde_json::from_value(value)?;
        Ok(self.dispatch(response))
    }

    /// Routes every frame of `incoming` until it ends. The connection is then
    /// closed: waiting requests fail and later ones are refused.
    pub async fn serve<S>(&self, incoming: S)
    where
        S: Stream<Item = String> + Send,
    {
        let mut incoming = std::pin::pin!(incoming);
        while let Some(frame) = incoming.next().await {
            if let Err(e) = self.dispatch_json(&frame) {
                tracing::warn!("Invalid frame: {}", e);
            }
        }

        self.closed.store(true, Ordering::Release);
        let failed = self.pending.clear();
        tracing::info!("Incoming stream ended with {} requests pending", failed);
    }

    /// Closes the connection, failing every pending request with
    /// `ClientError::ConnectionClosed`.
    ///
    /// # Errors
    /// Returns `ClientError::Transport` if the transport fails to close.
    pub async fn close(&self) -> Result<(), ClientError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let failed = self.pending.clear();
        tracing::info!("Closing connection, {} requests pending", failed);
        self.transport.close().await?;
        Ok(())
    }

    /// Returns true once the connection is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Returns the number of requests awaiting a reply.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Retires a pending slot when the request waiting on it goes away,
/// whether it completed, failed or was cancelled.
struct SlotGuard<'a> {
    pending: &'a PendingRequests,
    id: u64,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.pending.remove(self.id);
    }
}
