//! Transport abstraction.
//!
//! A transport only carries requests to the media server. Replies flow back
//! through [`Connection::dispatch`](crate::Connection::dispatch) or
//! [`Connection::serve`](crate::Connection::serve), driven by whoever owns
//! the receiving side.

use crate::error::TransportError;
use crate::message::Request;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Outgoing half of a connection to the media server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request.
    ///
    /// # Errors
    /// Returns `TransportError` if the request cannot be sent.
    async fn send(&self, request: &Request) -> Result<(), TransportError>;

    /// Closes the transport.
    ///
    /// # Errors
    /// Returns `TransportError` if closing fails.
    async fn close(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// In-process transport handing requests to a channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Request>,
}

impl ChannelTransport {
    /// Creates a transport and the receiver of the requests it sends.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Request>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, request: &Request) -> Result<(), TransportError> {
        self.tx
            .send(request.clone())
            .map_err(|_| TransportError::Closed)
    }
}

/// Transport sending each request as a JSON text frame.
#[derive(Debug, Clone)]
pub struct TextTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl TextTransport {
    /// Creates a transport and the receiver of the frames it sends.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Transport for TextTransport {
    async fn send(&self, request: &Request) -> Result<(), TransportError> {
        let frame = request.to_json()?;
        self.tx.send(frame).map_err(|_| TransportError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_channel_transport() {
        let (transport, mut rx) = ChannelTransport::new();
        let request = Request::new(1, "invoke", json!({"object": "a"}));

        transport.send(&request).await.expect("send");
        assert_eq!(rx.recv().await, Some(request));
    }

    #[tokio::test]
    async fn test_channel_transport_closed() {
        let (transport, rx) = ChannelTransport::new();
        drop(rx);

        let result = transport.send(&Request::new(1, "invoke", json!({}))).await;
        assert!(matches!(result, Err(TransportError::Closed)));
    }

    #[tokio::test]
    async fn test_text_transport() {
        let (transport, mut rx) = TextTransport::new();
        transport
            .send(&Request::new(2, "create", json!({"type": "MediaPipeline"})))
            .await
            .expect("send");

        let frame = rx.recv().await.expect("frame");
        let value: serde_json::Value = serde_json::from_str(&frame).expect("json");
        assert_eq!(value["id"], json!(2));
        assert_eq!(value["method"], json!("create"));
    }
}
