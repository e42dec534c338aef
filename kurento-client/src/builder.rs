//! Connection builder.

use crate::connection::Connection;
use crate::object::ServerClient;
use crate::transport::Transport;
use std::sync::Arc;

/// Builder for configuring and creating a connection.
pub struct ConnectionBuilder {
    transport: Arc<dyn Transport>,
    start_id: u64,
}

impl ConnectionBuilder {
    /// Creates a new builder over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            start_id: 1,
        }
    }

    /// Sets the first correlation id.
    #[must_use]
    pub fn start_id(mut self, id: u64) -> Self {
        self.start_id = id;
        self
    }

    /// Builds the shared connection.
    #[must_use]
    pub fn build(self) -> Arc<Connection> {
        Arc::new(Connection::with_start_id(self.transport, self.start_id))
    }

    /// Builds the connection and the client that creates the first objects.
    #[must_use]
    pub fn build_client(self) -> ServerClient {
        ServerClient::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::IMediaObject;
    use crate::transport::ChannelTransport;

    #[test]
    fn test_builder_start_id() {
        let (transport, _rx) = ChannelTransport::new();
        let connection = ConnectionBuilder::new(Arc::new(transport))
            .start_id(100)
            .build();

        assert_eq!(connection.next_id(), 100);
        assert_eq!(connection.next_id(), 101);
    }

    #[test]
    fn test_builder_default_start_id() {
        let (transport, _rx) = ChannelTransport::new();
        let connection = Connection::builder(Arc::new(transport)).build();
        assert_eq!(connection.next_id(), 1);
    }

    #[test]
    fn test_build_client() {
        let (transport, _rx) = ChannelTransport::new();
        let client = ConnectionBuilder::new(Arc::new(transport)).build_client();

        assert_eq!(client.wire_type(), "ServerClient");
        assert!(client.object().connection().is_ok());
        assert_eq!(client.handle(), "");
    }
}
