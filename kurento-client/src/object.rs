//! Remote object base.
//!
//! Every generated class embeds an [`ObjectBase`], directly or through its
//! parent, and implements [`IMediaObject`] to expose it.

use crate::connection::Connection;
use crate::error::ClientError;
use crate::message::{CreateParams, InvokeParams, ReleaseParams, Response};
use crate::params::Params;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Identity of a server-side object: its handle and the connection it lives
/// on.
#[derive(Clone, Default)]
pub struct ObjectBase {
    connection: Option<Arc<Connection>>,
    id: String,
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase")
            .field("id", &self.id)
            .field("connected", &self.connection.is_some())
            .finish()
    }
}

impl ObjectBase {
    /// Creates the base of an existing object.
    #[must_use]
    pub fn new(connection: Arc<Connection>, id: impl Into<String>) -> Self {
        Self {
            connection: Some(connection),
            id: id.into(),
        }
    }

    /// Creates a base carrying a handle but no connection.
    #[must_use]
    pub fn detached(id: impl Into<String>) -> Self {
        Self {
            connection: None,
            id: id.into(),
        }
    }

    /// Returns the object handle; empty until the object is created.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true once the object exists on the server.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.connection.is_some() && !self.id.is_empty()
    }

    /// Returns the connection the object lives on.
    ///
    /// # Errors
    /// Returns `ClientError::NotCreated` if the object has no connection.
    pub fn connection(&self) -> Result<&Arc<Connection>, ClientError> {
        self.connection.as_ref().ok_or(ClientError::NotCreated)
    }

    /// Binds the object to its connection and handle.
    pub fn attach(&mut self, connection: Arc<Connection>, id: impl Into<String>) {
        self.connection = Some(connection);
        self.id = id.into();
    }

    /// Invokes an operation on the object.
    ///
    /// # Errors
    /// Returns `ClientError::NotCreated` if the object does not exist yet, or
    /// any error of the request.
    pub async fn invoke(
        &self,
        operation: &str,
        params: Option<Params>,
    ) -> Result<Response, ClientError> {
        if !self.is_created() {
            return Err(ClientError::NotCreated);
        }
        let connection = self.connection()?;
        let request = connection.invoke_request(InvokeParams {
            object: self.id.clone(),
            operation: operation.to_string(),
            operation_params: params,
        })?;
        connection.request(request).await
    }

    /// Releases the object on the server.
    ///
    /// # Errors
    /// Returns `ClientError::NotCreated` if the object does not exist, or any
    /// error of the request.
    pub async fn release(&self) -> Result<(), ClientError> {
        if !self.is_created() {
            return Err(ClientError::NotCreated);
        }
        let connection = self.connection()?;
        let request = connection.release_request(ReleaseParams {
            object: self.id.clone(),
        })?;
        connection.request(request).await?.into_unit()
    }
}

/// Implemented by every client-side proxy of a server object.
pub trait IMediaObject: fmt::Debug + Send + Sync {
    /// Returns the embedded object base.
    fn object(&self) -> &ObjectBase;

    /// Returns the embedded object base mutably.
    fn object_mut(&mut self) -> &mut ObjectBase;

    /// Returns the type name sent in `create` requests.
    fn wire_type(&self) -> &'static str;

    /// Builds the constructor arguments of a `create` request issued from
    /// `from`, overlaid with the caller's `options`.
    fn constructor_params(&self, from: &dyn IMediaObject, options: Params) -> Params;

    /// Returns the object handle.
    fn handle(&self) -> &str {
        self.object().id()
    }
}

/// Creates `target` on the server, issued from the existing object `from`.
///
/// On success `target` shares the connection of `from` and carries the
/// handle returned by the server.
///
/// # Errors
/// Returns `ClientError::NotCreated` if `from` has no connection,
/// `ClientError::MissingHandle` if the reply has no handle, or any error of
/// the request.
pub async fn create<T: IMediaObject + ?Sized>(
    from: &dyn IMediaObject,
    target: &mut T,
    options: Params,
) -> Result<(), ClientError> {
    let connection = Arc::clone(from.object().connection()?);
    let params = CreateParams {
        object_type: target.wire_type().to_string(),
        constructor_parameters: target.constructor_params(from, options),
    };
    let request = connection.create_request(params)?;
    let response = connection.request(request).await?;

    let handle = response
        .into_result()?
        .and_then(|mut result| result.remove("value"));
    match handle {
        Some(Value::String(id)) if !id.is_empty() => {
            tracing::debug!("Created {} {}", target.wire_type(), id);
            target.object_mut().attach(connection, id);
            Ok(())
        }
        _ => Err(ClientError::MissingHandle),
    }
}

/// Entry point of a connection: the object every first `create` is issued
/// from.
#[derive(Debug, Clone)]
pub struct ServerClient {
    base: ObjectBase,
}

impl ServerClient {
    /// Creates a client over `connection`.
    #[must_use]
    pub fn new(connection: Arc<Connection>) -> Self {
        Self {
            base: ObjectBase::new(connection, String::new()),
        }
    }

    /// Closes the underlying connection.
    ///
    /// # Errors
    /// Returns `ClientError` if the transport fails to close.
    pub async fn close(&self) -> Result<(), ClientError> {
        self.base.connection()?.close().await
    }
}

impl IMediaObject for ServerClient {
    fn object(&self) -> &ObjectBase {
        &self.base
    }

    fn object_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn wire_type(&self) -> &'static str {
        "ServerClient"
    }

    fn constructor_params(&self, _from: &dyn IMediaObject, options: Params) -> Params {
        options
    }
}
