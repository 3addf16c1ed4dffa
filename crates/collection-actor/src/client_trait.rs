//! # ActorClient Trait
//!
//! Common interface for collection-specific clients: default `get` and `list`
//! built on top of a generic [`ResourceClient`], with framework errors mapped into
//! the client's own error enum.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the read operations.
///
/// # Example
///
/// ```rust
/// use collection_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient, Stamp};
/// use std::convert::Infallible;
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: String, label: String }
///
/// impl ActorEntity for Tag {
///     type Id = String;
///     type Create = String;
///     type Update = Infallible;
///     type Action = Infallible;
///     type ActionResult = ();
///     type Error = Infallible;
///
///     fn id(&self) -> &String { &self.id }
///     fn from_create_params(stamp: Stamp, label: String, _: &[Self]) -> Result<Self, Infallible> {
///         Ok(Self { id: stamp.id, label })
///     }
///     fn on_update(&mut self, update: Infallible, _: &[Self]) -> Result<(), Infallible> { match update {} }
///     fn handle_action(_: &mut Vec<Self>, action: Infallible) -> Result<(), Infallible> { match action {} }
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("tag store unavailable: {0}")]
/// struct TagError(String);
///
/// impl From<FrameworkError<Infallible>> for TagError {
///     fn from(e: FrameworkError<Infallible>) -> Self { TagError(e.to_string()) }
/// }
///
/// struct TagClient { inner: ResourceClient<Tag> }
///
/// impl ActorClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &ResourceClient<Tag> { &self.inner }
/// }
///
/// async fn usage(client: TagClient) {
///     // get() and list() come for free
///     let _ = client.get("1".to_string()).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The collection-specific error type.
    type Error: From<FrameworkError<T::Error>> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().get(id).await?)
    }

    /// Fetch the whole collection in stored order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().list().await?)
    }
}
