//! # Messages
//!
//! Request types sent from a [`ResourceClient`](crate::ResourceClient) to its actor.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot response channel carrying the entity's own rejection type.
pub type Response<R, E> = oneshot::Sender<Result<R, FrameworkError<E>>>;

/// Internal message type sent to the actor to request operations.
///
/// Every variant maps to one load / mutate / save cycle over the stored
/// collection, except `Get` and `List`, which only load.
///
/// - **Create**: builds a record from [`ActorEntity::Create`] and stores it.
/// - **Get**: fetches one record by id.
/// - **List**: fetches the whole collection in stored order.
/// - **Update**: applies [`ActorEntity::Update`] to one record.
/// - **Action**: runs an [`ActorEntity::Action`] against the collection.
///
/// Records are never deleted, so there is no delete request.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T, T::Error>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}
