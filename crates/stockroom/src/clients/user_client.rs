//! # User Client
//!
//! Provides a high-level API for interacting with the `User` actor.
use crate::model::{User, UserDraft};
use crate::user_actor::UserError;
use collection_actor::{ActorClient, ResourceClient};
use tracing::{debug, instrument};

/// Client for the user directory.
#[derive(Clone)]
pub struct UserDirectory {
    inner: ResourceClient<User>,
}

impl UserDirectory {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add(&self, draft: UserDraft) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.create(draft).await?)
    }
}

impl ActorClient<User> for UserDirectory {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }
}
