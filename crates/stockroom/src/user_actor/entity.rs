//! [`ActorEntity`] implementation for [`User`].

use crate::model::{User, UserDraft, UserId, ValidationError};
use collection_actor::{ActorEntity, Stamp};
use std::convert::Infallible;

impl ActorEntity for User {
    type Id = UserId;
    type Create = UserDraft;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Error = ValidationError;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn from_create_params(stamp: Stamp, draft: UserDraft, _: &[Self]) -> Result<Self, ValidationError> {
        let (name, email) = draft.validate()?;
        Ok(Self {
            id: UserId(stamp.id),
            name,
            email,
            created_at: stamp.at,
        })
    }

    fn on_update(&mut self, update: Infallible, _: &[Self]) -> Result<(), ValidationError> {
        match update {}
    }

    fn handle_action(_: &mut Vec<Self>, action: Infallible) -> Result<(), ValidationError> {
        match action {}
    }
}
