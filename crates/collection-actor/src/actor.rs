//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the task that owns one stored
//! collection. It is the "Server" side of the Actor Model: requests arrive on
//! a channel and are handled strictly one at a time, so no lock guards the
//! collection.

use crate::client::ResourceClient;
use crate::entity::{ActorEntity, Placement};
use crate::error::FrameworkError;
use crate::ids::MonotonicIds;
use crate::message::ResourceRequest;
use crate::repository::Repository;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages one persisted collection.
///
/// # Architecture Note
/// The actor keeps no records in memory between requests. Each request loads
/// the full collection through its [`Repository`], applies the entity's hook,
/// and writes the full collection back. Storage is the only source of truth.
///
/// ## Operations
///
/// * **Create**:
///     1. Loads the collection.
///     2. Draws a [`Stamp`](crate::Stamp) from the shared id generator.
///     3. Calls `T::from_create_params` with the stamp, payload and current records.
///     4. Appends or prepends the record per `T::PLACEMENT` and saves.
///     5. Returns the stored record.
///
/// * **Get** / **List**: load and return, never write.
///
/// * **Update**:
///     1. Loads the collection and finds the record by id.
///     2. Runs `on_update` on a copy; a rejection leaves storage untouched.
///     3. Replaces the record at the same position and saves.
///
/// * **Action**:
///     1. Loads the collection.
///     2. Runs `T::handle_action` over it.
///     3. Saves only when the action succeeded.
///
/// # Usage Pattern
///
/// ```rust
/// use collection_actor::{ActorEntity, DocumentRepository, MemoryStore, MonotonicIds, ResourceActor, Stamp};
/// use serde::{Deserialize, Serialize};
/// use std::convert::Infallible;
/// use std::sync::Arc;
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Note { id: String, text: String }
///
/// impl ActorEntity for Note {
///     type Id = String;
///     type Create = String;
///     type Update = Infallible;
///     type Action = Infallible;
///     type ActionResult = ();
///     type Error = Infallible;
///
///     fn id(&self) -> &String { &self.id }
///     fn from_create_params(stamp: Stamp, text: String, _: &[Self]) -> Result<Self, Infallible> {
///         Ok(Self { id: stamp.id, text })
///     }
///     fn on_update(&mut self, update: Infallible, _: &[Self]) -> Result<(), Infallible> { match update {} }
///     fn handle_action(_: &mut Vec<Self>, action: Infallible) -> Result<(), Infallible> { match action {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let repo = DocumentRepository::<Note>::new(Arc::new(MemoryStore::new()), "@notes");
///     let (actor, client) = ResourceActor::new(10, Arc::new(repo), Arc::new(MonotonicIds::new()));
///     tokio::spawn(actor.run());
///
///     let note = client.create("hello".to_string()).await.unwrap();
///     assert_eq!(client.list().await.unwrap().len(), 1);
///     assert_eq!(client.get(note.id).await.unwrap().unwrap().text, "hello");
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    repository: Arc<dyn Repository<T>>,
    ids: Arc<MonotonicIds>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity. When it is full, client calls wait
    /// for space.
    pub fn new(
        buffer_size: usize,
        repository: Arc<dyn Repository<T>>,
        ids: Arc<MonotonicIds>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            repository,
            ids,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Product" instead of "stockroom::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        let mut handled: u64 = 0;
        while let Some(msg) = self.receiver.recv().await {
            handled += 1;
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params).await;
                    match &result {
                        Ok((item, size)) => info!(entity_type, id = %item.id(), size, "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result.map(|(item, _)| item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = self
                        .repository
                        .load_all()
                        .await
                        .map(|items| items.into_iter().find(|item| item.id() == &id))
                        .map_err(FrameworkError::from);
                    let found = matches!(result, Ok(Some(_)));
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { respond_to } => {
                    let result = self.repository.load_all().await.map_err(FrameworkError::from);
                    if let Ok(items) = &result {
                        debug!(entity_type, size = items.len(), "List");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(FrameworkError::NotFound(_)) => warn!(entity_type, %id, "Not found"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { action, respond_to } => {
                    debug!(entity_type, ?action, "Action");
                    let result = self.action(action).await;
                    match &result {
                        Ok(_) => info!(entity_type, "Action ok"),
                        Err(e) => warn!(entity_type, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, handled, "Shutdown");
    }

    async fn create(&self, params: T::Create) -> Result<(T, usize), FrameworkError<T::Error>> {
        let mut items = self.repository.load_all().await?;
        let stamp = self.ids.next_stamp();
        let item = T::from_create_params(stamp, params, &items).map_err(FrameworkError::Rejected)?;
        match T::PLACEMENT {
            Placement::Append => items.push(item.clone()),
            Placement::Prepend => items.insert(0, item.clone()),
        }
        self.repository.save_all(&items).await?;
        Ok((item, items.len()))
    }

    async fn update(&self, id: &T::Id, update: T::Update) -> Result<T, FrameworkError<T::Error>> {
        let mut items = self.repository.load_all().await?;
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        let mut edited = items[index].clone();
        edited
            .on_update(update, &items)
            .map_err(FrameworkError::Rejected)?;
        items[index] = edited.clone();
        self.repository.save_all(&items).await?;
        Ok(edited)
    }

    async fn action(&self, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let mut items = self.repository.load_all().await?;
        let outcome = T::handle_action(&mut items, action).map_err(FrameworkError::Rejected)?;
        self.repository.save_all(&items).await?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Stamp;
    use crate::repository::DocumentRepository;
    use crate::storage::{KeyValueStore, MemoryStore};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        id: String,
        name: String,
        value: u32,
    }

    #[derive(Debug)]
    enum CounterAction {
        Bump { name: String, by: u32 },
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum CounterError {
        #[error("name taken")]
        Taken,
        #[error("no counter named {0}")]
        Unknown(String),
    }

    impl ActorEntity for Counter {
        type Id = String;
        type Create = String;
        type Update = String;
        type Action = CounterAction;
        type ActionResult = u32;
        type Error = CounterError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(
            stamp: Stamp,
            name: String,
            existing: &[Self],
        ) -> Result<Self, CounterError> {
            if existing.iter().any(|c| c.name == name) {
                return Err(CounterError::Taken);
            }
            Ok(Self {
                id: stamp.id,
                name,
                value: 0,
            })
        }

        fn on_update(&mut self, name: String, existing: &[Self]) -> Result<(), CounterError> {
            if existing.iter().any(|c| c.name == name && c.id != self.id) {
                return Err(CounterError::Taken);
            }
            self.name = name;
            Ok(())
        }

        fn handle_action(items: &mut Vec<Self>, action: CounterAction) -> Result<u32, CounterError> {
            match action {
                CounterAction::Bump { name, by } => {
                    let counter = items
                        .iter_mut()
                        .find(|c| c.name == name)
                        .ok_or(CounterError::Unknown(name))?;
                    counter.value += by;
                    Ok(counter.value)
                }
            }
        }
    }

    fn spawn_counter(store: Arc<MemoryStore>) -> ResourceClient<Counter> {
        let repo = DocumentRepository::<Counter>::new(store, "@counters");
        let (actor, client) = ResourceActor::new(8, Arc::new(repo), Arc::new(MonotonicIds::new()));
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_create_persists_and_rejection_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let client = spawn_counter(store.clone());

        let a = client.create("a".to_string()).await.unwrap();
        let before = store.get("@counters").await.unwrap();

        let err = client.create("a".to_string()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(CounterError::Taken)));
        assert_eq!(store.get("@counters").await.unwrap(), before);

        assert_eq!(client.get(a.id.clone()).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_update_keeps_position_and_reports_missing_id() {
        let store = Arc::new(MemoryStore::new());
        let client = spawn_counter(store);

        let a = client.create("a".to_string()).await.unwrap();
        client.create("b".to_string()).await.unwrap();

        let renamed = client.update(a.id.clone(), "z".to_string()).await.unwrap();
        assert_eq!(renamed.id, a.id);

        let names: Vec<String> = client.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["z", "b"]);

        let err = client.update("nope".to_string(), "q".to_string()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(id) if id == "nope"));

        let err = client.update(a.id, "b".to_string()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(CounterError::Taken)));
    }

    #[tokio::test]
    async fn test_failed_action_leaves_collection_untouched() {
        let store = Arc::new(MemoryStore::new());
        let client = spawn_counter(store);
        client.create("a".to_string()).await.unwrap();

        let value = client
            .perform_action(CounterAction::Bump {
                name: "a".into(),
                by: 3,
            })
            .await
            .unwrap();
        assert_eq!(value, 3);

        let err = client
            .perform_action(CounterAction::Bump {
                name: "missing".into(),
                by: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(CounterError::Unknown(_))));
        assert_eq!(client.list().await.unwrap()[0].value, 3);
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let repo = DocumentRepository::<Counter>::new(Arc::new(MemoryStore::new()), "@counters");
        let (actor, client) = ResourceActor::new(1, Arc::new(repo), Arc::new(MonotonicIds::new()));
        drop(actor);

        let err = client.list().await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorClosed));
    }
}
